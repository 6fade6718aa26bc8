//! Text Extractor: turns an uploaded PDF into plain text.
//!
//! Carried in `AppState` as `Arc<dyn TextExtractor>`, so handlers never touch
//! the PDF library directly.

use async_trait::async_trait;
use tracing::{debug, warn};

/// Extraction never errors: a document that cannot be read, or that yields
/// no text, is `None` and the caller decides how to report it.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, bytes: Vec<u8>) -> Option<String>;
}

/// `pdf-extract` backed extractor. Parsing runs on the blocking pool; errors
/// and panics from the PDF library both become `None`.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, bytes: Vec<u8>) -> Option<String> {
        let size = bytes.len();
        let result =
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes)).await;

        let raw = match result {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!("Error parsing PDF ({size} bytes): {e}");
                return None;
            }
            Err(e) => {
                warn!("PDF parser aborted ({size} bytes): {e}");
                return None;
            }
        };

        let text = normalize_pages(&raw);
        debug!("Extracted {} characters from {size} byte PDF", text.len());
        non_empty(text)
    }
}

/// Page breaks come through as form feeds; callers work line by line.
pub fn normalize_pages(raw: &str) -> String {
    raw.replace('\u{000C}', "\n")
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
