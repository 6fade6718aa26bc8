use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::resume::parser::parse_resume;
use crate::resume::schema::ParsedResume;
use crate::state::AppState;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
const FILE_FIELD: &str = "file";

/// POST /api/upload
///
/// Multipart upload of a single PDF under the `file` field. The content type is
/// checked before the body is read, and parsed output must pass schema
/// validation before it is returned.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParsedResume>, AppError> {
    let field = loop {
        let next = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?;
        match next {
            Some(field) if field.name() == Some(FILE_FIELD) => break field,
            Some(_) => continue,
            None => {
                return Err(AppError::Validation(
                    "Missing required file field 'file'".to_string(),
                ))
            }
        }
    };

    let content_type = field.content_type().unwrap_or_default().to_string();
    if content_type != PDF_CONTENT_TYPE {
        warn!("Rejected upload with content type '{content_type}'");
        return Err(AppError::UnsupportedMediaType(
            "Invalid file type. Only PDF is supported for now.".to_string(),
        ));
    }

    let filename = field.file_name().unwrap_or("upload.pdf").to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read uploaded file: {e}")))?;

    let text = state
        .extractor
        .extract(bytes.to_vec())
        .await
        .ok_or_else(|| AppError::Extraction("Could not extract text from this PDF.".to_string()))?;

    let parsed = parse_resume(&text);
    parsed.validate()?;

    info!(
        "Parsed resume '{filename}': {} chars, {} skills, {} years experience",
        text.len(),
        parsed.skills.value.len(),
        parsed.work_experience.years
    );

    Ok(Json(parsed))
}
