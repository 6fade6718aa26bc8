//! Section extraction: isolates a named block (Experience, Education, ...)
//! from free-form résumé text in a single forward pass over its lines.

use once_cell::sync::Lazy;
use regex::Regex;

/// Lines at or above this trimmed length are treated as prose, never as headers.
pub const MAX_HEADER_LEN: usize = 30;

pub const EXPERIENCE_KEYWORDS: &[&str] = &["EXPERIENCE", "WORK HISTORY", "EMPLOYMENT"];
pub const EDUCATION_KEYWORDS: &[&str] = &["EDUCATION", "QUALIFICATION", "ACADEMIC"];
pub const PROJECT_KEYWORDS: &[&str] = &["PROJECTS", "PERSONAL PROJECTS"];

/// Headers that terminate any section being captured.
pub const COMMON_HEADERS: &[&str] = &[
    "EXPERIENCE",
    "WORK HISTORY",
    "EMPLOYMENT",
    "EDUCATION",
    "QUALIFICATION",
    "ACADEMIC",
    "PROJECTS",
    "SKILLS",
    "CERTIFICATIONS",
    "ACHIEVEMENTS",
    "AWARDS",
    "SUMMARY",
    "OBJECTIVE",
    "PROFILE",
    "CONTACT",
    "LANGUAGES",
    "INTERESTS",
    "HOBBIES",
    "PUBLICATIONS",
    "REFERENCES",
];

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b20\d{2}\b").expect("valid year regex"));

fn is_header(line: &str, keywords: &[&str]) -> bool {
    let trimmed = line.trim();
    if trimmed.chars().count() >= MAX_HEADER_LEN {
        return false;
    }
    let upper = trimmed.to_uppercase();
    keywords.iter().any(|k| upper.contains(k))
}

/// Returns the lines between the first header matching `keywords` and the next
/// common header (or end of text). Header lines are excluded, captured lines are
/// trimmed and blank ones dropped. Empty string when no header matches.
pub fn extract_section(text: &str, keywords: &[&str]) -> String {
    let mut captured: Vec<&str> = Vec::new();
    let mut capturing = false;

    for line in text.lines() {
        if capturing {
            if is_header(line, COMMON_HEADERS) {
                break;
            }
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                captured.push(trimmed);
            }
        } else if is_header(line, keywords) {
            capturing = true;
        }
    }

    captured.join("\n")
}

/// Years of experience from the `20xx` tokens in a block:
/// two or more → span between earliest and latest, exactly one → 1, none → 0.
pub fn estimate_years(text: &str) -> u32 {
    let years: Vec<u32> = YEAR_RE
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();

    match years.len() {
        0 => 0,
        1 => 1,
        _ => {
            let min = years.iter().copied().min().unwrap_or(0);
            let max = years.iter().copied().max().unwrap_or(0);
            max - min
        }
    }
}

/// Truncates to at most `max_chars` Unicode scalar values.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
