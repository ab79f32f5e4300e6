//! Logging utilities
//!
//! Helpers for summarizing review requests in logs without leaking
//! credentials or flooding the output with full documents

use crate::models::ReviewRequest;

/// Maximum number of input characters shown in a log summary
const MAX_LOGGED_INPUT_CHARS: usize = 200;

/// Truncate a string with a note about original length
///
/// Counts characters rather than bytes so multibyte input never splits
/// a code point.
pub fn truncate_content(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!(
            "{}... ({} chars truncated)",
            truncated,
            char_count - max_chars
        )
    } else {
        s.to_string()
    }
}

/// Create a filtered summary of a review request for logging
/// Keeps the request shape but masks the credential and truncates the input
pub fn create_review_log_summary(request: &ReviewRequest) -> serde_json::Value {
    serde_json::json!({
        "model": request.model,
        "inputLanguage": request.input_language,
        "outputLanguage": request.output_language,
        "inputChars": request.input_code.chars().count(),
        "inputPreview": truncate_content(&request.input_code, MAX_LOGGED_INPUT_CHARS),
        "apiKey": if request.credential().is_some() { "[provided]" } else { "[fallback]" },
    })
}
