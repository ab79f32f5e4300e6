//! Text review handler
//!
//! Accepts a review request, builds the review prompt and relays the
//! upstream completion stream back to the client as plain text chunks

use crate::handlers::AppState;
use crate::models::review::max_input_chars;
use crate::models::ReviewRequest;
use crate::services::build_review_prompt;
use crate::utils::error::{AppError, AppResult};
use crate::utils::logging::create_review_log_summary;
use axum::{
    body::Body,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::debug;

/// Handle text review requests
///
/// POST /api/review
///
/// Streams review fragments back in upstream order as chunked UTF-8 text.
/// The response status is decided before the first byte is written; a
/// failure after that point aborts the body instead of changing the status.
pub async fn handle_review(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReviewRequest>,
) -> AppResult<Response> {
    debug!("Received review request for model: {}", request.model);

    let log_summary = create_review_log_summary(&request);
    if let Ok(summary_json) = serde_json::to_string_pretty(&log_summary) {
        debug!("📥 Review Request:\n{}", summary_json);
    }

    validate_review_request(&request).map_err(AppError::Validation)?;

    // Length limits are enforced by the client tier, only note overruns here
    let advertised_limit = max_input_chars(&request.model);
    let input_chars = request.input_code.chars().count();
    if input_chars > advertised_limit {
        debug!(
            "Input of {} chars exceeds the advertised {} char limit for {}, relaying anyway",
            input_chars, advertised_limit, request.model
        );
    }

    let prompt = build_review_prompt(&request.input_code);

    let stream = state
        .relay
        .open_stream(&request.model, prompt, request.credential())
        .await?;

    debug!("Starting review stream transmission");

    let headers = [(header::CONTENT_TYPE, "text/plain; charset=utf-8")];
    Ok((headers, Body::from_stream(stream)).into_response())
}

/// Validate a review request
fn validate_review_request(request: &ReviewRequest) -> Result<(), String> {
    if request.model.is_empty() {
        return Err("Model name cannot be empty".to_string());
    }

    if request.input_code.is_empty() {
        return Err("Input text cannot be empty".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> ReviewRequest {
        ReviewRequest {
            input_language: Some("English".to_string()),
            output_language: Some("English".to_string()),
            input_code: "The quick brown fox.".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            api_key: None,
        }
    }

    #[test]
    fn test_validate_review_request() {
        assert!(validate_review_request(&valid_request()).is_ok());

        let mut empty_model = valid_request();
        empty_model.model = String::new();
        assert!(validate_review_request(&empty_model).is_err());

        let mut empty_input = valid_request();
        empty_input.input_code = String::new();
        assert!(validate_review_request(&empty_input).is_err());
    }

    #[test]
    fn test_validation_accepts_missing_languages() {
        let mut request = valid_request();
        request.input_language = None;
        request.output_language = None;
        assert!(validate_review_request(&request).is_ok());
    }
}
