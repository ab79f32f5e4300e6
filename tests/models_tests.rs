//! Data model tests
//!
//! Cover the inbound review request schema and the OpenAI wire structures

use reviewrelay::models::openai::{ChatCompletionChunk, ChatCompletionRequest, ChatMessage};
use reviewrelay::models::review::{
    max_input_chars, ReviewRequest, MAX_INPUT_CHARS_BASE, MAX_INPUT_CHARS_LARGE,
};

#[test]
fn test_review_request_full_wire_shape() {
    let json = r#"{
        "inputLanguage": "English",
        "outputLanguage": "English",
        "inputCode": "The quick brown fox jumps over the lazzy dog.",
        "model": "gpt-3.5-turbo",
        "apiKey": "sk-user-provided"
    }"#;

    let request: ReviewRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.input_language.as_deref(), Some("English"));
    assert_eq!(request.output_language.as_deref(), Some("English"));
    assert_eq!(
        request.input_code,
        "The quick brown fox jumps over the lazzy dog."
    );
    assert_eq!(request.model, "gpt-3.5-turbo");
    assert_eq!(request.credential(), Some("sk-user-provided"));
}

#[test]
fn test_review_request_minimal_wire_shape() {
    let json = r#"{"inputCode": "some text", "model": "gpt-4"}"#;

    let request: ReviewRequest = serde_json::from_str(json).unwrap();
    assert!(request.input_language.is_none());
    assert!(request.output_language.is_none());
    assert!(request.api_key.is_none());
    assert_eq!(request.credential(), None);
}

#[test]
fn test_review_request_rejects_missing_required_fields() {
    assert!(serde_json::from_str::<ReviewRequest>(r#"{"model": "gpt-4"}"#).is_err());
    assert!(serde_json::from_str::<ReviewRequest>(r#"{"inputCode": "text"}"#).is_err());
}

#[test]
fn test_review_request_snake_case_fields_rejected() {
    // The wire contract is camelCase; snake_case bodies must not deserialize
    let json = r#"{"input_code": "text", "model": "gpt-4"}"#;
    assert!(serde_json::from_str::<ReviewRequest>(json).is_err());
}

#[test]
fn test_review_request_serializes_camel_case() {
    let request = ReviewRequest {
        input_language: Some("German".to_string()),
        output_language: None,
        input_code: "Ein Text.".to_string(),
        model: "gpt-4".to_string(),
        api_key: None,
    };

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["inputLanguage"], "German");
    assert_eq!(json["inputCode"], "Ein Text.");
    // Absent optionals are omitted, not serialized as null
    assert!(json.get("outputLanguage").is_none());
    assert!(json.get("apiKey").is_none());
}

#[test]
fn test_empty_credential_treated_as_absent() {
    let json = r#"{"inputCode": "text", "model": "gpt-4", "apiKey": ""}"#;
    let request: ReviewRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.api_key.as_deref(), Some(""));
    assert_eq!(request.credential(), None);
}

#[test]
fn test_input_budget_per_model_tier() {
    assert_eq!(max_input_chars("gpt-3.5-turbo"), MAX_INPUT_CHARS_BASE);
    assert_eq!(max_input_chars("gpt-4"), MAX_INPUT_CHARS_LARGE);
    assert_eq!(max_input_chars("gpt-4-turbo"), MAX_INPUT_CHARS_LARGE);
    assert!(MAX_INPUT_CHARS_BASE < MAX_INPUT_CHARS_LARGE);
}

#[test]
fn test_completion_request_is_deterministic_streaming_call() {
    let request = ChatCompletionRequest::new("gpt-4", "Review the following text.");
    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(json["model"], "gpt-4");
    assert_eq!(json["temperature"], 0.0);
    assert_eq!(json["stream"], true);

    let messages = json["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[0]["content"], "Review the following text.");
}

#[test]
fn test_system_message_constructor() {
    let message = ChatMessage::system("prompt text");
    assert_eq!(message.role, "system");
    assert_eq!(message.content, "prompt text");
}

#[test]
fn test_chunk_decodes_full_upstream_payload() {
    let json = r#"{
        "id": "chatcmpl-abc123",
        "object": "chat.completion.chunk",
        "created": 1700000000,
        "model": "gpt-4-0613",
        "choices": [
            {"index": 0, "delta": {"content": "Hello"}, "finish_reason": null}
        ]
    }"#;

    let chunk: ChatCompletionChunk = serde_json::from_str(json).unwrap();
    assert_eq!(chunk.id.as_deref(), Some("chatcmpl-abc123"));
    assert_eq!(chunk.model.as_deref(), Some("gpt-4-0613"));
    assert_eq!(chunk.choices[0].delta.content.as_deref(), Some("Hello"));
    assert!(chunk.choices[0].finish_reason.is_none());
}

#[test]
fn test_chunk_decodes_minimal_payload() {
    let chunk: ChatCompletionChunk =
        serde_json::from_str(r#"{"choices":[{"delta":{"content":"A"}}]}"#).unwrap();
    assert_eq!(chunk.choices[0].index, 0);
    assert_eq!(chunk.choices[0].delta.content.as_deref(), Some("A"));
}

#[test]
fn test_chunk_role_and_finish_deltas() {
    let first: ChatCompletionChunk =
        serde_json::from_str(r#"{"choices":[{"delta":{"role":"assistant"}}]}"#).unwrap();
    assert_eq!(first.choices[0].delta.role.as_deref(), Some("assistant"));
    assert!(first.choices[0].delta.content.is_none());

    let last: ChatCompletionChunk = serde_json::from_str(
        r#"{"choices":[{"delta":{},"finish_reason":"stop"}]}"#,
    )
    .unwrap();
    assert!(last.choices[0].delta.content.is_none());
    assert_eq!(last.choices[0].finish_reason.as_deref(), Some("stop"));
}

#[test]
fn test_chunk_without_choices_is_rejected() {
    assert!(serde_json::from_str::<ChatCompletionChunk>(r#"{"id":"x"}"#).is_err());
}
