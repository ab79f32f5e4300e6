//! Data models module
//!
//! Defines the inbound review request and the OpenAI wire structures

pub mod openai;
pub mod review;

pub use review::ReviewRequest;
