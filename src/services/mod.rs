//! Service layer module
//!
//! Contains the prompt builder and the upstream streaming relay

pub mod prompt;
pub mod relay;

pub use prompt::build_review_prompt;
pub use relay::{FragmentStream, RelayError, RelayStream, ReviewRelay};
