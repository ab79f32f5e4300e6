//! Streaming relay service
//!
//! Issues the single upstream chat completion call and relays decoded text
//! fragments to the caller in arrival order

use crate::config::Settings;
use crate::models::openai::{ChatCompletionChunk, ChatCompletionRequest};
use anyhow::{Context, Result};
use bytes::Bytes;
use eventsource_stream::{Event, EventStreamError, Eventsource};
use futures::{ready, Stream};
use pin_project_lite::pin_project;
use reqwest::Client;
use std::fmt;
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Sentinel data payload marking the end of the upstream stream
const DONE_SENTINEL: &str = "[DONE]";

/// Relay failure taxonomy
#[derive(Debug, Error)]
pub enum RelayError {
    /// Upstream answered with a non-success status before any fragment flowed
    #[error("OpenAI API returned an error: {message}")]
    Upstream { status: u16, message: String },

    /// The upstream request could not be issued
    #[error("Failed to reach OpenAI API: {0}")]
    Request(#[from] reqwest::Error),

    /// An event payload was not a decodable completion chunk
    #[error("Failed to decode stream event: {0}")]
    Decode(String),

    /// The upstream byte channel failed mid-stream
    #[error("Stream transport error: {0}")]
    Transport(String),
}

/// Boxed stream of relayed text fragments
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<Bytes, RelayError>> + Send>>;

/// Relay to the upstream chat completions API
///
/// Holds the streaming HTTP client and the injected settings; the fallback
/// credential comes from configuration, never from ambient state.
#[derive(Debug, Clone)]
pub struct ReviewRelay {
    stream_client: Client,
    settings: Settings,
}

impl ReviewRelay {
    /// Create a new relay instance
    pub fn new(settings: Settings) -> Result<Self> {
        let stream_client = Client::builder()
            .connect_timeout(Duration::from_secs(settings.openai.timeout))
            .timeout(Duration::from_secs(settings.openai.stream_timeout))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create streaming HTTP client")?;

        Ok(Self { stream_client, settings })
    }

    /// Issue the single upstream streaming call and return the fragment stream
    ///
    /// The explicit credential wins when present and non-empty, otherwise the
    /// configured fallback key is used. Exactly one upstream request is made;
    /// a non-success status is fatal and never retried.
    pub async fn open_stream(
        &self,
        model: &str,
        prompt: String,
        credential: Option<&str>,
    ) -> Result<FragmentStream, RelayError> {
        let url = format!(
            "{}/chat/completions",
            self.settings.openai.base_url.trim_end_matches('/')
        );
        let key = credential
            .filter(|key| !key.is_empty())
            .unwrap_or(&self.settings.openai.api_key);
        let request = ChatCompletionRequest::new(model, prompt);

        debug!("Opening upstream completion stream for model {}", model);

        let response = self
            .stream_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", key))
            .header("Content-Type", "application/json")
            .header("Accept", "text/event-stream")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Embed whatever body text is available, else the status text
            let message = match response.text().await {
                Ok(body) if !body.is_empty() => body,
                _ => status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
            };
            warn!("Upstream request failed: {} - {}", status, message);
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let events = response.bytes_stream().eventsource();
        Ok(Box::pin(RelayStream::new(events)))
    }
}

/// Relay loop state over the upstream event channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RelayState {
    /// Actively forwarding fragments
    Open,
    /// Terminal success: sentinel received or upstream ended
    Closed,
    /// Terminal error already reported to the consumer
    Failed,
}

pin_project! {
    /// Pull-based stream of relayed text fragments
    ///
    /// Wraps a parsed SSE event stream and forwards each data payload's
    /// first-choice delta content in arrival order, one event to at most one
    /// fragment, with no batching. The `[DONE]` sentinel closes the stream;
    /// a malformed payload or transport failure yields a single terminal
    /// error. After a terminal state the upstream is never polled again, so
    /// dropping the stream releases the upstream response promptly.
    pub struct RelayStream<S> {
        #[pin]
        events: S,
        state: RelayState,
    }
}

impl<S> RelayStream<S> {
    /// Wrap a parsed event stream
    pub fn new(events: S) -> Self {
        Self {
            events,
            state: RelayState::Open,
        }
    }
}

impl<S, E> Stream for RelayStream<S>
where
    S: Stream<Item = Result<Event, EventStreamError<E>>>,
    E: fmt::Display,
{
    type Item = Result<Bytes, RelayError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if *this.state != RelayState::Open {
                return Poll::Ready(None);
            }

            match ready!(this.events.as_mut().poll_next(cx)) {
                Some(Ok(event)) => {
                    if event.data.trim() == DONE_SENTINEL {
                        debug!("Received stream end sentinel");
                        *this.state = RelayState::Closed;
                        return Poll::Ready(None);
                    }

                    match decode_fragment(&event.data) {
                        Ok(Some(fragment)) => return Poll::Ready(Some(Ok(fragment))),
                        // Decodable chunk without a content delta: forward nothing
                        Ok(None) => continue,
                        Err(err) => {
                            *this.state = RelayState::Failed;
                            return Poll::Ready(Some(Err(err)));
                        }
                    }
                }
                Some(Err(err)) => {
                    warn!("Upstream transport failure: {}", err);
                    *this.state = RelayState::Failed;
                    return Poll::Ready(Some(Err(RelayError::Transport(err.to_string()))));
                }
                // Upstream ended without the sentinel: a normal close
                None => {
                    *this.state = RelayState::Closed;
                    return Poll::Ready(None);
                }
            }
        }
    }
}

/// Decode one data payload into at most one outbound fragment
///
/// Returns `Ok(None)` for chunks that decode but carry no content delta
/// (role-only first deltas, finish chunks). Shape failures are terminal.
fn decode_fragment(data: &str) -> Result<Option<Bytes>, RelayError> {
    let chunk: ChatCompletionChunk = serde_json::from_str(data).map_err(|err| {
        warn!("Undecodable stream payload: {}", err);
        RelayError::Decode(format!("invalid completion chunk: {err}"))
    })?;

    let choice = chunk
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| RelayError::Decode("completion chunk has no choices".to_string()))?;

    Ok(choice.delta.content.map(Bytes::from))
}
