//! Error types for the storybook service.
//!
//! [`ModelError`] covers the outbound model-endpoint boundary and is the type
//! the retry policy inspects: only [`ModelError::Overloaded`] is retryable.
//! [`AiError`] is what the orchestration layer returns once retries are done,
//! adding the case where the model answered but not in the shape we asked for.

use thiserror::Error;

/// Failures from the generative model endpoints.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The endpoint returned HTTP 503. Transient; eligible for backoff retry.
    #[error("model endpoint overloaded: {message}")]
    Overloaded { message: String },

    /// Any other non-success status from the endpoint. Never retried.
    #[error("model endpoint returned status {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced a response (DNS, connect, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A broken invariant inside this process, e.g. a closed gate.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ModelError {
    /// Only the overloaded classification is worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ModelError::Overloaded { .. })
    }
}

/// Failures of the AI orchestration operations.
#[derive(Debug, Error)]
pub enum AiError {
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The model replied, but the reply did not parse into the structured
    /// shape the prompt demanded. Distinct from network failures and never
    /// retried.
    #[error("model reply was not valid storybook JSON: {detail}")]
    MalformedModelReply { detail: String },
}

/// Failure extracting text from an uploaded document.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("failed to read PDF: {0}")]
    Parse(String),
}
