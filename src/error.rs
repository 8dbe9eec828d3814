use std::error::Error as StdError;

use thiserror::Error;

/// Cuecraft's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Cuecraft's crate-wide error type.
///
/// This is intentionally decoupled from `anyhow` so downstream libraries aren't forced to
/// adopt `anyhow` in their own public APIs.
#[derive(Debug, Error)]
pub enum Error {
    /// The token sequence (or subtitle text) handed to us is malformed.
    #[error("invalid input at index {index}: {reason}")]
    InvalidInput { index: usize, reason: String },

    /// The token sequence is empty; there is nothing to segment.
    #[error("invalid input: token sequence is empty")]
    NoTokens,

    /// The encoder was asked to serialize an empty cue list.
    #[error("cannot encode an empty cue sequence")]
    EmptyInput,

    /// The segmentation options contradict themselves or are out of range.
    #[error("invalid configuration: {field} = {value}: {reason}")]
    Configuration {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    /// Reading input or writing output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A transcript or config document is not the JSON we expect.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Other(#[from] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub(crate) fn invalid_input(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            index,
            reason: reason.into(),
        }
    }

    pub(crate) fn configuration(
        field: &'static str,
        value: impl ToString,
        reason: &'static str,
    ) -> Self {
        Self::Configuration {
            field,
            value: value.to_string(),
            reason,
        }
    }

    /// Whether this error stems from malformed input (as opposed to config or I/O).
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::NoTokens)
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Message(format!("{err:#}"))
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::Other(Box::new(err))
    }
}
