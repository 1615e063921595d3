//! Error types for protocol message operations.

use std::fmt;

/// Result type for appending operations to a message.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Result type for decoding message documents.
pub type WireResult<T> = Result<T, DecodeError>;

/// Errors that can occur while building an outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Errors that can occur while decoding a message document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// The document is not valid message JSON.
    Json { message: String },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Specific wire limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    OperationsPerMessage,
    ArrayLength,
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json { message } => write!(f, "invalid message json: {message}"),
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OperationsPerMessage => "operations per message",
            Self::ArrayLength => "array length",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for EncodeError {}

impl std::error::Error for DecodeError {}

impl From<EncodeError> for DecodeError {
    fn from(err: EncodeError) -> Self {
        match err {
            EncodeError::LimitsExceeded {
                kind,
                limit,
                actual,
            } => Self::LimitsExceeded {
                kind,
                limit,
                actual,
            },
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            message: err.to_string(),
        }
    }
}
