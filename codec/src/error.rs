//! Error types for codec operations.

use std::fmt;

use schema::ObjectId;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while preserving, rendering or decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Wire format error while appending an operation.
    Wire(wire::EncodeError),

    /// A request parameter could not be decoded.
    InvalidParameter {
        key: String,
        value: String,
        reason: ParameterReason,
    },

    /// No adapter is registered for the identity.
    UnknownObject { id: ObjectId },

    /// An adapter is already registered for the identity.
    DuplicateObject { id: ObjectId },

    /// Preserve or render was called outside of a cycle.
    CycleNotActive,

    /// A cycle was begun while another one is still open.
    CycleAlreadyActive,

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Specific limit that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    Objects,
    ParameterLength,
}

/// Why a request parameter was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterReason {
    NotAnInteger,
    NotABoolean,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wire(e) => write!(f, "wire error: {e}"),
            Self::InvalidParameter { key, value, reason } => {
                write!(f, "invalid parameter {key}={value:?}: {reason}")
            }
            Self::UnknownObject { id } => write!(f, "no adapter registered for object {id}"),
            Self::DuplicateObject { id } => write!(f, "object {id} is already registered"),
            Self::CycleNotActive => write!(f, "no request cycle is active"),
            Self::CycleAlreadyActive => write!(f, "a request cycle is already active"),
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
            Self::Objects => "objects",
            Self::ParameterLength => "parameter length",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for ParameterReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnInteger => write!(f, "expected an integer"),
            Self::NotABoolean => write!(f, "expected true or false"),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wire(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wire::EncodeError> for CodecError {
    fn from(err: wire::EncodeError) -> Self {
        Self::Wire(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn error_display_invalid_parameter() {
        let err = CodecError::InvalidParameter {
            key: "w1.bounds.x".to_string(),
            value: "abc".to_string(),
            reason: ParameterReason::NotAnInteger,
        };
        let msg = err.to_string();
        assert!(msg.contains("w1.bounds.x"), "should mention key: {msg}");
        assert!(msg.contains("\"abc\""), "should quote value: {msg}");
        assert!(msg.contains("integer"), "should mention reason: {msg}");
    }

    #[test]
    fn error_display_unknown_object() {
        let err = CodecError::UnknownObject {
            id: ObjectId::new("w9"),
        };
        assert!(err.to_string().contains("w9"));
    }

    #[test]
    fn error_display_limits() {
        let err = CodecError::LimitsExceeded {
            kind: LimitKind::Objects,
            limit: 2,
            actual: 3,
        };
        assert_eq!(err.to_string(), "objects limit exceeded: 3 > 2");
    }

    #[test]
    fn wire_error_has_source() {
        let wire_err = wire::EncodeError::LimitsExceeded {
            kind: wire::LimitKind::ArrayLength,
            limit: 1,
            actual: 2,
        };
        let err: CodecError = wire_err.into();
        assert!(matches!(err, CodecError::Wire(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn state_errors_have_no_source() {
        assert!(CodecError::CycleNotActive.source().is_none());
    }

    #[test]
    fn codec_error_equality() {
        assert_eq!(CodecError::CycleAlreadyActive, CodecError::CycleAlreadyActive);
        assert_ne!(CodecError::CycleAlreadyActive, CodecError::CycleNotActive);
    }
}
