//! Limits for codec-level state and request decoding.

/// Codec-specific limits enforced per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecLimits {
    /// Maximum number of registered objects in one session.
    pub max_objects: usize,
    /// Maximum length in bytes of a single request parameter value.
    pub max_parameter_len: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_objects: 64 * 1024,
            max_parameter_len: 4096,
        }
    }
}

impl CodecLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_objects: 32,
            max_parameter_len: 64,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_objects: usize::MAX,
            max_parameter_len: usize::MAX,
        }
    }
}
