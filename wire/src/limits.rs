//! Configurable limits for bounded message building.

/// Wire-level limits for outbound messages.
///
/// These are enforced while operations are appended, so a runaway render
/// step fails before it produces an unbounded message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of operations in one object message.
    pub max_operations_per_message: usize,

    /// Maximum length of a top-level array value.
    pub max_array_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // Widgets carry a few dozen properties at most
            max_operations_per_message: 256,
            max_array_len: 64 * 1024,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_operations_per_message: 16,
            max_array_len: 64,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_operations_per_message: usize::MAX,
            max_array_len: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn testing_limits_smaller() {
        let test_limits = Limits::for_testing();
        let default_limits = Limits::default();

        assert!(test_limits.max_operations_per_message < default_limits.max_operations_per_message);
        assert!(test_limits.max_array_len < default_limits.max_array_len);
    }

    #[test]
    fn unlimited_limits() {
        let limits = Limits::unlimited();
        assert_eq!(limits.max_operations_per_message, usize::MAX);
        assert_eq!(limits.max_array_len, usize::MAX);
    }

    #[test]
    fn limits_const_constructible() {
        const LIMITS: Limits = Limits::for_testing();
        assert_eq!(LIMITS.max_operations_per_message, 16);
    }
}
