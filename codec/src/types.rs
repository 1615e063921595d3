//! Core types for the codec.

/// A request cycle number.
///
/// Cycles are counted per session and increase by one for every cycle that
/// begins, whether it later commits or aborts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestCycle(u32);

impl RequestCycle {
    /// Creates a new request cycle number.
    #[must_use]
    pub const fn new(cycle: u32) -> Self {
        Self(cycle)
    }

    /// Returns the raw cycle value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns `true` before any cycle has begun.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns the following cycle number, wrapping on overflow.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl From<u32> for RequestCycle {
    fn from(cycle: u32) -> Self {
        Self(cycle)
    }
}

impl From<RequestCycle> for u32 {
    fn from(cycle: RequestCycle) -> Self {
        cycle.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_cycle_new() {
        let cycle = RequestCycle::new(7);
        assert_eq!(cycle.raw(), 7);
        assert!(!cycle.is_zero());
        assert!(RequestCycle::default().is_zero());
    }

    #[test]
    fn request_cycle_next_wraps() {
        assert_eq!(RequestCycle::new(1).next(), RequestCycle::new(2));
        assert_eq!(RequestCycle::new(u32::MAX).next(), RequestCycle::new(0));
    }

    #[test]
    fn request_cycle_ordering() {
        assert!(RequestCycle::new(1) < RequestCycle::new(2));
    }

    #[test]
    fn request_cycle_conversions() {
        let cycle: RequestCycle = 42.into();
        let raw: u32 = cycle.into();
        assert_eq!(raw, 42);
    }
}
