//! Time intervals on the original media timeline.

use serde::{Deserialize, Serialize};

/// A `[start, end]` time range in seconds.
///
/// The same type is used for both remove sets and keep sets; which one an
/// interval belongs to is determined by the collection holding it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Duration in seconds; never negative.
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    /// True when the interval carries no time (end at or before start).
    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration() {
        assert!((Interval::new(1.0, 3.5).duration() - 2.5).abs() < 1e-9);
        assert_eq!(Interval::new(3.0, 1.0).duration(), 0.0);
    }

    #[test]
    fn test_degenerate() {
        assert!(Interval::new(2.0, 2.0).is_degenerate());
        assert!(Interval::new(2.0, 1.0).is_degenerate());
        assert!(!Interval::new(1.0, 2.0).is_degenerate());
    }
}
