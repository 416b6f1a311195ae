// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timed intervals on the motion timeline.

use serde::{Deserialize, Serialize};

/// A span of time in milliseconds during which one property animates.
///
/// Values are signed so that half-edited states (a negative delay, an end
/// before the start) can still be represented; consumers call
/// [`Interval::clamped`] before doing geometry with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    /// Start time (ms)
    pub start: i64,
    /// End time (ms)
    pub end: i64,
}

impl Interval {
    /// Create a new interval
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Create an interval from a delay and a duration
    pub fn from_delay(delay: i64, duration: i64) -> Self {
        Self {
            start: delay,
            end: delay.saturating_add(duration),
        }
    }

    /// Length of the interval, zero when malformed
    pub fn duration(&self) -> i64 {
        let clamped = self.clamped();
        clamped.end - clamped.start
    }

    /// Whether the interval has `start >= 0` and `end >= start`
    pub fn is_well_formed(&self) -> bool {
        self.start >= 0 && self.end >= self.start
    }

    /// Copy with the start pulled up to zero and the end pulled up to the start
    pub fn clamped(&self) -> Self {
        let start = self.start.max(0);
        Self {
            start,
            end: self.end.max(start),
        }
    }

    /// Whether `time` lies inside the closed interval
    pub fn covers(&self, time: f64) -> bool {
        self.start as f64 <= time && time <= self.end as f64
    }

    /// Whether the midpoint of `[start, end]` lies inside the closed interval.
    ///
    /// Compares doubled values in integer arithmetic, so the answer stays
    /// exact for times beyond the range `f64` represents exactly.
    pub fn covers_midpoint(&self, start: i64, end: i64) -> bool {
        let twice_mid = i128::from(start) + i128::from(end);
        2 * i128::from(self.start) <= twice_mid && twice_mid <= 2 * i128::from(self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_delay() {
        let interval = Interval::from_delay(200, 300);
        assert_eq!(interval, Interval::new(200, 500));
        assert_eq!(interval.duration(), 300);
    }

    #[test]
    fn test_clamped() {
        assert_eq!(Interval::new(-50, 100).clamped(), Interval::new(0, 100));
        assert_eq!(Interval::new(400, 100).clamped(), Interval::new(400, 400));
        assert_eq!(Interval::new(-10, -20).clamped(), Interval::new(0, 0));
        assert!(!Interval::new(400, 100).is_well_formed());
        assert_eq!(Interval::new(400, 100).duration(), 0);
    }

    #[test]
    fn test_duration_at_extremes() {
        assert_eq!(Interval::new(i64::MIN, 10).duration(), 10);
        assert_eq!(Interval::new(i64::MIN, i64::MAX).duration(), i64::MAX);
        assert_eq!(Interval::new(i64::MAX, i64::MIN).duration(), 0);
        assert_eq!(Interval::new(-20, -10).duration(), 0);
    }

    #[test]
    fn test_covers_is_inclusive() {
        let interval = Interval::new(100, 200);
        assert!(interval.covers(100.0));
        assert!(interval.covers(150.5));
        assert!(interval.covers(200.0));
        assert!(!interval.covers(200.5));
        assert!(!interval.covers(f64::NAN));
    }

    #[test]
    fn test_covers_midpoint() {
        let interval = Interval::new(100, 200);
        assert!(interval.covers_midpoint(100, 200));
        assert!(interval.covers_midpoint(0, 200));
        assert!(!interval.covers_midpoint(200, 210));
        assert!(!interval.covers_midpoint(0, 199));

        let edge = 1_i64 << 54;
        assert!(!Interval::new(0, edge).covers_midpoint(edge, edge + 2));
        assert!(Interval::new(0, i64::MAX).covers_midpoint(i64::MAX - 1, i64::MAX));
    }
}
