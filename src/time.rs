//! Host time abstraction.
//!
//! The indicator never reads a clock on its own. The host hands it a
//! [`TimeSource`] and the controller measures step progress against it, so
//! the same state machine runs on an embedded timer, a UI frame clock or a
//! mocked clock in tests.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;

    /// Saturating subtraction (returns ZERO on underflow).
    fn saturating_sub(self, other: Self) -> Self;

    /// Creates a duration from seconds, rounded to the nearest millisecond.
    ///
    /// Negative and NaN inputs map to `ZERO`.
    fn from_secs_f32(secs: f32) -> Self {
        if secs.is_nan() || secs <= 0.0 {
            return Self::ZERO;
        }
        Self::from_millis((secs * 1000.0 + 0.5) as u64)
    }
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Adds duration to instant, returns None on overflow.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;
}
