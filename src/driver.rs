//! Blocking host loop on top of `std::time`.
//!
//! Wraps `std::time::{Duration, Instant}` in the crate's time traits and
//! drives a [`Blinker`] on the current thread until it is disposed.

use crate::blinker::{BlinkSurface, Blinker, ServiceTiming};
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Newtype wrapper for `std::time::Duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StdDuration(pub Duration);

impl TimeDuration for StdDuration {
    const ZERO: Self = StdDuration(Duration::ZERO);

    fn as_millis(&self) -> u64 {
        u64::try_from(self.0.as_millis()).unwrap_or(u64::MAX)
    }

    fn from_millis(millis: u64) -> Self {
        StdDuration(Duration::from_millis(millis))
    }

    fn saturating_sub(self, other: Self) -> Self {
        StdDuration(self.0.saturating_sub(other.0))
    }
}

/// Newtype wrapper for `std::time::Instant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StdInstant(pub Instant);

impl TimeInstant for StdInstant {
    type Duration = StdDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        StdDuration(self.0.saturating_duration_since(earlier.0))
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(StdInstant)
    }
}

/// Monotonic clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdClock;

impl StdClock {
    pub fn new() -> Self {
        Self
    }
}

impl TimeSource<StdInstant> for StdClock {
    fn now(&self) -> StdInstant {
        StdInstant(Instant::now())
    }
}

/// Mounts `blinker` and services it until it goes inactive.
///
/// Interpolating steps are serviced every `frame_interval`; holds sleep for
/// their delay, in slices no longer than `frame_interval` so that raising
/// `cancel` is noticed promptly. Once `cancel` is set the blinker is disposed
/// and the function returns.
pub fn run<S, T, const N: usize>(
    blinker: &mut Blinker<'_, StdInstant, S, T, N>,
    frame_interval: Duration,
    cancel: &AtomicBool,
) where
    S: BlinkSurface,
    T: TimeSource<StdInstant>,
{
    let mut timing = blinker.mount();

    loop {
        if cancel.load(Ordering::Acquire) {
            blinker.dispose();
            return;
        }

        let wait = match timing {
            ServiceTiming::Continuous => frame_interval,
            ServiceTiming::Delay(StdDuration(delay)) => delay.min(frame_interval),
            ServiceTiming::Inactive => return,
        };

        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
        timing = blinker.service();
    }
}
