//! Shared test infrastructure for blinker integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use blinker::{BlinkSurface, Circle, RenderState, TimeDuration, TimeInstant, TimeSource};
use palette::Srgb;

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(TestInstant)
    }
}

// ============================================================================
// Mock Surface
// ============================================================================

/// Mock surface that records every pair of circles drawn
pub struct MockSurface {
    history: heapless::Vec<(Circle, Circle), 64>,
}

impl MockSurface {
    pub fn new() -> Self {
        Self {
            history: heapless::Vec::new(),
        }
    }

    pub fn draw_count(&self) -> usize {
        self.history.len()
    }

    pub fn last(&self) -> Option<&(Circle, Circle)> {
        self.history.last()
    }

    pub fn history(&self) -> &[(Circle, Circle)] {
        &self.history
    }
}

impl BlinkSurface for MockSurface {
    fn draw(&mut self, wave: Circle, dot: Circle) {
        let _ = self.history.push((wave, dot));
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Re-export color constants from library for test convenience
// ============================================================================

#[allow(unused_imports)]
pub use blinker::{BLACK, GRAY, GREEN, PINK, RED};

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Compare two floats with a fixed tolerance
pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.001
}

/// Compare two colors with floating-point tolerance
pub fn colors_equal(a: Srgb, b: Srgb) -> bool {
    blinker::colors::approx_eq(a, b, blinker::DEFAULT_COLOR_EPSILON)
}

/// Compare two render states with floating-point tolerance
pub fn states_equal(a: &RenderState, b: &RenderState) -> bool {
    approx(a.dot_size, b.dot_size)
        && approx(a.wave_size, b.wave_size)
        && approx(a.wave_opacity, b.wave_opacity)
        && colors_equal(a.dot_color, b.dot_color)
}

/// Builds a render state from its parts
pub fn state(dot_size: f32, wave_size: f32, wave_opacity: f32, dot_color: Srgb) -> RenderState {
    RenderState {
        dot_size,
        wave_size,
        wave_opacity,
        dot_color,
    }
}
