//! Core value types shared by the step sequence and the controller.

use crate::colors;
use crate::time::TimeDuration;
use palette::{Mix, Srgb, Srgba};

/// One of the three visual phases a style defines values for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    One,
    Two,
    Three,
}

/// The two circles making up the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Element {
    /// The larger, fading halo.
    Wave,
    /// The smaller, solid circle.
    Dot,
}

/// One of the four timed transitions of the blink cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// Into phase 1 at the start of the cycle.
    ToPhase1,
    ToPhase2,
    ToPhase3,
    /// Back to phase 1 visuals, closing the cycle.
    Return,
}

/// The values currently displayed by an indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub dot_size: f32,
    pub wave_size: f32,
    pub wave_opacity: f32,
    pub dot_color: Srgb,
}

impl RenderState {
    /// Linear interpolation toward `target`.
    ///
    /// `progress` is clamped to 0.0-1.0; 1.0 yields `target` exactly.
    pub fn lerp(&self, target: &RenderState, progress: f32) -> RenderState {
        let t = progress.clamp(0.0, 1.0);
        if t >= 1.0 {
            return *target;
        }

        RenderState {
            dot_size: lerp(self.dot_size, target.dot_size, t),
            wave_size: lerp(self.wave_size, target.wave_size, t),
            wave_opacity: lerp(self.wave_opacity, target.wave_opacity, t),
            dot_color: self.dot_color.mix(target.dot_color, t),
        }
    }

    /// The halo circle, filled with `wave_color` at the current opacity.
    pub fn wave(&self, wave_color: Srgb) -> Circle {
        Circle {
            diameter: self.wave_size,
            color: colors::with_opacity(wave_color, self.wave_opacity),
        }
    }

    /// The solid dot circle.
    pub fn dot(&self) -> Circle {
        Circle {
            diameter: self.dot_size,
            color: colors::with_opacity(self.dot_color, 1.0),
        }
    }
}

#[inline]
fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// A filled circle handed to the render surface.
///
/// Both circles of an indicator share a center; placement is up to the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub diameter: f32,
    pub color: Srgba,
}

/// A single step of the blink cycle: the state to reach and how long to take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationStep<D: TimeDuration> {
    /// Target state, reached at the end of the step.
    pub target: RenderState,

    /// Length of the linear transition into `target`.
    pub duration: D,
}

impl<D: TimeDuration> AnimationStep<D> {
    /// Creates a new animation step.
    #[inline]
    pub fn new(target: RenderState, duration: D) -> Self {
        Self { target, duration }
    }
}

/// Step sequence construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceError {
    /// No steps provided.
    EmptySequence,

    /// Sequence capacity exceeded.
    CapacityExceeded,
}

impl core::fmt::Display for SequenceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SequenceError::EmptySequence => {
                write!(f, "sequence must have at least one step")
            }
            SequenceError::CapacityExceeded => {
                write!(f, "sequence capacity exceeded")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SequenceError {}
