//! Indicator configuration and the bundled presets.
//!
//! A [`BlinkConfiguration`] is plain immutable data: phase durations plus a
//! style for the wave and one for the dot. Configurations are `Copy` and are
//! only ever read, so one value can back any number of indicators.
//!
//! Invalid values are rejected, never clamped: an opacity outside 0.0-1.0, a
//! negative size or duration, or any non-finite number makes
//! [`BlinkConfiguration::validate`] fail with [`InvalidConfiguration`].

use crate::colors::{BLACK, GRAY, GREEN, PINK, RED};
use crate::types::{Element, Phase, Transition};
use palette::Srgb;

/// Durations, in seconds, of the four transitions of one blink cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseDurations {
    /// Transition into phase 1.
    pub phase1: f32,
    /// Transition into phase 2.
    pub phase2: f32,
    /// Transition into phase 3.
    pub phase3: f32,
    /// Transition from phase 3 back to phase 1.
    pub phase4: f32,
}

impl PhaseDurations {
    pub const DEFAULT: Self = Self::new(0.0, 0.45, 0.15, 0.25);

    pub const fn new(phase1: f32, phase2: f32, phase3: f32, phase4: f32) -> Self {
        Self {
            phase1,
            phase2,
            phase3,
            phase4,
        }
    }

    /// Returns the duration of a transition.
    pub fn get(&self, transition: Transition) -> f32 {
        match transition {
            Transition::ToPhase1 => self.phase1,
            Transition::ToPhase2 => self.phase2,
            Transition::ToPhase3 => self.phase3,
            Transition::Return => self.phase4,
        }
    }

    fn validate(&self) -> Result<(), InvalidConfiguration> {
        for transition in [
            Transition::ToPhase1,
            Transition::ToPhase2,
            Transition::ToPhase3,
            Transition::Return,
        ] {
            let value = self.get(transition);
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidConfiguration::InvalidDuration { transition, value });
            }
        }
        Ok(())
    }
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A per-phase value: one entry for each of phase 1, 2 and 3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triple<T> {
    pub phase1: T,
    pub phase2: T,
    pub phase3: T,
}

impl<T: Copy> Triple<T> {
    pub const fn new(phase1: T, phase2: T, phase3: T) -> Self {
        Self {
            phase1,
            phase2,
            phase3,
        }
    }

    /// Returns the value for a phase.
    pub fn get(&self, phase: Phase) -> T {
        match phase {
            Phase::One => self.phase1,
            Phase::Two => self.phase2,
            Phase::Three => self.phase3,
        }
    }

    fn entries(&self) -> [(Phase, T); 3] {
        [
            (Phase::One, self.phase1),
            (Phase::Two, self.phase2),
            (Phase::Three, self.phase3),
        ]
    }
}

/// Diameters of a circle in each phase.
pub type SizeTriple = Triple<f32>;

/// Opacities of the wave in each phase, each within 0.0-1.0.
pub type OpacityTriple = Triple<f32>;

/// Colors of the dot in each phase.
pub type ColorTriple = Triple<Srgb>;

impl SizeTriple {
    pub const DEFAULT_DOT: Self = Self::new(8.0, 12.0, 16.0);
    pub const DEFAULT_WAVE: Self = Self::new(8.0, 48.0, 72.0);
}

impl OpacityTriple {
    /// Invisible, fully opaque, invisible.
    pub const FADE: Self = Self::new(0.0, 1.0, 0.0);
}

impl ColorTriple {
    /// Red, green, red.
    pub const ACCENT: Self = Self::new(RED, GREEN, RED);

    /// Gray, black, gray.
    ///
    /// Not used by either preset; available for hosts that want a muted dot.
    pub const NEUTRAL: Self = Self::new(GRAY, BLACK, GRAY);
}

fn validate_sizes(element: Element, sizes: &SizeTriple) -> Result<(), InvalidConfiguration> {
    for (phase, value) in sizes.entries() {
        if !value.is_finite() || value < 0.0 {
            return Err(InvalidConfiguration::InvalidSize {
                element,
                phase,
                value,
            });
        }
    }
    Ok(())
}

/// The halo: one base color faded through per-phase opacities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveStyle {
    pub color: Srgb,
    pub opacities: OpacityTriple,
    pub sizes: SizeTriple,
}

impl WaveStyle {
    pub const ACCENT: Self = Self {
        color: PINK,
        opacities: OpacityTriple::FADE,
        sizes: SizeTriple::DEFAULT_WAVE,
    };

    fn validate(&self) -> Result<(), InvalidConfiguration> {
        for (phase, value) in self.opacities.entries() {
            // NaN fails the range check as well
            if !(0.0..=1.0).contains(&value) {
                return Err(InvalidConfiguration::OpacityOutOfRange { phase, value });
            }
        }
        validate_sizes(Element::Wave, &self.sizes)
    }
}

/// The solid dot: a color and a size per phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotStyle {
    pub colors: ColorTriple,
    pub sizes: SizeTriple,
}

impl DotStyle {
    pub const ACCENT: Self = Self {
        colors: ColorTriple::ACCENT,
        sizes: SizeTriple::DEFAULT_DOT,
    };

    fn validate(&self) -> Result<(), InvalidConfiguration> {
        validate_sizes(Element::Dot, &self.sizes)
    }
}

/// Complete description of an indicator's animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlinkConfiguration {
    pub durations: PhaseDurations,
    pub wave: WaveStyle,
    pub dot: DotStyle,
}

impl BlinkConfiguration {
    /// Red/green dot with a pink halo.
    pub const ACCENT: Self = Self {
        durations: PhaseDurations::DEFAULT,
        wave: WaveStyle::ACCENT,
        dot: DotStyle::ACCENT,
    };

    /// Currently identical to [`ACCENT`](Self::ACCENT).
    ///
    /// Build a muted variant with [`ColorTriple::NEUTRAL`] if the two must
    /// differ.
    pub const NEUTRAL: Self = Self {
        durations: PhaseDurations::DEFAULT,
        wave: WaveStyle::ACCENT,
        dot: DotStyle::ACCENT,
    };

    /// Builds a configuration and validates it.
    ///
    /// # Errors
    /// Returns [`InvalidConfiguration`] describing the first offending value.
    pub fn new(
        durations: PhaseDurations,
        wave: WaveStyle,
        dot: DotStyle,
    ) -> Result<Self, InvalidConfiguration> {
        let config = Self {
            durations,
            wave,
            dot,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn accent() -> Self {
        Self::ACCENT
    }

    pub fn neutral() -> Self {
        Self::NEUTRAL
    }

    /// Checks every value against its allowed range.
    ///
    /// Durations are checked first, then the wave, then the dot.
    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        self.durations.validate()?;
        self.wave.validate()?;
        self.dot.validate()
    }

    pub fn durations(&self) -> &PhaseDurations {
        &self.durations
    }

    pub fn wave(&self) -> &WaveStyle {
        &self.wave
    }

    pub fn dot(&self) -> &DotStyle {
        &self.dot
    }
}

impl Default for BlinkConfiguration {
    fn default() -> Self {
        Self::ACCENT
    }
}

/// A configuration value violates its invariant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidConfiguration {
    /// A wave opacity is outside 0.0-1.0.
    OpacityOutOfRange { phase: Phase, value: f32 },

    /// A size is negative or not finite.
    InvalidSize {
        element: Element,
        phase: Phase,
        value: f32,
    },

    /// A duration is negative or not finite.
    InvalidDuration { transition: Transition, value: f32 },
}

impl core::fmt::Display for InvalidConfiguration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InvalidConfiguration::OpacityOutOfRange { phase, value } => {
                write!(
                    f,
                    "invalid configuration: wave opacity {} in {:?} is outside 0.0-1.0",
                    value, phase
                )
            }
            InvalidConfiguration::InvalidSize {
                element,
                phase,
                value,
            } => {
                write!(
                    f,
                    "invalid configuration: {:?} size {} in {:?} must be a non-negative number",
                    element, value, phase
                )
            }
            InvalidConfiguration::InvalidDuration { transition, value } => {
                write!(
                    f,
                    "invalid configuration: {:?} duration {} must be a non-negative number of seconds",
                    transition, value
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidConfiguration {}
