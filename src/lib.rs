#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`BlinkConfiguration`**: Phase durations plus the wave and dot styles; `ACCENT` and `NEUTRAL` presets
//! - **`StepSequence`**: The closed cycle of steps derived once from a configuration
//! - **`AnimationStep`**: A target `RenderState` + the duration of the linear transition into it
//! - **`RenderState`**: What the indicator currently shows (sizes, wave opacity, dot color)
//! - **`Blinker`**: Plays the cycle forever on a surface until disposed
//! - **`BlinkSurface`**: Trait to implement for your drawing target
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`ServiceTiming`**: When the host should service the indicator next
//! - **`BlinkerAction`**: Lifecycle commands (mount, pause, resume, dispose)
//! - **`BlinkerCollection`**: Several indicators driven from one service loop
//!
//! Colors are `Srgb<f32>` (0.0-1.0 range) and are interpolated in that space.

// Re-export the color types from palette for user convenience
pub use palette::{Srgb, Srgba};

pub mod blinker;
pub mod collection;
pub mod colors;
pub mod command;
pub mod config;
#[cfg(feature = "std")]
pub mod driver;
pub mod sequence;
pub mod time;
pub mod types;

pub use blinker::{BlinkSurface, Blinker, BlinkerState, ServiceTiming, create_blink_indicator};
pub use collection::{BlinkerCollection, CollectionError, IndicatorId};
pub use command::{BlinkerAction, BlinkerCommand};
pub use config::{
    BlinkConfiguration, ColorTriple, DotStyle, InvalidConfiguration, OpacityTriple,
    PhaseDurations, SizeTriple, Triple, WaveStyle,
};
pub use sequence::{BLINK_STEPS, SequenceBuilder, StepSequence};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use types::{AnimationStep, Circle, Element, Phase, RenderState, SequenceError, Transition};

pub use colors::{BLACK, GRAY, GREEN, PINK, RED, WHITE};

/// Default tolerance for comparing interpolated colors.
pub const DEFAULT_COLOR_EPSILON: f32 = 0.001;
