use crate::config::BlinkConfiguration;
use crate::time::TimeDuration;
use crate::types::{AnimationStep, Phase, RenderState, SequenceError, Transition};
use heapless::Vec;

/// Number of steps in the blink cycle derived from a configuration.
pub const BLINK_STEPS: usize = 4;

/// A closed, repeating cycle of animation steps.
///
/// The cycle has no terminal step: after the last step the controller wraps
/// back to the first (see [`next_index`](Self::next_index)). Steps are stored
/// inline, so building a sequence never allocates.
///
/// # Type Parameters
/// * `D` - The duration type (e.g., `embassy_time::Duration`)
/// * `N` - Maximum number of steps this sequence can hold
#[derive(Debug, Clone)]
pub struct StepSequence<D: TimeDuration, const N: usize = BLINK_STEPS> {
    steps: Vec<AnimationStep<D>, N>,
}

impl<D: TimeDuration> StepSequence<D, BLINK_STEPS> {
    /// Derives the four-step blink cycle from a configuration.
    ///
    /// Steps go phase 1, phase 2, phase 3, then phase 1 again. The last step
    /// looks exactly like the first but takes the return duration, so the
    /// cycle holds and blinks rather than pulsing symmetrically.
    ///
    /// The configuration is not validated here; the controller does that.
    pub fn from_configuration(config: &BlinkConfiguration) -> Self {
        let step = |phase: Phase, transition: Transition| {
            let target = RenderState {
                dot_size: config.dot.sizes.get(phase),
                wave_size: config.wave.sizes.get(phase),
                wave_opacity: config.wave.opacities.get(phase),
                dot_color: config.dot.colors.get(phase),
            };
            AnimationStep::new(target, D::from_secs_f32(config.durations.get(transition)))
        };

        let mut steps = Vec::new();
        // Capacity is exactly BLINK_STEPS, none of these pushes can fail
        let _ = steps.push(step(Phase::One, Transition::ToPhase1));
        let _ = steps.push(step(Phase::Two, Transition::ToPhase2));
        let _ = steps.push(step(Phase::Three, Transition::ToPhase3));
        let _ = steps.push(step(Phase::One, Transition::Return));

        Self { steps }
    }
}

impl<D: TimeDuration, const N: usize> StepSequence<D, N> {
    /// Creates a new sequence builder.
    pub fn builder() -> SequenceBuilder<D, N> {
        SequenceBuilder::new()
    }

    /// Returns the number of steps in one cycle.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for a built sequence.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns a reference to the step at the given index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&AnimationStep<D>> {
        self.steps.get(index)
    }

    /// Index of the step following `index`, wrapping to 0 after the last.
    #[inline]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.steps.len()
    }

    /// Sum of all step durations, saturating at `u64::MAX` milliseconds.
    pub fn cycle_duration(&self) -> D {
        let total_millis = self
            .steps
            .iter()
            .map(|s| s.duration.as_millis())
            .fold(0u64, u64::saturating_add);
        D::from_millis(total_millis)
    }

    /// Iterates over the steps in playback order.
    pub fn iter(&self) -> core::slice::Iter<'_, AnimationStep<D>> {
        self.steps.iter()
    }

    /// Returns the target state of the first step.
    pub fn initial_state(&self) -> RenderState {
        self.steps[0].target
    }
}

/// Builder for step sequences of arbitrary length.
#[derive(Debug)]
pub struct SequenceBuilder<D: TimeDuration, const N: usize> {
    steps: Vec<AnimationStep<D>, N>,
}

impl<D: TimeDuration, const N: usize> SequenceBuilder<D, N> {
    /// Creates a new empty sequence builder.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Adds a step to the sequence.
    ///
    /// # Errors
    /// Returns `CapacityExceeded` if the sequence already holds `N` steps.
    pub fn step(mut self, target: RenderState, duration: D) -> Result<Self, SequenceError> {
        self.steps
            .push(AnimationStep::new(target, duration))
            .map_err(|_| SequenceError::CapacityExceeded)?;
        Ok(self)
    }

    /// Builds the sequence.
    ///
    /// # Errors
    /// Returns `EmptySequence` if no steps were added.
    pub fn build(self) -> Result<StepSequence<D, N>, SequenceError> {
        if self.steps.is_empty() {
            return Err(SequenceError::EmptySequence);
        }

        Ok(StepSequence { steps: self.steps })
    }
}

impl<D: TimeDuration, const N: usize> Default for SequenceBuilder<D, N> {
    fn default() -> Self {
        Self::new()
    }
}
