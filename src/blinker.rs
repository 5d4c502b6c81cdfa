//! Blink loop controller.
//!
//! Provides [`Blinker`], which plays a [`StepSequence`] forever on a host
//! supplied [`BlinkSurface`], and the [`ServiceTiming`] hints telling the host
//! when to call [`Blinker::service`] again.

use crate::command::BlinkerAction;
use crate::config::{BlinkConfiguration, InvalidConfiguration};
use crate::sequence::{BLINK_STEPS, StepSequence};
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::{Circle, RenderState};
use palette::Srgb;

/// Trait for the host's drawing target.
///
/// Receives the halo and the dot every time the displayed state changes. Both
/// circles share a center; the wave is drawn first, the dot on top of it.
/// Drawing cannot fail, handle any host errors internally.
pub trait BlinkSurface {
    fn draw(&mut self, wave: Circle, dot: Circle);
}

/// Lifecycle state of a [`Blinker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkerState {
    /// Constructed and showing the first step, loop not started.
    Unmounted,
    /// Loop running.
    Running,
    /// Loop frozen at the state shown when paused.
    Paused,
    /// Torn down. Terminal; nothing is drawn or scheduled anymore.
    Disposed,
}

/// When the host should call [`Blinker::service`] next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceTiming<D> {
    /// A transition is interpolating. Service again at your frame rate
    /// (typically 16-33ms).
    Continuous,

    /// The displayed state holds still. Service again after this delay;
    /// the next step starts then.
    Delay(D),

    /// The loop is not running (unmounted, paused or disposed). Do not
    /// schedule another service call.
    Inactive,
}

/// Creates an indicator for `config` drawing onto `surface`.
///
/// Equivalent to [`Blinker::new`].
///
/// # Errors
/// Returns [`InvalidConfiguration`] before anything is drawn if the
/// configuration violates an invariant.
pub fn create_blink_indicator<'t, I, S, T>(
    config: &BlinkConfiguration,
    surface: S,
    time_source: &'t T,
) -> Result<Blinker<'t, I, S, T>, InvalidConfiguration>
where
    I: TimeInstant,
    S: BlinkSurface,
    T: TimeSource<I>,
{
    Blinker::new(config, surface, time_source)
}

/// A blinking status indicator: a halo and a dot cycling through timed steps.
///
/// Each step interpolates the displayed state linearly from where the
/// previous step ended to the step's target, over the step's duration. After
/// the last step the cycle starts over; the loop only ends with
/// [`dispose`](Self::dispose).
///
/// The controller never schedules anything itself. The host calls
/// [`service`](Self::service) from its timer or frame loop and uses the
/// returned [`ServiceTiming`] to decide when to call it again. Steps are
/// timed back to back from when the previous one was due to end, so servicing
/// at a frame rate does not stretch the cycle. A host late by a whole cycle
/// restarts the rhythm at the late tick.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `S` - Render surface type
/// * `T` - Time source implementation type
/// * `N` - Maximum number of steps in the cycle
pub struct Blinker<'t, I, S, T, const N: usize = BLINK_STEPS>
where
    I: TimeInstant,
    S: BlinkSurface,
    T: TimeSource<I>,
{
    surface: S,
    time_source: &'t T,
    steps: StepSequence<I::Duration, N>,
    wave_color: Srgb,
    state: BlinkerState,
    index: usize,
    step_start: Option<I>,
    pause_start: Option<I>,
    origin: RenderState,
    render_state: RenderState,
}

impl<'t, I, S, T> Blinker<'t, I, S, T, BLINK_STEPS>
where
    I: TimeInstant,
    S: BlinkSurface,
    T: TimeSource<I>,
{
    /// Validates `config`, derives its four-step cycle and draws the first
    /// step on `surface`.
    ///
    /// # Errors
    /// Returns [`InvalidConfiguration`] if `config` fails validation. Nothing
    /// is drawn in that case.
    pub fn new(
        config: &BlinkConfiguration,
        surface: S,
        time_source: &'t T,
    ) -> Result<Self, InvalidConfiguration> {
        config.validate()?;
        let steps = StepSequence::from_configuration(config);
        Ok(Self::with_sequence(steps, config.wave.color, surface, time_source))
    }
}

impl<'t, I, S, T, const N: usize> Blinker<'t, I, S, T, N>
where
    I: TimeInstant,
    S: BlinkSurface,
    T: TimeSource<I>,
{
    /// Creates an indicator playing an arbitrary step sequence.
    ///
    /// The surface shows the first step's target right away, so nothing
    /// flashes before the loop is mounted.
    pub fn with_sequence(
        steps: StepSequence<I::Duration, N>,
        wave_color: Srgb,
        mut surface: S,
        time_source: &'t T,
    ) -> Self {
        let initial = steps.initial_state();
        surface.draw(initial.wave(wave_color), initial.dot());

        Self {
            surface,
            time_source,
            steps,
            wave_color,
            state: BlinkerState::Unmounted,
            index: 0,
            step_start: None,
            pause_start: None,
            origin: initial,
            render_state: initial,
        }
    }

    /// Handles a lifecycle action by dispatching to the matching method.
    pub fn handle_action(&mut self, action: BlinkerAction) -> ServiceTiming<I::Duration> {
        match action {
            BlinkerAction::Mount => self.mount(),
            BlinkerAction::Pause => {
                self.pause();
                ServiceTiming::Inactive
            }
            BlinkerAction::Resume => self.resume(),
            BlinkerAction::Dispose => {
                self.dispose();
                ServiceTiming::Inactive
            }
        }
    }

    /// Starts the loop at the first step.
    ///
    /// Mounting a running indicator services it once. Mounting a paused or
    /// disposed indicator does nothing.
    pub fn mount(&mut self) -> ServiceTiming<I::Duration> {
        match self.state {
            BlinkerState::Unmounted => {
                self.index = 0;
                self.origin = self.render_state;
                self.step_start = Some(self.time_source.now());
                self.state = BlinkerState::Running;

                #[cfg(feature = "defmt")]
                defmt::debug!("blinker mounted, {} steps", self.steps.len());

                self.service()
            }
            BlinkerState::Running => self.service(),
            BlinkerState::Paused | BlinkerState::Disposed => ServiceTiming::Inactive,
        }
    }

    /// Advances the animation to the current time and redraws if needed.
    ///
    /// Call this when the previously returned timing elapses. Completes at
    /// most one step per call. Outside the `Running` state this returns
    /// [`ServiceTiming::Inactive`] without touching the displayed state, so a
    /// tick scheduled before [`dispose`](Self::dispose) is harmless.
    pub fn service(&mut self) -> ServiceTiming<I::Duration> {
        if self.state != BlinkerState::Running {
            return ServiceTiming::Inactive;
        }

        let (Some(step_start), Some(step)) = (self.step_start, self.steps.get(self.index).copied())
        else {
            return ServiceTiming::Inactive;
        };

        let now = self.time_source.now();
        let elapsed = now.duration_since(step_start);
        let elapsed_millis = elapsed.as_millis();
        let duration_millis = step.duration.as_millis();

        if elapsed_millis >= duration_millis {
            // Settle exactly on the target, then start the next step when this
            // one was due to end. A host a whole cycle late or more restarts
            // the rhythm from now instead of replaying missed steps.
            self.apply(step.target);
            self.origin = step.target;
            self.index = self.steps.next_index(self.index);

            let lateness = elapsed_millis - duration_millis;
            let next_start = match step_start.checked_add(step.duration) {
                Some(due) if lateness < self.steps.cycle_duration().as_millis() => due,
                _ => now,
            };
            self.step_start = Some(next_start);

            #[cfg(feature = "defmt")]
            defmt::trace!("blinker step {}", self.index);

            return self.timing(now.duration_since(next_start));
        }

        let progress = elapsed_millis as f32 / duration_millis as f32;
        let next = self.origin.lerp(&step.target, progress);
        self.apply(next);
        self.timing(elapsed)
    }

    /// Freezes the animation at the state due at the current time.
    ///
    /// Only has an effect while running.
    pub fn pause(&mut self) {
        if self.state != BlinkerState::Running {
            return;
        }

        // Bring the surface up to date so the frozen frame matches the pause instant
        self.service();
        self.pause_start = Some(self.time_source.now());
        self.state = BlinkerState::Paused;

        #[cfg(feature = "defmt")]
        defmt::debug!("blinker paused at step {}", self.index);
    }

    /// Continues a paused animation from where it stopped.
    ///
    /// Returns [`ServiceTiming::Inactive`] unless the indicator was paused.
    pub fn resume(&mut self) -> ServiceTiming<I::Duration> {
        if self.state != BlinkerState::Paused {
            return ServiceTiming::Inactive;
        }

        // Shift the step start by the time spent paused. On instant overflow
        // keep the old start; the step then finishes early.
        if let (Some(start), Some(pause_start)) = (self.step_start, self.pause_start) {
            let paused_for = self.time_source.now().duration_since(pause_start);
            self.step_start = Some(start.checked_add(paused_for).unwrap_or(start));
        }

        self.pause_start = None;
        self.state = BlinkerState::Running;
        self.service()
    }

    /// Stops the loop for good.
    ///
    /// Any tick still scheduled by the host becomes a no-op. The surface keeps
    /// whatever was drawn last.
    pub fn dispose(&mut self) {
        if self.state == BlinkerState::Disposed {
            return;
        }

        self.state = BlinkerState::Disposed;
        self.step_start = None;
        self.pause_start = None;

        #[cfg(feature = "defmt")]
        defmt::debug!("blinker disposed");
    }

    fn apply(&mut self, next: RenderState) {
        if next != self.render_state {
            self.render_state = next;
            self.surface.draw(next.wave(self.wave_color), next.dot());
        }
    }

    fn timing(&self, elapsed: I::Duration) -> ServiceTiming<I::Duration> {
        let Some(step) = self.steps.get(self.index) else {
            return ServiceTiming::Inactive;
        };

        let remaining = step.duration.saturating_sub(elapsed);
        if remaining == I::Duration::ZERO || self.origin == step.target {
            ServiceTiming::Delay(remaining)
        } else {
            ServiceTiming::Continuous
        }
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> BlinkerState {
        self.state
    }

    /// Returns the state currently shown on the surface.
    pub fn render_state(&self) -> RenderState {
        self.render_state
    }

    /// Index of the step currently being played.
    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn steps(&self) -> &StepSequence<I::Duration, N> {
        &self.steps
    }

    pub fn wave_color(&self) -> Srgb {
        self.wave_color
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Returns true while the loop is running.
    pub fn is_running(&self) -> bool {
        self.state == BlinkerState::Running
    }

    /// Returns true once the indicator has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.state == BlinkerState::Disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use crate::colors::{GREEN, PINK, RED};
    use crate::config::{OpacityTriple, WaveStyle};
    use core::cell::Cell;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    struct TestDuration(u64);

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

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    struct TestInstant(u64);

    impl TimeInstant for TestInstant {
        type Duration = TestDuration;

        fn duration_since(&self, earlier: Self) -> Self::Duration {
            TestDuration(self.0 - earlier.0)
        }

        fn checked_add(self, duration: Self::Duration) -> Option<Self> {
            self.0.checked_add(duration.0).map(TestInstant)
        }
    }

    struct MockTimeSource {
        current_time: Cell<TestInstant>,
    }

    impl MockTimeSource {
        fn new() -> Self {
            Self {
                current_time: Cell::new(TestInstant(0)),
            }
        }

        fn advance(&self, millis: u64) {
            let current = self.current_time.get();
            self.current_time.set(TestInstant(current.0 + millis));
        }
    }

    impl TimeSource<TestInstant> for MockTimeSource {
        fn now(&self) -> TestInstant {
            self.current_time.get()
        }
    }

    // Counts draws and keeps the last pair of circles
    struct CountingSurface {
        draws: usize,
        last: Option<(Circle, Circle)>,
    }

    impl CountingSurface {
        fn new() -> Self {
            Self {
                draws: 0,
                last: None,
            }
        }
    }

    impl BlinkSurface for CountingSurface {
        fn draw(&mut self, wave: Circle, dot: Circle) {
            self.draws += 1;
            self.last = Some((wave, dot));
        }
    }

    type TestBlinker<'t> = Blinker<'t, TestInstant, CountingSurface, MockTimeSource>;

    fn blinker(timer: &MockTimeSource) -> TestBlinker<'_> {
        Blinker::new(&BlinkConfiguration::ACCENT, CountingSurface::new(), timer).unwrap()
    }

    #[test]
    fn construction_draws_first_step() {
        let timer = MockTimeSource::new();
        let blinker = blinker(&timer);

        assert_eq!(blinker.state(), BlinkerState::Unmounted);
        assert_eq!(blinker.surface().draws, 1);
        let (wave, dot) = blinker.surface().last.unwrap();
        assert_eq!(wave.diameter, 8.0);
        assert_eq!(wave.color.alpha, 0.0);
        assert_eq!(wave.color.color, PINK);
        assert_eq!(dot.diameter, 8.0);
        assert_eq!(dot.color.color, RED);
    }

    #[test]
    fn invalid_configuration_fails_construction() {
        let timer = MockTimeSource::new();
        let config = BlinkConfiguration {
            wave: WaveStyle {
                opacities: OpacityTriple::new(-0.5, 1.0, 0.0),
                ..WaveStyle::ACCENT
            },
            ..BlinkConfiguration::ACCENT
        };

        let result = TestBlinker::new(&config, CountingSurface::new(), &timer);
        assert!(matches!(
            result,
            Err(InvalidConfiguration::OpacityOutOfRange { .. })
        ));
    }

    #[test]
    fn service_before_mount_is_inactive() {
        let timer = MockTimeSource::new();
        let mut blinker = blinker(&timer);

        assert_eq!(blinker.service(), ServiceTiming::Inactive);
        assert_eq!(blinker.surface().draws, 1);
    }

    #[test]
    fn mount_skips_zero_length_first_step() {
        let timer = MockTimeSource::new();
        let mut blinker = blinker(&timer);

        assert_eq!(blinker.mount(), ServiceTiming::Continuous);
        assert_eq!(blinker.current_index(), 1);
        // First step changes nothing visible, so no redraw
        assert_eq!(blinker.surface().draws, 1);
    }

    #[test]
    fn interpolates_linearly_toward_second_phase() {
        let timer = MockTimeSource::new();
        let mut blinker = blinker(&timer);
        blinker.mount();

        timer.advance(225);
        assert_eq!(blinker.service(), ServiceTiming::Continuous);

        let state = blinker.render_state();
        assert!((state.dot_size - 10.0).abs() < 0.001);
        assert!((state.wave_size - 28.0).abs() < 0.001);
        assert!((state.wave_opacity - 0.5).abs() < 0.001);
        assert!(crate::colors::approx_eq(
            state.dot_color,
            Srgb::new(0.5, 0.5, 0.0),
            0.001
        ));
    }

    #[test]
    fn completing_a_step_lands_on_target() {
        let timer = MockTimeSource::new();
        let mut blinker = blinker(&timer);
        blinker.mount();

        timer.advance(450);
        blinker.service();

        let state = blinker.render_state();
        assert_eq!(state.dot_size, 12.0);
        assert_eq!(state.wave_size, 48.0);
        assert_eq!(state.wave_opacity, 1.0);
        assert_eq!(state.dot_color, GREEN);
        assert_eq!(blinker.current_index(), 2);
    }

    #[test]
    fn late_tick_advances_only_one_step() {
        let timer = MockTimeSource::new();
        let mut blinker = blinker(&timer);
        blinker.mount();

        timer.advance(5_000);
        blinker.service();
        assert_eq!(blinker.current_index(), 2);
        assert_eq!(blinker.render_state().dot_color, GREEN);
    }

    #[test]
    fn dispose_stops_all_updates() {
        let timer = MockTimeSource::new();
        let mut blinker = blinker(&timer);
        blinker.mount();
        timer.advance(100);
        blinker.service();

        blinker.dispose();
        let before = blinker.render_state();
        let draws = blinker.surface().draws;

        timer.advance(1_000);
        assert_eq!(blinker.service(), ServiceTiming::Inactive);
        assert_eq!(blinker.render_state(), before);
        assert_eq!(blinker.surface().draws, draws);
        assert_eq!(blinker.mount(), ServiceTiming::Inactive);
        assert_eq!(blinker.resume(), ServiceTiming::Inactive);
        assert!(blinker.is_disposed());
    }

    #[test]
    fn pause_and_resume_keep_position() {
        let timer = MockTimeSource::new();
        let mut blinker = blinker(&timer);
        blinker.mount();

        timer.advance(225);
        blinker.service();
        let halfway = blinker.render_state();

        blinker.pause();
        assert_eq!(blinker.state(), BlinkerState::Paused);
        timer.advance(10_000);
        assert_eq!(blinker.service(), ServiceTiming::Inactive);
        assert_eq!(blinker.render_state(), halfway);

        assert_eq!(blinker.resume(), ServiceTiming::Continuous);
        assert_eq!(blinker.current_index(), 1);
        assert_eq!(blinker.render_state(), halfway);
    }

    #[test]
    fn handle_action_dispatches() {
        let timer = MockTimeSource::new();
        let mut blinker = blinker(&timer);

        assert_eq!(
            blinker.handle_action(BlinkerAction::Mount),
            ServiceTiming::Continuous
        );
        assert_eq!(
            blinker.handle_action(BlinkerAction::Pause),
            ServiceTiming::Inactive
        );
        assert!(!blinker.is_running());
        assert_eq!(
            blinker.handle_action(BlinkerAction::Resume),
            ServiceTiming::Continuous
        );
        blinker.handle_action(BlinkerAction::Dispose);
        assert!(blinker.is_disposed());
    }
}
