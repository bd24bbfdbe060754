//! The time-tool state machine: stopwatches and countdowns.
//!
//! A [`TimeTool`] tracks elapsed or remaining time against an injected
//! [`ClockSource`], with pause accounting. It never schedules anything —
//! the owner calls [`tick`](TimeTool::tick) once per frame and reads
//! [`value`](TimeTool::value), or acts on the fire signal `tick` returns.
//!
//! Control calls made in the wrong state are ignored, not errors: a `start`
//! on a running tool does nothing. The only observable state changes come
//! from the control operations, and `value` only moves when ticked while
//! running.

use super::{ClockMode, ClockSource};

/// Lifecycle phase of a [`TimeTool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolState {
    Stopped,
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy)]
enum ToolKind {
    Stopwatch,
    Countdown { duration: f32 },
}

/// A stopwatch or countdown timer over a pluggable clock.
///
/// Construct with [`stopwatch`](TimeTool::stopwatch) or
/// [`countdown`](TimeTool::countdown), picking which [`ClockMode`] the tool
/// samples. Drive it with the lifecycle operations plus a per-frame
/// [`tick`](TimeTool::tick):
///
/// ```
/// use stund::time::{ClockMode, ManualClock, TimeTool};
///
/// let mut clock = ManualClock::new();
/// let mut cooldown = TimeTool::countdown(3.0, ClockMode::Scaled);
/// cooldown.start(&clock);
///
/// clock.advance(ClockMode::Scaled, 3.0);
/// if cooldown.tick(&clock) {
///     // expired — restart for periodic behaviour
///     cooldown.restart(&clock);
/// }
/// ```
///
/// Pausing excludes the paused span from the measurement: time spent in
/// `Paused` is accumulated on resume and subtracted (stopwatch) or refunded
/// (countdown) by the next tick.
#[derive(Debug, Clone)]
pub struct TimeTool {
    kind: ToolKind,
    mode: ClockMode,
    state: ToolState,
    start_time: f32,
    last_pause: f32,
    total_paused: f32,
    value: f32,
}

impl TimeTool {
    /// A stopwatch counting up from zero. Never fires.
    pub fn stopwatch(mode: ClockMode) -> Self {
        Self::new(ToolKind::Stopwatch, mode)
    }

    /// A countdown from `duration` seconds toward zero. Fires once it
    /// reaches zero and keeps firing every tick until restarted.
    pub fn countdown(duration: f32, mode: ClockMode) -> Self {
        Self::new(ToolKind::Countdown { duration }, mode)
    }

    fn new(kind: ToolKind, mode: ClockMode) -> Self {
        Self {
            kind,
            mode,
            state: ToolState::Stopped,
            start_time: 0.0,
            last_pause: 0.0,
            total_paused: 0.0,
            value: Self::initial_value(kind),
        }
    }

    fn initial_value(kind: ToolKind) -> f32 {
        match kind {
            ToolKind::Stopwatch => 0.0,
            ToolKind::Countdown { duration } => duration,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ToolState {
        self.state
    }

    /// Which clock this tool samples.
    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    /// Elapsed seconds (stopwatch) or remaining seconds (countdown), as of
    /// the last tick while running.
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_running(&self) -> bool {
        self.state == ToolState::Running
    }

    /// Begin measuring. Ignored unless stopped.
    pub fn start(&mut self, clock: &impl ClockSource) {
        if self.state != ToolState::Stopped {
            log::trace!("TimeTool::start ignored in state {:?}", self.state);
            return;
        }
        self.start_time = clock.now(self.mode);
        self.state = ToolState::Running;
        log::trace!("TimeTool started at {:.3}s ({:?})", self.start_time, self.mode);
    }

    /// Suspend measuring. Ignored unless running.
    pub fn pause(&mut self, clock: &impl ClockSource) {
        if self.state != ToolState::Running {
            log::trace!("TimeTool::pause ignored in state {:?}", self.state);
            return;
        }
        self.last_pause = clock.now(self.mode);
        self.state = ToolState::Paused;
    }

    /// Continue measuring, crediting the paused span. Ignored unless paused.
    pub fn resume(&mut self, clock: &impl ClockSource) {
        if self.state != ToolState::Paused {
            log::trace!("TimeTool::resume ignored in state {:?}", self.state);
            return;
        }
        self.total_paused += clock.now(self.mode) - self.last_pause;
        self.state = ToolState::Running;
    }

    /// Halt without clearing accumulated timings. Ignored if already stopped.
    pub fn stop(&mut self) {
        if self.state == ToolState::Stopped {
            log::trace!("TimeTool::stop ignored while stopped");
            return;
        }
        self.state = ToolState::Stopped;
    }

    /// Return to the stopped state with all timings cleared and `value` back
    /// at its initial reading (0 for a stopwatch, the full duration for a
    /// countdown). Always applies.
    pub fn reset(&mut self) {
        self.state = ToolState::Stopped;
        self.start_time = 0.0;
        self.last_pause = 0.0;
        self.total_paused = 0.0;
        self.value = Self::initial_value(self.kind);
    }

    /// [`reset`](Self::reset) followed by [`start`](Self::start).
    pub fn restart(&mut self, clock: &impl ClockSource) {
        self.reset();
        self.start(clock);
    }

    /// Re-evaluate `value` against the clock. Returns the fire signal.
    ///
    /// Does nothing and returns `false` unless running. A stopwatch never
    /// fires; a countdown fires whenever its remaining time is ≤ 0 — the
    /// caller restarts it if periodic behaviour is wanted.
    pub fn tick(&mut self, clock: &impl ClockSource) -> bool {
        if self.state != ToolState::Running {
            return false;
        }
        let elapsed = clock.now(self.mode) - self.start_time - self.total_paused;
        match self.kind {
            ToolKind::Stopwatch => {
                self.value = elapsed;
                false
            }
            ToolKind::Countdown { duration } => {
                self.value = duration - elapsed;
                self.value <= 0.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;
    use crate::time::ManualClock;

    const MODE: ClockMode = ClockMode::Scaled;

    fn clock_at(seconds: f32) -> ManualClock {
        let mut clock = ManualClock::new();
        clock.set(MODE, seconds);
        clock
    }

    #[test]
    fn stopwatch_measures_elapsed() {
        let mut clock = clock_at(10.0);
        let mut watch = TimeTool::stopwatch(MODE);
        watch.start(&clock);

        clock.advance(MODE, 5.0);
        assert!(!watch.tick(&clock));
        assert!(approx_eq(watch.value(), 5.0, 1e-5));
    }

    #[test]
    fn countdown_counts_down_and_fires() {
        let mut clock = clock_at(0.0);
        let mut timer = TimeTool::countdown(3.0, MODE);
        timer.start(&clock);

        clock.advance(MODE, 1.0);
        assert!(!timer.tick(&clock));
        assert!(approx_eq(timer.value(), 2.0, 1e-5));

        clock.advance(MODE, 2.0);
        assert!(timer.tick(&clock));
        assert!(timer.value() <= 0.0);
    }

    #[test]
    fn countdown_keeps_firing_until_restarted() {
        let mut clock = clock_at(0.0);
        let mut timer = TimeTool::countdown(1.0, MODE);
        timer.start(&clock);

        clock.advance(MODE, 1.5);
        assert!(timer.tick(&clock));
        clock.advance(MODE, 0.1);
        assert!(timer.tick(&clock));

        timer.restart(&clock);
        assert!(!timer.tick(&clock));
        assert!(approx_eq(timer.value(), 1.0, 1e-5));
    }

    #[test]
    fn start_while_running_is_a_noop() {
        let mut clock = clock_at(0.0);
        let mut watch = TimeTool::stopwatch(MODE);
        watch.start(&clock);

        clock.advance(MODE, 2.0);
        watch.start(&clock); // must not re-anchor start_time
        clock.advance(MODE, 1.0);
        watch.tick(&clock);
        assert!(approx_eq(watch.value(), 3.0, 1e-5));
    }

    #[test]
    fn pause_excludes_time_from_measurement() {
        let mut clock = clock_at(0.0);
        let mut watch = TimeTool::stopwatch(MODE);
        watch.start(&clock);

        clock.advance(MODE, 2.0);
        watch.pause(&clock);

        // Paused span: value frozen, ticks refuse.
        clock.advance(MODE, 3.0);
        assert!(!watch.tick(&clock));
        assert!(approx_eq(watch.value(), 0.0, 1e-5));

        watch.resume(&clock);
        clock.advance(MODE, 2.0);
        watch.tick(&clock);
        // 7 seconds on the clock, 3 of them paused.
        assert!(approx_eq(watch.value(), 4.0, 1e-5));
    }

    #[test]
    fn countdown_pause_refunds_paused_time() {
        let mut clock = clock_at(0.0);
        let mut timer = TimeTool::countdown(5.0, MODE);
        timer.start(&clock);

        clock.advance(MODE, 1.0);
        timer.pause(&clock);
        clock.advance(MODE, 10.0);
        timer.resume(&clock);
        clock.advance(MODE, 1.0);

        assert!(!timer.tick(&clock));
        assert!(approx_eq(timer.value(), 3.0, 1e-5));
    }

    #[test]
    fn repeated_pause_resume_cycles_accumulate() {
        let mut clock = clock_at(0.0);
        let mut watch = TimeTool::stopwatch(MODE);
        watch.start(&clock);

        for _ in 0..3 {
            clock.advance(MODE, 1.0);
            watch.pause(&clock);
            clock.advance(MODE, 2.0);
            watch.resume(&clock);
        }
        watch.tick(&clock);
        // 9 seconds on the clock, 6 of them paused.
        assert!(approx_eq(watch.value(), 3.0, 1e-5));
    }

    #[test]
    fn tick_while_stopped_or_paused_does_not_mutate() {
        let mut clock = clock_at(0.0);
        let mut timer = TimeTool::countdown(3.0, MODE);

        clock.advance(MODE, 1.0);
        assert!(!timer.tick(&clock));
        assert_eq!(timer.value(), 3.0);

        timer.start(&clock);
        clock.advance(MODE, 1.0);
        timer.tick(&clock);
        let before = timer.value();
        timer.pause(&clock);
        clock.advance(MODE, 1.0);
        assert!(!timer.tick(&clock));
        assert_eq!(timer.value(), before);
    }

    #[test]
    fn reset_restores_stopped_state_and_initial_value() {
        let mut clock = clock_at(0.0);
        let mut timer = TimeTool::countdown(3.0, MODE);
        timer.start(&clock);
        clock.advance(MODE, 2.0);
        timer.tick(&clock);

        timer.reset();
        assert_eq!(timer.state(), ToolState::Stopped);
        assert_eq!(timer.value(), 3.0);

        let mut watch = TimeTool::stopwatch(MODE);
        watch.start(&clock);
        clock.advance(MODE, 2.0);
        watch.tick(&clock);
        watch.reset();
        assert_eq!(watch.state(), ToolState::Stopped);
        assert_eq!(watch.value(), 0.0);
    }

    #[test]
    fn restart_is_reset_then_start() {
        let mut clock = clock_at(0.0);

        let mut a = TimeTool::stopwatch(MODE);
        a.start(&clock);
        clock.advance(MODE, 4.0);
        a.pause(&clock);
        clock.advance(MODE, 1.0);
        a.restart(&clock);

        let mut b = TimeTool::stopwatch(MODE);
        b.start(&clock);

        clock.advance(MODE, 2.0);
        a.tick(&clock);
        b.tick(&clock);
        assert_eq!(a.state(), b.state());
        assert!(approx_eq(a.value(), b.value(), 1e-5));
    }

    #[test]
    fn stop_keeps_accumulated_timings_until_reset() {
        let mut clock = clock_at(0.0);
        let mut watch = TimeTool::stopwatch(MODE);
        watch.start(&clock);

        clock.advance(MODE, 1.0);
        watch.pause(&clock);
        clock.advance(MODE, 2.0);
        watch.resume(&clock);
        watch.stop();

        // A bare start after stop re-anchors start_time but keeps the pause
        // credit; only reset clears it.
        clock.advance(MODE, 1.0);
        watch.start(&clock);
        clock.advance(MODE, 3.0);
        watch.tick(&clock);
        assert!(approx_eq(watch.value(), 1.0, 1e-5));
    }

    #[test]
    fn resume_and_pause_out_of_state_are_noops() {
        let mut clock = clock_at(0.0);
        let mut watch = TimeTool::stopwatch(MODE);

        watch.pause(&clock);
        assert_eq!(watch.state(), ToolState::Stopped);
        watch.resume(&clock);
        assert_eq!(watch.state(), ToolState::Stopped);

        watch.start(&clock);
        watch.resume(&clock);
        assert_eq!(watch.state(), ToolState::Running);
    }

    #[test]
    fn tools_on_different_modes_are_independent() {
        let mut clock = ManualClock::new();
        let mut scaled = TimeTool::stopwatch(ClockMode::Scaled);
        let mut unscaled = TimeTool::stopwatch(ClockMode::Unscaled);
        scaled.start(&clock);
        unscaled.start(&clock);

        clock.advance(ClockMode::Unscaled, 5.0);
        scaled.tick(&clock);
        unscaled.tick(&clock);
        assert_eq!(scaled.value(), 0.0);
        assert!(approx_eq(unscaled.value(), 5.0, 1e-5));
    }
}
