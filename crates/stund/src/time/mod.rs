//! # Time — Clock Sources and Time Tools
//!
//! Everything here is sampled, never pushed: a [`ClockSource`] answers "what
//! time is it on clock `mode`?" and the [`TimeTool`] state machine
//! (stopwatch / countdown) derives its value from those readings when ticked.
//!
//! The host application owns the frame loop. [`FrameClocks`] is a reference
//! clock source for hosts that feed raw frame deltas in; tests and headless
//! callers use [`ManualClock`] to move time by hand.

use std::time::Instant;

use serde::{Deserialize, Serialize};

mod tool;

pub use tool::{TimeTool, ToolState};

/// Which underlying time source a reading comes from.
///
/// The distinctions mirror what frame-driven hosts usually expose:
///
/// - `Scaled` — frame time multiplied by the host's time scale. Freezes when
///   the host pauses (scale 0), stretches in slow motion.
/// - `Unscaled` — frame time, ignoring the time scale.
/// - `Realtime` — wall-clock seconds since the clock was created, advancing
///   even between frames.
/// - `FixedStep` — advances in whole fixed-timestep quanta, for logic that
///   must stay in lockstep with a fixed update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClockMode {
    Scaled,
    Unscaled,
    Realtime,
    FixedStep,
}

/// A source of monotonic time readings, one per [`ClockMode`].
///
/// Injected into [`TimeTool::tick`] and the systems that need time, so logic
/// stays deterministic under test — see [`ManualClock`].
pub trait ClockSource {
    /// Current reading of the given clock, in seconds. Monotonic per mode.
    fn now(&self, mode: ClockMode) -> f32;
}

/// Default delta-time cap applied by [`FrameClocks::advance`].
///
/// Prevents one long stall (debugger, minimized window) from teleporting
/// every timer forward a huge amount in a single frame.
pub const MAX_FRAME_DELTA: f32 = 0.25;

/// A frame-driven [`ClockSource`] for hosts without one of their own.
///
/// Call [`advance`](FrameClocks::advance) once per frame with the raw frame
/// delta. `Realtime` is sampled from a [`Instant`] taken at construction and
/// keeps moving regardless of what the host feeds in.
#[derive(Debug, Clone)]
pub struct FrameClocks {
    scaled: f32,
    unscaled: f32,
    time_scale: f32,
    fixed_dt: f32,
    fixed_time: f32,
    accumulator: f32,
    started: Instant,
}

impl FrameClocks {
    /// A new clock set with time scale 1 and a 60 Hz fixed step.
    pub fn new() -> Self {
        Self {
            scaled: 0.0,
            unscaled: 0.0,
            time_scale: 1.0,
            fixed_dt: 1.0 / 60.0,
            fixed_time: 0.0,
            accumulator: 0.0,
            started: Instant::now(),
        }
    }

    /// Set the fixed timestep (builder pattern).
    pub fn with_fixed_dt(mut self, fixed_dt: f32) -> Self {
        debug_assert!(fixed_dt > 0.0);
        self.fixed_dt = fixed_dt;
        self
    }

    /// Current time scale.
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Set the time scale. 0 freezes the scaled clock (host pause); values
    /// below 0 are clamped to 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Advance all frame-driven clocks by one frame of `raw_dt` seconds.
    ///
    /// The delta is capped at [`MAX_FRAME_DELTA`]. Returns the number of
    /// fixed steps that elapsed this frame, so the host can run its fixed
    /// update that many times.
    pub fn advance(&mut self, raw_dt: f32) -> u32 {
        let dt = raw_dt.clamp(0.0, MAX_FRAME_DELTA);
        self.unscaled += dt;
        self.scaled += dt * self.time_scale;

        self.accumulator += dt;
        let mut steps = 0;
        while self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            self.fixed_time += self.fixed_dt;
            steps += 1;
        }
        steps
    }
}

impl Default for FrameClocks {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockSource for FrameClocks {
    fn now(&self, mode: ClockMode) -> f32 {
        match mode {
            ClockMode::Scaled => self.scaled,
            ClockMode::Unscaled => self.unscaled,
            ClockMode::Realtime => self.started.elapsed().as_secs_f32(),
            ClockMode::FixedStep => self.fixed_time,
        }
    }
}

/// A [`ClockSource`] whose readings are set by hand.
///
/// The deterministic clock for unit tests and examples: no wall clock, no
/// frame loop, every mode moves only when told to.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    scaled: f32,
    unscaled: f32,
    realtime: f32,
    fixed: f32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one clock's reading directly.
    pub fn set(&mut self, mode: ClockMode, seconds: f32) {
        *self.slot(mode) = seconds;
    }

    /// Advance one clock by `dt` seconds.
    pub fn advance(&mut self, mode: ClockMode, dt: f32) {
        *self.slot(mode) += dt;
    }

    /// Advance every clock by `dt` seconds.
    pub fn advance_all(&mut self, dt: f32) {
        self.scaled += dt;
        self.unscaled += dt;
        self.realtime += dt;
        self.fixed += dt;
    }

    fn slot(&mut self, mode: ClockMode) -> &mut f32 {
        match mode {
            ClockMode::Scaled => &mut self.scaled,
            ClockMode::Unscaled => &mut self.unscaled,
            ClockMode::Realtime => &mut self.realtime,
            ClockMode::FixedStep => &mut self.fixed,
        }
    }
}

impl ClockSource for ManualClock {
    fn now(&self, mode: ClockMode) -> f32 {
        match mode {
            ClockMode::Scaled => self.scaled,
            ClockMode::Unscaled => self.unscaled,
            ClockMode::Realtime => self.realtime,
            ClockMode::FixedStep => self.fixed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    #[test]
    fn frame_clocks_accumulate_scaled_and_unscaled() {
        let mut clocks = FrameClocks::new();
        clocks.advance(0.1);
        clocks.advance(0.1);
        assert!(approx_eq(clocks.now(ClockMode::Unscaled), 0.2, 1e-6));
        assert!(approx_eq(clocks.now(ClockMode::Scaled), 0.2, 1e-6));
    }

    #[test]
    fn time_scale_zero_freezes_only_scaled() {
        let mut clocks = FrameClocks::new();
        clocks.advance(0.1);
        clocks.set_time_scale(0.0);
        clocks.advance(0.1);
        assert!(approx_eq(clocks.now(ClockMode::Scaled), 0.1, 1e-6));
        assert!(approx_eq(clocks.now(ClockMode::Unscaled), 0.2, 1e-6));
    }

    #[test]
    fn slow_motion_scales_delta() {
        let mut clocks = FrameClocks::new();
        clocks.set_time_scale(0.5);
        clocks.advance(0.2);
        assert!(approx_eq(clocks.now(ClockMode::Scaled), 0.1, 1e-6));
    }

    #[test]
    fn fixed_step_advances_in_quanta() {
        let mut clocks = FrameClocks::new().with_fixed_dt(0.0625);
        // 2.5 fixed steps of frame time → two whole steps, remainder banked.
        let steps = clocks.advance(0.15625);
        assert_eq!(steps, 2);
        assert!(approx_eq(clocks.now(ClockMode::FixedStep), 0.125, 1e-6));

        // The banked half-step plus another half completes a third step.
        let steps = clocks.advance(0.03125);
        assert_eq!(steps, 1);
        assert!(approx_eq(clocks.now(ClockMode::FixedStep), 0.1875, 1e-6));
    }

    #[test]
    fn advance_caps_pathological_deltas() {
        let mut clocks = FrameClocks::new();
        clocks.advance(10.0);
        assert!(approx_eq(clocks.now(ClockMode::Unscaled), MAX_FRAME_DELTA, 1e-6));
    }

    #[test]
    fn negative_time_scale_clamps_to_zero() {
        let mut clocks = FrameClocks::new();
        clocks.set_time_scale(-2.0);
        assert_eq!(clocks.time_scale(), 0.0);
    }

    #[test]
    fn manual_clock_modes_are_independent() {
        let mut clock = ManualClock::new();
        clock.advance(ClockMode::Scaled, 1.0);
        clock.set(ClockMode::Realtime, 5.0);
        assert_eq!(clock.now(ClockMode::Scaled), 1.0);
        assert_eq!(clock.now(ClockMode::Unscaled), 0.0);
        assert_eq!(clock.now(ClockMode::Realtime), 5.0);
        assert_eq!(clock.now(ClockMode::FixedStep), 0.0);
    }
}
