//! Fixed-timestep frame loop.
//!
//! Decouples the twinkle tick (fixed rate) from however often the host gets
//! around to calling [`FrameLoop::tick`], using an accumulator. Provides the
//! interpolation alpha for rendering between ticks.

use std::time::Instant;
use tracing::warn;

/// Default tick rate in Hz, one tick per display refresh on common screens.
pub const DEFAULT_TICK_RATE_HZ: u32 = 60;

/// Maximum frame time clamp to prevent a spiral of death.
/// Longer frames are clamped and the field simply runs slower.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Fixed-timestep loop state.
pub struct FrameLoop {
    fixed_dt: f64,
    previous_time: Instant,
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl FrameLoop {
    /// A loop ticking at `tick_rate_hz` (at least 1), starting now.
    pub fn new(tick_rate_hz: u32) -> Self {
        Self {
            fixed_dt: 1.0 / f64::from(tick_rate_hz.max(1)),
            previous_time: Instant::now(),
            accumulator: 0.0,
            total_sim_time: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Runs one frame against the wall clock. See [`advance`](Self::advance).
    pub fn tick(&mut self, update_fn: impl FnMut(f64, f64), render_fn: impl FnMut(f64)) {
        let current_time = Instant::now();
        let frame_time = current_time
            .duration_since(self.previous_time)
            .as_secs_f64();
        self.previous_time = current_time;
        self.advance(frame_time, update_fn, render_fn);
    }

    /// Runs one frame of `frame_time` seconds.
    ///
    /// - `update_fn(fixed_dt, total_sim_time)` is called zero or more times at
    ///   the fixed rate, with the sim time at the start of the step.
    /// - `render_fn(alpha)` is called exactly once with alpha in `[0.0, 1.0)`.
    pub fn advance(
        &mut self,
        frame_time: f64,
        mut update_fn: impl FnMut(f64, f64),
        mut render_fn: impl FnMut(f64),
    ) {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;

        while self.accumulator >= self.fixed_dt {
            update_fn(self.fixed_dt, self.total_sim_time);
            self.total_sim_time += self.fixed_dt;
            self.accumulator -= self.fixed_dt;
            self.update_count += 1;
        }

        render_fn(self.alpha());
        self.frame_count += 1;
    }

    /// Current interpolation alpha without running a frame.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / self.fixed_dt
        } else {
            0.0
        }
    }

    /// Seconds per fixed step.
    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    /// Total frames rendered.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Total fixed steps executed.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Total simulated time in seconds.
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE_HZ)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_dt_value() {
        let frame_loop = FrameLoop::default();
        assert!((frame_loop.fixed_dt() - 1.0 / 60.0).abs() < f64::EPSILON * 10.0);
        assert_eq!(FrameLoop::new(0).fixed_dt(), 1.0);
    }

    #[test]
    fn test_accumulator_single_step() {
        let mut frame_loop = FrameLoop::default();
        let dt = frame_loop.fixed_dt();
        let mut updates = 0u32;
        frame_loop.advance(dt, |_, _| updates += 1, |_| {});
        assert_eq!(updates, 1);
        assert!(frame_loop.alpha().abs() < 1e-9);
    }

    #[test]
    fn test_accumulator_multiple_steps() {
        let mut frame_loop = FrameLoop::new(50);
        let mut times = Vec::new();
        frame_loop.advance(0.061, |_, t| times.push(t), |_| {});
        assert_eq!(times.len(), 3);
        assert!((times[2] - 0.04).abs() < 1e-9);
        assert_eq!(frame_loop.update_count(), 3);
    }

    #[test]
    fn test_short_frame_only_renders() {
        let mut frame_loop = FrameLoop::default();
        let mut updates = 0u32;
        let mut alpha = -1.0;
        frame_loop.advance(0.005, |_, _| updates += 1, |a| alpha = a);
        assert_eq!(updates, 0);
        assert!((alpha - 0.3).abs() < 1e-9);
        assert_eq!(frame_loop.frame_count(), 1);
    }

    #[test]
    fn test_frame_time_is_clamped() {
        let mut frame_loop = FrameLoop::new(8);
        let mut updates = 0u32;
        frame_loop.advance(5.0, |_, _| updates += 1, |_| {});
        assert_eq!(updates, 2);
    }

    #[test]
    fn test_negative_frame_time_is_ignored() {
        let mut frame_loop = FrameLoop::default();
        frame_loop.advance(-1.0, |_, _| panic!("no update expected"), |_| {});
        assert_eq!(frame_loop.total_sim_time(), 0.0);
    }
}
