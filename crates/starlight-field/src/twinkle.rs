//! Per-star twinkle animation.
//!
//! Each star cycles between animating toward a freshly drawn target opacity
//! and a short rest. The state machine is stepped once per frame by its
//! container; it never schedules itself.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{StarfieldError, check_interval, check_unit};
use crate::random::RandomSource;
use crate::star::{Star, StarColor};

/// Timing and probability settings for twinkling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwinkleConfig {
    /// `(min, max)` duration of one animation, in milliseconds.
    pub duration_ms: (f64, f64),
    /// `(min, max)` pause between animations, in milliseconds.
    pub rest_ms: (f64, f64),
    /// Chance of drawing the target from `wide_target_range`.
    pub wide_target_probability: f64,
    /// Target range for the occasional deep dip.
    pub wide_target_range: (f64, f64),
    /// Target range used otherwise.
    pub bright_target_range: (f64, f64),
    /// Chance per animating frame that the star shows a tint.
    pub tint_probability: f64,
    /// Tint hues are drawn from `0..tint_hue_span` degrees.
    pub tint_hue_span: u16,
}

impl Default for TwinkleConfig {
    fn default() -> Self {
        Self {
            duration_ms: (1500.0, 3500.0),
            rest_ms: (0.0, 500.0),
            wide_target_probability: 0.3,
            wide_target_range: (0.1, 1.0),
            bright_target_range: (0.5, 1.0),
            tint_probability: 0.005,
            tint_hue_span: 60,
        }
    }
}

impl TwinkleConfig {
    /// Check that every setting is usable.
    pub fn validate(&self) -> Result<(), StarfieldError> {
        check_interval("duration_ms", self.duration_ms)?;
        if self.duration_ms.0 <= 0.0 {
            return Err(StarfieldError::InvalidInterval {
                name: "duration_ms",
                min: self.duration_ms.0,
                max: self.duration_ms.1,
            });
        }
        check_interval("rest_ms", self.rest_ms)?;
        check_unit("wide_target_probability", self.wide_target_probability)?;
        check_unit("tint_probability", self.tint_probability)?;
        for (name, range) in [
            ("wide_target_range", self.wide_target_range),
            ("bright_target_range", self.bright_target_range),
        ] {
            check_interval(name, range)?;
            check_unit(name, range.1)?;
        }
        Ok(())
    }
}

/// Sinusoidal ease-in-out: slow start, fast middle, slow finish.
///
/// Maps `0 -> 0` and `1 -> 1`; input is clamped to `[0, 1]`.
pub fn ease(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    (1.0 - (PI * p).cos()) / 2.0
}

/// Eased interpolation from `from` to `to`, exact at both ends.
pub fn interpolate(from: f64, to: f64, progress: f64) -> f64 {
    if progress <= 0.0 {
        from
    } else if progress >= 1.0 {
        to
    } else {
        from + (to - from) * ease(progress)
    }
}

/// Where a star is in its twinkle cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TwinklePhase {
    /// Scheduled; a new animation begins on the next step.
    Armed,
    /// Moving from `from` to `to` over `duration_ms` starting at `start_ms`.
    Animating {
        /// Frame time the animation began.
        start_ms: f64,
        /// Length of the animation.
        duration_ms: f64,
        /// Opacity at the start.
        from: f64,
        /// Target opacity.
        to: f64,
    },
    /// Pausing until `until_ms`.
    Resting {
        /// Frame time the rest ends.
        until_ms: f64,
    },
}

/// The twinkle state machine of one star.
#[derive(Clone, Debug, PartialEq)]
pub struct TwinkleState {
    phase: TwinklePhase,
    cycles: u64,
}

impl Default for TwinkleState {
    fn default() -> Self {
        Self::new()
    }
}

impl TwinkleState {
    /// A state that starts animating on its first step.
    pub fn new() -> Self {
        Self {
            phase: TwinklePhase::Armed,
            cycles: 0,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> TwinklePhase {
        self.phase
    }

    /// Number of animations completed so far.
    pub fn completed_cycles(&self) -> u64 {
        self.cycles
    }

    /// Whether the star is mid-animation.
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, TwinklePhase::Animating { .. })
    }

    /// Draw a target opacity: usually bright, occasionally a deep dip.
    pub fn draw_target<R: RandomSource + ?Sized>(config: &TwinkleConfig, rng: &mut R) -> f64 {
        let (min, max) = if rng.next_unit() > 1.0 - config.wide_target_probability {
            config.wide_target_range
        } else {
            config.bright_target_range
        };
        rng.range(min, max)
    }

    fn begin<R: RandomSource + ?Sized>(
        &mut self,
        from: f64,
        now_ms: f64,
        config: &TwinkleConfig,
        rng: &mut R,
    ) {
        let duration_ms = rng.range(config.duration_ms.0, config.duration_ms.1);
        let to = Self::draw_target(config, rng);
        self.phase = TwinklePhase::Animating {
            start_ms: now_ms,
            duration_ms,
            from,
            to,
        };
    }

    /// Advance `star` to frame time `now_ms`.
    ///
    /// Updates opacity and color while animating. Finishing an animation
    /// lands exactly on the target, restores white and starts a rest; an
    /// expired rest begins the next animation in the same step.
    pub fn step<R: RandomSource + ?Sized>(
        &mut self,
        star: &mut Star,
        now_ms: f64,
        config: &TwinkleConfig,
        rng: &mut R,
    ) {
        match self.phase {
            TwinklePhase::Armed => self.begin(star.opacity(), now_ms, config, rng),
            TwinklePhase::Resting { until_ms } if now_ms >= until_ms => {
                self.begin(star.opacity(), now_ms, config, rng)
            }
            TwinklePhase::Resting { .. } => return,
            TwinklePhase::Animating { .. } => {}
        }

        let TwinklePhase::Animating {
            start_ms,
            duration_ms,
            from,
            to,
        } = self.phase
        else {
            return;
        };

        let progress = (now_ms - start_ms) / duration_ms;
        if progress < 1.0 {
            star.set_opacity(interpolate(from, to, progress));
            star.color = if rng.next_unit() > 1.0 - config.tint_probability {
                StarColor::Tint {
                    hue: rng.index(u32::from(config.tint_hue_span)) as u16,
                }
            } else {
                StarColor::White
            };
        } else {
            star.set_opacity(to);
            star.color = StarColor::White;
            self.cycles += 1;
            self.phase = TwinklePhase::Resting {
                until_ms: now_ms + rng.range(config.rest_ms.0, config.rest_ms.1),
            };
        }
    }
}
