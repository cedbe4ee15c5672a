//! The starfield container: owns every star and its twinkle task, and steps
//! all live tasks once per external frame tick.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::StarfieldError;
use crate::generator::{GenerationReport, StarfieldGenerator};
use crate::star::{Star, StarColor, StarId};
use crate::twinkle::{TwinkleConfig, TwinkleState};

/// Mixed into the generator seed so twinkle streams differ from placement.
const TWINKLE_SEED_SALT: u64 = 0x7457_696e_6b6c_6521;

/// Cancels one star's twinkle task.
///
/// Clones share the same flag. A cancelled task is dropped on the next tick;
/// its star keeps whatever opacity it last had and returns to white.
#[derive(Clone, Debug)]
pub struct TwinkleHandle {
    star: StarId,
    cancelled: Arc<AtomicBool>,
}

impl TwinkleHandle {
    fn new(star: StarId) -> Self {
        Self {
            star,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The star this handle controls.
    pub fn star(&self) -> StarId {
        self.star
    }

    /// Stop the task. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

struct TwinkleTask {
    star_index: usize,
    state: TwinkleState,
    rng: ChaCha8Rng,
    handle: TwinkleHandle,
}

/// Per-tick counters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Ticks processed so far, including this one.
    pub frame: u64,
    /// Live tasks after this tick.
    pub active_tasks: usize,
    /// Stars mid-animation.
    pub animating: usize,
    /// Live tasks resting.
    pub resting: usize,
    /// Stars showing a tint this frame.
    pub tinted: usize,
    /// Mean opacity over all stars.
    pub mean_opacity: f64,
}

/// Owns a population of stars and drives their twinkling.
pub struct StarfieldContainer {
    twinkle: TwinkleConfig,
    stars: Vec<Star>,
    tasks: Vec<TwinkleTask>,
    frame: u64,
}

impl StarfieldContainer {
    /// An empty container using `twinkle` for every task it spawns.
    pub fn new(twinkle: TwinkleConfig) -> Result<Self, StarfieldError> {
        twinkle.validate()?;
        Ok(Self {
            twinkle,
            stars: Vec::new(),
            tasks: Vec::new(),
            frame: 0,
        })
    }

    /// Replace the contents with a freshly generated field and arm one twinkle
    /// task per star. Existing tasks are cancelled first.
    pub fn populate(&mut self, generator: &StarfieldGenerator) -> GenerationReport {
        self.teardown();

        let field = generator.generate();
        let seed = generator.seed() ^ TWINKLE_SEED_SALT;
        self.tasks = field
            .stars
            .iter()
            .enumerate()
            .map(|(star_index, star)| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                rng.set_stream(u64::from(star.id.0));
                TwinkleTask {
                    star_index,
                    state: TwinkleState::new(),
                    rng,
                    handle: TwinkleHandle::new(star.id),
                }
            })
            .collect();
        self.stars = field.stars;

        log::debug!("Armed {} twinkle tasks", self.tasks.len());
        field.report
    }

    /// Every star, in generation order.
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Look up a star by id.
    pub fn star(&self, id: StarId) -> Option<&Star> {
        self.stars.get(id.0 as usize).filter(|s| s.id == id)
    }

    /// Number of tasks that have not been cancelled and dropped yet.
    pub fn active_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Ticks processed since the last populate.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The twinkle settings in use.
    pub fn twinkle_config(&self) -> &TwinkleConfig {
        &self.twinkle
    }

    /// Cancellation handle for `id`'s task, if it is still live.
    pub fn handle(&self, id: StarId) -> Option<TwinkleHandle> {
        self.tasks
            .iter()
            .find(|t| t.handle.star == id)
            .map(|t| t.handle.clone())
    }

    /// Handles for every live task.
    pub fn handles(&self) -> Vec<TwinkleHandle> {
        self.tasks.iter().map(|t| t.handle.clone()).collect()
    }

    /// Step every live task to frame time `now_ms`.
    ///
    /// `now_ms` should be monotonic. Cancelled tasks are dropped before stepping.
    pub fn tick(&mut self, now_ms: f64) -> FrameStats {
        let before = self.tasks.len();
        let stars = &mut self.stars;
        self.tasks.retain(|t| {
            let cancelled = t.handle.is_cancelled();
            if cancelled {
                stars[t.star_index].color = StarColor::White;
            }
            !cancelled
        });
        if self.tasks.len() != before {
            log::debug!("Dropped {} cancelled twinkle tasks", before - self.tasks.len());
        }

        self.frame += 1;
        let mut stats = FrameStats {
            frame: self.frame,
            active_tasks: self.tasks.len(),
            ..Default::default()
        };

        for task in &mut self.tasks {
            let star = &mut self.stars[task.star_index];
            task.state.step(star, now_ms, &self.twinkle, &mut task.rng);
            if task.state.is_animating() {
                stats.animating += 1;
            } else {
                stats.resting += 1;
            }
        }

        stats.tinted = self.stars.iter().filter(|s| s.color.is_tinted()).count();
        if !self.stars.is_empty() {
            stats.mean_opacity =
                self.stars.iter().map(Star::opacity).sum::<f64>() / self.stars.len() as f64;
        }

        log::trace!(
            "Frame {}: {} animating, {} resting, {} tinted",
            stats.frame,
            stats.animating,
            stats.resting,
            stats.tinted
        );
        stats
    }

    /// Cancel every task and remove every star.
    pub fn teardown(&mut self) {
        if !self.stars.is_empty() {
            log::debug!(
                "Tearing down starfield: {} stars, {} tasks",
                self.stars.len(),
                self.tasks.len()
            );
        }
        for task in self.tasks.drain(..) {
            task.handle.cancel();
        }
        self.stars.clear();
        self.frame = 0;
    }
}

impl Drop for StarfieldContainer {
    fn drop(&mut self) {
        self.teardown();
    }
}
