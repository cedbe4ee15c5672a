//! Drives a starfield container from configuration: populate once, tick at a
//! fixed rate, log frame statistics, export the final render snapshot.

use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use starlight_config::{Config, ConfigError, RuntimeConfig};
use starlight_field::{
    FrameStats, GenerationReport, RenderAttributes, StarfieldContainer, StarfieldError,
    StarfieldGenerator,
};
use tracing::{debug, info};

use crate::frame_loop::FrameLoop;

/// Errors that stop a run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generator or container rejected its settings.
    #[error(transparent)]
    Starfield(#[from] StarfieldError),

    /// Writing the export failed.
    #[error("failed to write export {path}: {source}")]
    Export {
        /// Target file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Encoding the export failed.
    #[error("failed to encode export: {0}")]
    Encode(#[from] serde_json::Error),
}

/// What a finished run looked like.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Seed the field was generated from.
    pub seed: u64,
    /// Generation counters.
    pub report: GenerationReport,
    /// Frames rendered.
    pub frames: u64,
    /// Fixed twinkle ticks executed.
    pub ticks: u64,
    /// Simulated seconds.
    pub sim_time_secs: f64,
    /// Stars still twinkling at the end.
    pub active_tasks: usize,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    seed: u64,
    report: &'a GenerationReport,
    stars: Vec<RenderAttributes>,
}

fn log_stats(sim_time_secs: f64, stats: &FrameStats) {
    info!(
        sim_time_secs,
        animating = stats.animating,
        resting = stats.resting,
        tinted = stats.tinted,
        mean_opacity = stats.mean_opacity,
        "Frame stats"
    );
}

/// State touched by every fixed tick, whether driven by `step` or `run`.
struct TickState {
    container: StarfieldContainer,
    last_stats: FrameStats,
    next_stats_at: f64,
    stats_interval_secs: f64,
}

impl TickState {
    fn update(&mut self, dt: f64, sim_time: f64) {
        let now = sim_time + dt;
        self.last_stats = self.container.tick(now * 1000.0);
        if now >= self.next_stats_at {
            log_stats(now, &self.last_stats);
            self.next_stats_at = now + self.stats_interval_secs;
        }
    }
}

/// Owns a populated container and the loop that ticks it.
pub struct StarfieldRunner {
    runtime: RuntimeConfig,
    seed: u64,
    report: GenerationReport,
    state: TickState,
    frame_loop: FrameLoop,
}

impl StarfieldRunner {
    /// Validate `config`, generate the field and arm every star.
    pub fn new(config: &Config) -> Result<Self, RunError> {
        config.validate()?;
        let generator = StarfieldGenerator::new(config.starfield.clone())?;
        let mut container = StarfieldContainer::new(config.twinkle.clone())?;
        let report = container.populate(&generator);
        info!(
            seed = generator.seed(),
            stars = container.stars().len(),
            "Starfield ready"
        );

        Ok(Self {
            runtime: config.runtime.clone(),
            seed: generator.seed(),
            report,
            state: TickState {
                container,
                last_stats: FrameStats::default(),
                next_stats_at: 0.0,
                stats_interval_secs: config.runtime.stats_interval_secs,
            },
            frame_loop: FrameLoop::new(config.runtime.tick_rate_hz),
        })
    }

    /// The container being driven.
    pub fn container(&self) -> &StarfieldContainer {
        &self.state.container
    }

    /// Statistics from the most recent tick.
    pub fn last_stats(&self) -> &FrameStats {
        &self.state.last_stats
    }

    /// Whether the configured duration has been simulated.
    pub fn is_finished(&self) -> bool {
        self.frame_loop.total_sim_time() >= self.runtime.duration_secs
    }

    /// Advance by `frame_time` seconds of host time.
    pub fn step(&mut self, frame_time: f64) {
        let state = &mut self.state;
        self.frame_loop
            .advance(frame_time, |dt, sim_time| state.update(dt, sim_time), |_alpha| {});
    }

    /// Run against the wall clock until the configured duration has elapsed.
    pub fn run(&mut self) -> RunSummary {
        info!(
            duration_secs = self.runtime.duration_secs,
            tick_rate_hz = self.runtime.tick_rate_hz,
            "Running starfield"
        );
        let pause = Duration::from_secs_f64(self.frame_loop.fixed_dt());
        while !self.is_finished() {
            let state = &mut self.state;
            self.frame_loop
                .tick(|dt, sim_time| state.update(dt, sim_time), |_alpha| {});
            std::thread::sleep(pause);
        }
        self.summary()
    }

    /// Summary of the run so far.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            seed: self.seed,
            report: self.report.clone(),
            frames: self.frame_loop.frame_count(),
            ticks: self.frame_loop.update_count(),
            sim_time_secs: self.frame_loop.total_sim_time(),
            active_tasks: self.state.container.active_tasks(),
        }
    }

    /// Encode the current render attributes of every star as pretty JSON.
    pub fn snapshot_json(&self) -> Result<String, RunError> {
        let snapshot = Snapshot {
            seed: self.seed,
            report: &self.report,
            stars: RenderAttributes::snapshot(self.state.container.stars()),
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Write [`snapshot_json`](Self::snapshot_json) to `path`.
    pub fn export(&self, path: &Path) -> Result<(), RunError> {
        let json = self.snapshot_json()?;
        let write_err = |source| RunError::Export {
            path: path.display().to_string(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, json).map_err(write_err)?;
        debug!("Exported {} stars to {}", self.state.container.stars().len(), path.display());
        Ok(())
    }

    /// Cancel every twinkle task.
    pub fn shutdown(&mut self) {
        self.state.container.teardown();
    }
}
