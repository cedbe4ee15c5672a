//! Command-line argument parsing for Starlight.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Starlight command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "starlight", about = "Procedural twinkling starfield")]
pub struct CliArgs {
    /// Number of primary stars.
    #[arg(long)]
    pub stars: Option<u32>,

    /// Sector grid resolution per axis.
    #[arg(long)]
    pub sectors: Option<u32>,

    /// Seed for a reproducible field.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run time in seconds.
    #[arg(long)]
    pub duration: Option<f64>,

    /// Frame rate of the twinkle tick (Hz).
    #[arg(long)]
    pub tick_rate: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the final render snapshot as JSON to this file. A bare file name
    /// lands in the platform data directory.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(stars) = args.stars {
            self.starfield.star_count = stars;
        }
        if let Some(sectors) = args.sectors {
            self.starfield.sectors_per_axis = sectors;
        }
        if let Some(seed) = args.seed {
            self.starfield.seed = Some(seed);
        }
        if let Some(duration) = args.duration {
            self.runtime.duration_secs = duration;
        }
        if let Some(rate) = args.tick_rate {
            self.runtime.tick_rate_hz = rate;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref path) = args.export {
            self.runtime.export_path = Some(path.clone());
        }
    }
}
