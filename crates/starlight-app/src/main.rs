//! Headless Starlight runner.
//!
//! Loads `config.ron` (created with defaults on first run), applies CLI
//! overrides, then generates a starfield and twinkles it at a fixed tick rate
//! for the configured duration. Run with `cargo run -p starlight-app -- --help`.

use clap::Parser;
use starlight_app::{PlatformDirs, StarfieldRunner};
use starlight_config::{CliArgs, Config};
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    let dirs = match args.config.as_deref() {
        Some(root) => PlatformDirs::resolve_with_root(root),
        None => PlatformDirs::resolve().unwrap_or_else(|e| {
            eprintln!("{e}, using the current directory");
            PlatformDirs::resolve_with_root(std::path::Path::new(".starlight"))
        }),
    };

    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create Starlight directories: {e}");
    }

    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    starlight_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    let mut runner = match StarfieldRunner::new(&config) {
        Ok(runner) => runner,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let summary = runner.run();
    info!(
        seed = summary.seed,
        frames = summary.frames,
        ticks = summary.ticks,
        primaries = summary.report.primaries,
        satellites = summary.report.satellites,
        "Run complete"
    );

    if let Some(requested) = config.runtime.export_path.as_deref() {
        let path = dirs.export_target(requested);
        match runner.export(&path) {
            Ok(()) => info!("Wrote snapshot to {}", path.display()),
            Err(e) => {
                error!("{e}");
                runner.shutdown();
                std::process::exit(1);
            }
        }
    }

    runner.shutdown();
}
