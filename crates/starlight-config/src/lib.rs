//! Configuration for Starlight.
//!
//! Settings persist to disk as a RON file, can be overridden from the command
//! line via clap, and support change detection on reload. Missing fields fall
//! back to defaults so older files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, RuntimeConfig, default_config_dir};
pub use error::ConfigError;
