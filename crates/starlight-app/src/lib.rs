//! Starlight application framework.
//!
//! Provides the fixed-timestep frame loop, platform directory resolution and
//! the runner that drives a starfield container from configuration.

pub mod frame_loop;
pub mod platform;
pub mod runner;

pub use frame_loop::FrameLoop;
pub use platform::{PlatformDirs, PlatformError};
pub use runner::{RunError, RunSummary, StarfieldRunner};
