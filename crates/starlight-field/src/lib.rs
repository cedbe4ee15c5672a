//! Procedural twinkling starfield: sector-balanced star placement, size tiering
//! with clustered satellites, and a per-star opacity animation driven by an
//! external frame tick.

pub mod container;
pub mod error;
pub mod generator;
pub mod placement;
pub mod random;
pub mod render;
pub mod star;
pub mod tier;
pub mod twinkle;

pub use container::{FrameStats, StarfieldContainer, TwinkleHandle};
pub use error::StarfieldError;
pub use generator::{GeneratedField, GenerationReport, StarfieldConfig, StarfieldGenerator};
pub use placement::{PlacementChoice, Sector, SectorGrid};
pub use random::{RandomSource, ScriptedRandom};
pub use render::RenderAttributes;
pub use star::{Glow, Star, StarColor, StarId, StarKind, StarPosition};
pub use tier::SizeTier;
pub use twinkle::{TwinkleConfig, TwinklePhase, TwinkleState, ease, interpolate};
