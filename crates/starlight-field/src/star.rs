//! The star entity and its visual attributes.

use serde::{Deserialize, Serialize};

use crate::tier::SizeTier;

/// Stable identifier of a star within one container population.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StarId(pub u32);

/// Position in percent of the container's width and height.
///
/// Values may fall slightly outside `[0, 100]` near the edges.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct StarPosition {
    /// Horizontal offset from the left edge, in percent.
    pub x: f64,
    /// Vertical offset from the top edge, in percent.
    pub y: f64,
}

impl StarPosition {
    /// Create a position from percent coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point at `distance` percent from `self` in direction `angle` (radians).
    pub fn offset_polar(self, angle: f64, distance: f64) -> Self {
        Self {
            x: self.x + angle.cos() * distance,
            y: self.y + angle.sin() * distance,
        }
    }

    /// Euclidean distance to `other`, in percent units.
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Whether a star was placed on the sector grid or spawned beside a primary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StarKind {
    /// Placed via the sector grid, with its size tier.
    Primary(SizeTier),
    /// Spawned near a primary as part of a cluster.
    Satellite,
}

/// Soft halo drawn around a star.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Glow {
    /// Blur radius, in the same units as the star size.
    pub radius: f64,
    /// Halo alpha in `[0, 1]`.
    pub alpha: f64,
}

/// Fill color of a star.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StarColor {
    /// Plain white.
    #[default]
    White,
    /// A near-white HSL tint at full saturation and high lightness.
    Tint {
        /// Hue in degrees.
        hue: u16,
    },
}

impl StarColor {
    /// Saturation of a tint, in percent.
    pub const TINT_SATURATION: f64 = 100.0;
    /// Lightness of a tint, in percent.
    pub const TINT_LIGHTNESS: f64 = 90.0;

    /// CSS color string understood by web renderers.
    pub fn to_css(self) -> String {
        match self {
            Self::White => "#fff".to_string(),
            Self::Tint { hue } => format!(
                "hsl({hue}, {}%, {}%)",
                Self::TINT_SATURATION,
                Self::TINT_LIGHTNESS
            ),
        }
    }

    /// Linear sRGB triple in `[0, 1]`.
    pub fn to_rgb(self) -> [f32; 3] {
        match self {
            Self::White => [1.0, 1.0, 1.0],
            Self::Tint { hue } => hsl_to_rgb(
                f64::from(hue),
                Self::TINT_SATURATION / 100.0,
                Self::TINT_LIGHTNESS / 100.0,
            ),
        }
    }

    /// Whether this is a transient tint rather than plain white.
    pub fn is_tinted(self) -> bool {
        matches!(self, Self::Tint { .. })
    }
}

/// Convert HSL (hue in degrees, saturation and lightness in `[0, 1]`) to RGB.
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> [f32; 3] {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    [
        (r + m).clamp(0.0, 1.0) as f32,
        (g + m).clamp(0.0, 1.0) as f32,
        (b + m).clamp(0.0, 1.0) as f32,
    ]
}

/// A single point light in the field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Star {
    /// Identifier, unique within one population.
    pub id: StarId,
    /// Primary (with tier) or satellite.
    pub kind: StarKind,
    /// Position in container percent.
    pub position: StarPosition,
    /// Diameter. Always positive.
    pub size: f64,
    /// Halo around the star.
    pub glow: Glow,
    /// Current fill color.
    pub color: StarColor,
    opacity: f64,
}

impl Star {
    /// Create a star. `opacity` is clamped into `[0, 1]`.
    pub fn new(
        id: StarId,
        kind: StarKind,
        position: StarPosition,
        size: f64,
        glow: Glow,
        opacity: f64,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            size,
            glow,
            color: StarColor::White,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    /// Current opacity in `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Set the opacity, clamped into `[0, 1]`.
    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Whether this star was placed on the sector grid.
    pub fn is_primary(&self) -> bool {
        matches!(self.kind, StarKind::Primary(_))
    }
}
