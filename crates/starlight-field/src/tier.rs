//! Size and brightness tiers.
//!
//! A single uniform draw decides the tier of a primary star. Tiers are checked
//! from rarest to most common, each with an exclusive lower bound:
//!
//! | draw `r`          | tier         | size      | glow radius | glow alpha |
//! |-------------------|--------------|-----------|-------------|------------|
//! | `r > 0.97`        | very large   | 4.0..7.0  | 4 x size    | 0.9        |
//! | `0.85 < r <= 0.97`| medium-large | 2.5..4.5  | 3 x size    | 0.7        |
//! | `0.5 < r <= 0.85` | medium       | 1.5..3.0  | 2 x size    | 0.5        |
//! | `r <= 0.5`        | small        | 0.8..1.8  | 1 x size    | 0.4        |

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;
use crate::star::Glow;

/// Size range of satellite stars.
pub const SATELLITE_SIZE_RANGE: (f64, f64) = (0.3, 1.3);
/// Halo alpha of satellite stars. Their glow radius equals their size.
pub const SATELLITE_GLOW_ALPHA: f64 = 0.3;

/// Brightness class of a primary star.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SizeTier {
    /// About half of all primaries.
    Small,
    /// About 35%.
    Medium,
    /// About 12%.
    MediumLarge,
    /// About 3%.
    VeryLarge,
}

impl SizeTier {
    /// All tiers, smallest first.
    pub const ALL: [SizeTier; 4] = [
        SizeTier::Small,
        SizeTier::Medium,
        SizeTier::MediumLarge,
        SizeTier::VeryLarge,
    ];

    /// Classify a uniform draw in `[0, 1)`.
    pub fn classify(draw: f64) -> Self {
        if draw > 0.97 {
            Self::VeryLarge
        } else if draw > 0.85 {
            Self::MediumLarge
        } else if draw > 0.5 {
            Self::Medium
        } else {
            Self::Small
        }
    }

    /// Half-open `(min, max)` range of star sizes in this tier.
    pub fn size_range(self) -> (f64, f64) {
        match self {
            Self::VeryLarge => (4.0, 7.0),
            Self::MediumLarge => (2.5, 4.5),
            Self::Medium => (1.5, 3.0),
            Self::Small => (0.8, 1.8),
        }
    }

    /// Glow radius as a multiple of the star size.
    pub fn glow_multiplier(self) -> f64 {
        match self {
            Self::VeryLarge => 4.0,
            Self::MediumLarge => 3.0,
            Self::Medium => 2.0,
            Self::Small => 1.0,
        }
    }

    /// Halo alpha.
    pub fn glow_alpha(self) -> f64 {
        match self {
            Self::VeryLarge => 0.9,
            Self::MediumLarge => 0.7,
            Self::Medium => 0.5,
            Self::Small => 0.4,
        }
    }

    /// Halo for a star of this tier with the given size.
    pub fn glow(self, size: f64) -> Glow {
        Glow {
            radius: size * self.glow_multiplier(),
            alpha: self.glow_alpha(),
        }
    }

    /// Draw a size within this tier's range.
    pub fn sample_size<R: RandomSource + ?Sized>(self, rng: &mut R) -> f64 {
        let (min, max) = self.size_range();
        rng.range(min, max)
    }

    /// Draw a tier, then a size within it.
    pub fn sample<R: RandomSource + ?Sized>(rng: &mut R) -> (Self, f64) {
        let tier = Self::classify(rng.next_unit());
        let size = tier.sample_size(rng);
        (tier, size)
    }
}

/// Halo for a satellite star of the given size.
pub fn satellite_glow(size: f64) -> Glow {
    Glow {
        radius: size,
        alpha: SATELLITE_GLOW_ALPHA,
    }
}
