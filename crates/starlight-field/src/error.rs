//! Starfield configuration errors.

/// Errors raised when a generator or container is built from invalid settings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StarfieldError {
    /// The sector grid needs at least one cell per axis.
    #[error("sectors_per_axis must be at least 1")]
    ZeroSectors,

    /// Placement needs at least one draw per star.
    #[error("placement_attempt_limit must be at least 1")]
    ZeroAttemptLimit,

    /// A probability or fraction fell outside `[0, 1]`.
    #[error("{name} must be within [0, 1], got {value}")]
    OutOfUnitRange {
        /// Name of the offending setting.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The satellite count range is empty or starts at zero.
    #[error("cluster_size_range must satisfy 1 <= min <= max, got ({min}, {max})")]
    InvalidClusterRange {
        /// Lower bound.
        min: u32,
        /// Upper bound.
        max: u32,
    },

    /// A `(min, max)` interval is inverted, negative or not finite.
    #[error("{name} must be a finite interval with 0 <= min <= max, got ({min}, {max})")]
    InvalidInterval {
        /// Name of the offending setting.
        name: &'static str,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}

pub(crate) fn check_unit(name: &'static str, value: f64) -> Result<(), StarfieldError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(StarfieldError::OutOfUnitRange { name, value })
    }
}

pub(crate) fn check_interval(
    name: &'static str,
    (min, max): (f64, f64),
) -> Result<(), StarfieldError> {
    if min.is_finite() && max.is_finite() && min >= 0.0 && min <= max {
        Ok(())
    } else {
        Err(StarfieldError::InvalidInterval { name, min, max })
    }
}
