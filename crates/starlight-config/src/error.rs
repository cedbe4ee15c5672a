//! Configuration error types.

use starlight_field::StarfieldError;

/// Errors that can occur when loading, saving, parsing or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// The starfield or twinkle settings are unusable.
    #[error("invalid starfield settings: {0}")]
    Invalid(#[from] StarfieldError),

    /// A runtime setting is out of range.
    #[error("invalid runtime setting {name}: {reason}")]
    InvalidRuntime {
        /// Setting name.
        name: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}
