//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use starlight_field::{StarfieldConfig, TwinkleConfig};

use crate::error::ConfigError;

const APP_NAME: &str = "starlight";
const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Star placement, tiers and clustering.
    pub starfield: StarfieldConfig,
    /// Twinkle timing and probabilities.
    pub twinkle: TwinkleConfig,
    /// Frame loop and export settings.
    pub runtime: RuntimeConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Frame loop configuration for the headless runner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuntimeConfig {
    /// How long to run, in seconds.
    pub duration_secs: f64,
    /// Fixed frame rate of the twinkle tick (Hz).
    pub tick_rate_hz: u32,
    /// Interval between frame statistics log lines, in seconds.
    pub stats_interval_secs: f64,
    /// Where to write the final render snapshot as JSON, if anywhere.
    pub export_path: Option<PathBuf>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Also write JSON logs to the log directory in debug builds.
    pub log_to_file: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            duration_secs: 10.0,
            tick_rate_hz: 60,
            stats_interval_secs: 1.0,
            export_path: None,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: true,
        }
    }
}

/// Platform config directory for Starlight, e.g. `~/.config/starlight` on Linux.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME))
}

// --- Validation ---

impl RuntimeConfig {
    /// Check that the frame loop settings are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate_hz == 0 {
            return Err(ConfigError::InvalidRuntime {
                name: "tick_rate_hz",
                reason: "must be at least 1",
            });
        }
        if !self.duration_secs.is_finite() || self.duration_secs < 0.0 {
            return Err(ConfigError::InvalidRuntime {
                name: "duration_secs",
                reason: "must be a non-negative number of seconds",
            });
        }
        if !self.stats_interval_secs.is_finite() || self.stats_interval_secs <= 0.0 {
            return Err(ConfigError::InvalidRuntime {
                name: "stats_interval_secs",
                reason: "must be a positive number of seconds",
            });
        }
        Ok(())
    }
}

impl Config {
    /// Check every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.starfield.validate()?;
        self.twinkle.validate()?;
        self.runtime.validate()
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(false)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("star_count: 200"));
        assert!(ron_str.contains("sectors_per_axis: 20"));
        assert!(ron_str.contains("tick_rate_hz: 60"));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.starfield.seed = Some(42);
        config.runtime.export_path = Some(PathBuf::from("field.json"));
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(starfield: (star_count: 50), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.starfield.star_count, 50);
        assert_eq!(config.starfield.sectors_per_axis, 20);
        assert_eq!(config.twinkle, TwinkleConfig::default());
        assert_eq!(config.runtime, RuntimeConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_starfield_rejected() {
        let mut config = Config::default();
        config.starfield.sectors_per_axis = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_invalid_runtime_rejected() {
        let mut config = Config::default();
        config.runtime.tick_rate_hz = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRuntime {
                name: "tick_rate_hz",
                ..
            })
        ));

        let mut config = Config::default();
        config.runtime.stats_interval_secs = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.starfield.star_count = 500;
        config.twinkle.tint_probability = 0.01;
        config.debug.log_level = "debug".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.starfield.cluster_probability = 0.3;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().starfield.cluster_probability, 0.3);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_default_config_dir_ends_with_app_name() {
        if let Some(dir) = default_config_dir() {
            assert!(dir.ends_with("starlight"));
        }
    }
}
