//! Runtime configuration loaded from TOML
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration:
//!
//! ```toml
//! [playback]
//! base_delay_ms = 1000
//! default_speed = 1.0
//! min_speed = 0.25
//! max_speed = 3.0
//! autoplay = true
//!
//! [run]
//! seed = 42
//! ```

use crate::playback::{PlaybackSettings, BASE_DELAY, DEFAULT_SPEED, MAX_SPEED, MIN_SPEED};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

fn default_base_delay_ms() -> u64 {
    BASE_DELAY.as_millis() as u64
}

fn default_speed() -> f64 {
    DEFAULT_SPEED
}

fn default_min_speed() -> f64 {
    MIN_SPEED
}

fn default_max_speed() -> f64 {
    MAX_SPEED
}

fn default_autoplay() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaybackConfig {
    /// Delay between auto-advance ticks at 1x speed
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    #[serde(default = "default_speed")]
    pub default_speed: f64,

    #[serde(default = "default_min_speed")]
    pub min_speed: f64,

    #[serde(default = "default_max_speed")]
    pub max_speed: f64,

    /// Start playing as soon as a run is loaded
    #[serde(default = "default_autoplay")]
    pub autoplay: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            base_delay_ms: default_base_delay_ms(),
            default_speed: default_speed(),
            min_speed: default_min_speed(),
            max_speed: default_max_speed(),
            autoplay: default_autoplay(),
        }
    }
}

impl PlaybackConfig {
    pub fn settings(&self) -> PlaybackSettings {
        PlaybackSettings {
            base_delay: Duration::from_millis(self.base_delay_ms),
            default_speed: self.default_speed,
            min_speed: self.min_speed,
            max_speed: self.max_speed,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RunConfig {
    /// Seed for randomized algorithms
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub run: RunConfig,
}

impl Config {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// Parse and validate TOML text
    pub fn parse(content: &str) -> ConfigResult<Self> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let p = &self.playback;
        if p.base_delay_ms == 0 {
            return Err(ConfigError::Invalid("playback.base_delay_ms must be positive".to_string()));
        }
        for (name, value) in [
            ("default_speed", p.default_speed),
            ("min_speed", p.min_speed),
            ("max_speed", p.max_speed),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "playback.{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if p.min_speed > p.max_speed {
            return Err(ConfigError::Invalid(format!(
                "playback.min_speed ({}) exceeds playback.max_speed ({})",
                p.min_speed, p.max_speed
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.playback.base_delay_ms, 1000);
        assert!(config.playback.autoplay);
        assert_eq!(config.run.seed, None);
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config = Config::parse("[playback]\nmax_speed = 4.0\n[run]\nseed = 9\n").unwrap();
        assert_eq!(config.playback.max_speed, 4.0);
        assert_eq!(config.playback.min_speed, MIN_SPEED);
        assert_eq!(config.run.seed, Some(9));
    }

    #[test]
    fn inverted_speed_range_is_invalid() {
        let err = Config::parse("[playback]\nmin_speed = 2.0\nmax_speed = 1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_delay_is_invalid() {
        assert!(matches!(
            Config::parse("[playback]\nbase_delay_ms = 0\n"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        assert!(matches!(Config::parse("[playback"), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn settings_carry_the_delay() {
        let settings = PlaybackConfig::default().settings();
        assert_eq!(settings.base_delay, Duration::from_millis(1000));
    }
}
