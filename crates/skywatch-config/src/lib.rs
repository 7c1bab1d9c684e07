//! Configuration file handling for skywatch.
//!
//! The config lives at `<config dir>/skywatch/config.toml`. Every field has
//! a default, so a missing file or a partial one is always usable.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use skywatch_core::{ColorTheme, StarfieldSettings, TransitionTimings};

const CONFIG_FILE: &str = "config.toml";

/// Errors raised while reading or writing the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no config directory available on this platform")]
    NoConfigDir,
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Simulated scan pacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Interval between progress steps.
    pub step_ms: u64,
    /// Delay between completion and showing results.
    pub reveal_delay_ms: u64,
    /// Chance that a finished scan reports threats.
    pub threat_probability: f64,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            step_ms: 180,
            reveal_delay_ms: 300,
            threat_probability: 0.1,
        }
    }
}

/// Optional detection backend status check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    pub enabled: bool,
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Seconds between `/model-info` polls.
    pub poll_secs: u64,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "http://127.0.0.1:5000".to_string(),
            poll_secs: 60,
            timeout_secs: 5,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub color_theme: ColorTheme,
    /// Fixed RNG seed for a reproducible starfield.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub starfield: StarfieldSettings,
    pub timings: TransitionTimings,
    pub scan: ScanSettings,
    pub backend: BackendSettings,
}

impl Config {
    /// Default location of the config file, if the platform has one.
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "skywatch").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the default location, falling back to defaults if absent.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`, falling back to defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_toml(&contents)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, self.to_toml()?).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("skywatch-config-{}-{name}", std::process::id()))
            .join(CONFIG_FILE)
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = Config::from_toml(
            r#"
            color_theme = "ember"
            seed = 7

            [starfield]
            margin = 4.0

            [timings]
            pause_fade_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.color_theme, ColorTheme::Ember);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.starfield.margin, 4.0);
        assert_eq!(config.starfield.max_stars, 600);
        assert_eq!(config.timings.pause_fade_ms, 250);
        assert_eq!(config.timings.resume_fade_ms, 180);
        assert_eq!(config.scan, ScanSettings::default());
        assert!(!config.backend.enabled);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = Config::from_toml("color_theme = \"plaid\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path("roundtrip");
        let config = Config {
            color_theme: ColorTheme::Magenta,
            seed: Some(99),
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = scratch_path("missing");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }
}
