//! Configuration file handling
//!
//! Settings live in `<config_dir>/subfollow/config.toml`. Every field has a
//! default, so a partial (or missing) file loads fine. Out-of-range values
//! are clamped with a warning instead of failing the load.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::player::PlayerOptions;
use crate::preferences::{FilePreferences, MAX_SPEED, MIN_SPEED};

/// Allowed tick cadence in milliseconds.
pub const TICK_INTERVAL_RANGE: (u64, u64) = (10, 1000);

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub playback: PlaybackConfig,
    pub preferences: PreferencesConfig,
    pub logging: LoggingConfig,
}

/// `[playback]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// How often the engine re-resolves the current cue
    pub tick_interval_ms: u64,
    /// Speed used when no speed preference is stored
    pub default_speed: f64,
    /// Keep the screen awake while playing
    pub inhibit_idle: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 50,
            default_speed: 1.0,
            inhibit_idle: true,
        }
    }
}

/// `[preferences]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesConfig {
    /// How long a speed change is remembered
    pub speed_ttl_days: u32,
    /// Preferences file; defaults to `<data_dir>/subfollow/preferences.toml`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            speed_ttl_days: 365,
            file: None,
        }
    }
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive (`info`, `debug`, `subfollow=trace`, ...)
    pub level: String,
    /// Log file for the player; defaults to `<data_local_dir>/subfollow/subfollow.log`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Directory holding `config.toml`.
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("subfollow"))
    }

    /// Default config file path.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load from the default path, or defaults if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`, or defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config.normalized())
    }

    /// Save to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Clamp out-of-range values, logging each correction.
    pub fn normalized(mut self) -> Self {
        let (min, max) = TICK_INTERVAL_RANGE;
        let interval = self.playback.tick_interval_ms.clamp(min, max);
        if interval != self.playback.tick_interval_ms {
            tracing::warn!(
                "playback.tick_interval_ms = {} is out of range, using {}",
                self.playback.tick_interval_ms,
                interval
            );
            self.playback.tick_interval_ms = interval;
        }

        let speed = self.playback.default_speed;
        if !speed.is_finite() || !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
            let clamped = if speed.is_finite() {
                speed.clamp(MIN_SPEED, MAX_SPEED)
            } else {
                1.0
            };
            tracing::warn!(
                "playback.default_speed = {} is out of range, using {}",
                speed,
                clamped
            );
            self.playback.default_speed = clamped;
        }

        if self.preferences.speed_ttl_days == 0 {
            tracing::warn!("preferences.speed_ttl_days = 0 would forget the speed at once, using 1");
            self.preferences.speed_ttl_days = 1;
        }
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.playback.tick_interval_ms)
    }

    pub fn speed_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.preferences.speed_ttl_days))
    }

    /// Preferences file location.
    pub fn preferences_path(&self) -> Result<PathBuf> {
        match &self.preferences.file {
            Some(path) => Ok(path.clone()),
            None => Ok(FilePreferences::default_path()?),
        }
    }

    /// Log file used by the player.
    pub fn log_file(&self) -> Result<PathBuf> {
        if let Some(path) = &self.logging.file {
            return Ok(path.clone());
        }
        let dir = dirs::data_local_dir().context("Could not determine data directory")?;
        Ok(dir.join("subfollow").join("subfollow.log"))
    }

    /// Player settings derived from `[playback]` and `[preferences]`.
    pub fn player_options(&self) -> PlayerOptions {
        PlayerOptions {
            tick_interval: self.tick_interval(),
            inhibit_idle: self.playback.inhibit_idle,
            default_speed: self.playback.default_speed,
            speed_ttl: self.speed_ttl(),
        }
    }
}
