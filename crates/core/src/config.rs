//! Application configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file under the
//! user's config directory, then `COOKIE_KINGDOM__*` environment variables.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Directory under the platform config dir holding our files.
pub const CONFIG_DIR_NAME: &str = "cookie-kingdom";
/// File name of the TOML configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Prefix for environment overrides, e.g. `COOKIE_KINGDOM__ECONOMY__UPGRADE_COST`.
pub const ENV_PREFIX: &str = "COOKIE_KINGDOM";
/// Gold spent per building upgrade unless configured otherwise.
pub const DEFAULT_UPGRADE_COST: u64 = 1000;

const DEFAULT_CONFIG: &str = r#"# Cookie Kingdom configuration.
# Every key is optional; missing keys fall back to the built-in defaults.

[economy]
# Gold spent per building upgrade.
upgrade_cost = 1000

[starting]
gold = 5000
gems = 150
level = 5
experience = 350
max_experience = 500

[ui]
# Input poll interval in milliseconds.
tick_rate_ms = 250
# Ticks a status message stays visible.
status_ttl_ticks = 16
"#;

/// Validation failures for otherwise well-formed configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A value that must be positive was zero.
    #[error("`{0}` must be greater than zero")]
    MustBePositive(&'static str),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Economy rules.
    pub economy: EconomyConfig,
    /// Session-start resource values.
    pub starting: StartingConfig,
    /// Terminal front-end settings.
    pub ui: UiConfig,
}

/// Economy constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Gold cost of a single building upgrade.
    pub upgrade_cost: u64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            upgrade_cost: DEFAULT_UPGRADE_COST,
        }
    }
}

/// Player stats at session start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartingConfig {
    /// Starting gold.
    pub gold: u64,
    /// Starting gems.
    pub gems: u64,
    /// Starting player level.
    pub level: u32,
    /// Starting experience.
    pub experience: u32,
    /// Experience needed for the next level.
    pub max_experience: u32,
}

impl Default for StartingConfig {
    fn default() -> Self {
        Self {
            gold: 5000,
            gems: 150,
            level: 5,
            experience: 350,
            max_experience: 500,
        }
    }
}

/// Terminal front-end settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Input poll interval in milliseconds.
    pub tick_rate_ms: u64,
    /// Number of ticks a status message stays on screen.
    pub status_ttl_ticks: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            status_ttl_ticks: 16,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location plus environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load configuration from `path` (if it exists) plus environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_from_sources(path, None)
    }

    /// Like [`AppConfig::load_from`], reading overrides from `env` instead of the
    /// process environment when it is `Some`.
    pub fn load_from_sources(
        path: impl AsRef<Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;

        let config: AppConfig = settings
            .try_deserialize()
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the game cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting.level == 0 {
            return Err(ConfigError::MustBePositive("starting.level"));
        }
        if self.starting.max_experience == 0 {
            return Err(ConfigError::MustBePositive("starting.max_experience"));
        }
        if self.ui.tick_rate_ms == 0 {
            return Err(ConfigError::MustBePositive("ui.tick_rate_ms"));
        }
        Ok(())
    }
}

/// Default config file path under the platform config directory.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

/// Write the commented default config if no file exists yet.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = config_path();
    write_default_config(&path)?;
    Ok(path)
}

fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "Wrote default configuration");
    Ok(())
}
