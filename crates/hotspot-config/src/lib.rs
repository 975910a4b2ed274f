//! Configuration for the HotSpot Pro terminal dashboard.
//!
//! Layered with figment: built-in defaults, then the TOML config file,
//! then `HOTSPOT_`-prefixed environment variables (`HOTSPOT_UI__TICK_MS`,
//! `HOTSPOT_TIMING__REBOOT_MS`, ...). An optional seed file replaces the
//! built-in demo data with a [`Seed`] read from TOML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use hotspot_core::{CoreError, PanelId, Seed};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("failed to parse seed file {path}: {source}")]
    SeedParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("seed file {path} is inconsistent: {source}")]
    SeedInvalid {
        path: PathBuf,
        #[source]
        source: CoreError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub timing: TimingConfig,
    pub log: LogConfig,

    /// TOML file replacing the built-in seed data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct UiConfig {
    /// Interval between `Tick` events, in milliseconds.
    pub tick_ms: u64,
    /// Interval between frames, in milliseconds.
    pub render_ms: u64,
    /// Panel shown at startup. Unknown identifiers resolve to the dashboard.
    pub initial_panel: String,
    pub sidebar_collapsed: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: 250,
            render_ms: 33,
            initial_panel: "dashboard".into(),
            sidebar_collapsed: false,
        }
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn render_rate(&self) -> Duration {
        Duration::from_millis(self.render_ms)
    }

    pub fn initial_panel(&self) -> PanelId {
        PanelId::from_ident(&self.initial_panel)
    }
}

/// Delays for the transient UI states, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TimingConfig {
    pub copy_feedback_ms: u64,
    pub reboot_ms: u64,
    pub notification_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            copy_feedback_ms: 2000,
            reboot_ms: 3000,
            notification_ms: 3000,
        }
    }
}

impl TimingConfig {
    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }

    pub fn reboot(&self) -> Duration {
        Duration::from_millis(self.reboot_ms)
    }

    pub fn notification(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: std::env::temp_dir().join("hotspot-tui.log"),
        }
    }
}

impl Config {
    /// Reject zero intervals; a zero tick or delay would spin or never
    /// show the transient state at all.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("ui.tick_ms", self.ui.tick_ms),
            ("ui.render_ms", self.ui.render_ms),
            ("timing.copy_feedback_ms", self.timing.copy_feedback_ms),
            ("timing.reboot_ms", self.timing.reboot_ms),
            ("timing.notification_ms", self.timing.notification_ms),
        ];
        for (field, value) in durations {
            if value == 0 {
                return Err(ConfigError::Validation {
                    field: field.into(),
                    reason: "must be greater than zero".into(),
                });
            }
        }
        Ok(())
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "hotspot-pro", "hotspot-pro").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("hotspot-pro");
    p
}

// ── Config loading ──────────────────────────────────────────────────

fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("HOTSPOT_").split("__"))
}

/// Load the config from `path` + environment. A missing file is not an
/// error; defaults apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment_for(path).extract()?;
    config.validate()?;
    Ok(config)
}

// ── Seed loading ────────────────────────────────────────────────────

/// Read a seed file. Sections it omits keep the built-in data.
pub fn load_seed(path: &Path) -> Result<Seed, ConfigError> {
    let raw = std::fs::read_to_string(path)?;
    let seed: Seed = toml::from_str(&raw).map_err(|source| ConfigError::SeedParse {
        path: path.to_path_buf(),
        source,
    })?;
    seed.validate().map_err(|source| ConfigError::SeedInvalid {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(seed)
}

/// The seed named by `seed_file`, or the built-in data when unset.
pub fn resolve_seed(cfg: &Config) -> Result<Seed, ConfigError> {
    cfg.seed_file
        .as_deref()
        .map_or_else(|| Ok(Seed::builtin()), load_seed)
}
