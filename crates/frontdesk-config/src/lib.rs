//! Shared configuration for frontdesk tools.
//!
//! Values are layered: built-in defaults, then the TOML file at the
//! platform config path, then `FRONTDESK_*` environment variables (`__`
//! separates nested keys, e.g. `FRONTDESK_POLLING__INTERVAL_MS`). The CLI
//! applies its own flags on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use frontdesk_api::{DEFAULT_BASE_URL, TransportConfig};
use frontdesk_core::{FeedConfig, PollingConfig, SnapshotOrder};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "FRONTDESK_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

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
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Backend base URL, including the `/api` path.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Whole-request HTTP timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Order of the request list: "reversed", "as-returned" or "newest-first".
    #[serde(default)]
    pub order: SnapshotOrder,

    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub polling: Polling,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout: default_timeout(),
            order: SnapshotOrder::default(),
            defaults: Defaults::default(),
            polling: Polling::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

/// Background polling settings for `requests watch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Polling {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub only_when_active: bool,
}

impl Default for Polling {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            enabled: true,
            only_when_active: true,
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_interval_ms() -> u64 {
    60_000
}
fn default_true() -> bool {
    true
}

// ── Translation ─────────────────────────────────────────────────────

impl Config {
    /// Check values figment can't: URL shape and non-zero periods.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.api_url).map_err(|e| ConfigError::Validation {
            field: "api_url".into(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation {
                field: "api_url".into(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        if self.polling.enabled && self.polling.interval_ms == 0 {
            return Err(ConfigError::Validation {
                field: "polling.interval_ms".into(),
                reason: "must be greater than zero while polling is enabled".into(),
            });
        }
        Ok(())
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig::default().with_timeout(Duration::from_secs(self.timeout))
    }

    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            polling: PollingConfig {
                interval: Duration::from_millis(self.polling.interval_ms),
                enabled: self.polling.enabled,
                only_when_active: self.polling.only_when_active,
            },
            order: self.order,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "frontdesk", "frontdesk").map_or_else(
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
    p.push("frontdesk");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// The layered figment for a given config file.
pub fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load and validate config from `path` plus the environment.
/// A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment_for(path).extract()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the canonical path plus the environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

// ── Config saving ───────────────────────────────────────────────────

pub fn save_config_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(&config_path(), cfg)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    fn load(path: &str) -> figment::error::Result<Config> {
        load_config_from(Path::new(path)).map_err(|e| e.to_string().into())
    }

    #[test]
    fn defaults_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let cfg = load("missing.toml")?;
            assert_eq!(cfg, Config::default());
            assert_eq!(cfg.api_url, "http://localhost:3003/api");
            assert_eq!(cfg.feed_config(), FeedConfig::default());
            Ok(())
        });
    }

    #[test]
    fn file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    api_url = "https://hotel.example.com/api"
                    order = "newest-first"

                    [polling]
                    interval_ms = 15000
                    only_when_active = false
                "#,
            )?;

            let cfg = load("config.toml")?;
            assert_eq!(cfg.api_url, "https://hotel.example.com/api");
            assert_eq!(cfg.order, SnapshotOrder::NewestFirst);
            assert_eq!(cfg.polling.interval_ms, 15_000);
            assert!(cfg.polling.enabled);
            assert!(!cfg.polling.only_when_active);
            assert_eq!(cfg.timeout, 30);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "api_url = \"http://file.example/api\"")?;
            jail.set_env("FRONTDESK_API_URL", "http://env.example/api");
            jail.set_env("FRONTDESK_POLLING__INTERVAL_MS", "5000");
            jail.set_env("FRONTDESK_TIMEOUT", "5");

            let cfg = load("config.toml")?;
            assert_eq!(cfg.api_url, "http://env.example/api");
            assert_eq!(cfg.polling.interval_ms, 5000);
            assert_eq!(cfg.transport().timeout, Duration::from_secs(5));
            Ok(())
        });
    }

    #[test]
    fn rejects_non_http_url() {
        Jail::expect_with(|jail| {
            jail.set_env("FRONTDESK_API_URL", "ftp://hotel/api");
            let err = load_config_from(Path::new("none.toml")).unwrap_err();
            assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "api_url"));
            Ok(())
        });
    }

    #[test]
    fn rejects_zero_interval_when_polling() {
        let cfg = Config {
            polling: Polling {
                interval_ms: 0,
                ..Polling::default()
            },
            ..Config::default()
        };
        assert!(cfg.validate().is_err());

        let disabled = Config {
            polling: Polling {
                interval_ms: 0,
                enabled: false,
                only_when_active: true,
            },
            ..Config::default()
        };
        assert!(disabled.validate().is_ok());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config {
            api_url: "https://ops.example.com/api".into(),
            order: SnapshotOrder::AsReturned,
            ..Config::default()
        };

        save_config_to(&path, &cfg).unwrap();
        let loaded: Config = Figment::new()
            .merge(Toml::file(&path))
            .extract()
            .unwrap();
        assert_eq!(loaded, cfg);
    }
}
