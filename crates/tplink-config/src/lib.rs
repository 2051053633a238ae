//! Configuration for the TP-Link WiFi tools.
//!
//! A single TOML file describing one router, merged with `TPLINK_`
//! environment variables (`__` separates sections from keys, so
//! `TPLINK_DEFAULTS__POLL_INTERVAL` sets `defaults.poll_interval`), plus password resolution (env + plaintext)
//! and translation to `tplink_core::RouterConfig`. The CLI layers its
//! flag overrides on top before calling [`router_config`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tplink_core::{Band, RouterConfig};

/// Environment variable checked first for the router password.
pub const PASSWORD_ENV: &str = "TPLINK_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no password configured for router '{host}'")]
    NoCredentials { host: String },

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

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// The router to manage.
    #[serde(default)]
    pub router: RouterSection,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RouterSection {
    /// Router address (e.g., "192.168.0.1"). Required.
    #[serde(default)]
    pub host: String,

    #[serde(default = "default_username")]
    pub username: String,

    /// Password (plaintext, prefer `password_env`).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Display name used as the switch name prefix.
    #[serde(default = "default_name")]
    pub name: String,

    /// Bands exposed as switches.
    #[serde(default = "default_bands")]
    pub bands: Vec<Band>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for RouterSection {
    fn default() -> Self {
        Self {
            host: String::new(),
            username: default_username(),
            password: None,
            password_env: None,
            name: default_name(),
            bands: default_bands(),
            timeout: default_timeout(),
        }
    }
}

fn default_username() -> String {
    tplink_core::config::DEFAULT_USERNAME.into()
}
fn default_name() -> String {
    tplink_core::config::DEFAULT_NAME.into()
}
fn default_bands() -> Vec<Band> {
    Band::ALL.to_vec()
}
fn default_timeout() -> u64 {
    10
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Seconds between polls in `watch`.
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            poll_interval: default_poll_interval(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_poll_interval() -> u64 {
    30
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "tplink-wifi", "tplink-wifi").map_or_else(
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
    p.push("tplink-wifi");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from an explicit file path + environment.
///
/// A missing file is not an error; defaults and env still apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    // Keys like `poll_interval` contain `_`, so nesting needs `__`.
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("TPLINK_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the router password: `TPLINK_PASSWORD`, then `password_env`,
/// then plaintext in the config.
pub fn resolve_password(router: &RouterSection) -> Result<SecretString, ConfigError> {
    resolve_password_with(router, |name| std::env::var(name).ok())
}

fn resolve_password_with(
    router: &RouterSection,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    // 1. Well-known env var
    if let Some(pw) = lookup(PASSWORD_ENV) {
        return Ok(SecretString::from(pw));
    }

    // 2. Section's password_env → env var lookup
    if let Some(ref env_name) = router.password_env {
        if let Some(pw) = lookup(env_name) {
            return Ok(SecretString::from(pw));
        }
    }

    // 3. Plaintext in config
    if let Some(ref pw) = router.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        host: router.host.clone(),
    })
}

// ── Validation + translation ────────────────────────────────────────

/// Check that `host` is a bare router address: no scheme, no path.
pub fn validate_host(host: &str) -> Result<(), ConfigError> {
    let host = host.trim();
    if host.is_empty() {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: "a router address is required".into(),
        });
    }
    if host.contains("://") || host.contains('/') {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: format!("expected a bare address like 192.168.0.1, got '{host}'"),
        });
    }
    Ok(())
}

fn validate(router: &RouterSection) -> Result<(), ConfigError> {
    validate_host(&router.host)?;
    if router.username.is_empty() {
        return Err(ConfigError::Validation {
            field: "username".into(),
            reason: "must not be empty".into(),
        });
    }
    if router.bands.is_empty() {
        return Err(ConfigError::Validation {
            field: "bands".into(),
            reason: "at least one band is required".into(),
        });
    }
    if router.timeout == 0 {
        return Err(ConfigError::Validation {
            field: "timeout".into(),
            reason: "must be at least 1 second".into(),
        });
    }
    Ok(())
}

/// Build a runtime `RouterConfig` from file config.
pub fn router_config(cfg: &Config) -> Result<RouterConfig, ConfigError> {
    let router = &cfg.router;
    validate(router)?;
    let password = resolve_password(router)?;
    Ok(to_router_config(router, password))
}

fn to_router_config(router: &RouterSection, password: SecretString) -> RouterConfig {
    let mut bands: Vec<Band> = Vec::with_capacity(router.bands.len());
    for band in &router.bands {
        if !bands.contains(band) {
            bands.push(*band);
        }
    }

    RouterConfig {
        host: router.host.trim().to_owned(),
        username: router.username.clone(),
        password,
        name: router.name.clone(),
        bands,
        timeout: Duration::from_secs(router.timeout),
    }
}
