//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use tplink_config::ConfigError;
use tplink_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to router at {host}: {reason}")]
    #[diagnostic(
        code(tplink::connection_failed),
        help(
            "Check that the router is reachable from this machine.\n\
             Host: {host}\n\
             Try: tplink-wifi status -vv"
        )
    )]
    ConnectionFailed { host: String, reason: String },

    #[error("Unavailable: {names}")]
    #[diagnostic(
        code(tplink::unavailable),
        help(
            "The router did not report a state for these bands.\n\
             Run with -vv to see the failing request."
        )
    )]
    Unavailable { names: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(tplink::auth_failed),
        help(
            "Verify the username and password of the router's web UI.\n\
             Set them with --username / --password or TPLINK_PASSWORD."
        )
    )]
    AuthFailed { message: String },

    #[error("No password configured for router '{host}'")]
    #[diagnostic(
        code(tplink::no_credentials),
        help(
            "Pass --password, set TPLINK_PASSWORD, or run:\n\
             tplink-wifi config init --router {host} --password-env <VAR>"
        )
    )]
    NoCredentials { host: String },

    // ── Router responses ─────────────────────────────────────────────

    #[error("Router refused the request: {message}")]
    #[diagnostic(code(tplink::rejected))]
    Rejected { message: String },

    #[error("Unexpected response from router: {message}")]
    #[diagnostic(
        code(tplink::protocol),
        help("This firmware may use a different web API than the one supported.")
    )]
    Protocol { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(tplink::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("No router configured")]
    #[diagnostic(
        code(tplink::no_config),
        help(
            "Create a config with: tplink-wifi config init --router <HOST>\n\
             Or pass --host / set TPLINK_HOST.\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(tplink::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(tplink::config))]
    Config(Box<ConfigError>),

    // ── Timeout ──────────────────────────────────────────────────────

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(tplink::timeout),
        help("Increase timeout with --timeout or check router responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(tplink::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render config: {0}")]
    #[diagnostic(code(tplink::toml))]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::Unavailable { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::ConfigExists { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { host } => CliError::NoCredentials { host },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(Box::new(other)),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl CliError {
    /// Translate a core error, naming the router host where it helps.
    pub fn from_core(err: CoreError, host: &str) -> Self {
        match err {
            CoreError::ConnectionFailed { reason } => CliError::ConnectionFailed {
                host: host.to_owned(),
                reason,
            },
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },
            CoreError::Rejected { message } => CliError::Rejected { message },
            CoreError::Unavailable { name } => CliError::Unavailable { names: name },
            CoreError::Protocol { message } => CliError::Protocol { message },
            CoreError::Config { message } => CliError::Validation {
                field: "host".into(),
                reason: message,
            },
        }
    }
}
