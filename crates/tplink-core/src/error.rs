// ── Core error types ──
//
// User-facing errors from tplink-core. Consumers never see HTTP status
// codes or JSON parse failures directly: `CoreError::from_api`
// translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to router: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Router connection timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Operation rejected by router: {message}")]
    Rejected { message: String },

    #[error("Switch '{name}' is unavailable")]
    Unavailable { name: String },

    #[error("Unexpected response from router: {message}")]
    Protocol { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl CoreError {
    /// Translate a client error raised while driving the switch `name`.
    pub fn from_api(err: tplink_api::Error, name: &str) -> Self {
        use tplink_api::Error as Api;

        match err {
            Api::Authentication { message } => CoreError::AuthenticationFailed { message },
            Api::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            Api::Transport(e) => CoreError::ConnectionFailed {
                reason: e.to_string(),
            },
            Api::SessionClosed => CoreError::ConnectionFailed {
                reason: "router session closed".into(),
            },
            Api::Rejected { operation } => CoreError::Rejected {
                message: format!("{operation} refused"),
            },
            Api::Unavailable => CoreError::Unavailable {
                name: name.to_owned(),
            },
            Api::Deserialization { message, .. } => CoreError::Protocol { message },
            Api::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid router host: {e}"),
            },
            Api::InvalidHeader(e) => CoreError::Config {
                message: format!("invalid router host: {e}"),
            },
        }
    }
}
