use thiserror::Error;

/// Top-level error type for the `tplink-api` crate.
///
/// Covers every failure mode of a router session: transport, login
/// rejection, firmware refusals, and malformed responses.
/// `tplink-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The firmware answered the login request with `success: "false"`.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// An operation needed an open session but none was available.
    #[error("No open router session")]
    SessionClosed,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error (usually a malformed host).
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A header value built from the host could not be encoded.
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Router API ──────────────────────────────────────────────────
    /// The firmware answered a read or write with `success: "false"`.
    #[error("Router rejected the {operation} request")]
    Rejected { operation: &'static str },

    /// A write was refused because the preceding read reported the
    /// band state as unknown.
    #[error("Band state unavailable -- refusing to write without a fresh read")]
    Unavailable,

    // ── Data ────────────────────────────────────────────────────────
    /// Response body was not the expected JSON shape, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the router rejected the credentials.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a network-level failure that may clear
    /// up by itself on the next poll.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }
}
