// Transport configuration for router sessions.
//
// Every session is a fresh `reqwest::Client` with its own cookie jar and
// the browser-like header set the firmware insists on. The headers are
// part of the wire contract: requests without them are refused.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::{
    ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONNECTION, HeaderMap, HeaderName, HeaderValue,
    ORIGIN, REFERER,
};
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;

/// Fixed per-request timeout used by the router UI.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

const USER_AGENT: &str = "Mozilla/5.0";

/// Shared transport configuration for building session clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TransportConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the HTTP client backing one router session.
    ///
    /// The jar is seeded with the `Authorization` cookie and keeps any
    /// cookies the router sets for the lifetime of the session.
    pub(crate) fn build_session(
        &self,
        host: &str,
        credentials: &Credentials,
    ) -> Result<reqwest::Client, Error> {
        let origin = format!("http://{host}/");
        let origin_url = Url::parse(&origin)?;

        let jar = Arc::new(Jar::default());
        jar.add_cookie_str(&credentials.auth_cookie(), &origin_url);

        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .default_headers(browser_headers(&origin)?)
            .cookie_provider(jar)
            .build()
            .map_err(Error::Transport)
    }
}

/// Headers the firmware expects from its own web UI.
///
/// `Content-Type` is set per request alongside the form body.
pub fn browser_headers(origin: &str) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ORIGIN, HeaderValue::from_str(origin)?);
    headers.insert(REFERER, HeaderValue::from_str(origin)?);
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate"));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9,es;q=0.8"),
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/javascript, */*; q=0.01"),
    );
    headers.insert(
        HeaderName::from_static("x-requested-with"),
        HeaderValue::from_static("XMLHttpRequest"),
    );
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(HeaderName::from_static("dnt"), HeaderValue::from_static("1"));
    Ok(headers)
}
