// Router HTTP client
//
// Owns the host, credentials and session of one router, plus the last
// radio state and band payload it saw. Endpoint operations (login, band
// reads and writes) are implemented as inherent methods in separate files
// to keep this module focused on transport mechanics.
//
// The client is not reentrant: every operation that touches the session
// takes `&mut self`, so callers sharing one must serialize access.

use reqwest::header::CONTENT_TYPE;
use tracing::trace;
use url::Url;

use crate::auth::Credentials;
use crate::band::{Band, RadioState};
use crate::error::Error;
use crate::models::{BandConfig, RouterResponse};
use crate::session::SessionState;
use crate::transport::{FORM_CONTENT_TYPE, TransportConfig};

/// Session client for one TP-Link router.
pub struct RouterClient {
    host: String,
    credentials: Credentials,
    transport: TransportConfig,
    pub(crate) session: SessionState,
    pub(crate) state: RadioState,
    pub(crate) last_payload: Option<BandConfig>,
}

impl RouterClient {
    /// Create a client for `host` (an address such as `192.168.0.1` or
    /// `router.lan:8080`). Nothing is sent until the first operation.
    pub fn new(host: impl Into<String>, credentials: Credentials) -> Self {
        Self::with_transport(host, credentials, TransportConfig::default())
    }

    pub fn with_transport(
        host: impl Into<String>,
        credentials: Credentials,
        transport: TransportConfig,
    ) -> Self {
        Self {
            host: host.into(),
            credentials,
            transport,
            session: SessionState::LoggedOut,
            state: RadioState::Off,
            last_payload: None,
        }
    }

    /// The router address.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn transport(&self) -> &TransportConfig {
        &self.transport
    }

    /// Last known radio state.
    pub fn state(&self) -> RadioState {
        self.state
    }

    /// `true` unless the last operation left the state unknown.
    pub fn is_available(&self) -> bool {
        self.state.is_known()
    }

    /// Whether a logged-in session is currently held.
    pub fn has_session(&self) -> bool {
        self.session.is_logged_in()
    }

    /// The last band configuration read from the router.
    pub fn last_payload(&self) -> Option<&BandConfig> {
        self.last_payload.as_ref()
    }

    // ── URL construction ─────────────────────────────────────────────

    /// `http://{host}{path}`
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(Url::parse(&format!("http://{}{path}", self.host))?)
    }

    /// `http://{host}/admin/wireless?form=wireless_{2g,5g}`
    pub(crate) fn band_url(&self, band: Band) -> Result<Url, Error> {
        let mut url = self.url("/admin/wireless")?;
        url.query_pairs_mut().append_pair("form", band.form());
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// The HTTP client of the open session.
    pub(crate) fn session_http(&self) -> Result<&reqwest::Client, Error> {
        self.session
            .session()
            .map(crate::session::RouterSession::http)
            .ok_or(Error::SessionClosed)
    }

    /// A form-encoded POST carrying the firmware's content type.
    pub(crate) fn form_request(
        &self,
        http: &reqwest::Client,
        url: Url,
        body: String,
    ) -> reqwest::RequestBuilder {
        http.post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
    }

    /// Send a request and decode the `{success, data}` response.
    ///
    /// The HTTP status is not trusted: the firmware reports failures
    /// through the `success` field, so the body is always parsed.
    pub(crate) async fn execute(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<(RouterResponse, String), Error> {
        let resp = builder.send().await.map_err(|e| self.transport_error(e))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;

        trace!(%status, body_len = body.len(), "router response");

        let parsed = RouterResponse::parse(&body).map_err(|e| match e {
            Error::Deserialization { message, body } if !status.is_success() => {
                Error::Deserialization {
                    message: format!("HTTP {status}: {message}"),
                    body,
                }
            }
            other => other,
        })?;
        Ok((parsed, body))
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.transport.timeout.as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }
}

/// Encode form pairs as `application/x-www-form-urlencoded`.
pub(crate) fn encode_form<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key.as_ref(), value.as_ref());
    }
    serializer.finish()
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn client(host: &str) -> RouterClient {
        RouterClient::new(
            host,
            Credentials::new("admin", SecretString::from("pw".to_owned())),
        )
    }

    #[test]
    fn band_urls() {
        let c = client("192.168.0.1");
        let url = c.band_url(Band::FiveGhz).map(String::from).unwrap_or_default();
        assert_eq!(url, "http://192.168.0.1/admin/wireless?form=wireless_5g");
    }

    #[test]
    fn host_with_port() {
        let c = client("127.0.0.1:8080");
        let url = c.url("/data/login.json").map(String::from).unwrap_or_default();
        assert_eq!(url, "http://127.0.0.1:8080/data/login.json");
    }

    #[test]
    fn starts_logged_out_and_off() {
        let c = client("192.168.0.1");
        assert!(!c.has_session());
        assert_eq!(c.state(), RadioState::Off);
        assert!(c.is_available());
        assert!(c.last_payload().is_none());
    }

    #[test]
    fn encode_form_escapes_values() {
        assert_eq!(
            encode_form([("operation", "login"), ("ssid", "My Wifi&Co")]),
            "operation=login&ssid=My+Wifi%26Co"
        );
    }
}
