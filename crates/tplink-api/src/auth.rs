// Router authentication
//
// The firmware wants the credentials twice: as an `Authorization` cookie
// carrying a Basic token, and as real HTTP Basic auth on the login POST.
// A successful login leaves an open session on the client; there is no
// logout endpoint, so logging out only drops the local session.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error};

use crate::band::RadioState;
use crate::client::{RouterClient, encode_form};
use crate::error::Error;
use crate::session::{RouterSession, SessionState};

const LOGIN_PATH: &str = "/data/login.json";

/// Username and password for the router's web management UI.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &SecretString {
        &self.password
    }

    /// `base64("{username}:{password}")`
    pub(crate) fn basic_token(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password.expose_secret());
        STANDARD.encode(raw.as_bytes())
    }

    /// The cookie the firmware checks on every request.
    pub(crate) fn auth_cookie(&self) -> String {
        format!("Authorization=Basic {}", self.basic_token())
    }
}

impl RouterClient {
    /// Open a fresh session with the router.
    ///
    /// `POST /data/login.json` with `operation=login`. Any session that was
    /// already open is dropped first. On failure the radio state collapses
    /// to [`RadioState::Unknown`] and no session is kept.
    pub async fn login(&mut self) -> Result<(), Error> {
        self.session.close();

        match self.open_session().await {
            Ok(session) => {
                debug!(host = %self.host(), "login successful");
                self.session = SessionState::LoggedIn(session);
                Ok(())
            }
            Err(e) => {
                if e.is_auth() {
                    error!(host = %self.host(), "login failed");
                } else {
                    debug!(host = %self.host(), error = %e, "error while connecting to router");
                }
                self.state = RadioState::Unknown;
                Err(e)
            }
        }
    }

    /// Drop the current session, if any. Idempotent.
    pub fn logout(&mut self) {
        if self.session.close() {
            debug!(host = %self.host(), "session closed");
        }
    }

    async fn open_session(&self) -> Result<RouterSession, Error> {
        let http = self
            .transport()
            .build_session(self.host(), self.credentials())?;
        let url = self.url(LOGIN_PATH)?;

        debug!("logging in at {}", url);

        let credentials = self.credentials();
        let builder = self
            .form_request(&http, url, encode_form([("operation", "login")]))
            .basic_auth(
                credentials.username(),
                Some(credentials.password().expose_secret()),
            );
        let (response, _) = self.execute(builder).await?;

        if response.success.is_failure() {
            return Err(Error::Authentication {
                message: format!("router at {} rejected the credentials", self.host()),
            });
        }

        Ok(RouterSession::new(http))
    }
}
