// Router session lifecycle
//
// `LoggedOut -> LoggedIn` only through a successful login; any failure or
// an explicit logout drops back to `LoggedOut`, taking the connection pool
// and cookie jar with it.

/// An authenticated HTTP context: a dedicated client whose jar carries the
/// auth cookie plus whatever the router set during login.
#[derive(Debug, Clone)]
pub struct RouterSession {
    http: reqwest::Client,
}

impl RouterSession {
    pub(crate) fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

#[derive(Debug, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn(RouterSession),
}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn(_))
    }

    pub(crate) fn session(&self) -> Option<&RouterSession> {
        match self {
            Self::LoggedIn(session) => Some(session),
            Self::LoggedOut => None,
        }
    }

    /// Drop the session. Returns `true` if one was open.
    pub(crate) fn close(&mut self) -> bool {
        matches!(std::mem::take(self), Self::LoggedIn(_))
    }
}
