// ── Runtime router configuration ──
//
// Describes *which* router to talk to and which bands to expose.
// Carries credential data, but never touches disk: the CLI builds a
// `RouterConfig` from its config file and flags and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use tplink_api::{Band, Credentials, RouterClient, TransportConfig};

use crate::switch::WifiSwitch;

pub const DEFAULT_NAME: &str = "TP-Link Router";
pub const DEFAULT_USERNAME: &str = "admin";

/// Configuration for one router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Router address (e.g., `192.168.0.1`).
    pub host: String,
    /// Web UI username.
    pub username: String,
    /// Web UI password.
    pub password: SecretString,
    /// Display name; switches are named `{name}_{band}`.
    pub name: String,
    /// Bands to expose as switches.
    pub bands: Vec<Band>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            host: "192.168.0.1".into(),
            username: DEFAULT_USERNAME.into(),
            password: SecretString::from(String::new()),
            name: DEFAULT_NAME.into(),
            bands: Band::ALL.to_vec(),
            timeout: tplink_api::transport::DEFAULT_TIMEOUT,
        }
    }
}

impl RouterConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }

    /// A fresh, logged-out client for this router.
    pub fn client(&self) -> RouterClient {
        RouterClient::with_transport(
            self.host.clone(),
            self.credentials(),
            TransportConfig::default().with_timeout(self.timeout),
        )
    }

    /// One switch per configured band, each with its own client.
    pub fn switches(&self) -> Vec<WifiSwitch> {
        self.bands
            .iter()
            .map(|&band| WifiSwitch::new(&self.name, band, self.client()))
            .collect()
    }

    /// The switch for a single band, configured or not.
    pub fn switch(&self, band: Band) -> WifiSwitch {
        WifiSwitch::new(&self.name, band, self.client())
    }
}
