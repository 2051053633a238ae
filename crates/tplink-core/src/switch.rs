// ── WiFi band switch entity ──
//
// One on/off switch per radio band. Each switch owns its own
// `RouterClient`, so two switches on the same router never share a
// session. The entity state starts `Unknown` and only changes through
// `update()` or a toggle.

use serde::Serialize;
use tracing::{debug, warn};

use tplink_api::{Band, RadioSetting, RadioState, RouterClient};

use crate::error::CoreError;

pub const ICON_ON: &str = "mdi:wifi";
pub const ICON_OFF: &str = "mdi:wifi-off";

/// A radio band exposed as a switch.
pub struct WifiSwitch {
    name: String,
    band: Band,
    state: RadioState,
    client: RouterClient,
}

/// Point-in-time view of a switch, for display and serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitchSnapshot {
    pub name: String,
    pub band: Band,
    pub state: RadioState,
    pub available: bool,
    pub icon: &'static str,
    pub ssid: Option<String>,
}

impl WifiSwitch {
    /// `display_name` is suffixed with the band: `"{display_name}_{2g|5g}"`.
    pub fn new(display_name: &str, band: Band, client: RouterClient) -> Self {
        Self {
            name: format!("{display_name}_{band}"),
            band,
            state: RadioState::Unknown,
            client,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn band(&self) -> Band {
        self.band
    }

    pub fn state(&self) -> RadioState {
        self.state
    }

    pub fn host(&self) -> &str {
        self.client.host()
    }

    pub fn is_on(&self) -> bool {
        self.state == RadioState::On
    }

    pub fn available(&self) -> bool {
        self.state.is_known()
    }

    pub fn icon(&self) -> &'static str {
        if self.is_on() { ICON_ON } else { ICON_OFF }
    }

    /// Poll the router. The session is kept open between polls.
    pub async fn update(&mut self) -> RadioState {
        self.client.band_state(self.band, true).await;
        self.state = self.client.state();
        debug!(switch = %self.name, state = %self.state, "updated");
        self.state
    }

    /// Switch the band on or off, reporting why it failed.
    pub async fn set(&mut self, setting: RadioSetting) -> Result<(), CoreError> {
        let result = self.client.set_band_state(self.band, setting).await;
        self.state = self.client.state();

        result.map_err(|e| CoreError::from_api(e, &self.name))
    }

    /// Turn the radio on. Failures are logged, never returned.
    pub async fn turn_on(&mut self) {
        self.toggle(RadioSetting::On).await;
    }

    /// Turn the radio off. Failures are logged, never returned.
    pub async fn turn_off(&mut self) {
        self.toggle(RadioSetting::Off).await;
    }

    async fn toggle(&mut self, setting: RadioSetting) {
        if let Err(e) = self.set(setting).await {
            warn!(switch = %self.name, %setting, error = %e, "failed to switch radio");
        }
    }

    pub fn snapshot(&self) -> SwitchSnapshot {
        SwitchSnapshot {
            name: self.name.clone(),
            band: self.band,
            state: self.state,
            available: self.available(),
            icon: self.icon(),
            ssid: self
                .client
                .last_payload()
                .and_then(|p| p.ssid())
                .map(str::to_owned),
        }
    }
}
