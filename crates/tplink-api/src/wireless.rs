// Wireless band endpoints
//
// `POST /admin/wireless?form=wireless_{2g,5g}` with `operation=read` returns
// the full band configuration; `operation=write` takes it back in full.
// The firmware has no partial update, so every write is a read-modify-write
// within one session.

use tracing::{debug, error, info, warn};

use crate::band::{Band, RadioSetting, RadioState};
use crate::client::{RouterClient, encode_form};
use crate::error::Error;
use crate::models::BandConfig;

impl RouterClient {
    /// Read the current state of `band`.
    ///
    /// Logs in first if no session is open. Never fails: any error leaves
    /// the client logged out and returns [`RadioState::Unknown`]. Unless
    /// `keep_alive` is set, the session is closed before returning.
    pub async fn band_state(&mut self, band: Band, keep_alive: bool) -> RadioState {
        if !self.has_session() && self.login().await.is_err() {
            return self.state;
        }

        match self.read_band(band).await {
            Ok(config) => {
                let state = config.radio_state();
                debug!(host = %self.host(), %band, enable = ?config.enable(), "current band state");
                self.last_payload = Some(config);
                self.state = state;
                if !keep_alive {
                    self.logout();
                }
            }
            Err(e) => {
                error!(host = %self.host(), %band, error = %e, "failed to read band state");
                self.logout();
                self.last_payload = None;
                self.state = RadioState::Unknown;
            }
        }

        self.state
    }

    /// Switch `band` on or off.
    ///
    /// Reads the band first and writes the same payload back with only
    /// `enable` changed. Nothing is written if the read fails. The session
    /// is closed once the write completes.
    ///
    /// A transport failure during the write leaves the state
    /// [`RadioState::Unknown`]; a write the firmware rejects leaves the
    /// last known state untouched.
    pub async fn set_band_state(&mut self, band: Band, desired: RadioSetting) -> Result<(), Error> {
        if !self.has_session() {
            self.login().await?;
        }

        if self.band_state(band, true).await == RadioState::Unknown {
            warn!(host = %self.host(), %band, "band state unknown, not writing");
            return Err(Error::Unavailable);
        }

        let form = self
            .last_payload
            .as_ref()
            .map(|payload| payload.write_form(desired))
            .ok_or(Error::Unavailable)?;

        let result = self.write_band(band, &form).await;
        self.logout();

        match result {
            Ok(()) => {
                info!(host = %self.host(), %band, state = %desired, "band state changed");
                self.state = desired.into();
                Ok(())
            }
            Err(e @ Error::Rejected { .. }) => {
                error!(host = %self.host(), %band, "failed to change the band state");
                Err(e)
            }
            Err(e) => {
                error!(host = %self.host(), %band, error = %e, "error while writing band state");
                self.state = RadioState::Unknown;
                Err(e)
            }
        }
    }

    async fn read_band(&self, band: Band) -> Result<BandConfig, Error> {
        let http = self.session_http()?;
        let url = self.band_url(band)?;

        debug!("POST {} (read)", url);

        let builder = self.form_request(http, url, encode_form([("operation", "read")]));
        let (response, body) = self.execute(builder).await?;

        if response.success.is_failure() {
            return Err(Error::Rejected { operation: "read" });
        }

        response.into_band_config(&body)
    }

    async fn write_band(&self, band: Band, form: &[(String, String)]) -> Result<(), Error> {
        let http = self.session_http()?;
        let url = self.band_url(band)?;

        debug!("POST {} (write, {} fields)", url, form.len());

        let builder = self.form_request(http, url, encode_form(form.iter().map(|(k, v)| (k, v))));
        let (response, _) = self.execute(builder).await?;

        if response.success.is_failure() {
            return Err(Error::Rejected { operation: "write" });
        }
        Ok(())
    }
}
