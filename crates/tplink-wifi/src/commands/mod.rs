//! Command dispatch: bridges CLI args -> switch entities -> output formatting.

pub mod config_cmd;
pub mod status;
pub mod toggle;
pub mod watch;

use tabled::Tabled;

use tplink_core::{RadioSetting, SwitchSnapshot};

use crate::cli::{Command, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

/// Dispatch a router-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    let (cfg, router) = config::resolve(global)?;
    tracing::debug!(host = %router.host, "resolved router config");

    match cmd {
        Command::Status(args) => status::handle(&router, args, global).await,
        Command::On(args) => toggle::handle(&router, args.band, RadioSetting::On, global).await,
        Command::Off(args) => toggle::handle(&router, args.band, RadioSetting::Off, global).await,
        Command::Watch(args) => watch::handle(&router, args, cfg.defaults.poll_interval, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}

// ── Shared switch rendering ─────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct SwitchRow {
    #[tabled(rename = "Switch")]
    name: String,
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "SSID")]
    ssid: String,
    #[tabled(rename = "Icon")]
    icon: String,
}

impl SwitchRow {
    pub(crate) fn new(s: &SwitchSnapshot, color: bool) -> Self {
        Self {
            name: s.name.clone(),
            band: s.band.label().to_owned(),
            state: output::paint_state(s.state, color),
            ssid: s.ssid.clone().unwrap_or_else(|| "-".into()),
            icon: s.icon.to_owned(),
        }
    }
}

pub(crate) fn detail(s: &SwitchSnapshot, color: bool) -> String {
    [
        format!("Switch:    {}", s.name),
        format!("Band:      {}", s.band.label()),
        format!("State:     {}", output::paint_state(s.state, color)),
        format!("Available: {}", if s.available { "yes" } else { "no" }),
        format!("SSID:      {}", s.ssid.as_deref().unwrap_or("-")),
        format!("Icon:      {}", s.icon),
    ]
    .join("\n")
}

/// `name<TAB>state` for scripting.
pub(crate) fn plain_line(s: &SwitchSnapshot) -> String {
    format!("{}\t{}", s.name, s.state)
}

/// Error listing every snapshot the router could not report, if any.
pub(crate) fn ensure_available(snapshots: &[SwitchSnapshot]) -> Result<(), CliError> {
    let names: Vec<&str> = snapshots
        .iter()
        .filter(|s| !s.available)
        .map(|s| s.name.as_str())
        .collect();
    if names.is_empty() {
        Ok(())
    } else {
        Err(CliError::Unavailable {
            names: names.join(", "),
        })
    }
}
