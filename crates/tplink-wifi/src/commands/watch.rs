//! `watch` handler: polls every switch on a fixed schedule until Ctrl-C
//! (or `--count` polls), printing one line per state change.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use tplink_core::{RadioState, RouterConfig, SwitchSnapshot, WifiSwitch};

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    router: &RouterConfig,
    args: WatchArgs,
    default_interval: u64,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let secs = args.interval.unwrap_or(default_interval);
    if secs == 0 {
        return Err(CliError::Validation {
            field: "interval".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    let mut switches = router.switches();
    info!(host = %router.host, interval_secs = secs, "watching radios");
    poll_loop(
        &mut switches,
        Duration::from_secs(secs),
        args.count,
        &cancel,
        global,
    )
    .await
}

async fn poll_loop(
    switches: &mut [WifiSwitch],
    period: Duration,
    count: Option<u64>,
    cancel: &CancellationToken,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(global.color);
    let mut interval = tokio::time::interval(period);
    let mut polls: u64 = 0;

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                for switch in switches.iter_mut() {
                    let before = switch.state();
                    let after = switch.update().await;
                    if before != after {
                        info!(switch = switch.name(), %before, %after, "state changed");
                        let line = render_change(&switch.snapshot(), before, global.output, color)?;
                        output::print_output(&line, global.quiet);
                    }
                }
                polls += 1;
                debug!(polls, "poll complete");
                if count.is_some_and(|n| polls >= n) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// One line per transition: NDJSON for the JSON formats, text otherwise.
fn render_change(
    snapshot: &SwitchSnapshot,
    before: RadioState,
    format: OutputFormat,
    color: bool,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Json | OutputFormat::JsonCompact => output::render_json(snapshot, true),
        OutputFormat::Plain => Ok(format!("{}\t{}", snapshot.name, snapshot.state)),
        OutputFormat::Table => Ok(format!(
            "{}: {} -> {}",
            snapshot.name,
            output::paint_state(before, color),
            output::paint_state(snapshot.state, color),
        )),
    }
}
