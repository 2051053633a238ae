//! `status` handler.

use tplink_core::RouterConfig;

use crate::cli::{GlobalOpts, StatusArgs};
use crate::error::CliError;
use crate::output;

use super::{SwitchRow, ensure_available, plain_line};

pub async fn handle(
    router: &RouterConfig,
    args: StatusArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut switches = match args.band {
        Some(band) => vec![router.switch(band)],
        None => router.switches(),
    };

    let mut snapshots = Vec::with_capacity(switches.len());
    for switch in &mut switches {
        switch.update().await;
        snapshots.push(switch.snapshot());
    }

    let color = output::should_color(global.color);
    let out = output::render_list(
        global.output,
        &snapshots,
        |s| SwitchRow::new(s, color),
        plain_line,
    )?;
    output::print_output(&out, global.quiet);

    ensure_available(&snapshots)
}
