//! `on` / `off` handlers.

use tracing::info;

use tplink_core::{Band, RadioSetting, RouterConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::{detail, ensure_available, plain_line};

pub async fn handle(
    router: &RouterConfig,
    band: Band,
    setting: RadioSetting,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut switch = router.switch(band);
    switch
        .set(setting)
        .await
        .map_err(|e| CliError::from_core(e, &router.host))?;
    info!(switch = switch.name(), %setting, "radio switched");

    let snapshot = switch.snapshot();
    let color = output::should_color(global.color);
    let out = output::render_single(
        global.output,
        &snapshot,
        |s| detail(s, color),
        plain_line,
    )?;
    output::print_output(&out, global.quiet);

    ensure_available(std::slice::from_ref(&snapshot))
}
