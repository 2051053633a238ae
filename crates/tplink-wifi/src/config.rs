//! CLI-side configuration: applies global flag overrides on top of the
//! shared config file before translating to `tplink_core::RouterConfig`.

use secrecy::SecretString;

use tplink_config::{Config, RouterSection};
use tplink_core::RouterConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use tplink_config::{config_path, load_config_or_default, save_config};

/// Apply `--host` / `--username` / `--password` / `--timeout` to a section.
fn apply_overrides(router: &mut RouterSection, global: &GlobalOpts) {
    if let Some(ref host) = global.host {
        router.host.clone_from(host);
    }
    if let Some(ref username) = global.username {
        router.username.clone_from(username);
    }
    if let Some(ref password) = global.password {
        router.password = Some(password.clone());
    }
    if let Some(timeout) = global.timeout {
        router.timeout = timeout;
    }
}

/// Load the config file and environment, then build the runtime config
/// with CLI flags taking precedence.
pub fn resolve(global: &GlobalOpts) -> Result<(Config, RouterConfig), CliError> {
    let mut cfg = tplink_config::load_config()?;
    apply_overrides(&mut cfg.router, global);

    if cfg.router.host.trim().is_empty() {
        return Err(CliError::NoConfig {
            path: config_path().display().to_string(),
        });
    }

    let mut router = tplink_config::router_config(&cfg)?;
    // An explicit flag beats the TPLINK_PASSWORD fallback in the chain.
    if let Some(ref password) = global.password {
        router.password = SecretString::from(password.clone());
    }

    Ok((cfg, router))
}
