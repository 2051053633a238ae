//! Config subcommand handlers.

use serde::Serialize;

use tplink_config::{Config, Defaults, RouterSection};
use tplink_core::Band;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, InitArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "********";

// ── Redacted view ───────────────────────────────────────────────────

#[derive(Serialize)]
struct ConfigView<'a> {
    path: String,
    router: RouterView<'a>,
    defaults: &'a Defaults,
}

#[derive(Serialize)]
struct RouterView<'a> {
    host: &'a str,
    username: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password_env: Option<&'a str>,
    name: &'a str,
    bands: Vec<&'static str>,
    timeout: u64,
}

impl<'a> ConfigView<'a> {
    fn new(cfg: &'a Config) -> Self {
        let r = &cfg.router;
        Self {
            path: config::config_path().display().to_string(),
            router: RouterView {
                host: &r.host,
                username: &r.username,
                password: r.password.as_ref().map(|_| REDACTED),
                password_env: r.password_env.as_deref(),
                name: &r.name,
                bands: r.bands.iter().copied().map(Band::as_str).collect(),
                timeout: r.timeout,
            },
            defaults: &cfg.defaults,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init(init) => {
            let path = init_config(init)?;
            if !global.quiet {
                eprintln!("Configuration written to {}", path.display());
                eprintln!("  Test it: tplink-wifi status");
            }
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let view = ConfigView::new(&cfg);
            let text = toml::to_string_pretty(&view)?;
            let out = output::render_single(
                global.output,
                &view,
                |_| text.clone(),
                |v| v.path.clone(),
            )?;
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}

fn init_config(init: InitArgs) -> Result<std::path::PathBuf, CliError> {
    tplink_config::validate_host(&init.router)?;

    let path = config::config_path();
    if path.exists() && !init.force {
        return Err(CliError::ConfigExists {
            path: path.display().to_string(),
        });
    }

    let host = init.router.trim();
    let defaults = RouterSection::default();
    let cfg = Config {
        router: RouterSection {
            host: host.to_owned(),
            username: init.user.unwrap_or(defaults.username),
            password: init.store_password,
            password_env: init.password_env,
            name: init.name.unwrap_or(defaults.name),
            bands: defaults.bands,
            timeout: defaults.timeout,
        },
        defaults: Defaults::default(),
    };

    Ok(config::save_config(&cfg)?)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn show_redacts_password() {
        let cfg = Config {
            router: RouterSection {
                host: "192.168.0.1".into(),
                password: Some("hunter2".into()),
                ..RouterSection::default()
            },
            defaults: Defaults::default(),
        };
        let view = ConfigView::new(&cfg);
        let text = toml::to_string_pretty(&view).unwrap();
        assert!(text.contains(REDACTED));
        assert!(!text.contains("hunter2"));
        assert!(text.contains("\"5g\""));
    }
}
