//! Clap derive structures for the `tplink-wifi` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use tplink_core::Band;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// tplink-wifi -- switch TP-Link router radios on and off
#[derive(Debug, Parser)]
#[command(
    name = "tplink-wifi",
    version,
    about = "Switch the WiFi radios of a TP-Link router from the command line",
    long_about = "Reads and toggles the 2.4 GHz and 5 GHz radios of a TP-Link router\n\
        through its web management API. Each band is an independent switch.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Router address (overrides config)
    #[arg(long, short = 'H', env = "TPLINK_HOST", global = true)]
    pub host: Option<String>,

    /// Web UI username (overrides config)
    #[arg(long, short = 'u', env = "TPLINK_USERNAME", global = true)]
    pub username: Option<String>,

    /// Web UI password
    #[arg(long, env = "TPLINK_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "TPLINK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "TPLINK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the state of each radio band
    #[command(alias = "st")]
    Status(StatusArgs),

    /// Turn a radio band on
    On(ToggleArgs),

    /// Turn a radio band off
    Off(ToggleArgs),

    /// Poll the radios on a fixed schedule and report changes
    Watch(WatchArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Radio commands ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Band to query: 2g or 5g (default: every configured band)
    pub band: Option<Band>,
}

#[derive(Debug, Args)]
pub struct ToggleArgs {
    /// Band to switch: 2g or 5g
    pub band: Band,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Seconds between polls (default: config `poll_interval`)
    #[arg(long, short = 'i')]
    pub interval: Option<u64>,

    /// Stop after this many polls instead of waiting for Ctrl-C
    #[arg(long, short = 'n', value_parser = clap::value_parser!(u64).range(1..))]
    pub count: Option<u64>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write an initial config file
    Init(InitArgs),

    /// Display current resolved configuration (password redacted)
    Show,

    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Router address (e.g., 192.168.0.1)
    #[arg(long = "router", value_name = "HOST")]
    pub router: String,

    /// Web UI username
    #[arg(long = "user", value_name = "USERNAME")]
    pub user: Option<String>,

    /// Store this password in the config file (plaintext)
    #[arg(long = "store-password", value_name = "PASSWORD", conflicts_with = "password_env")]
    pub store_password: Option<String>,

    /// Read the password from this environment variable instead
    #[arg(long, value_name = "VAR")]
    pub password_env: Option<String>,

    /// Display name used as the switch name prefix
    #[arg(long)]
    pub name: Option<String>,

    /// Overwrite an existing config file
    #[arg(long, short = 'f')]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
