// tplink-core: Switch entities and runtime configuration between tplink-api and the CLI.

pub mod config;
pub mod error;
pub mod switch;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::RouterConfig;
pub use error::CoreError;
pub use switch::{SwitchSnapshot, WifiSwitch};

pub use tplink_api::{Band, RadioSetting, RadioState};
