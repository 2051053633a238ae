// tplink-api: Async session client for the TP-Link router web management API

pub mod auth;
pub mod band;
pub mod client;
pub mod error;
pub mod models;
pub mod session;
pub mod transport;
pub mod wireless;

pub use auth::Credentials;
pub use band::{Band, RadioSetting, RadioState};
pub use client::RouterClient;
pub use error::Error;
pub use models::{BandConfig, Success};
pub use transport::TransportConfig;
