// Radio bands and their on/off states
//
// `RadioState` is what the router reports (plus `Unknown` when it can't be
// reached); `RadioSetting` is what a caller may ask for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the two independently switchable WiFi radios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    /// 2.4 GHz radio.
    #[serde(rename = "2g")]
    TwoGhz,
    /// 5 GHz radio.
    #[serde(rename = "5g")]
    FiveGhz,
}

impl Band {
    /// Both bands, in the order the router UI lists them.
    pub const ALL: [Band; 2] = [Band::TwoGhz, Band::FiveGhz];

    /// Short identifier used in entity names and config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TwoGhz => "2g",
            Self::FiveGhz => "5g",
        }
    }

    /// Value of the `form` query parameter on `/admin/wireless`.
    pub fn form(self) -> &'static str {
        match self {
            Self::TwoGhz => "wireless_2g",
            Self::FiveGhz => "wireless_5g",
        }
    }

    /// Human-readable frequency.
    pub fn label(self) -> &'static str {
        match self {
            Self::TwoGhz => "2.4 GHz",
            Self::FiveGhz => "5 GHz",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Band {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2g" | "2.4" | "2.4g" | "2.4ghz" | "wireless_2g" => Ok(Self::TwoGhz),
            "5g" | "5" | "5ghz" | "wireless_5g" => Ok(Self::FiveGhz),
            other => Err(format!("unknown band '{other}' (expected '2g' or '5g')")),
        }
    }
}

/// Last known state of a radio.
///
/// `Unknown` is not a radio state: it means the router could not be
/// reached or refused to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadioState {
    On,
    Off,
    Unknown,
}

impl RadioState {
    /// Map the firmware's `enable` field. Only the literal `"on"` is on.
    pub fn from_enable(value: &str) -> Self {
        if value == "on" { Self::On } else { Self::Off }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl fmt::Display for RadioState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A state that may be written to a radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadioSetting {
    On,
    Off,
}

impl RadioSetting {
    /// Value written into the `enable` field.
    pub fn as_enable(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

impl From<RadioSetting> for RadioState {
    fn from(setting: RadioSetting) -> Self {
        match setting {
            RadioSetting::On => Self::On,
            RadioSetting::Off => Self::Off,
        }
    }
}

impl fmt::Display for RadioSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_enable())
    }
}
