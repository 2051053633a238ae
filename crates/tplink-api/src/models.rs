// Router API response models
//
// The firmware answers every request with a JSON object carrying a
// loosely-typed `success` field. Only the literal string "false" means
// failure; booleans, "true", numbers all count as success. Band reads add
// a `data` object with every radio setting, all of which must be sent back
// untouched on a write.

use serde_json::{Map, Value};

use crate::band::{RadioSetting, RadioState};
use crate::error::Error;

const NO_SUCCESS: &str = "false";

/// Outcome reported by the `success` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Success {
    Ok,
    Failed,
}

impl Success {
    /// Exact string comparison against `"false"`. A JSON `false` is *not*
    /// a failure.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) if s == NO_SUCCESS => Self::Failed,
            _ => Self::Ok,
        }
    }

    pub fn is_failure(self) -> bool {
        self == Self::Failed
    }
}

/// A decoded router response.
#[derive(Debug, Clone)]
pub(crate) struct RouterResponse {
    pub success: Success,
    pub data: Option<Value>,
}

impl RouterResponse {
    /// Parse a response body.
    ///
    /// Anything that is not a JSON object with a `success` field is a
    /// protocol error.
    pub fn parse(body: &str) -> Result<Self, Error> {
        let value: Value = serde_json::from_str(body).map_err(|e| deserialization(&e, body))?;

        let Value::Object(mut fields) = value else {
            return Err(Error::Deserialization {
                message: "expected a JSON object".into(),
                body: body.to_owned(),
            });
        };

        let success = fields
            .get("success")
            .map(Success::from_value)
            .ok_or_else(|| Error::Deserialization {
                message: "missing `success` field".into(),
                body: body.to_owned(),
            })?;

        Ok(Self {
            success,
            data: fields.remove("data"),
        })
    }

    /// Take the `data` object of a band read.
    pub fn into_band_config(self, body: &str) -> Result<BandConfig, Error> {
        match self.data {
            Some(Value::Object(fields)) => Ok(BandConfig { fields }),
            _ => Err(Error::Deserialization {
                message: "missing `data` object in band response".into(),
                body: body.to_owned(),
            }),
        }
    }
}

fn deserialization(err: &serde_json::Error, body: &str) -> Error {
    let preview: String = body.chars().take(200).collect();
    Error::Deserialization {
        message: format!("{err} (body preview: {preview:?})"),
        body: body.to_owned(),
    }
}

/// Full configuration of one band as read from the router.
///
/// Field order is kept as received so a write mirrors the router UI.
#[derive(Debug, Clone, PartialEq)]
pub struct BandConfig {
    fields: Map<String, Value>,
}

impl BandConfig {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Raw `enable` value, if it is a string.
    pub fn enable(&self) -> Option<&str> {
        self.fields.get("enable").and_then(Value::as_str)
    }

    pub fn ssid(&self) -> Option<&str> {
        self.fields.get("ssid").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Radio state implied by `enable`; a missing or non-string value is off.
    pub fn radio_state(&self) -> RadioState {
        self.enable().map_or(RadioState::Off, RadioState::from_enable)
    }

    /// Form pairs for writing `setting` back.
    ///
    /// Every field is resent; only `operation` and `enable` change.
    pub fn write_form(&self, setting: RadioSetting) -> Vec<(String, String)> {
        let mut fields = self.fields.clone();
        fields.insert("operation".into(), Value::from("write"));
        fields.insert("enable".into(), Value::from(setting.as_enable()));
        form_pairs(&fields)
    }
}

/// Flatten a JSON object into form pairs.
///
/// Strings go as-is, other scalars in their JSON text form, nested values
/// as JSON text. `null` fields are left out.
fn form_pairs(fields: &Map<String, Value>) -> Vec<(String, String)> {
    fields
        .iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((key.clone(), text))
        })
        .collect()
}
