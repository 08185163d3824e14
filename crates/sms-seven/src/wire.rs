//! Request and response bodies of the seven.io HTTP API.
//!
//! The gateway is loose about JSON types: codes and timestamps arrive either as
//! numbers or as numeric strings, ids as strings or numbers. The helpers below
//! accept both.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub(crate) struct SevenSendRequest<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub text: &'a str,
    /// Ask for the detailed JSON response with one entry per recipient.
    pub json: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SevenSendResponse {
    #[serde(default, deserialize_with = "code")]
    pub success: i64,
    #[serde(default, deserialize_with = "opt_number")]
    pub balance: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub messages: Vec<SevenMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SevenMessage {
    #[serde(default, deserialize_with = "opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub recipient: Option<String>,
    #[serde(default, deserialize_with = "opt_code")]
    pub error: Option<i64>,
    #[serde(default)]
    pub error_text: Option<String>,
    #[serde(default, deserialize_with = "truthy")]
    pub success: bool,
}

/// `data` of an `sms_mo` webhook event. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SevenInbound {
    #[serde(default, deserialize_with = "opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "opt_code")]
    pub time: Option<i64>,
    /// Number or name of whoever sent the message.
    #[serde(default, deserialize_with = "opt_string")]
    pub sender: Option<String>,
    /// Our inbound number the message was sent to.
    #[serde(default, deserialize_with = "opt_string")]
    pub system: Option<String>,
}

fn as_i64(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_string(v: Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Unparseable codes become 0, which no mapping treats as success.
fn code<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    Ok(as_i64(&Value::deserialize(d)?).unwrap_or(0))
}

fn opt_code<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(as_i64(&Value::deserialize(d)?))
}

fn opt_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(as_string(Value::deserialize(d)?))
}

fn truthy<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0" && !s.eq_ignore_ascii_case("false"),
        _ => false,
    })
}
