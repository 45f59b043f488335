//! Recognizer output normalization.
//!
//! The vision service that reads ticket photos answers with loosely-typed
//! JSON: numbers may arrive as strings, integers or floats, and the JSON
//! itself is often wrapped in markdown fences or prose. This module turns
//! that text into canonical [`Ticket`]s before anything is scored.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::types::{NumberToken, Ticket, TicketRow, VerifyError, VerifyResult};

/// Convert one recognizer value into a canonical token.
///
/// - numbers are truncated to an integer and zero-padded to two digits
///   (`7` → `"07"`, `12.0` → `"12"`, `123` → `"123"`);
/// - strings are trimmed and otherwise passed through (`" 5 "` → `"5"`);
/// - anything else becomes its compact JSON text.
pub fn normalize_token(value: &Value) -> NumberToken {
    match value {
        Value::String(s) => NumberToken::new(s.trim()),
        Value::Number(n) => {
            let whole = n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                .unwrap_or_default();
            NumberToken::new(format!("{whole:02}"))
        }
        other => NumberToken::new(other.to_string()),
    }
}

fn normalize_all(values: &[Value]) -> Vec<NumberToken> {
    values.iter().map(normalize_token).collect()
}

/// Issues are opaque keys: keep digits as written, never pad them.
fn issue_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Raw payload shapes
// ---------------------------------------------------------------------------

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct RawTicket {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    game: String,
    #[serde(default)]
    issue: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    tickets: Vec<RawRow>,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default, deserialize_with = "null_as_default")]
    red: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    blue: Vec<Value>,
    #[serde(default)]
    multiplier: Option<u32>,
    #[serde(default)]
    mode: Option<String>,
}

impl RawTicket {
    fn into_ticket(self) -> Ticket {
        Ticket {
            game: self.game.trim().to_string(),
            issue: issue_text(&self.issue),
            rows: self
                .tickets
                .into_iter()
                .map(|row| TicketRow {
                    red: normalize_all(&row.red),
                    blue: normalize_all(&row.blue),
                    multiplier: row.multiplier.unwrap_or(1),
                    mode: row.mode.unwrap_or_default(),
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Payload decoding
// ---------------------------------------------------------------------------

fn strip_fences(text: &str) -> &str {
    let mut body = text.trim();
    body = body.strip_prefix("```json").unwrap_or(body);
    body = body.strip_prefix("```").unwrap_or(body);
    body = body.strip_suffix("```").unwrap_or(body);
    body.trim()
}

/// Slice from the first `open` to the last `close`, inclusive.
fn enclosed(body: &str, open: char, close: char) -> Option<&str> {
    let start = body.find(open)?;
    let end = body.rfind(close)?;
    (end > start).then(|| &body[start..=end])
}

/// Strip markdown fences and surrounding prose, leaving the JSON body.
///
/// Cuts to the outermost array or object, whichever opens first.
fn extract_json(text: &str) -> &str {
    let body = strip_fences(text);
    let first = body.find(|c: char| c == '[' || c == '{');
    let cut = match first {
        Some(i) if body[i..].starts_with('[') => enclosed(body, '[', ']'),
        Some(_) => enclosed(body, '{', '}'),
        None => None,
    };
    cut.unwrap_or(body)
}

fn parse_tickets(body: &str) -> Result<Vec<RawTicket>, serde_json::Error> {
    serde_json::from_str::<Vec<RawTicket>>(body).or_else(|list_err| {
        serde_json::from_str::<RawTicket>(body)
            .map(|single| vec![single])
            .map_err(|_| list_err)
    })
}

/// Decode recognizer output into normalized tickets.
///
/// Accepts a JSON array of tickets or a single ticket object, optionally
/// fenced. Missing or null lists decode as empty; missing multipliers
/// default to 1. When the first cut does not parse, the outermost `[...]`
/// is tried before giving up.
pub fn decode_payload(text: &str) -> VerifyResult<Vec<Ticket>> {
    let body = extract_json(text);

    let raws = match parse_tickets(body) {
        Ok(raws) => raws,
        Err(err) => {
            let retry = enclosed(strip_fences(text), '[', ']')
                .filter(|array| *array != body)
                .and_then(|array| parse_tickets(array).ok());
            match retry {
                Some(raws) => raws,
                None => {
                    debug!(body, "Recognizer payload is not ticket JSON");
                    return Err(VerifyError::Payload(err.to_string()));
                }
            }
        }
    };

    let tickets: Vec<Ticket> = raws.into_iter().map(RawTicket::into_ticket).collect();
    debug!(count = tickets.len(), "Decoded recognizer payload");
    Ok(tickets)
}
