//! Parsing helpers shared by the venue clients.

use serde::Deserialize;
use serde_json::Value;

use crate::error::FetchError;

/// Deserialize string-encoded numbers to f64.
pub fn string_to_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse::<f64>().map_err(serde::de::Error::custom)
}

/// Like [`string_to_f64`] but maps null or empty strings to 0.0.
pub fn string_or_number_to_f64_default<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    match v {
        Value::Null => Ok(0.0),
        Value::String(s) if s.trim().is_empty() => Ok(0.0),
        Value::String(s) => s.parse::<f64>().map_err(serde::de::Error::custom),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom("invalid number")),
        _ => Err(serde::de::Error::custom("invalid numeric value")),
    }
}

/// Numeric kline column that may arrive as a string or a JSON number.
pub fn column_f64(row: &[Value], idx: usize) -> Result<f64, FetchError> {
    match row.get(idx) {
        Some(Value::String(s)) => s
            .parse::<f64>()
            .map_err(|e| FetchError::malformed(format!("column {}: {}", idx, e))),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| FetchError::malformed(format!("column {}: not an f64", idx))),
        Some(other) => Err(FetchError::malformed(format!(
            "column {}: unexpected value {}",
            idx, other
        ))),
        None => Err(FetchError::malformed(format!("column {} missing", idx))),
    }
}

pub fn column_u64(row: &[Value], idx: usize) -> Result<u64, FetchError> {
    match row.get(idx) {
        Some(Value::String(s)) => s
            .parse::<u64>()
            .map_err(|e| FetchError::malformed(format!("column {}: {}", idx, e))),
        Some(Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| FetchError::malformed(format!("column {}: not a u64", idx))),
        Some(other) => Err(FetchError::malformed(format!(
            "column {}: unexpected value {}",
            idx, other
        ))),
        None => Err(FetchError::malformed(format!("column {} missing", idx))),
    }
}

pub fn compact_error_body(body: &str) -> String {
    let normalized = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.chars().count() > 180 {
        let head: String = normalized.chars().take(180).collect();
        format!("{}...", head)
    } else {
        normalized
    }
}
