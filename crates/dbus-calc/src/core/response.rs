//! Bridge replies: method-call results and error bodies

use super::{CalcError, CalcResult};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

/// Key holding the first return value of a method call
pub const RESULT_FIELD: &str = "arg0";

/// Decoded method-call reply
///
/// The bridge names return values `arg0`, `arg1`, ... in signature order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalculatorResponse {
    fields: Map<String, Value>,
}

impl CalculatorResponse {
    /// Parses a reply body; anything but a JSON object is malformed
    pub fn parse(body: &str) -> CalcResult<Self> {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(fields)) => Ok(Self { fields }),
            Ok(other) => Err(CalcError::MalformedJson(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
            Err(e) => Err(CalcError::MalformedJson(e.to_string())),
        }
    }

    /// Looks up a field
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Looks up a field that must be present
    pub fn field(&self, key: &str) -> CalcResult<&Value> {
        self.get(key)
            .ok_or_else(|| CalcError::MissingField(key.to_string()))
    }

}

/// Turns a 200 reply body into the text written to the result field.
///
/// The body must be a JSON object carrying `arg0`; anything else is an error
/// and nothing should be written.
pub fn render_result(body: &str) -> CalcResult<String> {
    let reply = CalculatorResponse::parse(body)?;
    Ok(display_value(reply.field(RESULT_FIELD)?))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Converts a reply value into the text an input field shows when the value
/// is assigned to it.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                format_float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Formats a float like a browser's number-to-string conversion
fn format_float(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let abs = n.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let s = format!("{n:e}");
        // Rust writes 1e21, browsers write 1e+21
        return match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => s,
        };
    }
    // Shortest round-trip digits, zero padded: 1.2345678901234568e20 is
    // 123456789012345680000, 12.0 is 12
    n.to_string()
}

/// Error body written by the bridge: `{"error": name, "message": text}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BridgeError {
    /// D-Bus error name, or a short bridge-level reason
    pub error: String,
    /// Human readable detail
    #[serde(default)]
    pub message: Option<String>,
}

impl BridgeError {
    /// Decodes an error body, if the bridge wrote one
    #[must_use]
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// What a status code means on this bridge
    #[must_use]
    pub const fn describe_status(status: u16) -> &'static str {
        match status {
            400 => "invalid request, unknown method or bad arguments",
            401 => "authentication required",
            403 => "access denied",
            404 => "service not found on the bus",
            408 => "service did not reply in time",
            500 => "method call failed",
            _ => "unexpected status",
        }
    }
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {message}", self.error),
            None => f.write_str(&self.error),
        }
    }
}
