//! Operand parsing
//!
//! Operands come from free text typed into an input field. Parsing is
//! best-effort and never fails: text with no usable digits becomes
//! [`Operand::NaN`], which is still sent to the bridge (as JSON `null`).

use serde::{Serialize, Serializer};
use std::fmt;

/// A parsed calculator operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// A signed 64-bit integer (D-Bus type `x`)
    Int(i64),
    /// The text held no parseable integer
    NaN,
}

impl Operand {
    /// Parses `text` the way a browser's `parseInt` without a radix does.
    ///
    /// Leading whitespace is skipped, one `+`/`-` sign is accepted, a `0x`
    /// prefix switches to base 16, and the longest run of digits is used.
    /// Anything after the digits is ignored. No digits, or digits that do not
    /// fit in an `i64`, give [`Operand::NaN`].
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let rest = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');

        let (negative, rest) = match rest.as_bytes().first() {
            Some(b'-') => (true, &rest[1..]),
            Some(b'+') => (false, &rest[1..]),
            _ => (false, rest),
        };

        let (radix, digits) = match rest.get(..2) {
            Some("0x" | "0X") => (16, &rest[2..]),
            _ => (10, rest),
        };

        let mut value: i64 = 0;
        let mut seen = 0usize;
        for c in digits.chars() {
            let Some(d) = c.to_digit(radix) else { break };
            let step = value.checked_mul(i64::from(radix));
            // Accumulate towards the sign so i64::MIN stays representable
            let next = if negative {
                step.and_then(|v| v.checked_sub(i64::from(d)))
            } else {
                step.and_then(|v| v.checked_add(i64::from(d)))
            };
            match next {
                Some(v) => value = v,
                None => return Self::NaN,
            }
            seen += 1;
        }

        if seen == 0 {
            Self::NaN
        } else {
            Self::Int(value)
        }
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::NaN => write!(f, "NaN"),
        }
    }
}

impl Serialize for Operand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(v) => serializer.serialize_i64(*v),
            // JSON has no NaN; JSON.stringify writes null for it
            Self::NaN => serializer.serialize_none(),
        }
    }
}
