//! Method-call request sent to the bridge

use super::operand::Operand;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default D-Bus interface of the calculator service
pub const DEFAULT_INTERFACE: &str = "dbus.http.Calculator";

/// Methods exposed by the calculator service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Method {
    /// `Multiply(x, x) -> x`
    #[default]
    Multiply,
    /// `Divide(x, x) -> x`, fails with `dbus.http.DivisionByZero`
    Divide,
}

impl Method {
    /// D-Bus member name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Multiply => "Multiply",
            Self::Divide => "Divide",
        }
    }

    /// Get all methods
    #[must_use]
    pub fn all() -> Vec<Self> {
        vec![Self::Multiply, Self::Divide]
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown calculator method: {s}"))
    }
}

/// JSON body of a method call
///
/// Field order is part of the wire format:
/// `{"interface": ..., "method": ..., "arguments": [a, b]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculatorRequest {
    /// D-Bus interface name
    pub interface: String,
    /// D-Bus member name
    pub method: String,
    /// Exactly two operands, in input-field order
    pub arguments: [Operand; 2],
}

impl CalculatorRequest {
    /// Creates a request for `method` on `interface`
    #[must_use]
    pub fn new(interface: impl Into<String>, method: Method, lhs: Operand, rhs: Operand) -> Self {
        Self {
            interface: interface.into(),
            method: method.as_str().to_string(),
            arguments: [lhs, rhs],
        }
    }

    /// Creates a `Multiply` request on the default interface
    #[must_use]
    pub fn multiply(lhs: Operand, rhs: Operand) -> Self {
        Self::new(DEFAULT_INTERFACE, Method::Multiply, lhs, rhs)
    }

    /// Builds a request straight from the text of the two input fields
    #[must_use]
    pub fn from_text(interface: impl Into<String>, method: Method, lhs: &str, rhs: &str) -> Self {
        Self::new(interface, method, Operand::parse(lhs), Operand::parse(rhs))
    }

    /// Serializes the request body
    #[must_use]
    pub fn to_json(&self) -> String {
        // A struct of strings and integers/nulls always serializes
        serde_json::to_string(self).unwrap_or_default()
    }
}
