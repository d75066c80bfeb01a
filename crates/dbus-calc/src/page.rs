//! Page surface - the fields and location the client reads and writes
//!
//! The calculator client never owns its page. Whatever hosts it (a browser
//! document, a terminal, a test double) implements [`Page`] and the same
//! client logic runs against each.
//!
//! # Example
//!
//! ```rust
//! use dbus_calc::prelude::*;
//!
//! let mut page = MockPage::calculator();
//! page.type_into("number1", "6");
//! assert_eq!(page.field_value("number1").as_deref(), Some("6"));
//!
//! page.set_field_value("result", "42");
//! assert_eq!(page.field_value("result").as_deref(), Some("42"));
//! ```

use crate::core::Operand;

/// Element ids used by the calculator page
pub mod ids {
    /// First operand input
    pub const NUMBER1: &str = "number1";
    /// Second operand input
    pub const NUMBER2: &str = "number2";
    /// Result output
    pub const RESULT: &str = "result";
}

/// Login page the client navigates to on 401
pub const LOGIN_PAGE: &str = "/index.html";

/// Abstract page the client interacts with
pub trait Page {
    /// Current value of an input field, `None` if the page has no such field
    fn field_value(&self, id: &str) -> Option<String>;

    /// Overwrites the value of a field; a missing field is left alone
    fn set_field_value(&mut self, id: &str, value: &str);

    /// Replaces the current location, discarding the page state
    fn replace_location(&mut self, location: &str);
}

impl<P: Page + ?Sized> Page for &mut P {
    fn field_value(&self, id: &str) -> Option<String> {
        (**self).field_value(id)
    }

    fn set_field_value(&mut self, id: &str, value: &str) {
        (**self).set_field_value(id, value);
    }

    fn replace_location(&mut self, location: &str) {
        (**self).replace_location(location);
    }
}

/// Reads and parses the two operand fields, in argument order.
///
/// A missing field reads as empty text, which parses to not-a-number.
pub fn read_operands<P: Page + ?Sized>(page: &P, fields: &[String; 2]) -> [Operand; 2] {
    let read = |id: &str| Operand::parse(&page.field_value(id).unwrap_or_default());
    [read(&fields[0]), read(&fields[1])]
}
