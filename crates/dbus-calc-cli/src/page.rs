//! Terminal page: operand fields come from the command line, the result
//! field and navigations are written to an output stream.

use crate::error::{CliError, CliResult};
use dbus_calc::config::ClientConfig;
use dbus_calc::page::Page;
use std::collections::HashMap;
use std::io::Write;

/// A [`Page`] backed by arguments and an output stream
#[derive(Debug)]
pub struct TerminalPage<W: Write> {
    fields: HashMap<String, String>,
    result_field: String,
    location: Option<String>,
    out: W,
    write_error: Option<std::io::Error>,
}

impl<W: Write> TerminalPage<W> {
    /// Page with the configured operand fields holding `a` and `b` and an
    /// empty result field
    pub fn new(config: &ClientConfig, a: &str, b: &str, out: W) -> Self {
        let [lhs, rhs] = &config.operand_fields;
        let mut fields = HashMap::new();
        fields.insert(lhs.clone(), a.to_string());
        fields.insert(rhs.clone(), b.to_string());
        fields.insert(config.result_field.clone(), String::new());
        Self {
            fields,
            result_field: config.result_field.clone(),
            location: None,
            out,
            write_error: None,
        }
    }

    /// Location the page was sent to, if any
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Consumes the page, returning the output stream.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Output`] if any line failed to reach the stream.
    pub fn into_inner(self) -> CliResult<W> {
        match self.write_error {
            Some(e) => Err(CliError::output(e.to_string())),
            None => Ok(self.out),
        }
    }

    /// Writes one line; after the first failure nothing more is written
    fn emit(&mut self, line: &str) {
        if self.write_error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            tracing::warn!(error = %e, "failed to write to output");
            self.write_error = Some(e);
        }
    }
}

impl<W: Write> Page for TerminalPage<W> {
    fn field_value(&self, id: &str) -> Option<String> {
        self.fields.get(id).cloned()
    }

    fn set_field_value(&mut self, id: &str, value: &str) {
        let Some(slot) = self.fields.get_mut(id) else {
            return;
        };
        value.clone_into(slot);
        if id == self.result_field {
            self.emit(value);
        }
    }

    fn replace_location(&mut self, location: &str) {
        self.location = Some(location.to_string());
        self.emit(&format!("redirected to {location}"));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use dbus_calc::page::ids;

    /// Writer whose every write fails
    #[derive(Debug)]
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn page() -> TerminalPage<Vec<u8>> {
        TerminalPage::new(&ClientConfig::default(), "3", "4", Vec::new())
    }

    #[test]
    fn test_operands_are_readable() {
        let page = page();
        assert_eq!(page.field_value(ids::NUMBER1).as_deref(), Some("3"));
        assert_eq!(page.field_value(ids::NUMBER2).as_deref(), Some("4"));
        assert_eq!(page.field_value(ids::RESULT).as_deref(), Some(""));
        assert_eq!(page.field_value("missing"), None);
    }

    #[test]
    fn test_result_is_printed() {
        let mut page = page();
        page.set_field_value(ids::RESULT, "12");
        assert_eq!(page.field_value(ids::RESULT).as_deref(), Some("12"));
        assert_eq!(String::from_utf8(page.into_inner().unwrap()).unwrap(), "12\n");
    }

    #[test]
    fn test_operand_writes_are_silent() {
        let mut page = page();
        page.set_field_value(ids::NUMBER1, "9");
        page.set_field_value("missing", "1");
        assert_eq!(page.field_value(ids::NUMBER1).as_deref(), Some("9"));
        assert_eq!(page.field_value("missing"), None);
        assert!(page.into_inner().unwrap().is_empty());
    }

    #[test]
    fn test_navigation_is_printed() {
        let mut page = page();
        page.replace_location("/index.html");
        assert_eq!(page.location(), Some("/index.html"));
        assert_eq!(
            String::from_utf8(page.into_inner().unwrap()).unwrap(),
            "redirected to /index.html\n"
        );
    }

    #[test]
    fn test_custom_field_ids() {
        let mut config = ClientConfig::default();
        config.operand_fields = ["x".to_string(), "y".to_string()];
        config.result_field = "out".to_string();
        let mut page = TerminalPage::new(&config, "5", "6", Vec::new());
        assert_eq!(page.field_value("y").as_deref(), Some("6"));
        page.set_field_value("out", "30");
        assert_eq!(String::from_utf8(page.into_inner().unwrap()).unwrap(), "30\n");
    }

    #[test]
    fn test_write_failure_is_an_output_error() {
        let mut page = TerminalPage::new(&ClientConfig::default(), "3", "4", ClosedPipe);
        page.set_field_value(ids::RESULT, "12");
        assert_eq!(page.field_value(ids::RESULT).as_deref(), Some("12"));
        let err = page.into_inner().unwrap_err();
        assert!(matches!(err, CliError::Output { .. }));
        assert!(err.to_string().contains("Output"));
    }
}
