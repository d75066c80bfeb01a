//! Client configuration

use crate::core::request::DEFAULT_INTERFACE;
use crate::core::{CalcError, CalcResult, CalculatorRequest, Method};
use crate::page::{ids, read_operands, Page, LOGIN_PAGE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Bridge path of the calculator object, relative to the page
pub const DEFAULT_ENDPOINT: &str = "dbus/dbus.http.Calculator/dbus/http/Calculator";

/// Where the bridge listens when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// Calculator client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL the endpoint is resolved against
    pub base_url: String,
    /// Endpoint path: `dbus/<bus name>/<object path>`
    pub endpoint: String,
    /// D-Bus interface named in every request
    pub interface: String,
    /// Method invoked by `trigger`
    pub method: Method,
    /// Ids of the two operand inputs, in argument order
    pub operand_fields: [String; 2],
    /// Id of the output field
    pub result_field: String,
    /// Location used on 401
    pub login_page: String,
    /// Request timeout in milliseconds (none by default)
    pub timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            interface: DEFAULT_INTERFACE.to_string(),
            method: Method::Multiply,
            operand_fields: [ids::NUMBER1.to_string(), ids::NUMBER2.to_string()],
            result_field: ids::RESULT.to_string(),
            login_page: LOGIN_PAGE.to_string(),
            timeout_ms: None,
        }
    }
}

impl ClientConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the endpoint path
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the interface
    #[must_use]
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = interface.into();
        self
    }

    /// Set the method
    #[must_use]
    pub const fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set the login page
    #[must_use]
    pub fn with_login_page(mut self, login_page: impl Into<String>) -> Self {
        self.login_page = login_page.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Parses a YAML document; missing keys take their defaults
    pub fn from_yaml_str(yaml: &str) -> CalcResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a YAML file
    pub fn load(path: impl AsRef<Path>) -> CalcResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Renders the configuration as YAML
    pub fn to_yaml(&self) -> CalcResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Builds the request for `method` from the page's operand fields
    pub fn build_request<P: Page + ?Sized>(&self, method: Method, page: &P) -> CalculatorRequest {
        let [lhs, rhs] = read_operands(page, &self.operand_fields);
        CalculatorRequest::new(self.interface.clone(), method, lhs, rhs)
    }

    /// Checks the values that would otherwise fail at request time
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(CalcError::config(format!(
                "base_url must be an http(s) URL, got `{}`",
                self.base_url
            )));
        }
        if self.endpoint.trim().is_empty() {
            return Err(CalcError::config("endpoint must not be empty"));
        }
        if self.interface.trim().is_empty() {
            return Err(CalcError::config("interface must not be empty"));
        }
        if self.timeout_ms == Some(0) {
            return Err(CalcError::config("timeout_ms must be positive"));
        }
        Ok(())
    }
}
