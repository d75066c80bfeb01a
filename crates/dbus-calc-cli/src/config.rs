//! CLI configuration
//!
//! Client settings are layered: built-in defaults, then the `--config` YAML
//! file, then individual command-line flags.

use crate::commands::{Cli, LogFormatArg};
use crate::error::CliResult;
use dbus_calc::config::ClientConfig;
use std::path::Path;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - warnings and errors
    #[default]
    Normal,
    /// Verbose - results and redirects are logged
    Verbose,
    /// Debug - request bodies and readiness transitions
    Debug,
}

impl Verbosity {
    /// Maps `-q` and the `-v` count to a level; quiet wins
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// `tracing` level name for this verbosity
    #[must_use]
    pub const fn level(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when stderr is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// JSON lines
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => Self::Text,
            LogFormatArg::Json => Self::Json,
        }
    }
}

/// Flag values that override the client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// `--base-url`
    pub base_url: Option<String>,
    /// `--endpoint`
    pub endpoint: Option<String>,
    /// `--login-page`
    pub login_page: Option<String>,
    /// `--timeout-ms`
    pub timeout_ms: Option<u64>,
}

impl Overrides {
    /// Applies every flag that was given on top of `config`
    #[must_use]
    pub fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(ref base_url) = self.base_url {
            config = config.with_base_url(base_url.as_str());
        }
        if let Some(ref endpoint) = self.endpoint {
            config = config.with_endpoint(endpoint.as_str());
        }
        if let Some(ref login_page) = self.login_page {
            config = config.with_login_page(login_page.as_str());
        }
        if self.timeout_ms.is_some() {
            config = config.with_timeout_ms(self.timeout_ms);
        }
        config
    }
}

/// CLI configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Log output format
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set log format
    #[must_use]
    pub const fn with_log_format(mut self, log_format: LogFormat) -> Self {
        self.log_format = log_format;
        self
    }

    /// Output settings from the command line
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self::new()
            .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
            .with_color(cli.color.into())
            .with_log_format(cli.log_format.into())
    }
}

/// Flag overrides given on the command line
#[must_use]
pub fn overrides_from(cli: &Cli) -> Overrides {
    Overrides {
        base_url: cli.base_url.clone(),
        endpoint: cli.endpoint.clone(),
        login_page: cli.login_page.clone(),
        timeout_ms: cli.timeout_ms,
    }
}

/// Defaults, then the optional file, then the flags; the result is validated
pub fn resolve_client_config(
    file: Option<&Path>,
    overrides: &Overrides,
) -> CliResult<ClientConfig> {
    let base = match file {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration file");
            ClientConfig::load(path)?
        }
        None => ClientConfig::default(),
    };
    let config = overrides.apply(base);
    config.validate()?;
    Ok(config)
}
