//! Log subscriber for the CLI
//!
//! Logs go to stderr so stdout carries only results. `RUST_LOG` takes
//! precedence over the verbosity flags.

use crate::config::{LogFormat, Verbosity};
use tracing_subscriber::EnvFilter;

/// Filter directives for a verbosity level
#[must_use]
pub fn directives(verbosity: Verbosity) -> String {
    let level = verbosity.level();
    format!("warn,dbus_calc={level},dbus_calc_cli={level}")
}

/// Installs the global subscriber; a second call is a no-op
pub fn init(verbosity: Verbosity, format: LogFormat, ansi: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(verbosity)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity == Verbosity::Debug);

    let installed = match format {
        LogFormat::Text => builder.with_ansi(ansi).try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if installed.is_err() {
        tracing::debug!("log subscriber already installed");
    }
}
