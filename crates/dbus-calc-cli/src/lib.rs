//! dbus-calc CLI library
//!
//! Command-line front end for the dbus-http Calculator client: a terminal
//! page, layered configuration, and exit codes for each completion.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;
mod page;

pub use commands::{Cli, ColorArg, Commands, LogFormatArg, MethodArg, OperandArgs, RequestArgs};
pub use config::{
    overrides_from, resolve_client_config, CliConfig, ColorChoice, LogFormat, Overrides,
    Verbosity,
};
pub use error::{CliError, CliResult};
pub use output::{Reporter, RunStatus};
pub use page::TerminalPage;
