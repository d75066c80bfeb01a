//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use dbus_calc::core::Method;
use std::path::PathBuf;

/// dbus-calc: call the dbus-http Calculator service from the terminal
#[derive(Parser, Debug)]
#[command(name = "dbus-calc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only errors are logged)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Log line format on stderr
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormatArg,

    /// YAML configuration file
    #[arg(long, global = true, env = "DBUS_CALC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the bridge
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Endpoint path, relative to the base URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Location to report when the bridge answers 401
    #[arg(long, global = true)]
    pub login_page: Option<String>,

    /// Request timeout in milliseconds (no timeout when unset)
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Multiply two operands through the bridge
    Multiply(OperandArgs),

    /// Divide two operands through the bridge
    Divide(OperandArgs),

    /// Print the request body without sending it
    Request(RequestArgs),

    /// Print the effective configuration as YAML
    Config,
}

/// Two operands, taken as free text the way the page fields are
#[derive(Args, Debug, Clone)]
pub struct OperandArgs {
    /// First operand
    #[arg(allow_hyphen_values = true)]
    pub a: String,

    /// Second operand
    #[arg(allow_hyphen_values = true)]
    pub b: String,
}

/// Arguments for the request command
#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// Method to call (defaults to the configured method)
    #[arg(short, long)]
    pub method: Option<MethodArg>,

    /// Operands
    #[command(flatten)]
    pub operands: OperandArgs,
}

/// Calculator method argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodArg {
    /// `Multiply`
    Multiply,
    /// `Divide`
    Divide,
}

impl From<MethodArg> for Method {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Multiply => Self::Multiply,
            MethodArg::Divide => Self::Divide,
        }
    }
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Auto-detect
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Log format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormatArg {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}
