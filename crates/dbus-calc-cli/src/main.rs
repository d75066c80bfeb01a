//! dbus-calc: call the dbus-http Calculator service
//!
//! ## Usage
//!
//! ```bash
//! dbus-calc multiply 3 4                       # prints 12
//! dbus-calc divide 8 2 --base-url http://bridge:8080/
//! dbus-calc request --method divide 8 2        # prints the JSON body only
//! dbus-calc config --config calc.yaml          # prints the effective config
//! ```
//!
//! Exit codes: 0 rendered or printed, 1 error, 2 redirected to login,
//! 3 reply status ignored.

use clap::Parser;
use dbus_calc::client::CalculatorClient;
use dbus_calc::core::Method;
use dbus_calc_cli::{
    handlers, logging, overrides_from, resolve_client_config, Cli, CliConfig, CliError,
    CliResult, Commands, Reporter, RunStatus,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = CliConfig::from_cli(&cli);
    let use_color = config.color.should_color();
    logging::init(config.verbosity, config.log_format, use_color);

    let reporter = Reporter::new(use_color, config.verbosity.is_quiet());
    match run(&cli, &reporter) {
        Ok(status) => status.into(),
        Err(e) => {
            reporter.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, reporter: &Reporter) -> CliResult<RunStatus> {
    let client_config = resolve_client_config(cli.config.as_deref(), &overrides_from(cli))?;

    match cli.command {
        Commands::Multiply(ref args) => run_call(client_config, Method::Multiply, args, reporter),
        Commands::Divide(ref args) => run_call(client_config, Method::Divide, args, reporter),
        Commands::Request(ref args) => {
            handlers::request::execute_request(&client_config, args);
            Ok(RunStatus::Success)
        }
        Commands::Config => {
            handlers::config::execute_config(&client_config)?;
            Ok(RunStatus::Success)
        }
    }
}

fn run_call(
    client_config: dbus_calc::config::ClientConfig,
    method: Method,
    args: &dbus_calc_cli::OperandArgs,
    reporter: &Reporter,
) -> CliResult<RunStatus> {
    let client = CalculatorClient::connect(client_config)?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create runtime: {e}")))?;

    rt.block_on(async {
        handlers::call::execute_call(&client, method, args, reporter, std::io::stdout()).await
    })
}
