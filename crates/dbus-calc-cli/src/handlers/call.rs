//! Multiply and divide command handlers

use crate::commands::OperandArgs;
use crate::error::CliResult;
use crate::output::{Reporter, RunStatus};
use crate::page::TerminalPage;
use dbus_calc::client::CalculatorClient;
use dbus_calc::core::{Method, Outcome};
use dbus_calc::transport::Transport;
use std::io::Write;

/// One trigger-and-display round against the bridge.
///
/// The result goes to `out`; notes about redirects and ignored replies go
/// to the reporter. A failed write to `out` is an output error.
pub async fn execute_call<T, W>(
    client: &CalculatorClient<T>,
    method: Method,
    args: &OperandArgs,
    reporter: &Reporter,
    out: W,
) -> CliResult<RunStatus>
where
    T: Transport,
    W: Write,
{
    let mut page = TerminalPage::new(client.config(), &args.a, &args.b, out);

    let request = client.prepare(method, &page);
    let response = client.send(&request).await?;
    let outcome = client.complete(&response, &mut page)?;
    page.into_inner()?;

    match outcome {
        Outcome::Rendered { .. } => {}
        Outcome::Redirected { ref location } => reporter.redirected(location),
        Outcome::Ignored { status } => reporter.ignored(status, Some(&response.body)),
    }
    Ok(RunStatus::from(&outcome))
}
