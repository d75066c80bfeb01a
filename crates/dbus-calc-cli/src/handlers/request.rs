//! Request command handler: shows the wire body without sending it

use crate::commands::RequestArgs;
use dbus_calc::config::ClientConfig;
use dbus_calc::core::{CalculatorRequest, Method};

/// Builds the body a call with these arguments would send
#[must_use]
pub fn render_request(config: &ClientConfig, args: &RequestArgs) -> String {
    let method = args.method.map_or(config.method, Method::from);
    CalculatorRequest::from_text(
        config.interface.as_str(),
        method,
        &args.operands.a,
        &args.operands.b,
    )
    .to_json()
}

/// Execute the request command
pub fn execute_request(config: &ClientConfig, args: &RequestArgs) {
    println!("{}", render_request(config, args));
}
