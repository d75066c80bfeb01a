//! Config command handler

use crate::error::CliResult;
use dbus_calc::config::ClientConfig;

/// Execute the config command
pub fn execute_config(config: &ClientConfig) -> CliResult<()> {
    print!("{}", config.to_yaml()?);
    Ok(())
}
