//! `fortivpn connect` - connect a tunnel and wait for convergence

use std::time::Duration;

use fortivpn_core::bridge::ScriptBridge;
use fortivpn_core::error::FortiError;
use fortivpn_core::launcher::{self, FortiClientApp};
use fortivpn_core::reconcile::{self, PollOptions};
use fortivpn_core::catalog;

use crate::cli::seconds;
use crate::output;

/// How long to wait for the FortiClient app to come up before connecting
const LAUNCH_GRACE: Duration = Duration::from_secs(5);

pub async fn run(
    connection: Option<String>,
    timeout: f64,
    interval: f64,
    json: bool,
) -> Result<i32, FortiError> {
    launcher::ensure_running(&FortiClientApp, LAUNCH_GRACE).await?;

    let bridge = ScriptBridge::new()?;
    let connections = catalog::fetch(&bridge).await?;
    let target = catalog::resolve(connection.as_deref().unwrap_or(""), &connections)?;

    let opts = PollOptions::new(seconds(timeout), seconds(interval));
    let status = reconcile::connect(&bridge, target, &opts).await?;

    if json {
        output::print_json(&status)?;
    } else {
        output::print_status(&status);
    }

    // Still disconnected (or connected elsewhere) after the timeout is a
    // distinct failure from an operational error.
    Ok(if status.connected { 0 } else { 2 })
}
