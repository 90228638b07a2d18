//! `fortivpn disconnect` - tear the tunnel down and wait for it

use fortivpn_core::bridge::ScriptBridge;
use fortivpn_core::error::FortiError;
use fortivpn_core::reconcile::{self, PollOptions};

use crate::cli::seconds;
use crate::output;

pub async fn run(timeout: f64, interval: f64, json: bool) -> Result<i32, FortiError> {
    let bridge = ScriptBridge::new()?;

    let opts = PollOptions::new(seconds(timeout), seconds(interval));
    let status = reconcile::disconnect(&bridge, &opts).await?;

    if json {
        output::print_json(&status)?;
    } else {
        output::print_status(&status);
    }

    Ok(if status.connected { 2 } else { 0 })
}
