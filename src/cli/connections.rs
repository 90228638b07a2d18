//! `fortivpn connections` - list configured VPN connections

use fortivpn_core::bridge::ScriptBridge;
use fortivpn_core::catalog;
use fortivpn_core::error::FortiError;

use crate::output;

pub async fn run(json: bool) -> Result<i32, FortiError> {
    let bridge = ScriptBridge::new()?;
    let connections = catalog::fetch(&bridge).await?;

    if connections.is_empty() {
        println!("No FortiClient VPN connections found.");
        return Ok(1);
    }

    if json {
        output::print_json(&connections)?;
    } else {
        output::print_connections(&connections);
    }
    Ok(0)
}
