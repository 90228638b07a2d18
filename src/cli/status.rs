//! `fortivpn status` - show the current tunnel status

use fortivpn_core::bridge::ScriptBridge;
use fortivpn_core::error::FortiError;
use fortivpn_core::types::Status;
use fortivpn_core::{catalog, state};

use crate::output;

pub async fn run(connection: Option<String>, json: bool) -> Result<i32, FortiError> {
    let bridge = ScriptBridge::new()?;

    let query = connection.unwrap_or_default();
    let selected = if query.trim().is_empty() {
        None
    } else {
        let connections = catalog::fetch(&bridge).await?;
        let target = catalog::resolve(&query, &connections)?;
        Some(target.name.clone())
    };

    let observed = state::observe(&bridge).await?;
    let status = Status::from_state(&observed, selected.as_deref());

    if json {
        output::print_json(&status)?;
    } else {
        output::print_status(&status);
    }

    Ok(if status.connected { 0 } else { 1 })
}
