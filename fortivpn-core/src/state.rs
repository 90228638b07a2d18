//! Tunnel state reader
//!
//! One bridge round trip per observation. No caching and no retries here:
//! the reconciliation engine owns poll semantics, so any failure propagates
//! to it immediately.

use crate::bridge::{Bridge, BridgeAction};
use crate::error::{BridgeError, FortiError};
use crate::types::TunnelState;

/// Observe the current tunnel state
///
/// A `null` result decodes to the default (disconnected) state.
pub async fn observe<B: Bridge>(bridge: &B) -> Result<TunnelState, FortiError> {
    let result = bridge.invoke(BridgeAction::GetState, None).await?;
    if result.is_null() {
        return Ok(TunnelState::default());
    }
    let state: TunnelState =
        serde_json::from_value(result).map_err(|source| BridgeError::Decode {
            what: "tunnel state",
            source,
        })?;
    Ok(state)
}
