//! Bridge boundary
//!
//! FortiClient itself is driven through an opaque bridge script executed by
//! node. Everything that talks to it goes through the [`Bridge`] trait so
//! the reconciliation logic can be exercised against an in-memory
//! implementation in tests.

pub mod script;

use serde::Deserialize;
use serde_json::Value;

use crate::error::BridgeError;

pub use script::{find_bridge_script, ScriptBridge};

/// File name of the bridge script
pub const BRIDGE_SCRIPT_NAME: &str = "fortivpn-bridge.js";

/// Environment variable overriding the bridge script location
pub const BRIDGE_ENV: &str = "FORTIVPN_BRIDGE";

/// Actions understood by the bridge script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeAction {
    ListConnections,
    GetState,
    Connect,
    Disconnect,
}

impl BridgeAction {
    /// Wire name passed as the first script argument
    pub fn as_str(&self) -> &'static str {
        match self {
            BridgeAction::ListConnections => "list-connections",
            BridgeAction::GetState => "get-state",
            BridgeAction::Connect => "connect",
            BridgeAction::Disconnect => "disconnect",
        }
    }
}

impl std::fmt::Display for BridgeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synchronous capability for driving the external bridge
///
/// One call performs one bridge round trip; implementations never retry.
#[allow(async_fn_in_trait)]
pub trait Bridge {
    /// Invoke a bridge action, returning the `result` field of its envelope
    async fn invoke(
        &self,
        action: BridgeAction,
        payload: Option<Value>,
    ) -> Result<Value, BridgeError>;
}

/// Response envelope emitted by the bridge script
#[derive(Debug, Deserialize)]
pub struct BridgeEnvelope {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl BridgeEnvelope {
    /// Unwrap the envelope into its result payload
    ///
    /// An `ok: false` envelope with a blank error message still fails, with
    /// a generic reason; otherwise the bridge's message is surfaced as-is.
    pub fn into_result(self) -> Result<Value, BridgeError> {
        if !self.ok {
            let message = match self.error {
                Some(error) if !error.trim().is_empty() => error,
                _ => "bridge call failed".to_string(),
            };
            return Err(BridgeError::Call { message });
        }
        Ok(self.result.unwrap_or(Value::Null))
    }
}

/// Decode a bridge envelope from raw process output
///
/// The bridge runs inside a node process that may print unrelated
/// diagnostics on the same stream, so decoding is tolerant: try the whole
/// trimmed output first, then scan lines backward for the last line starting
/// with `{`, then fall back to the substring from the last `{`. Anything
/// else is an [`BridgeError::InvalidResponse`] carrying the raw output.
pub fn decode_envelope(raw: &str) -> Result<BridgeEnvelope, BridgeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BridgeError::InvalidResponse {
            output: "<empty output>".to_string(),
        });
    }

    if let Ok(envelope) = serde_json::from_str::<BridgeEnvelope>(trimmed) {
        return Ok(envelope);
    }

    for line in trimmed.lines().rev() {
        let candidate = line.trim();
        if !candidate.starts_with('{') {
            continue;
        }
        if let Ok(envelope) = serde_json::from_str::<BridgeEnvelope>(candidate) {
            return Ok(envelope);
        }
    }

    if let Some(start) = trimmed.rfind('{') {
        if let Ok(envelope) = serde_json::from_str::<BridgeEnvelope>(&trimmed[start..]) {
            return Ok(envelope);
        }
    }

    Err(BridgeError::InvalidResponse {
        output: trimmed.to_string(),
    })
}

/// Build the payload for a connect/disconnect action
pub fn tunnel_payload(name: &str, kind: crate::types::ConnectionKind) -> Value {
    serde_json::json!({
        "connection_name": name,
        "connection_type": kind.as_str(),
    })
}
