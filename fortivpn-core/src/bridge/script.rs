//! Subprocess bridge client
//!
//! Runs the bridge script through node, one blocking invocation per call,
//! and parses the response envelope from the combined output.

use std::path::PathBuf;

use serde_json::Value;
use tokio::process::Command;
use tracing::debug;

use crate::bridge::{decode_envelope, Bridge, BridgeAction, BRIDGE_ENV, BRIDGE_SCRIPT_NAME};
use crate::error::BridgeError;

/// Bridge implementation backed by the `fortivpn-bridge.js` script
pub struct ScriptBridge {
    node: PathBuf,
    script: PathBuf,
}

impl ScriptBridge {
    /// Locate the bridge script and the node executable
    pub fn new() -> Result<Self, BridgeError> {
        let node = which::which("node").map_err(|e| BridgeError::NodeUnavailable {
            reason: e.to_string(),
        })?;
        let script = find_bridge_script()?;
        Ok(Self { node, script })
    }
}

impl Bridge for ScriptBridge {
    async fn invoke(
        &self,
        action: BridgeAction,
        payload: Option<Value>,
    ) -> Result<Value, BridgeError> {
        let mut cmd = Command::new(&self.node);
        cmd.arg(&self.script).arg(action.as_str());
        if let Some(payload) = &payload {
            cmd.arg(payload.to_string());
        }

        debug!(action = %action, "invoking bridge script");
        let output = cmd.output().await.map_err(|e| BridgeError::Transport {
            reason: format!("failed to run bridge script: {}", e),
        })?;

        // The script logs and its envelope can share a stream, so keep both
        // halves for envelope scanning and for error reporting.
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            let reason = match combined.trim() {
                "" => format!("bridge script exited with {}", output.status),
                msg => msg.to_string(),
            };
            return Err(BridgeError::Transport { reason });
        }

        decode_envelope(&combined)?.into_result()
    }
}

/// Discover the bridge script location
///
/// Checked in order: the `FORTIVPN_BRIDGE` environment variable, the
/// directory of the running executable, the working directory. The first
/// candidate that exists as a regular file wins.
pub fn find_bridge_script() -> Result<PathBuf, BridgeError> {
    let mut candidates = Vec::new();

    if let Ok(from_env) = std::env::var(BRIDGE_ENV) {
        let from_env = from_env.trim();
        if !from_env.is_empty() {
            candidates.push(PathBuf::from(from_env));
        }
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            candidates.push(dir.join(BRIDGE_SCRIPT_NAME));
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(BRIDGE_SCRIPT_NAME));
    }

    for candidate in candidates {
        if candidate.is_file() {
            debug!(path = %candidate.display(), "found bridge script");
            return Ok(candidate);
        }
    }

    Err(BridgeError::ScriptNotFound)
}
