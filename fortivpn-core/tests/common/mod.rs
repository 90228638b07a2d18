//! Shared test doubles for reconciliation tests
//!
//! `ScriptedBridge` plays a canned sequence of tunnel states and records
//! every connect/disconnect action, so engine behavior can be asserted
//! without a bridge script or a FortiClient install.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::Value;

use fortivpn_core::bridge::{Bridge, BridgeAction};
use fortivpn_core::error::BridgeError;
use fortivpn_core::types::{Connection, ConnectionKind, TunnelState};

/// In-memory bridge with a scripted sequence of `get-state` responses
///
/// States are served in order; the last entry repeats forever. An `Err`
/// entry produces a transport error for that observation.
pub struct ScriptedBridge {
    connections: Vec<Connection>,
    states: Mutex<VecDeque<Result<TunnelState, String>>>,
    fail_actions: bool,
    pub actions: Mutex<Vec<(String, Value)>>,
    pub state_reads: Mutex<usize>,
}

impl ScriptedBridge {
    pub fn new(
        connections: Vec<Connection>,
        states: Vec<Result<TunnelState, String>>,
    ) -> Self {
        Self {
            connections,
            states: Mutex::new(states.into()),
            fail_actions: false,
            actions: Mutex::new(Vec::new()),
            state_reads: Mutex::new(0),
        }
    }

    /// Make every connect/disconnect action fail with a transport error
    /// (the attempt is still recorded).
    pub fn failing_actions(mut self) -> Self {
        self.fail_actions = true;
        self
    }

    pub fn action_count(&self) -> usize {
        self.actions.lock().unwrap().len()
    }

    pub fn state_read_count(&self) -> usize {
        *self.state_reads.lock().unwrap()
    }

    fn next_state(&self) -> Result<TunnelState, String> {
        let mut states = self.states.lock().unwrap();
        if states.len() > 1 {
            states.pop_front().unwrap()
        } else {
            states.front().cloned().unwrap_or(Ok(TunnelState::default()))
        }
    }
}

impl Bridge for ScriptedBridge {
    async fn invoke(
        &self,
        action: BridgeAction,
        payload: Option<Value>,
    ) -> Result<Value, BridgeError> {
        match action {
            BridgeAction::ListConnections => {
                Ok(serde_json::to_value(&self.connections).unwrap())
            }
            BridgeAction::GetState => {
                *self.state_reads.lock().unwrap() += 1;
                match self.next_state() {
                    Ok(state) => Ok(serde_json::to_value(state).unwrap()),
                    Err(reason) => Err(BridgeError::Transport { reason }),
                }
            }
            BridgeAction::Connect | BridgeAction::Disconnect => {
                self.actions
                    .lock()
                    .unwrap()
                    .push((action.as_str().to_string(), payload.unwrap_or(Value::Null)));
                if self.fail_actions {
                    return Err(BridgeError::Transport {
                        reason: "action rejected".to_string(),
                    });
                }
                Ok(Value::Null)
            }
        }
    }
}

pub fn connection(name: &str, kind: ConnectionKind) -> Connection {
    Connection {
        name: name.to_string(),
        kind,
        is_default: false,
    }
}

pub fn ssl_connection(name: &str) -> Connection {
    connection(name, ConnectionKind::Ssl)
}

pub fn disconnected() -> TunnelState {
    TunnelState::default()
}

pub fn ssl_connected(name: &str) -> TunnelState {
    TunnelState {
        ssl_state: 1,
        connection_name: name.to_string(),
        ..Default::default()
    }
}

pub fn ipsec_connected(name: &str) -> TunnelState {
    TunnelState {
        ipsec_state: 1,
        connection_name: name.to_string(),
        ..Default::default()
    }
}
