//! Data model for connections, tunnel state and status reports
//!
//! These types mirror the JSON contract of the bridge script. Field names
//! follow the bridge payloads, so everything derives serde with renames
//! where the Rust name differs.

use serde::{Deserialize, Serialize};

/// Tunnel flavor reported by FortiClient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionKind {
    Ssl,
    Ipsec,
}

impl ConnectionKind {
    /// Wire representation used in bridge payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionKind::Ssl => "ssl",
            ConnectionKind::Ipsec => "ipsec",
        }
    }
}

impl std::fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One configured VPN profile from the FortiClient catalog
///
/// Read-only snapshot fetched fresh on each command invocation. Names are
/// unique within a snapshot and compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    #[serde(rename = "connection_name")]
    pub name: String,

    #[serde(rename = "type")]
    pub kind: ConnectionKind,

    #[serde(rename = "default", default)]
    pub is_default: bool,
}

/// Raw tunnel state as reported by the bridge at one instant
///
/// All fields are defaulted so a partial or `null` bridge result decodes to
/// a disconnected state instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TunnelState {
    #[serde(default)]
    pub ipsec_state: i64,

    #[serde(default)]
    pub ssl_state: i64,

    #[serde(default)]
    pub connection_name: String,

    #[serde(default)]
    pub saml_vpn_name: String,
}

impl TunnelState {
    /// Whether any tunnel (SSL or IPsec) is up
    pub fn is_connected(&self) -> bool {
        self.ssl_state != 0 || self.ipsec_state != 0
    }

    /// Name of the active connection, preferring the regular name over the
    /// SAML fallback. Empty when disconnected or not yet reported.
    pub fn current_connection(&self) -> &str {
        let name = self.connection_name.trim();
        if !name.is_empty() {
            return name;
        }
        self.saml_vpn_name.trim()
    }

    /// Kind of the active tunnel
    pub fn kind(&self) -> ConnectionKind {
        if self.ipsec_state != 0 {
            ConnectionKind::Ipsec
        } else {
            ConnectionKind::Ssl
        }
    }
}

/// Human-readable label for a connectivity flag
pub fn connected_label(connected: bool) -> &'static str {
    if connected {
        "Connected"
    } else {
        "Disconnected"
    }
}

/// Replacement for an empty connection name in human-readable output
pub fn display_connection(name: &str) -> &str {
    if name.trim().is_empty() {
        "<none>"
    } else {
        name
    }
}

/// Completed observation of the tunnel relative to an optional selection
///
/// This is a pure projection of a [`TunnelState`]: when a connection was
/// selected, `connected` additionally requires the active name to match it.
/// Unlike the transient tolerance inside polling, an empty active name never
/// satisfies a selection here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub state: String,
    pub connected: bool,
    pub current_connection: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_connection: Option<String>,
    pub checked_at: i64,
}

impl Status {
    /// Build a status report from an observed state
    pub fn from_state(state: &TunnelState, selected: Option<&str>) -> Self {
        let mut connected = state.is_connected();
        if let Some(selected) = selected {
            connected = connected
                && state
                    .current_connection()
                    .eq_ignore_ascii_case(selected);
        }
        Self {
            state: connected_label(connected).to_string(),
            connected,
            current_connection: state.current_connection().to_string(),
            selected_connection: selected.map(str::to_string),
            checked_at: chrono::Utc::now().timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connected_when_either_flag_set() {
        let ssl = TunnelState {
            ssl_state: 1,
            ..Default::default()
        };
        let ipsec = TunnelState {
            ipsec_state: 2,
            ..Default::default()
        };
        assert!(ssl.is_connected());
        assert!(ipsec.is_connected());
        assert!(!TunnelState::default().is_connected());
    }

    #[test]
    fn test_current_connection_falls_back_to_saml_name() {
        let state = TunnelState {
            ssl_state: 1,
            connection_name: "  ".to_string(),
            saml_vpn_name: "Production VPN".to_string(),
            ..Default::default()
        };
        assert_eq!(state.current_connection(), "Production VPN");
    }

    #[test]
    fn test_kind_prefers_ipsec() {
        let state = TunnelState {
            ipsec_state: 1,
            ssl_state: 1,
            ..Default::default()
        };
        assert_eq!(state.kind(), ConnectionKind::Ipsec);
        let state = TunnelState {
            ssl_state: 1,
            ..Default::default()
        };
        assert_eq!(state.kind(), ConnectionKind::Ssl);
    }

    #[test]
    fn test_display_connection() {
        assert_eq!(display_connection(""), "<none>");
        assert_eq!(display_connection("   "), "<none>");
        assert_eq!(display_connection("prod"), "prod");
    }
}
