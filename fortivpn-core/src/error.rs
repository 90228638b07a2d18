//! Error types for the fortivpn CLI tool
//!
//! This module defines all error types used throughout the application,
//! providing consistent error handling and user-friendly error messages.

use thiserror::Error;

/// Main error type for the fortivpn application
#[derive(Error, Debug)]
pub enum FortiError {
    /// Errors raised while talking to the bridge script
    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),

    /// Errors raised while resolving a connection name
    #[error("Connection error: {0}")]
    Resolve(#[from] ResolveError),

    /// Errors raised while launching the FortiClient app
    #[error("Launch error: {0}")]
    Launch(#[from] LaunchError),

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Bridge invocation and response errors
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("could not find fortivpn-bridge.js; set FORTIVPN_BRIDGE or place it next to the executable")]
    ScriptNotFound,

    #[error("node executable not found: {reason}")]
    NodeUnavailable { reason: String },

    #[error("{reason}")]
    Transport { reason: String },

    #[error("invalid bridge response: {output}")]
    InvalidResponse { output: String },

    #[error("{message}")]
    Call { message: String },

    #[error("failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        source: serde_json::Error,
    },
}

/// Connection name resolution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no FortiClient VPN connections found")]
    EmptyCatalog,

    #[error("connection {query:?} not found; available: {}", .available.join(", "))]
    NotFound {
        query: String,
        available: Vec<String>,
    },

    #[error("connection {query:?} is ambiguous; matches: {}", .matches.join(", "))]
    Ambiguous { query: String, matches: Vec<String> },
}

/// FortiClient app launch errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LaunchError {
    #[error("failed to start {app} app: {reason}")]
    SpawnFailed { app: String, reason: String },

    #[error("{app} app did not start within {seconds}s")]
    Timeout { app: String, seconds: u64 },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, FortiError>;
