//! CLI command implementations
//!
//! This module contains the implementation of all CLI subcommands. Each
//! command returns its process exit code; errors bubble up to main and map
//! to exit code 3.

pub mod connect;
pub mod connections;
pub mod disconnect;
pub mod status;
pub mod watch;

use std::time::Duration;

/// Convert a user-supplied seconds value to a duration
///
/// Non-positive, non-finite and overflowing values all clamp to zero; flag
/// values come straight from the user and must never abort the process.
pub fn seconds(value: f64) -> Duration {
    if value <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}
