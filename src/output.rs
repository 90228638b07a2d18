//! Text and JSON rendering for command results

use colored::Colorize;
use fortivpn_core::types::{display_connection, Connection, Status};

/// Print any serializable value as pretty JSON
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), fortivpn_core::error::FortiError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render a status report as human-readable text
pub fn print_status(status: &Status) {
    let label = if status.connected {
        status.state.green()
    } else {
        status.state.red()
    };
    println!("state: {}", label);
    println!(
        "current connection: {}",
        display_connection(&status.current_connection)
    );
    if let Some(selected) = &status.selected_connection {
        println!("selected connection: {}", selected);
    }
}

/// Render the connection catalog as human-readable text
pub fn print_connections(connections: &[Connection]) {
    for connection in connections {
        let default_marker = if connection.is_default { " (default)" } else { "" };
        println!(
            "{} [type={}]{}",
            connection.name, connection.kind, default_marker
        );
    }
}
