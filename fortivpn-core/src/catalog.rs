//! Connection catalog and name resolution
//!
//! Fetches the configured VPN profiles from the bridge and resolves a
//! user-supplied query against them. Resolution is a pure function over one
//! catalog snapshot: exact case-insensitive matches win, then substring and
//! alias candidates, with ambiguity reported rather than guessed away.

use tracing::debug;

use crate::bridge::{Bridge, BridgeAction};
use crate::error::{BridgeError, FortiError, ResolveError};
use crate::types::Connection;

/// Fetch the current connection catalog from the bridge
///
/// A `null` result is treated as an empty catalog.
pub async fn fetch<B: Bridge>(bridge: &B) -> Result<Vec<Connection>, FortiError> {
    let result = bridge.invoke(BridgeAction::ListConnections, None).await?;
    if result.is_null() {
        return Ok(Vec::new());
    }
    let connections: Vec<Connection> =
        serde_json::from_value(result).map_err(|source| BridgeError::Decode {
            what: "connection list",
            source,
        })?;
    debug!(count = connections.len(), "fetched connection catalog");
    Ok(connections)
}

/// Resolve a query against a catalog snapshot
///
/// An empty query selects the first catalog entry in fetch order. Otherwise
/// an exact case-insensitive name match short-circuits, then candidates are
/// collected by substring containment plus the `prod`/`production` and
/// `int`/`integration` aliases. Exactly one candidate resolves; none fails
/// with the available names, several fail with the matching names.
pub fn resolve<'a>(
    query: &str,
    catalog: &'a [Connection],
) -> Result<&'a Connection, ResolveError> {
    if catalog.is_empty() {
        return Err(ResolveError::EmptyCatalog);
    }

    let query = query.trim();
    if query.is_empty() {
        return Ok(&catalog[0]);
    }

    for connection in catalog {
        if connection.name.eq_ignore_ascii_case(query) {
            return Ok(connection);
        }
    }

    let alias = query.to_lowercase();
    let mut candidates: Vec<&Connection> = Vec::new();
    for connection in catalog {
        let name = connection.name.to_lowercase();
        if name.contains(&alias) {
            candidates.push(connection);
            continue;
        }
        if matches!(alias.as_str(), "prod" | "production") && name.contains("production") {
            candidates.push(connection);
            continue;
        }
        if matches!(alias.as_str(), "int" | "integration") && name.contains("integration") {
            candidates.push(connection);
        }
    }

    match candidates.as_slice() {
        [single] => Ok(single),
        [] => Err(ResolveError::NotFound {
            query: query.to_string(),
            available: catalog.iter().map(|c| c.name.clone()).collect(),
        }),
        _ => Err(ResolveError::Ambiguous {
            query: query.to_string(),
            matches: candidates.iter().map(|c| c.name.clone()).collect(),
        }),
    }
}
