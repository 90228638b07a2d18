//! Watch loop
//!
//! Long-running auto-heal supervisor for one target connection. Each tick
//! observes the tunnel, logs state transitions edge-triggered, and triggers
//! a reconnect whenever the tunnel is down or connected elsewhere. A failed
//! reconnect is logged and retried on a later tick; the loop only ends when
//! the shutdown channel fires or an observation at the top of a tick fails.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::bridge::{tunnel_payload, Bridge, BridgeAction};
use crate::error::FortiError;
use crate::reconcile::{self, PollOptions};
use crate::state;
use crate::types::{display_connection, Connection, Status};

/// Tick interval and reconnect deadline for a watch loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    /// Pause between ticks
    pub interval: Duration,
    /// Convergence timeout for each reconnect attempt
    pub reconnect_timeout: Duration,
}

/// Watch `target` and keep it connected until shutdown is signalled
pub async fn run<B: Bridge>(
    bridge: &B,
    target: &Connection,
    opts: &WatchOptions,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), FortiError> {
    let poll_opts = PollOptions::new(opts.reconnect_timeout, opts.interval);
    info!(
        connection = %target.name,
        interval_secs = opts.interval.as_secs_f64(),
        reconnect_timeout_secs = opts.reconnect_timeout.as_secs_f64(),
        "watching connection"
    );

    let mut last_label = String::new();
    loop {
        if *shutdown.borrow() {
            info!("watch shutting down");
            return Ok(());
        }

        let observed = state::observe(bridge).await?;
        let status = Status::from_state(&observed, Some(&target.name));
        let label = format!(
            "{} ({})",
            status.state,
            display_connection(&status.current_connection)
        );
        if label != last_label {
            info!(
                state = %status.state,
                connection = display_connection(&status.current_connection),
                "tunnel state"
            );
            last_label = label;
        }

        let needs_reconnect = !observed.is_connected()
            || !observed
                .current_connection()
                .eq_ignore_ascii_case(&target.name);
        if needs_reconnect {
            info!(connection = %target.name, "reconnecting");
            let started = bridge
                .invoke(
                    BridgeAction::Connect,
                    Some(tunnel_payload(&target.name, target.kind)),
                )
                .await;
            match started {
                Err(e) => warn!(error = %e, "reconnect start failed"),
                Ok(_) => {
                    match reconcile::wait_for_state(bridge, Some(&target.name), true, &poll_opts)
                        .await
                    {
                        Err(e) => warn!(error = %e, "reconnect failed"),
                        Ok(outcome) => {
                            info!(
                                connected = outcome.is_connected(),
                                connection = display_connection(outcome.current_connection()),
                                "reconnect finished"
                            );
                            // Force the next tick to log the fresh state.
                            last_label.clear();
                        }
                    }
                }
            }
        }

        tokio::select! {
            _ = sleep(opts.interval) => {}
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    info!("watch shutting down");
                    return Ok(());
                }
            }
        }
    }
}
