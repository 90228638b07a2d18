//! Tunnel reconciliation engine
//!
//! Drives the external tunnel from its observed state toward a goal:
//! observe first, act only when the goal is unmet, then poll until the
//! bridge converges or the deadline passes. Actions and observations are
//! strictly sequential; nothing here runs concurrently.

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::bridge::{tunnel_payload, Bridge, BridgeAction};
use crate::error::FortiError;
use crate::state;
use crate::types::{Connection, Status, TunnelState};

/// Timeout and polling interval for one reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Total time to wait for convergence before giving up
    pub timeout: Duration,
    /// Pause between observations; zero is normalized to one second
    pub interval: Duration,
}

impl PollOptions {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }

    fn effective_interval(&self) -> Duration {
        if self.interval.is_zero() {
            Duration::from_secs(1)
        } else {
            self.interval
        }
    }
}

/// Connect the tunnel to `target`, idempotently
///
/// When the tunnel is already connected and the active name equals the
/// target name case-insensitively, this is a pure observation: no action is
/// issued and the current status is returned immediately. Otherwise a single
/// `connect` action is issued (no pre-disconnect, the bridge switches
/// directly) and the state is polled until it converges or the timeout
/// passes. The returned status reflects the final observation relative to
/// the target; non-convergence shows up as `connected: false`, not as an
/// error.
pub async fn connect<B: Bridge>(
    bridge: &B,
    target: &Connection,
    opts: &PollOptions,
) -> Result<Status, FortiError> {
    let current = state::observe(bridge).await?;
    if current.is_connected()
        && current
            .current_connection()
            .eq_ignore_ascii_case(&target.name)
    {
        debug!(connection = %target.name, "already connected, nothing to do");
        return Ok(Status::from_state(&current, Some(&target.name)));
    }

    info!(connection = %target.name, kind = %target.kind, "connecting");
    bridge
        .invoke(
            BridgeAction::Connect,
            Some(tunnel_payload(&target.name, target.kind)),
        )
        .await?;

    let final_state = wait_for_state(bridge, Some(&target.name), true, opts).await?;
    Ok(Status::from_state(&final_state, Some(&target.name)))
}

/// Disconnect the tunnel, idempotently
///
/// Already disconnected is a no-op. Otherwise a `disconnect` action is
/// issued for the currently active connection and the state is polled until
/// it reports disconnected or the timeout passes.
pub async fn disconnect<B: Bridge>(bridge: &B, opts: &PollOptions) -> Result<Status, FortiError> {
    let current = state::observe(bridge).await?;
    if !current.is_connected() {
        debug!("already disconnected, nothing to do");
        return Ok(Status::from_state(&current, None));
    }

    info!(connection = %current.current_connection(), "disconnecting");
    bridge
        .invoke(
            BridgeAction::Disconnect,
            Some(tunnel_payload(current.current_connection(), current.kind())),
        )
        .await?;

    let final_state = wait_for_state(bridge, None, false, opts).await?;
    Ok(Status::from_state(&final_state, None))
}

/// Poll the tunnel state until it converges or the deadline passes
///
/// Convergence while connecting: the state is connected and either no
/// specific connection is expected, the active name matches the expected one
/// case-insensitively, or the active name is still empty. The empty-name
/// clause is deliberate tolerance for bridges that bring the tunnel up
/// before they report its name; dropping it would make convergence flap on
/// such bridges. Convergence while disconnecting: the state is disconnected.
///
/// On convergence the state is returned at once, without a trailing sleep.
/// Past the deadline the last observed state is returned as data; a timeout
/// is never an error here, the caller reads the unmet goal off the returned
/// state. Observation errors abort the poll immediately.
pub async fn wait_for_state<B: Bridge>(
    bridge: &B,
    expected_connection: Option<&str>,
    should_be_connected: bool,
    opts: &PollOptions,
) -> Result<TunnelState, FortiError> {
    let interval = opts.effective_interval();
    let deadline = Instant::now() + opts.timeout;

    loop {
        let observed = state::observe(bridge).await?;

        let converged = if should_be_connected {
            observed.is_connected()
                && match expected_connection {
                    None => true,
                    Some(expected) => {
                        let active = observed.current_connection();
                        active.is_empty() || active.eq_ignore_ascii_case(expected)
                    }
                }
        } else {
            !observed.is_connected()
        };

        if converged {
            debug!(connected = observed.is_connected(), "state converged");
            return Ok(observed);
        }

        if Instant::now() >= deadline {
            debug!("poll deadline passed without convergence");
            return Ok(observed);
        }

        sleep(interval).await;
    }
}
