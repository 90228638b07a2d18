//! FortiClient app lifecycle
//!
//! The bridge script can only talk to FortiClient while the app is running,
//! so `connect` makes sure it is up first. The OS interaction sits behind
//! the [`VpnApp`] trait; reconciliation tests substitute an in-memory
//! implementation instead of shelling out to pgrep.

use std::time::Duration;

use tokio::process::Command;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::error::LaunchError;

/// Name of the macOS application bundle
pub const APP_NAME: &str = "FortiClient";

/// How often `ensure_running` re-checks during the launch grace window
const LAUNCH_PROBE_INTERVAL: Duration = Duration::from_millis(500);

/// Capability for checking and starting the VPN client app
#[allow(async_fn_in_trait)]
pub trait VpnApp {
    /// Whether the app process is currently running
    async fn is_running(&self) -> bool;

    /// Start the app without waiting for it to come up
    async fn launch(&self) -> Result<(), LaunchError>;
}

/// The real FortiClient app, probed with pgrep and started with open
pub struct FortiClientApp;

impl VpnApp for FortiClientApp {
    async fn is_running(&self) -> bool {
        Command::new("pgrep")
            .args(["-x", APP_NAME])
            .output()
            .await
            .map(|out| out.status.success())
            .unwrap_or(false)
    }

    async fn launch(&self) -> Result<(), LaunchError> {
        let status = Command::new("open")
            .args(["-a", APP_NAME])
            .status()
            .await
            .map_err(|e| LaunchError::SpawnFailed {
                app: APP_NAME.to_string(),
                reason: e.to_string(),
            })?;
        if !status.success() {
            return Err(LaunchError::SpawnFailed {
                app: APP_NAME.to_string(),
                reason: format!("open exited with {}", status),
            });
        }
        Ok(())
    }
}

/// Make sure the app is running, launching it if needed
///
/// After a launch the app is polled every 500ms until the grace window
/// expires; expiry fails with [`LaunchError::Timeout`]. This is the only
/// place in the tool that retries anything other than state polling.
pub async fn ensure_running<A: VpnApp>(app: &A, grace: Duration) -> Result<(), LaunchError> {
    if app.is_running().await {
        debug!(app = APP_NAME, "app already running");
        return Ok(());
    }

    info!(app = APP_NAME, "starting app");
    app.launch().await?;

    let deadline = Instant::now() + grace;
    while Instant::now() < deadline {
        if app.is_running().await {
            return Ok(());
        }
        sleep(LAUNCH_PROBE_INTERVAL).await;
    }

    Err(LaunchError::Timeout {
        app: APP_NAME.to_string(),
        seconds: grace.as_secs(),
    })
}
