//! `fortivpn watch` - keep one connection alive until interrupted

use fortivpn_core::bridge::ScriptBridge;
use fortivpn_core::catalog;
use fortivpn_core::error::FortiError;
use fortivpn_core::watch::{self, WatchOptions};
use tokio::sync::watch as watch_channel;
use tracing::info;

use crate::cli::seconds;

pub async fn run(
    connection: Option<String>,
    timeout: f64,
    interval: f64,
) -> Result<i32, FortiError> {
    let bridge = ScriptBridge::new()?;
    let connections = catalog::fetch(&bridge).await?;
    let target = catalog::resolve(connection.as_deref().unwrap_or(""), &connections)?;

    let opts = WatchOptions {
        interval: seconds(interval),
        reconnect_timeout: seconds(timeout),
    };

    let (shutdown_tx, shutdown_rx) = watch_channel::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, shutting down");
            let _ = shutdown_tx.send(true);
        }
    });

    watch::run(&bridge, target, &opts, shutdown_rx).await?;
    Ok(0)
}
