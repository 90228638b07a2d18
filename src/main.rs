//! fortivpn - FortiClient VPN helper CLI
//!
//! A command-line tool for resolving, connecting, disconnecting and
//! watching FortiClient VPN tunnels through the bridge script.

use clap::{Parser, Subcommand};
use fortivpn_core::init_logging;

mod cli;
mod output;

#[derive(Parser)]
#[command(name = "fortivpn")]
#[command(about = "FortiClient VPN helper CLI", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured VPN connections
    #[command(alias = "services")]
    Connections {
        /// Emit JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show current tunnel status
    Status {
        /// VPN connection name, e.g. prod/int
        #[arg(long)]
        connection: Option<String>,
        /// Emit JSON output
        #[arg(long)]
        json: bool,
    },
    /// Connect to a VPN connection and wait for it to come up
    Connect {
        /// VPN connection name, e.g. prod/int
        #[arg(long)]
        connection: Option<String>,
        /// Wait timeout in seconds
        #[arg(long, default_value_t = 20.0)]
        timeout: f64,
        /// Polling interval in seconds
        #[arg(long, default_value_t = 1.0)]
        interval: f64,
        /// Emit JSON output
        #[arg(long)]
        json: bool,
    },
    /// Disconnect the active tunnel and wait for it to go down
    Disconnect {
        /// Wait timeout in seconds
        #[arg(long, default_value_t = 10.0)]
        timeout: f64,
        /// Polling interval in seconds
        #[arg(long, default_value_t = 1.0)]
        interval: f64,
        /// Emit JSON output
        #[arg(long)]
        json: bool,
    },
    /// Watch a connection and reconnect it whenever it drops
    Watch {
        /// VPN connection name, e.g. prod/int
        #[arg(long)]
        connection: Option<String>,
        /// Reconnect wait timeout in seconds
        #[arg(long, default_value_t = 20.0)]
        timeout: f64,
        /// Polling interval in seconds
        #[arg(long, default_value_t = 5.0)]
        interval: f64,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(2);
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Connections { json } => cli::connections::run(json).await,
        Commands::Status { connection, json } => cli::status::run(connection, json).await,
        Commands::Connect {
            connection,
            timeout,
            interval,
            json,
        } => cli::connect::run(connection, timeout, interval, json).await,
        Commands::Disconnect {
            timeout,
            interval,
            json,
        } => cli::disconnect::run(timeout, interval, json).await,
        Commands::Watch {
            connection,
            timeout,
            interval,
        } => cli::watch::run(connection, timeout, interval).await,
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            // Any operational error maps to exit code 3; clap already
            // handles usage errors with exit code 2.
            eprintln!("error: {}", e);
            std::process::exit(3);
        }
    }
}
