//! Twitch Notifications host: entry point.
//!
//! The host owns file-system access for the application.  The shell connects
//! over a local WebSocket at startup and asks whether the configuration file
//! exists; the host checks, reads it if it can, and answers with a
//! `FileCheckResult`.
//!
//! # Usage
//!
//! ```text
//! tn-host [OPTIONS]
//!
//! Options:
//!   --bind             <IP>    Listener address [default: 127.0.0.1]
//!   --port             <PORT>  Listener port [default: 24810]
//!   --config-dir       <DIR>   Configuration directory [default: platform dir/<app title>]
//!   --app-title        <NAME>  Application title [default: Twitch Notifications]
//!   --file-name        <NAME>  Configuration file name [default: config.json]
//!   --no-create-dir            Do not create a missing configuration directory
//!   --max-config-bytes <N>     Largest file the host will send [default: 1048576]
//! ```
//!
//! # Environment variable overrides
//!
//! CLI args take precedence when both are present.
//!
//! | Variable        | Default                 |
//! |-----------------|-------------------------|
//! | `TN_HOST_BIND`  | `127.0.0.1`             |
//! | `TN_HOST_PORT`  | `24810`                 |
//! | `TN_CONFIG_DIR` | platform dir            |
//! | `TN_APP_TITLE`  | `Twitch Notifications`  |
//! | `TN_CONFIG_FILE`| `config.json`           |

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tn_host::domain::config::{
    DEFAULT_APP_TITLE, DEFAULT_FILE_NAME, DEFAULT_MAX_CONFIG_BYTES, DEFAULT_PORT,
};
use tn_host::domain::HostConfig;
use tn_host::infrastructure::run_server;
use tn_host::infrastructure::storage::app_config_dir;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Twitch Notifications host process.
///
/// Serves configuration checks to the shell over a local WebSocket.
#[derive(Debug, Parser)]
#[command(
    name = "tn-host",
    about = "File-system host for the Twitch Notifications shell",
    version
)]
struct Cli {
    /// IP address to bind the boundary listener to.
    ///
    /// Keep this on loopback unless the shell runs on another machine.
    #[arg(long, default_value = "127.0.0.1", env = "TN_HOST_BIND")]
    bind: String,

    /// TCP port of the boundary listener.
    #[arg(long, default_value_t = DEFAULT_PORT, env = "TN_HOST_PORT")]
    port: u16,

    /// Configuration directory.  Overrides the platform location.
    #[arg(long, env = "TN_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Application title, used as the subdirectory of the platform
    /// configuration directory.
    #[arg(long, default_value = DEFAULT_APP_TITLE, env = "TN_APP_TITLE")]
    app_title: String,

    /// Configuration file name inside the directory.
    #[arg(long, default_value = DEFAULT_FILE_NAME, env = "TN_CONFIG_FILE")]
    file_name: String,

    /// Leave a missing configuration directory alone instead of creating it.
    #[arg(long)]
    no_create_dir: bool,

    /// Files larger than this many bytes are reported as too large.
    #[arg(long, default_value_t = DEFAULT_MAX_CONFIG_BYTES)]
    max_config_bytes: u64,
}

impl Cli {
    /// Converts the parsed CLI arguments into a validated [`HostConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if `--bind` is not an IP address, the platform
    /// configuration directory cannot be determined (and `--config-dir` is
    /// not given), or the resulting configuration is invalid.
    fn into_host_config(self) -> anyhow::Result<HostConfig> {
        let ip: IpAddr = self
            .bind
            .parse()
            .with_context(|| format!("invalid bind address: '{}'", self.bind))?;
        let bind_addr = SocketAddr::new(ip, self.port);

        let config_dir = match self.config_dir {
            Some(dir) => dir,
            None => app_config_dir(&self.app_title)
                .context("cannot locate the configuration directory; pass --config-dir")?,
        };

        let config = HostConfig {
            bind_addr,
            config_dir,
            file_name: self.file_name,
            create_missing_dir: !self.no_create_dir,
            max_config_bytes: self.max_config_bytes,
        };
        config.validate()?;
        Ok(config)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_host_config()?;

    info!(
        "Twitch Notifications host starting: bind={}, config={}",
        config.bind_addr,
        config.config_file_path().display()
    );

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C; shutting down");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C signal: {e}");
            }
        }
    });

    run_server(config, running).await?;

    info!("Twitch Notifications host stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
