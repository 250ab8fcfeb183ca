//! Twitch Notifications shell: entry point.
//!
//! Runs the startup sequence against a running `tn-host`: asks for the
//! configuration file, decides the first UI state, and prints that state as
//! the JSON DTO the UI consumes.  With `--interactive`, it then waits on
//! stdin so a user can retry (`r`) or quit (`q`).
//!
//! # Usage
//!
//! ```text
//! tn-shell [OPTIONS]
//!
//! Options:
//!   --host-addr    <HOST>  Host address [default: 127.0.0.1]
//!   --port         <PORT>  Host port [default: 24810]
//!   --timeout-secs <N>     Bound on one check, connect included [default: 10]
//!   --file-name    <NAME>  Ask the host for a different file in its config dir
//!   --interactive          Offer user-initiated retries on stdin
//! ```
//!
//! `TN_SHELL_HOST`, `TN_HOST_PORT`, `TN_SHELL_TIMEOUT` and `TN_CONFIG_FILE`
//! override the defaults; CLI args win.

use std::net::Ipv6Addr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tn_shell::application::StartupController;
use tn_shell::infrastructure::ui_bridge::{
    retry_startup, start_startup, CommandResult, ShellAppState, StartupStateDto,
};
use tn_shell::infrastructure::{BoundaryConfig, WsBoundaryClient};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Twitch Notifications shell.
#[derive(Debug, Parser)]
#[command(
    name = "tn-shell",
    about = "Startup shell for Twitch Notifications",
    version
)]
struct Cli {
    /// Hostname or IP address of the host process.
    #[arg(long, default_value = "127.0.0.1", env = "TN_SHELL_HOST")]
    host_addr: String,

    /// Port of the host's boundary listener.
    #[arg(long, default_value_t = 24810, env = "TN_HOST_PORT")]
    port: u16,

    /// Seconds to wait for one check before reporting a transport error.
    #[arg(long, default_value_t = 10, env = "TN_SHELL_TIMEOUT")]
    timeout_secs: u64,

    /// Configuration file name to ask for instead of the host's default.
    #[arg(long, env = "TN_CONFIG_FILE")]
    file_name: Option<String>,

    /// Read retry/quit commands from stdin after the first check.
    #[arg(long)]
    interactive: bool,
}

impl Cli {
    /// # Errors
    ///
    /// Returns an error if the timeout is zero.
    fn to_boundary_config(&self) -> anyhow::Result<BoundaryConfig> {
        anyhow::ensure!(self.timeout_secs > 0, "--timeout-secs must be at least 1");
        // IPv6 literals need brackets inside a URL authority.
        let host = match self.host_addr.parse::<Ipv6Addr>() {
            Ok(ip) => format!("[{ip}]"),
            Err(_) => self.host_addr.clone(),
        };
        Ok(BoundaryConfig {
            host_url: format!("ws://{host}:{}", self.port),
            timeout: Duration::from_secs(self.timeout_secs),
            file_name: self.file_name.clone(),
        })
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.to_boundary_config()?;
    info!("Twitch Notifications shell starting: host={}", config.host_url);

    let client = WsBoundaryClient::new(config).context("invalid --file-name")?;
    let app = ShellAppState::new(StartupController::new(Arc::new(client)));

    print_result(&start_startup(Arc::clone(&app)).await)?;

    if cli.interactive {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        eprintln!("[r]etry or [q]uit");
        while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
            match line.trim() {
                "r" | "retry" => print_result(&retry_startup(Arc::clone(&app)).await)?,
                "q" | "quit" => break,
                "" => {}
                other => eprintln!("unknown command '{other}'; [r]etry or [q]uit"),
            }
        }
    }

    info!("Twitch Notifications shell stopped");
    Ok(())
}

/// Writes one command result to stdout as a JSON line.
fn print_result(result: &CommandResult<StartupStateDto>) -> anyhow::Result<()> {
    let json = serde_json::to_string(result).context("failed to serialize startup state")?;
    println!("{json}");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["tn-shell"]);
        assert_eq!(cli.host_addr, "127.0.0.1");
        assert_eq!(cli.port, 24810);
        assert_eq!(cli.timeout_secs, 10);
        assert!(!cli.interactive);
    }

    #[test]
    fn test_boundary_config_from_defaults() {
        // Arrange
        let cli = Cli::parse_from(["tn-shell"]);

        // Act
        let config = cli.to_boundary_config().unwrap();

        // Assert
        assert_eq!(config.host_url, "ws://127.0.0.1:24810");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_boundary_config_overrides() {
        let cli = Cli::parse_from([
            "tn-shell",
            "--host-addr",
            "localhost",
            "--port",
            "9001",
            "--timeout-secs",
            "3",
            "--file-name",
            "alt.json",
        ]);
        let config = cli.to_boundary_config().unwrap();
        assert_eq!(config.host_url, "ws://localhost:9001");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.file_name.as_deref(), Some("alt.json"));
    }

    #[test]
    fn test_ipv6_host_is_bracketed_in_url() {
        // Arrange
        let cli = Cli::parse_from(["tn-shell", "--host-addr", "::1"]);

        // Act
        let config = cli.to_boundary_config().unwrap();

        // Assert
        assert_eq!(config.host_url, "ws://[::1]:24810");
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let cli = Cli::parse_from(["tn-shell", "--timeout-secs", "0"]);
        assert!(cli.to_boundary_config().is_err());
    }
}
