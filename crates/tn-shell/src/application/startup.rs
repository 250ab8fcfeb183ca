//! Startup decision logic.
//!
//! ```text
//!                 ┌──────────────┐  exists=false          ┌────────────────┐
//!   start() ───▶  │ Initializing │ ─────────────────────▶ │ NeedsSetup     │
//!   retry() ───▶  │              │  exists, no error      ├────────────────┤
//!                 │              │ ─────────────────────▶ │ ReadyWithConfig│
//!                 │              │  exists, error         ├────────────────┤
//!                 │              │  or transport failure  │ ConfigError    │
//!                 └──────────────┘ ─────────────────────▶ └────────────────┘
//! ```
//!
//! The mapping itself ([`decide`]) is pure.  [`StartupController`] owns the
//! current state, performs the boundary call, and publishes every change on
//! a `watch` channel for read-only observers such as the UI bridge.
//! Nothing is retried automatically; only [`StartupController::retry`]
//! starts another check.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use tn_core::{FileCheckOutcome, FileCheckResult, FileErrorKind, TRANSPORT_ERROR_TAG};

use crate::application::boundary::{BoundaryClient, TransportError};

/// Category of a startup error: one of the host's file error kinds, or a
/// failure of the boundary itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    File(FileErrorKind),
    Transport,
}

impl ErrorType {
    /// Tag shown to the UI (`"permission"`, `"transport"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorType::File(kind) => kind.as_str(),
            ErrorType::Transport => TRANSPORT_ERROR_TAG,
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the UI should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupState {
    /// A check is in flight.
    Initializing,
    /// The configuration was read; proceed with it.
    ReadyWithConfig { content: String },
    /// No configuration yet; show first-run setup.
    NeedsSetup,
    /// The configuration could not be obtained; show the error.
    ConfigError { error: String, error_type: ErrorType },
}

impl StartupState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StartupState::Initializing)
    }
}

/// Maps a host result to the next UI state.
///
/// ```rust
/// use tn_core::FileCheckResult;
/// use tn_shell::application::{decide, StartupState};
///
/// assert_eq!(decide(&FileCheckResult::absent()), StartupState::NeedsSetup);
/// ```
pub fn decide(result: &FileCheckResult) -> StartupState {
    match result.outcome() {
        FileCheckOutcome::Absent => StartupState::NeedsSetup,
        FileCheckOutcome::Loaded(content) => StartupState::ReadyWithConfig {
            content: content.to_string(),
        },
        FileCheckOutcome::Unreadable { kind, message } => StartupState::ConfigError {
            error: message.to_string(),
            error_type: ErrorType::File(kind),
        },
    }
}

/// Like [`decide`], with a failed boundary call mapped to a `transport`
/// error.
pub fn decide_outcome(outcome: Result<FileCheckResult, TransportError>) -> StartupState {
    match outcome {
        Ok(result) => decide(&result),
        Err(e) => StartupState::ConfigError {
            error: e.to_string(),
            error_type: ErrorType::Transport,
        },
    }
}

// ── Controller ────────────────────────────────────────────────────────────────

/// Owns the startup state and drives the boundary call.
///
/// Methods take `&mut self`, so one controller can never run two checks at
/// once.
pub struct StartupController {
    client: Arc<dyn BoundaryClient>,
    state_tx: watch::Sender<StartupState>,
    attempts: u32,
}

impl StartupController {
    pub fn new(client: Arc<dyn BoundaryClient>) -> Self {
        let (state_tx, _) = watch::channel(StartupState::Initializing);
        Self {
            client,
            state_tx,
            attempts: 0,
        }
    }

    /// A receiver that sees every state change.
    pub fn subscribe(&self) -> watch::Receiver<StartupState> {
        self.state_tx.subscribe()
    }

    pub fn state(&self) -> StartupState {
        self.state_tx.borrow().clone()
    }

    /// Number of boundary calls made so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Runs the startup check once.  Later calls return the current state
    /// without contacting the host again; use [`retry`](Self::retry) for
    /// that.
    pub async fn start(&mut self) -> StartupState {
        if self.attempts > 0 {
            return self.state();
        }
        self.run_check().await
    }

    /// User-initiated re-check.  Re-enters `Initializing` and performs a
    /// fresh boundary call.
    pub async fn retry(&mut self) -> StartupState {
        info!("startup check retried by user");
        self.run_check().await
    }

    async fn run_check(&mut self) -> StartupState {
        self.attempts += 1;
        self.state_tx.send_replace(StartupState::Initializing);
        info!("startup check {} started", self.attempts);

        let state = decide_outcome(self.client.check_and_read_config().await);
        match &state {
            StartupState::ReadyWithConfig { content } => {
                info!("configuration loaded ({} bytes)", content.len());
            }
            StartupState::NeedsSetup => info!("no configuration found; setup required"),
            StartupState::ConfigError { error, error_type } => {
                warn!("configuration unavailable ({error_type}): {error}");
            }
            StartupState::Initializing => {}
        }

        self.state_tx.send_replace(state.clone());
        state
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
