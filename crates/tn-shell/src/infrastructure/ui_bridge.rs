//! UI command bridge: exposes the startup state to the presentation layer.
//!
//! Every command returns a [`CommandResult`] with the same shape,
//! `{ success, data, error }`, so the UI can always read `success` first.
//! State is handed out as a [`StartupStateDto`]:
//!
//! ```json
//! {"mode":"configError","error":"permission denied","errorType":"permission"}
//! ```
//!
//! Reads never wait for a running check: they come from a `watch` receiver,
//! not from the controller.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex};

use crate::application::startup::{StartupController, StartupState};

/// Reason returned when a retry arrives while a check is running.
pub const CHECK_IN_PROGRESS: &str = "startup check already in progress";

// ── Shared application state ──────────────────────────────────────────────────

/// State shared by all UI commands.
pub struct ShellAppState {
    controller: Mutex<StartupController>,
    state_rx: watch::Receiver<StartupState>,
}

impl ShellAppState {
    pub fn new(controller: StartupController) -> Arc<Self> {
        let state_rx = controller.subscribe();
        Arc::new(Self {
            controller: Mutex::new(controller),
            state_rx,
        })
    }
}

// ── Data Transfer Objects ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StartupMode {
    Initializing,
    ReadyWithConfig,
    NeedsSetup,
    ConfigError,
}

/// Startup state as sent to the UI.  Fields that do not apply to the mode
/// are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupStateDto {
    pub mode: StartupMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

impl From<&StartupState> for StartupStateDto {
    fn from(state: &StartupState) -> Self {
        let dto = |mode| Self {
            mode,
            content: None,
            error: None,
            error_type: None,
        };
        match state {
            StartupState::Initializing => dto(StartupMode::Initializing),
            StartupState::NeedsSetup => dto(StartupMode::NeedsSetup),
            StartupState::ReadyWithConfig { content } => Self {
                content: Some(content.clone()),
                ..dto(StartupMode::ReadyWithConfig)
            },
            StartupState::ConfigError { error, error_type } => Self {
                error: Some(error.clone()),
                error_type: Some(error_type.as_str().to_string()),
                ..dto(StartupMode::ConfigError)
            },
        }
    }
}

/// Unified response wrapper used by UI commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Returns the current startup state.
///
/// # Example (frontend)
/// ```ts
/// const res = await invoke<StartupStateDto>('get_startup_state');
/// ```
pub async fn get_startup_state(state: Arc<ShellAppState>) -> CommandResult<StartupStateDto> {
    let current = state.state_rx.borrow();
    CommandResult::ok(StartupStateDto::from(&*current))
}

/// Runs the initial startup check (once) and returns the resulting state.
pub async fn start_startup(state: Arc<ShellAppState>) -> CommandResult<StartupStateDto> {
    let Ok(mut controller) = state.controller.try_lock() else {
        return CommandResult::err(CHECK_IN_PROGRESS);
    };
    let next = controller.start().await;
    CommandResult::ok(StartupStateDto::from(&next))
}

/// User-initiated retry.  Fails without contacting the host if a check is
/// already running.
pub async fn retry_startup(state: Arc<ShellAppState>) -> CommandResult<StartupStateDto> {
    let Ok(mut controller) = state.controller.try_lock() else {
        return CommandResult::err(CHECK_IN_PROGRESS);
    };
    let next = controller.retry().await;
    CommandResult::ok(StartupStateDto::from(&next))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
