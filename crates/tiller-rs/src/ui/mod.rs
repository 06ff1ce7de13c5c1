//! Shared UI state for agent frontends.
//!
//! The agent and a frontend share an `Arc<Mutex<UiState>>`. The agent
//! installs prompts and reads their outcomes; the frontend renders the
//! active prompt and the mode indicator and feeds user commands back in.
//! Nothing here depends on a rendering library.
//!
//! ```text
//! Agent runtime ──ask_questions──▶ Arc<Mutex<UiState>> ◀──dispatch_prompt── UI frontend
//!               ◀──poll_prompt────
//! ```

pub mod ask_user_tool;
mod prompt;
pub mod tracing;

pub use prompt::{
    ActivePrompt, ask_questions, dispatch_prompt, poll_prompt, resolve_prompt, start_prompt,
};

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use crate::config::PromptConfig;
use crate::mode::{AgentMode, ModeIndicator};

/// Maximum log lines kept in memory.
pub const MAX_LOG_LINES: usize = 2000;
/// Trim to this many when the cap is exceeded.
pub const LOG_TRIM_TO: usize = 1200;

// ── Log Types ─────────────────────────────────────────────────────────

/// A single log line captured from tracing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogLine {
    pub time: String,
    pub level: LogLevel,
    pub message: String,
}

/// Log severity level (mirrors tracing levels).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Short fixed-width label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO ",
            Self::Warn => "WARN ",
            Self::Error => "ERROR",
        }
    }
}

// ── UiState ───────────────────────────────────────────────────────────

/// State shared between the agent runtime and a frontend.
pub struct UiState {
    /// Short status line ("Waiting for user response", ...).
    pub phase: String,
    pub mode: ModeIndicator,
    pub active_prompt: Option<ActivePrompt>,
    pub logs: Vec<LogLine>,
    /// Set to `false` when the agent finishes.
    pub running: bool,
    /// The frontend sets this to `true` when the user requests quit.
    pub quit_requested: bool,
    pub config: PromptConfig,
}

impl UiState {
    pub fn with_config(config: PromptConfig) -> Self {
        Self {
            mode: config.build_indicator(),
            config,
            ..Default::default()
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        let config = PromptConfig::default();
        Self {
            phase: "Initializing".into(),
            mode: config.build_indicator(),
            active_prompt: None,
            logs: Vec::new(),
            running: true,
            quit_requested: false,
            config,
        }
    }
}

// ── Convenience Updaters ──────────────────────────────────────────────

/// Lock the shared state mutex and run a closure on the guard.
/// Silently ignores poisoned locks (no log spam inside UI frontends).
macro_rules! with_state {
    ($state:expr, |$s:ident| $body:block) => {
        if let Ok(mut $s) = $state.lock() {
            $body
        }
    };
}

/// Update the current phase string.
pub fn update_phase(state: &Arc<Mutex<UiState>>, phase: &str) {
    with_state!(state, |s| { s.phase = phase.to_string() });
}

/// Advance the shared mode indicator and return the new mode.
pub fn cycle_mode(state: &Arc<Mutex<UiState>>) -> Option<AgentMode> {
    state.lock().ok().map(|mut s| s.mode.cycle())
}

/// Current mode, or `None` if the state lock is poisoned.
pub fn current_mode(state: &Arc<Mutex<UiState>>) -> Option<AgentMode> {
    state.lock().ok().map(|s| s.mode.mode())
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_labels() {
        assert_eq!(LogLevel::Info.label(), "INFO ");
        assert_eq!(LogLevel::Error.label(), "ERROR");
        assert_eq!(LogLevel::Warn.label(), "WARN ");
    }

    #[test]
    fn ui_state_defaults() {
        let state = UiState::default();
        assert!(state.running);
        assert!(!state.quit_requested);
        assert_eq!(state.phase, "Initializing");
        assert!(state.active_prompt.is_none());
        assert_eq!(state.mode.mode(), AgentMode::AutoApprove);
    }

    #[test]
    fn with_config_seeds_mode() {
        let config = PromptConfig::default().with_initial_mode(AgentMode::Default);
        let state = UiState::with_config(config);
        assert_eq!(state.mode.mode(), AgentMode::Default);
    }

    #[test]
    fn cycle_mode_walks_the_order() {
        let state = Arc::new(Mutex::new(UiState::default()));
        assert_eq!(cycle_mode(&state), Some(AgentMode::Plan));
        assert_eq!(cycle_mode(&state), Some(AgentMode::Default));
        assert_eq!(current_mode(&state), Some(AgentMode::Default));

        update_phase(&state, "Planning");
        assert_eq!(state.lock().unwrap().phase, "Planning");
    }
}
