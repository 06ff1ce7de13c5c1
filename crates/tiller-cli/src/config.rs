//! Settings for one `tiller ask` run.
//!
//! [`AskConfig`] wraps the library's [`PromptConfig`] with what only the
//! command line decides, and converts it into `tiller-rs` types via
//! [`build_ui_state`](AskConfig::build_ui_state) and
//! [`build_tool_set`](AskConfig::build_tool_set).

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tiller_rs::config::PromptConfig;
use tiller_rs::mode::AgentMode;
use tiller_rs::tools::ToolSet;
use tiller_rs::ui::UiState;
use tiller_rs::ui::ask_user_tool::AskUserTool;
use tiller_tui::CYCLE_MODE_HINT;

/// Configuration for an interactive ask session.
#[derive(Debug, Clone)]
pub struct AskConfig {
    /// Prompt behaviour shared with the library. The CLI defaults differ
    /// from [`PromptConfig::default`] in the cycle hint (the terminal key)
    /// and a 50 ms poll interval.
    pub prompt: PromptConfig,
    /// Give up waiting for the operator after this long. `None` waits
    /// until the prompt is answered or cancelled.
    pub timeout: Option<Duration>,
}

impl Default for AskConfig {
    fn default() -> Self {
        Self {
            prompt: PromptConfig::default()
                .with_cycle_hint(CYCLE_MODE_HINT)
                .with_poll_interval(Duration::from_millis(50)),
            timeout: None,
        }
    }
}

impl AskConfig {
    pub fn with_initial_mode(mut self, mode: AgentMode) -> Self {
        self.prompt = self.prompt.with_initial_mode(mode);
        self
    }

    pub fn with_max_choices(mut self, max: usize) -> Self {
        self.prompt = self.prompt.with_max_choices(max);
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Shared state for the TUI and the `ask_user` tool.
    pub fn build_ui_state(&self) -> Arc<Mutex<UiState>> {
        Arc::new(Mutex::new(UiState::with_config(self.prompt.clone())))
    }

    /// A [`ToolSet`] holding `ask_user` wired to `state`, bounded by the
    /// configured timeout.
    pub fn build_tool_set(&self, state: &Arc<Mutex<UiState>>) -> ToolSet {
        ToolSet::new()
            .with(AskUserTool::new(Some(state.clone())))
            .with_default_timeout(self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiller_rs::tools::names;

    #[test]
    fn defaults_use_terminal_cycle_key() {
        let config = AskConfig::default();
        assert_eq!(config.prompt.initial_mode, AgentMode::AutoApprove);
        assert_eq!(config.prompt.cycle_hint, "ctrl+t");
        assert_eq!(config.prompt.max_choices, 6);
        assert_eq!(config.prompt.poll_interval, Duration::from_millis(50));
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn ui_state_starts_in_requested_mode() {
        let config = AskConfig::default().with_initial_mode(AgentMode::Plan);
        let state = config.build_ui_state();
        let s = state.lock().unwrap();
        assert_eq!(s.mode.mode(), AgentMode::Plan);
        assert!(s.mode.caption().ends_with("plan mode (ctrl+t to cycle)"));
    }

    #[test]
    fn tool_set_exposes_ask_user() {
        let config = AskConfig::default();
        let tools = config.build_tool_set(&config.build_ui_state());
        let defined: Vec<String> = tools
            .definitions()
            .into_iter()
            .map(|d| d.function.name)
            .collect();
        assert_eq!(defined, vec![names::ASK_USER.to_string()]);
    }

    #[tokio::test]
    async fn unanswered_prompt_times_out() {
        let config = AskConfig::default().with_timeout(Some(Duration::from_millis(30)));
        let state = config.build_ui_state();
        let tools = config.build_tool_set(&state);

        // Nobody answers: without a timeout this would wait forever.
        let raw = tools
            .execute(names::ASK_USER, r#"{"questions":[{"question":"Q?"}]}"#)
            .await;
        assert!(raw.starts_with("Error: tool 'ask_user' timed out"), "{raw}");
        assert!(state.lock().unwrap().active_prompt.is_some());
    }
}
