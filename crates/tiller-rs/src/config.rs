//! Prompt configuration with sensible defaults.
//!
//! [`PromptConfig`] collects the knobs frontends and the `ask_user` tool
//! share. Construct it with [`Default`] and adjust with the `with_*`
//! builders.

use std::time::Duration;

use crate::mode::{AgentMode, DEFAULT_CYCLE_HINT, ModeIndicator};
use crate::question::DEFAULT_MAX_CHOICES;

/// Configuration for prompts and the mode indicator.
#[derive(Debug, Clone)]
pub struct PromptConfig {
    /// Mode the indicator starts in. Default: [`AgentMode::AutoApprove`].
    pub initial_mode: AgentMode,
    /// Key hint in the mode caption. Default: `"shift+tab"`.
    pub cycle_hint: String,
    /// Most padding rows a frontend reserves below a panel's options.
    /// Default: `6`.
    pub max_choices: usize,
    /// How often the `ask_user` tool checks for an outcome. Default: 200 ms.
    pub poll_interval: Duration,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            initial_mode: AgentMode::AutoApprove,
            cycle_hint: DEFAULT_CYCLE_HINT.to_string(),
            max_choices: DEFAULT_MAX_CHOICES,
            poll_interval: Duration::from_millis(200),
        }
    }
}

impl PromptConfig {
    pub fn with_initial_mode(mut self, mode: AgentMode) -> Self {
        self.initial_mode = mode;
        self
    }

    pub fn with_cycle_hint(mut self, hint: impl Into<String>) -> Self {
        self.cycle_hint = hint.into();
        self
    }

    pub fn with_max_choices(mut self, max: usize) -> Self {
        self.max_choices = max;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Mode indicator seeded from this config.
    pub fn build_indicator(&self) -> ModeIndicator {
        ModeIndicator::new(self.initial_mode).with_cycle_hint(self.cycle_hint.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PromptConfig::default();
        assert_eq!(config.initial_mode, AgentMode::AutoApprove);
        assert_eq!(config.cycle_hint, "shift+tab");
        assert_eq!(config.max_choices, 6);
        assert_eq!(config.poll_interval, Duration::from_millis(200));
    }

    #[test]
    fn build_indicator_uses_mode_and_hint() {
        let indicator = PromptConfig::default()
            .with_initial_mode(AgentMode::Plan)
            .with_cycle_hint("F2")
            .build_indicator();
        assert_eq!(indicator.mode(), AgentMode::Plan);
        assert!(indicator.caption().ends_with("plan mode (F2 to cycle)"));
    }
}
