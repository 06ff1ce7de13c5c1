use tracing::debug;

use super::{AgentMode, lookup, mode_icon, next_mode, safety_class};

/// Key hint shown in the caption.
pub const DEFAULT_CYCLE_HINT: &str = "shift+tab";

/// The currently selected mode and how to caption it.
///
/// Holds no rendering state; a frontend reads [`caption`](Self::caption) and
/// [`safety_class`](Self::safety_class) each frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeIndicator {
    mode: AgentMode,
    cycle_hint: String,
}

impl Default for ModeIndicator {
    fn default() -> Self {
        Self::new(AgentMode::AutoApprove)
    }
}

impl ModeIndicator {
    pub fn new(mode: AgentMode) -> Self {
        Self {
            mode,
            cycle_hint: DEFAULT_CYCLE_HINT.to_string(),
        }
    }

    /// Replace the key hint (e.g. when the frontend binds a different key).
    pub fn with_cycle_hint(mut self, hint: impl Into<String>) -> Self {
        self.cycle_hint = hint.into();
        self
    }

    pub fn mode(&self) -> AgentMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: AgentMode) {
        if mode != self.mode {
            debug!(from = %self.mode, to = %mode, "Mode changed");
        }
        self.mode = mode;
    }

    /// Advance to the next mode in cycle order and return it.
    pub fn cycle(&mut self) -> AgentMode {
        self.set_mode(next_mode(self.mode));
        self.mode
    }

    /// `"<icon> <name> mode (<hint> to cycle)"`, name lowercased.
    pub fn caption(&self) -> String {
        let name = lookup(self.mode).display_name.to_lowercase();
        format!(
            "{} {name} mode ({} to cycle)",
            mode_icon(self.mode),
            self.cycle_hint
        )
    }

    pub fn safety_class(&self) -> &'static str {
        safety_class(lookup(self.mode).safety)
    }
}
