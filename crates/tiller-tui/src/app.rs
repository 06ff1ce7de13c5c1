//! TUI-local state (not shared with the agent).

use tiller_rs::question::{Focus, FocusTarget};

/// TUI-local state (not shared with the agent).
///
/// Doubles as the focus host for question sessions: the session tells it
/// which widget owns the keyboard and which tab is highlighted.
pub(crate) struct App {
    /// Widget that currently receives keys, as directed by the session.
    pub(crate) focus: Option<Focus>,
    /// Highlighted tab in the tab bar.
    pub(crate) active_tab: Option<usize>,
    /// Whether the logs pane is visible (toggled with `,`).
    pub(crate) show_logs: bool,
    /// Status messages shown temporarily at the bottom.
    pub(crate) status_message: Option<String>,
    pub(crate) should_quit: bool,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            focus: None,
            active_tab: None,
            show_logs: false,
            status_message: None,
            should_quit: false,
        }
    }

    /// Forget prompt focus once a prompt goes away.
    pub(crate) fn clear_prompt(&mut self) {
        self.focus = None;
        self.active_tab = None;
    }
}

impl FocusTarget for App {
    fn focus(&mut self, focus: Focus) {
        self.focus = Some(focus);
    }

    fn mark_active(&mut self, tab: usize, active: bool) {
        if active {
            self.active_tab = Some(tab);
        } else if self.active_tab == Some(tab) {
            self.active_tab = None;
        }
    }
}
