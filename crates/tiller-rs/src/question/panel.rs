//! Selection state for a single question.

use super::{Focus, Question};

/// Cursor prefix for the highlighted option.
const SELECTED_CURSOR: &str = "> ";
const UNSELECTED_CURSOR: &str = "  ";

/// Signals the free-text input sends up to its panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtherInputSignal {
    /// Escape was pressed while the input held focus.
    EscapePressed,
    /// Enter was pressed while the input held focus.
    Submitted,
}

/// Signals a panel sends up to its session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSignal {
    CancelRequested,
    SubmitRequested,
}

/// Per-question selection state.
///
/// Options are the question's choices followed by one trailing "Other"
/// slot, so there is always at least one option. The selected index is
/// kept modulo the option count after every move.
#[derive(Debug, Clone)]
pub struct QuestionPanel {
    index: usize,
    question: Question,
    selected_option: usize,
    other_text: String,
}

impl QuestionPanel {
    /// Create the panel for the question at position `index` in its session.
    pub fn new(index: usize, question: Question) -> Self {
        Self {
            index,
            question,
            selected_option: 0,
            other_text: String::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    /// Number of selectable options, including "Other".
    pub fn total_options(&self) -> usize {
        self.question.choices.len() + 1
    }

    /// Whether the "Other" slot is selected.
    pub fn is_other_mode(&self) -> bool {
        self.selected_option == self.question.choices.len()
    }

    pub fn other_text(&self) -> &str {
        &self.other_text
    }

    // ── Selection ──────────────────────────────────────────────────

    /// Move the selection up one option, wrapping to "Other" from the top.
    ///
    /// Returns a focus directive when the move enters or leaves "Other".
    pub fn move_up(&mut self) -> Option<Focus> {
        let total = self.total_options();
        self.select((self.selected_option + total - 1) % total)
    }

    /// Move the selection down one option, wrapping to the first choice.
    ///
    /// Returns a focus directive when the move enters or leaves "Other".
    pub fn move_down(&mut self) -> Option<Focus> {
        self.select(self.selected_option + 1)
    }

    fn select(&mut self, option: usize) -> Option<Focus> {
        let was_other = self.is_other_mode();
        self.selected_option = option % self.total_options();
        match (was_other, self.is_other_mode()) {
            (false, true) => Some(Focus::OtherInput(self.index)),
            (true, false) => Some(Focus::Panel(self.index)),
            _ => None,
        }
    }

    /// Where focus belongs when this panel becomes active.
    pub fn focus_target(&self) -> Focus {
        if self.is_other_mode() {
            Focus::OtherInput(self.index)
        } else {
            Focus::Panel(self.index)
        }
    }

    /// The current answer and whether it came from "Other".
    ///
    /// Selected choices answer with their label only. Free text is trimmed
    /// and otherwise taken verbatim, empty included.
    pub fn get_answer(&self) -> (String, bool) {
        match self.question.choices.get(self.selected_option) {
            Some(choice) => (choice.label.clone(), false),
            None => (self.other_text.trim().to_string(), true),
        }
    }

    // ── Free-text input ────────────────────────────────────────────

    pub fn insert_char(&mut self, c: char) {
        self.other_text.push(c);
    }

    pub fn backspace(&mut self) {
        self.other_text.pop();
    }

    pub fn set_other_text(&mut self, text: impl Into<String>) {
        self.other_text = text.into();
    }

    // ── Escape relay ───────────────────────────────────────────────

    /// Escape pressed while the panel itself holds focus.
    pub fn escape(&self) -> PanelSignal {
        PanelSignal::CancelRequested
    }

    /// Pass a signal from the free-text input up to the session.
    pub fn relay(&self, signal: OtherInputSignal) -> PanelSignal {
        match signal {
            OtherInputSignal::EscapePressed => PanelSignal::CancelRequested,
            OtherInputSignal::Submitted => PanelSignal::SubmitRequested,
        }
    }

    // ── Rendering helpers ──────────────────────────────────────────

    /// One line per choice: cursor prefix followed by the display text.
    pub fn option_lines(&self) -> Vec<String> {
        self.question
            .choices
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                let cursor = if i == self.selected_option {
                    SELECTED_CURSOR
                } else {
                    UNSELECTED_CURSOR
                };
                format!("{cursor}{}", choice.display_text())
            })
            .collect()
    }

    /// Cursor prefix for the "Other" line.
    pub fn other_cursor(&self) -> &'static str {
        if self.is_other_mode() {
            SELECTED_CURSOR
        } else {
            UNSELECTED_CURSOR
        }
    }

    /// Blank lines needed so panels with fewer choices keep the same height.
    pub fn padding_lines(&self, max_choices: usize) -> usize {
        max_choices.saturating_sub(self.question.choices.len())
    }
}
