//! The multi-question session controller.
//!
//! [`QuestionSession`] owns one [`QuestionPanel`] per question, tracks the
//! active tab and the focused element, and turns [`SessionCommand`]s into
//! state changes. Commands are handled one at a time to completion. The
//! session ends with exactly one [`SessionOutcome`]; afterwards every
//! command is [`Dispatch::Ignored`].
//!
//! # Escape routing
//!
//! Escape goes to whichever element holds focus. From the free-text input
//! it travels input → panel → session; from the panel it travels
//! panel → session. Both paths end in the same `Cancelled` outcome.

use tracing::{debug, info, trace};

use super::focus::{Focus, FocusTarget};
use super::panel::{OtherInputSignal, PanelSignal, QuestionPanel};
use super::{AnswerRecord, Question, SessionOutcome};

/// Option padding used when a session has no questions to measure.
pub const DEFAULT_MAX_CHOICES: usize = 6;

/// A user command routed into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    MoveUp,
    MoveDown,
    NextTab,
    PrevTab,
    /// Submit every answer.
    Submit,
    /// Cancel the whole prompt.
    Cancel,
    /// Escape pressed on the focused element.
    Escape,
    /// Type a character into the focused free-text input.
    InsertChar(char),
    /// Delete the last character of the focused free-text input.
    Backspace,
}

/// Result of dispatching one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The command changed (or deliberately kept) session state.
    Handled,
    /// The command did not apply to the current state.
    Ignored,
    /// The session ended. No further outcome will be produced.
    Finished(SessionOutcome),
}

/// Key help shown under the prompt.
pub fn help_text(question_count: usize) -> &'static str {
    if question_count > 1 {
        "\u{2190}\u{2192}/Tab: switch question  |  \u{2191}\u{2193}: select  |  Enter: submit all  |  Escape: cancel"
    } else {
        "\u{2191}\u{2193}: select  |  Enter: submit  |  Escape: cancel"
    }
}

/// State of one interactive prompt, from construction to outcome.
#[derive(Debug, Clone)]
pub struct QuestionSession {
    panels: Vec<QuestionPanel>,
    active_tab: usize,
    /// `None` only when there are no questions.
    focused: Option<Focus>,
    finished: bool,
}

impl QuestionSession {
    pub fn new(questions: Vec<Question>) -> Self {
        let panels: Vec<QuestionPanel> = questions
            .into_iter()
            .enumerate()
            .map(|(i, q)| QuestionPanel::new(i, q))
            .collect();
        let focused = panels.first().map(QuestionPanel::focus_target);
        Self {
            panels,
            active_tab: 0,
            focused,
            finished: false,
        }
    }

    /// Mark the first tab active and focus into the first panel.
    ///
    /// Call once after the host has set up its elements.
    pub fn start(&mut self, host: &mut impl FocusTarget) {
        if let Some(target) = self.focused {
            host.mark_active(self.active_tab, true);
            host.focus(target);
        }
    }

    // ── Accessors ──────────────────────────────────────────────────

    pub fn active_tab(&self) -> usize {
        self.active_tab
    }

    pub fn panels(&self) -> &[QuestionPanel] {
        &self.panels
    }

    pub fn active_panel(&self) -> Option<&QuestionPanel> {
        self.panels.get(self.active_tab)
    }

    pub fn focused(&self) -> Option<Focus> {
        self.focused
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Tab labels (`Q1`, `Q2`, ...). Hosts show a tab bar only for more
    /// than one question.
    pub fn tab_labels(&self) -> Vec<String> {
        (1..=self.panels.len()).map(|i| format!("Q{i}")).collect()
    }

    pub fn help_text(&self) -> &'static str {
        help_text(self.panels.len())
    }

    /// Largest choice count across questions, for consistent panel height.
    pub fn max_choices(&self) -> usize {
        self.panels
            .iter()
            .map(|p| p.question().choices.len())
            .max()
            .unwrap_or(DEFAULT_MAX_CHOICES)
    }

    // ── Dispatch ───────────────────────────────────────────────────

    /// Apply one command.
    pub fn dispatch(&mut self, command: SessionCommand, host: &mut impl FocusTarget) -> Dispatch {
        if self.finished {
            trace!(?command, "Session already finished, ignoring command");
            return Dispatch::Ignored;
        }

        match command {
            SessionCommand::MoveUp => self.move_selection(host, QuestionPanel::move_up),
            SessionCommand::MoveDown => self.move_selection(host, QuestionPanel::move_down),
            SessionCommand::NextTab => {
                let len = self.panels.len();
                if len <= 1 {
                    return Dispatch::Ignored;
                }
                self.switch_tab((self.active_tab + 1) % len, host)
            }
            SessionCommand::PrevTab => {
                let len = self.panels.len();
                if len <= 1 {
                    return Dispatch::Ignored;
                }
                self.switch_tab((self.active_tab + len - 1) % len, host)
            }
            SessionCommand::Submit => match self.focused {
                Some(Focus::OtherInput(i)) => {
                    let signal = self.panels[i].relay(OtherInputSignal::Submitted);
                    self.on_panel_signal(signal)
                }
                _ => self.submit(),
            },
            SessionCommand::Cancel => self.finish(SessionOutcome::Cancelled),
            SessionCommand::Escape => match self.focused {
                Some(Focus::OtherInput(i)) => {
                    debug!(question = i, "Escape relayed from free-text input");
                    let signal = self.panels[i].relay(OtherInputSignal::EscapePressed);
                    self.on_panel_signal(signal)
                }
                Some(Focus::Panel(i)) => {
                    let signal = self.panels[i].escape();
                    self.on_panel_signal(signal)
                }
                None => self.finish(SessionOutcome::Cancelled),
            },
            SessionCommand::InsertChar(c) => match self.focused {
                Some(Focus::OtherInput(i)) => {
                    self.panels[i].insert_char(c);
                    Dispatch::Handled
                }
                _ => Dispatch::Ignored,
            },
            SessionCommand::Backspace => match self.focused {
                Some(Focus::OtherInput(i)) => {
                    self.panels[i].backspace();
                    Dispatch::Handled
                }
                _ => Dispatch::Ignored,
            },
        }
    }

    fn move_selection(
        &mut self,
        host: &mut impl FocusTarget,
        step: fn(&mut QuestionPanel) -> Option<Focus>,
    ) -> Dispatch {
        let Some(panel) = self.panels.get_mut(self.active_tab) else {
            return Dispatch::Ignored;
        };
        if let Some(target) = step(panel) {
            self.set_focus(target, host);
        }
        Dispatch::Handled
    }

    fn switch_tab(&mut self, new_tab: usize, host: &mut impl FocusTarget) -> Dispatch {
        if new_tab == self.active_tab {
            return Dispatch::Ignored;
        }
        let old_tab = self.active_tab;
        host.mark_active(old_tab, false);
        host.mark_active(new_tab, true);
        self.active_tab = new_tab;

        let target = self.panels[new_tab].focus_target();
        self.set_focus(target, host);
        debug!(from = old_tab, to = new_tab, "Switched question tab");
        Dispatch::Handled
    }

    fn set_focus(&mut self, target: Focus, host: &mut impl FocusTarget) {
        trace!(?target, "Focus hand-off");
        self.focused = Some(target);
        host.focus(target);
    }

    fn on_panel_signal(&mut self, signal: PanelSignal) -> Dispatch {
        match signal {
            PanelSignal::CancelRequested => self.finish(SessionOutcome::Cancelled),
            PanelSignal::SubmitRequested => self.submit(),
        }
    }

    /// Collect every panel's answer in question order.
    fn submit(&mut self) -> Dispatch {
        let answers = self
            .panels
            .iter()
            .map(|panel| {
                let (answer, is_other) = panel.get_answer();
                AnswerRecord {
                    question: panel.question().question.clone(),
                    answer,
                    is_other,
                }
            })
            .collect();
        self.finish(SessionOutcome::Answered(answers))
    }

    /// End the session with an outcome decided outside it, such as the host
    /// shutting down. Ignored once the session has finished.
    pub fn finish_with(&mut self, outcome: SessionOutcome) -> Dispatch {
        if self.finished {
            return Dispatch::Ignored;
        }
        self.finish(outcome)
    }

    fn finish(&mut self, outcome: SessionOutcome) -> Dispatch {
        self.finished = true;
        match &outcome {
            SessionOutcome::Answered(answers) => {
                info!(count = answers.len(), "Question session answered");
            }
            SessionOutcome::Cancelled => info!("Question session cancelled"),
        }
        Dispatch::Finished(outcome)
    }
}
