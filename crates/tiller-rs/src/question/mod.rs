//! Multi-question prompt: data contract and state machines.
//!
//! A prompt asks the operator one or more [`Question`]s. Each question
//! offers its enumerated [`Choice`]s plus a trailing free-text "Other"
//! option. The operator switches between questions with tabs, moves the
//! selection up and down, and either submits every answer at once or
//! cancels.
//!
//! The state lives in two layers:
//!
//! - [`QuestionPanel`]: selection and free-text buffer for one question.
//! - [`QuestionSession`]: the ordered panels, the active tab, focus
//!   tracking, and the terminal [`SessionOutcome`].
//!
//! Neither layer renders anything. Focus changes are handed to the host
//! through the [`FocusTarget`] capability.
//!
//! ```
//! use tiller_rs::question::{
//!     Choice, Dispatch, NoFocus, Question, QuestionSession, SessionCommand, SessionOutcome,
//! };
//!
//! let mut session = QuestionSession::new(vec![Question::new(
//!     "Proceed?",
//!     vec![Choice::new("yes"), Choice::new("no")],
//! )]);
//! let mut host = NoFocus;
//! session.start(&mut host);
//! session.dispatch(SessionCommand::MoveDown, &mut host);
//!
//! let Dispatch::Finished(SessionOutcome::Answered(answers)) =
//!     session.dispatch(SessionCommand::Submit, &mut host)
//! else {
//!     unreachable!()
//! };
//! assert_eq!(answers[0].answer, "no");
//! ```

mod focus;
mod panel;
mod session;

pub use focus::{Focus, FocusTarget, NoFocus};
pub use panel::{OtherInputSignal, PanelSignal, QuestionPanel};
pub use session::{
    DEFAULT_MAX_CHOICES, Dispatch, QuestionSession, SessionCommand, help_text,
};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One enumerated option of a [`Question`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Choice {
    /// Short label; this is what the answer carries when selected.
    pub label: String,
    /// Optional longer explanation, shown next to the label only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Choice {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Text a renderer shows for this choice: `label - description`.
    pub fn display_text(&self) -> String {
        match &self.description {
            Some(description) if !description.is_empty() => {
                format!("{} - {description}", self.label)
            }
            _ => self.label.clone(),
        }
    }
}

/// A single decision point presented to the operator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Question {
    /// The prompt text.
    pub question: String,
    /// Enumerated options. May be empty, leaving only the free-text answer.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl Question {
    pub fn new(question: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self {
            question: question.into(),
            choices,
        }
    }
}

/// The answer given to one question at submission time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question: String,
    pub answer: String,
    /// `true` when the answer came from the free-text "Other" option.
    pub is_other: bool,
}

/// How a session ended. Exactly one outcome is produced per session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "answers", rename_all = "snake_case")]
pub enum SessionOutcome {
    /// All answers, in question order.
    Answered(Vec<AnswerRecord>),
    Cancelled,
}
