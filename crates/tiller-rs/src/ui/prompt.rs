//! Installing, driving and collecting a question prompt through [`UiState`].
//!
//! The agent side calls [`ask_questions`] and then [`poll_prompt`] until an
//! outcome arrives. The frontend side calls [`start_prompt`] once when it
//! first shows the prompt and [`dispatch_prompt`] for every user command.

use std::sync::{Arc, Mutex};

use tracing::debug;

use super::UiState;
use crate::question::{
    Dispatch, FocusTarget, Question, QuestionSession, SessionCommand, SessionOutcome,
};

/// A prompt in flight inside [`UiState`].
#[derive(Debug, Clone)]
pub struct ActivePrompt {
    pub session: QuestionSession,
    /// Whether a frontend has started (focused) the session.
    pub started: bool,
    /// Set once the session finishes; cleared by [`poll_prompt`].
    pub outcome: Option<SessionOutcome>,
}

/// Present questions to the operator. Replaces any previous prompt.
pub fn ask_questions(state: &Arc<Mutex<UiState>>, questions: Vec<Question>) {
    if let Ok(mut s) = state.lock() {
        debug!(count = questions.len(), "Prompt installed");
        s.active_prompt = Some(ActivePrompt {
            session: QuestionSession::new(questions),
            started: false,
            outcome: None,
        });
        s.phase = "Waiting for user response".to_string();
    }
}

/// Start the active prompt on `host` if nobody has yet.
///
/// Returns `true` when this call started it.
pub fn start_prompt(state: &Arc<Mutex<UiState>>, host: &mut impl FocusTarget) -> bool {
    let Ok(mut s) = state.lock() else {
        return false;
    };
    match s.active_prompt.as_mut() {
        Some(prompt) if !prompt.started => {
            prompt.session.start(host);
            prompt.started = true;
            true
        }
        _ => false,
    }
}

/// Route one command into the active prompt, recording its outcome.
///
/// Returns [`Dispatch::Ignored`] when there is no active prompt.
pub fn dispatch_prompt(
    state: &Arc<Mutex<UiState>>,
    command: SessionCommand,
    host: &mut impl FocusTarget,
) -> Dispatch {
    let Ok(mut s) = state.lock() else {
        return Dispatch::Ignored;
    };
    let Some(prompt) = s.active_prompt.as_mut() else {
        return Dispatch::Ignored;
    };
    if prompt.outcome.is_some() {
        return Dispatch::Ignored;
    }
    let result = prompt.session.dispatch(command, host);
    if let Dispatch::Finished(outcome) = &result {
        prompt.outcome = Some(outcome.clone());
    }
    result
}

/// Record an outcome decided outside the session (e.g. the frontend quit).
///
/// Finishes the session so later commands are ignored. Has no effect if
/// the prompt already has an outcome.
pub fn resolve_prompt(state: &Arc<Mutex<UiState>>, outcome: SessionOutcome) {
    if let Ok(mut s) = state.lock()
        && let Some(prompt) = s.active_prompt.as_mut()
        && prompt.outcome.is_none()
        && let Dispatch::Finished(outcome) = prompt.session.finish_with(outcome)
    {
        prompt.outcome = Some(outcome);
    }
}

/// Poll for the outcome. Returns `None` while the operator is still answering.
///
/// Once resolved, returns the outcome and clears the prompt from state.
pub fn poll_prompt(state: &Arc<Mutex<UiState>>) -> Option<SessionOutcome> {
    let mut s = state.lock().ok()?;
    let outcome = s.active_prompt.as_mut()?.outcome.take()?;
    s.active_prompt = None;
    s.phase = "Running".to_string();
    Some(outcome)
}
