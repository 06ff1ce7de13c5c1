//! Key handling for the prompt TUI.
//!
//! Keys are first mapped to a [`KeyAction`] without touching any state, then
//! applied against the app and the shared [`UiState`].

use std::sync::{Arc, Mutex};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tiller_rs::question::{Dispatch, Focus, SessionCommand, SessionOutcome};
use tiller_rs::ui::{UiState, cycle_mode, dispatch_prompt, resolve_prompt};
use tracing::debug;

use crate::app::App;

/// Caption hint for the key that cycles the mode, usable with or without
/// a prompt open.
pub const CYCLE_MODE_HINT: &str = "ctrl+t";

/// What a key press means in the current context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyAction {
    Session(SessionCommand),
    CycleMode,
    ToggleLogs,
    Quit,
    None,
}

/// Map a key to an action.
///
/// While a prompt is active `shift+tab` means "previous question", so only
/// `ctrl+t` cycles the mode there. Left/right switch tabs only from the
/// choice list; inside the free-text input they are text keys.
pub(crate) fn map_key(key: KeyEvent, focus: Option<Focus>, prompt_active: bool) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return KeyAction::Quit,
            KeyCode::Char('t') => return KeyAction::CycleMode,
            _ => {}
        }
    }

    if !prompt_active {
        return match key.code {
            KeyCode::BackTab => KeyAction::CycleMode,
            KeyCode::Char(',') => KeyAction::ToggleLogs,
            KeyCode::Char('q') => KeyAction::Quit,
            _ => KeyAction::None,
        };
    }

    let in_input = matches!(focus, Some(Focus::OtherInput(_)));
    let command = match key.code {
        KeyCode::Up => SessionCommand::MoveUp,
        KeyCode::Down => SessionCommand::MoveDown,
        KeyCode::Left if !in_input => SessionCommand::PrevTab,
        KeyCode::Right if !in_input => SessionCommand::NextTab,
        KeyCode::Tab => SessionCommand::NextTab,
        KeyCode::BackTab => SessionCommand::PrevTab,
        KeyCode::Enter => SessionCommand::Submit,
        KeyCode::Esc => SessionCommand::Escape,
        KeyCode::Backspace if in_input => SessionCommand::Backspace,
        KeyCode::Char(c) if in_input => SessionCommand::InsertChar(c),
        _ => return KeyAction::None,
    };
    KeyAction::Session(command)
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App, state: &Arc<Mutex<UiState>>) {
    let prompt_active = state
        .lock()
        .map(|s| s.active_prompt.is_some())
        .unwrap_or(false);

    match map_key(key, app.focus, prompt_active) {
        KeyAction::Session(command) => {
            if let Dispatch::Finished(outcome) = dispatch_prompt(state, command, app) {
                app.status_message = Some(finished_message(&outcome).to_string());
            }
        }
        KeyAction::CycleMode => {
            if let Some(mode) = cycle_mode(state) {
                app.status_message = Some(format!("Switched to {mode} mode"));
            }
        }
        KeyAction::ToggleLogs => app.show_logs = !app.show_logs,
        KeyAction::Quit => {
            if prompt_active {
                debug!("Quit during prompt, cancelling");
                resolve_prompt(state, SessionOutcome::Cancelled);
            }
            app.should_quit = true;
        }
        KeyAction::None => {}
    }
}

fn finished_message(outcome: &SessionOutcome) -> &'static str {
    match outcome {
        SessionOutcome::Answered(_) => "Answers submitted.",
        SessionOutcome::Cancelled => "Prompt cancelled.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiller_rs::mode::AgentMode;
    use tiller_rs::question::{Choice, Question};
    use tiller_rs::ui::{ask_questions, poll_prompt, start_prompt};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn session(cmd: SessionCommand) -> KeyAction {
        KeyAction::Session(cmd)
    }

    #[test]
    fn idle_keys() {
        assert_eq!(map_key(key(KeyCode::BackTab), None, false), KeyAction::CycleMode);
        assert_eq!(map_key(key(KeyCode::Char(',')), None, false), KeyAction::ToggleLogs);
        assert_eq!(map_key(key(KeyCode::Char('q')), None, false), KeyAction::Quit);
        assert_eq!(map_key(key(KeyCode::Enter), None, false), KeyAction::None);
    }

    #[test]
    fn ctrl_t_cycles_mode_everywhere() {
        let ctrl_t = KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_t, None, false), KeyAction::CycleMode);
        assert_eq!(map_key(ctrl_t, Some(Focus::Panel(0)), true), KeyAction::CycleMode);
        // Not typed into the free-text answer.
        assert_eq!(
            map_key(ctrl_t, Some(Focus::OtherInput(0)), true),
            KeyAction::CycleMode
        );
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, None, false), KeyAction::Quit);
        assert_eq!(
            map_key(ctrl_c, Some(Focus::OtherInput(0)), true),
            KeyAction::Quit
        );
    }

    #[test]
    fn panel_focus_keys() {
        let focus = Some(Focus::Panel(0));
        assert_eq!(map_key(key(KeyCode::Up), focus, true), session(SessionCommand::MoveUp));
        assert_eq!(map_key(key(KeyCode::Down), focus, true), session(SessionCommand::MoveDown));
        assert_eq!(map_key(key(KeyCode::Left), focus, true), session(SessionCommand::PrevTab));
        assert_eq!(map_key(key(KeyCode::Right), focus, true), session(SessionCommand::NextTab));
        assert_eq!(map_key(key(KeyCode::Tab), focus, true), session(SessionCommand::NextTab));
        assert_eq!(map_key(key(KeyCode::BackTab), focus, true), session(SessionCommand::PrevTab));
        assert_eq!(map_key(key(KeyCode::Enter), focus, true), session(SessionCommand::Submit));
        assert_eq!(map_key(key(KeyCode::Esc), focus, true), session(SessionCommand::Escape));
        // Typing needs the free-text input.
        assert_eq!(map_key(key(KeyCode::Char('q')), focus, true), KeyAction::None);
        assert_eq!(map_key(key(KeyCode::Backspace), focus, true), KeyAction::None);
    }

    #[test]
    fn input_focus_keys() {
        let focus = Some(Focus::OtherInput(1));
        assert_eq!(
            map_key(key(KeyCode::Char('q')), focus, true),
            session(SessionCommand::InsertChar('q'))
        );
        assert_eq!(
            map_key(key(KeyCode::Backspace), focus, true),
            session(SessionCommand::Backspace)
        );
        assert_eq!(map_key(key(KeyCode::Left), focus, true), KeyAction::None);
        assert_eq!(map_key(key(KeyCode::Tab), focus, true), session(SessionCommand::NextTab));
        assert_eq!(map_key(key(KeyCode::Up), focus, true), session(SessionCommand::MoveUp));
    }

    fn prompt_state() -> Arc<Mutex<UiState>> {
        let state = Arc::new(Mutex::new(UiState::default()));
        ask_questions(
            &state,
            vec![Question::new("Continue?", vec![Choice::new("yes"), Choice::new("no")])],
        );
        state
    }

    #[test]
    fn typing_an_other_answer_and_submitting() {
        let state = prompt_state();
        let mut app = App::new();
        assert!(start_prompt(&state, &mut app));

        handle_key_event(key(KeyCode::Up), &mut app, &state);
        assert_eq!(app.focus, Some(Focus::OtherInput(0)));
        for c in "later".chars() {
            handle_key_event(key(KeyCode::Char(c)), &mut app, &state);
        }
        handle_key_event(key(KeyCode::Enter), &mut app, &state);

        let Some(SessionOutcome::Answered(answers)) = poll_prompt(&state) else {
            panic!("expected answers");
        };
        assert_eq!(answers[0].answer, "later");
        assert!(answers[0].is_other);
        assert_eq!(app.status_message.as_deref(), Some("Answers submitted."));
    }

    #[test]
    fn quit_during_prompt_cancels_it() {
        let state = prompt_state();
        let mut app = App::new();
        start_prompt(&state, &mut app);

        handle_key_event(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut app,
            &state,
        );
        assert!(app.should_quit);
        assert_eq!(poll_prompt(&state), Some(SessionOutcome::Cancelled));
    }

    #[test]
    fn shift_tab_cycles_mode_when_idle() {
        let state = Arc::new(Mutex::new(UiState::default()));
        let mut app = App::new();
        handle_key_event(key(KeyCode::BackTab), &mut app, &state);
        assert_eq!(state.lock().unwrap().mode.mode(), AgentMode::Plan);
        assert_eq!(app.status_message.as_deref(), Some("Switched to plan mode"));
    }

    #[test]
    fn shift_tab_does_not_cycle_mode_during_prompt() {
        let state = prompt_state();
        let mut app = App::new();
        start_prompt(&state, &mut app);
        handle_key_event(key(KeyCode::BackTab), &mut app, &state);
        assert_eq!(state.lock().unwrap().mode.mode(), AgentMode::AutoApprove);
    }

    #[test]
    fn ctrl_t_cycles_mode_during_prompt() {
        let state = prompt_state();
        let mut app = App::new();
        start_prompt(&state, &mut app);

        // Type into the free-text answer, then cycle from there.
        handle_key_event(key(KeyCode::Up), &mut app, &state);
        handle_key_event(key(KeyCode::Char('x')), &mut app, &state);
        handle_key_event(
            KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL),
            &mut app,
            &state,
        );

        assert_eq!(state.lock().unwrap().mode.mode(), AgentMode::Plan);
        assert_eq!(app.status_message.as_deref(), Some("Switched to plan mode"));
        assert_eq!(poll_prompt(&state), None);

        // The prompt still answers with what was typed.
        handle_key_event(key(KeyCode::Enter), &mut app, &state);
        let Some(SessionOutcome::Answered(answers)) = poll_prompt(&state) else {
            panic!("expected answers");
        };
        assert_eq!(answers[0].answer, "x");
    }
}
