//! Terminal frontend for `tiller-rs` prompts and modes.
//!
//! Renders the mode indicator and any active question prompt from a shared
//! [`UiState`] (ratatui + crossterm), and feeds key presses back through
//! [`dispatch_prompt`](tiller_rs::ui::dispatch_prompt). The app itself is
//! the session's focus host, so the free-text cursor and tab highlight
//! follow what the session asks for.
//!
//! # Quick start
//!
//! ```ignore
//! use tiller_tui::{TuiConfig, spawn_tui};
//! use tiller_rs::ui::UiState;
//! use std::sync::{Arc, Mutex};
//!
//! let ui_state = Arc::new(Mutex::new(UiState::default()));
//! let handle = spawn_tui(ui_state.clone(), TuiConfig::default());
//! // ... ask questions through ui_state ...
//! ui_state.lock().unwrap().quit_requested = true;
//! handle.join().unwrap();
//! ```

use std::io;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use tiller_rs::ui::UiState;
use tiller_rs::ui::start_prompt;
use tiller_rs::ui::tracing::LogBuffer;
use tracing::debug;

mod app;
mod input;
mod render;

pub use input::CYCLE_MODE_HINT;
pub use render::{log_level_style, safety_style};

use app::App;
use input::handle_key_event;
use render::render;

/// How long to wait for a key before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Configuration for the TUI.
#[derive(Default)]
pub struct TuiConfig {
    /// Optional log buffer from the tracing layer.
    ///
    /// When set, the TUI drains pending log lines from this buffer once
    /// per frame and merges them into `UiState::logs`.
    pub log_buffer: Option<LogBuffer>,
}

impl TuiConfig {
    pub fn with_log_buffer(mut self, buffer: LogBuffer) -> Self {
        self.log_buffer = Some(buffer);
        self
    }
}

/// Spawn the TUI on a dedicated OS thread.
///
/// The TUI runs until the user quits or `quit_requested` is set.
pub fn spawn_tui(state: Arc<Mutex<UiState>>, config: TuiConfig) -> JoinHandle<()> {
    std::thread::spawn(move || {
        if let Err(e) = run_tui(state, &config) {
            eprintln!("TUI error: {e}");
        }
    })
}

/// Run the TUI event loop (blocking). Call this from a dedicated OS thread.
///
/// On exit `quit_requested` is always set, so an agent waiting on the state
/// can notice the frontend is gone.
pub fn run_tui(state: Arc<Mutex<UiState>>, config: &TuiConfig) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let mut app = App::new();

    let result = event_loop(&mut terminal, &state, config, &mut app);

    if let Ok(mut s) = state.lock() {
        s.quit_requested = true;
    }

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &Arc<Mutex<UiState>>,
    config: &TuiConfig,
    app: &mut App,
) -> io::Result<()> {
    loop {
        let (quit, has_prompt) = match state.lock() {
            Ok(s) => (s.quit_requested, s.active_prompt.is_some()),
            Err(_) => (true, false),
        };
        if app.should_quit || quit {
            return Ok(());
        }

        // A new prompt arrived: hand it our focus.
        if start_prompt(state, app) {
            debug!("Prompt shown");
            app.status_message = None;
        } else if !has_prompt && app.focus.is_some() {
            app.clear_prompt();
        }

        if let Some(ref log_buf) = config.log_buffer {
            log_buf.flush_into(state);
        }

        terminal.draw(|frame| render(frame, state, app))?;

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            handle_key_event(key, app, state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use tiller_rs::question::{Choice, Focus, Question};
    use tiller_rs::ui::ask_questions;

    #[test]
    fn tui_config_default_has_no_buffer() {
        let config = TuiConfig::default();
        assert!(config.log_buffer.is_none());
        let config = config.with_log_buffer(LogBuffer::default());
        assert!(config.log_buffer.is_some());
    }

    #[test]
    fn app_defaults() {
        let app = App::new();
        assert!(!app.should_quit);
        assert!(!app.show_logs);
        assert!(app.status_message.is_none());
        assert!(app.focus.is_none());
    }

    #[test]
    fn event_loop_exits_when_quit_requested() {
        let state = Arc::new(Mutex::new(UiState::default()));
        ask_questions(&state, vec![Question::new("Ok?", vec![Choice::new("yes")])]);
        state.lock().unwrap().quit_requested = true;

        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut app = App::new();
        event_loop(&mut terminal, &state, &TuiConfig::default(), &mut app).unwrap();

        // Quit is checked before the prompt is started.
        assert!(app.focus.is_none());
        assert!(!state.lock().unwrap().active_prompt.as_ref().unwrap().started);
    }

    #[test]
    fn prompt_start_focuses_app() {
        let state = Arc::new(Mutex::new(UiState::default()));
        ask_questions(&state, vec![Question::new("Name?", vec![])]);
        let mut app = App::new();
        assert!(start_prompt(&state, &mut app));
        assert_eq!(app.focus, Some(Focus::OtherInput(0)));
        assert_eq!(app.active_tab, Some(0));
    }
}
