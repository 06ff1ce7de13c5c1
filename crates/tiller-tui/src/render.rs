//! Rendering for the prompt TUI.

use std::sync::{Arc, Mutex};

use ratatui::prelude::*;
use ratatui::widgets::*;
use tiller_rs::question::{Focus, QuestionSession};
use tiller_rs::ui::{LogLevel, LogLine, UiState};

use crate::app::App;

// ── Public Utilities ──────────────────────────────────────────────────

/// Map a mode safety class (`mode-safe`, `mode-neutral`, `mode-yolo`) to a
/// ratatui [`Style`].
pub fn safety_style(class: &str) -> Style {
    match class {
        "mode-safe" => Style::default().fg(Color::Green),
        "mode-yolo" => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::Blue),
    }
}

/// Map a log level to a ratatui [`Style`].
pub fn log_level_style(level: LogLevel) -> Style {
    match level {
        LogLevel::Trace => Style::default().fg(Color::DarkGray),
        LogLevel::Debug => Style::default().fg(Color::Cyan),
        LogLevel::Info => Style::default().fg(Color::Green),
        LogLevel::Warn => Style::default().fg(Color::Yellow),
        LogLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

// ── Root Render ───────────────────────────────────────────────────────

/// Snapshot of UiState fields needed for rendering.
///
/// Cloned in one shot so the `UiState` lock is held only for the clone,
/// never while widgets are built.
struct RenderSnapshot {
    caption: String,
    safety_class: &'static str,
    phase: String,
    running: bool,
    /// The prompt, unless it already has an outcome.
    session: Option<QuestionSession>,
    max_choices: usize,
    logs: Vec<LogLine>,
}

impl RenderSnapshot {
    fn take(state: &Arc<Mutex<UiState>>, app: &App) -> Self {
        let s = state.lock().unwrap_or_else(|e| e.into_inner());
        Self {
            caption: s.mode.caption(),
            safety_class: s.mode.safety_class(),
            phase: s.phase.clone(),
            running: s.running,
            session: s
                .active_prompt
                .as_ref()
                .filter(|p| p.outcome.is_none())
                .map(|p| p.session.clone()),
            max_choices: s.config.max_choices,
            logs: if app.show_logs {
                s.logs.clone()
            } else {
                Vec::new()
            },
        }
    }
}

pub(crate) fn render(frame: &mut Frame, state: &Arc<Mutex<UiState>>, app: &App) {
    let snap = RenderSnapshot::take(state, app);

    let mut constraints = vec![Constraint::Length(3), Constraint::Min(6)];
    if app.show_logs {
        constraints.push(Constraint::Percentage(35));
    }
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    render_mode_bar(frame, chunks[0], &snap);

    match snap.session {
        Some(ref session) => render_prompt(frame, chunks[1], session, snap.max_choices, app),
        None => render_idle(frame, chunks[1], &snap),
    }

    if app.show_logs {
        render_logs(frame, chunks[2], &snap.logs);
    }

    let footer = chunks[chunks.len() - 1];
    render_footer(frame, footer, &snap, app);
}

// ── Mode Bar ──────────────────────────────────────────────────────────

fn render_mode_bar(frame: &mut Frame, area: Rect, snap: &RenderSnapshot) {
    let style = safety_style(snap.safety_class);
    let line = Line::from(vec![
        Span::styled(snap.caption.as_str(), style),
        Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
        Span::styled(snap.phase.as_str(), Style::default().fg(Color::White)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(" tiller ");

    frame.render_widget(Paragraph::new(line).block(block), area);
}

// ── Question Prompt ───────────────────────────────────────────────────

fn render_prompt(
    frame: &mut Frame,
    area: Rect,
    session: &QuestionSession,
    max_choices: usize,
    app: &App,
) {
    let Some(panel) = session.active_panel() else {
        return;
    };

    let accent = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);

    let mut lines: Vec<Line> = Vec::new();

    let labels = session.tab_labels();
    if labels.len() > 1 {
        let active = app.active_tab.unwrap_or(session.active_tab());
        let mut spans = Vec::with_capacity(labels.len() * 2);
        for (i, label) in labels.into_iter().enumerate() {
            let style = if i == active {
                accent.add_modifier(Modifier::REVERSED)
            } else {
                dim
            };
            spans.push(Span::styled(format!(" {label} "), style));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
        lines.push(Line::default());
    }

    lines.push(Line::from(Span::styled(
        panel.question().question.as_str(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::default());

    let selected = panel.selected_option();
    for (i, text) in panel.option_lines().into_iter().enumerate() {
        let style = if i == selected {
            accent
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    let other_row = lines.len();
    let cursor = panel.other_cursor();
    let cursor_style = if panel.is_other_mode() {
        accent
    } else {
        Style::default()
    };
    let other_text = if panel.other_text().is_empty() {
        Span::styled("_", dim)
    } else {
        Span::raw(panel.other_text())
    };
    let other_line = Line::from(vec![Span::styled(cursor, cursor_style), other_text]);
    // Display width, so wide characters move the cursor two columns.
    let other_width = if panel.other_text().is_empty() {
        Span::raw(cursor).width()
    } else {
        other_line.width()
    };
    lines.push(other_line);

    let padding = panel.padding_lines(session.max_choices()).min(max_choices);
    lines.extend(std::iter::repeat_n(Line::default(), padding));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(session.help_text(), dim)));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Question ");

    frame.render_widget(Paragraph::new(lines).block(block), area);

    // Place the terminal cursor at the end of the free-text answer.
    if let Some(Focus::OtherInput(i)) = app.focus
        && i == panel.index()
        && let Ok(col) = u16::try_from(other_width)
        && let Ok(row) = u16::try_from(other_row)
    {
        let x = area.x.saturating_add(1).saturating_add(col);
        let y = area.y.saturating_add(1).saturating_add(row);
        if x < area.right().saturating_sub(1) && y < area.bottom().saturating_sub(1) {
            frame.set_cursor_position(Position::new(x, y));
        }
    }
}

fn render_idle(frame: &mut Frame, area: Rect, snap: &RenderSnapshot) {
    let text = if snap.running {
        "No questions pending."
    } else {
        "Agent finished."
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Question ");
    let paragraph = Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray)))
        .block(block);
    frame.render_widget(paragraph, area);
}

// ── Log Pane ──────────────────────────────────────────────────────────

fn render_logs(frame: &mut Frame, area: Rect, logs: &[LogLine]) {
    let inner_height = area.height.saturating_sub(2) as usize;
    let start = logs.len().saturating_sub(inner_height);

    let lines: Vec<Line> = logs[start..]
        .iter()
        .map(|log| {
            Line::from(vec![
                Span::styled(
                    format!("{} ", log.time),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{} ", log.level.label()),
                    log_level_style(log.level),
                ),
                Span::raw(log.message.as_str()),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Log ");

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

// ── Footer ────────────────────────────────────────────────────────────

fn render_footer(frame: &mut Frame, area: Rect, snap: &RenderSnapshot, app: &App) {
    let hint = match (&app.status_message, &snap.session) {
        (Some(msg), None) => msg.clone(),
        (_, Some(_)) => "[Ctrl+C] cancel and quit".to_string(),
        (None, None) => "[q] quit  [,] toggle logs  [shift+tab] cycle mode".to_string(),
    };
    let paragraph = Paragraph::new(Span::styled(
        format!(" {hint}"),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(paragraph, area);
}

// ── Tests ─────────────────────────────────────────────────────────────
