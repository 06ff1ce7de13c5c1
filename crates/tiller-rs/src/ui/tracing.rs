//! Tracing layer that captures log events for display inside a frontend.
//!
//! While a full-screen prompt owns the terminal, log output on stderr would
//! tear the display. [`UiTracingLayer`] instead pushes each event into a
//! [`LogBuffer`] guarded by its own mutex; the frontend flushes the buffer
//! into [`UiState::logs`](super::UiState::logs) between frames, so logging
//! never waits on the render lock.

use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use chrono::Local;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use super::{LOG_TRIM_TO, LogLevel, LogLine, MAX_LOG_LINES, UiState};

/// Drop the oldest lines once `lines` grows past [`MAX_LOG_LINES`].
fn cap_lines(lines: &mut Vec<LogLine>) {
    if lines.len() > MAX_LOG_LINES {
        let excess = lines.len() - LOG_TRIM_TO;
        lines.drain(..excess);
    }
}

/// Pending log lines waiting to be shown.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<LogLine>>>);

impl LogBuffer {
    /// Take every pending line.
    pub fn drain(&self) -> Vec<LogLine> {
        let mut lines = self.0.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *lines)
    }

    /// Move pending lines into `UiState::logs`.
    ///
    /// Locks the state only when there is something to move.
    pub fn flush_into(&self, state: &Arc<Mutex<UiState>>) {
        let lines = self.drain();
        if lines.is_empty() {
            return;
        }
        if let Ok(mut s) = state.lock() {
            s.logs.extend(lines);
            cap_lines(&mut s.logs);
        }
    }

    fn push(&self, line: LogLine) {
        if let Ok(mut lines) = self.0.lock() {
            lines.push(line);
            cap_lines(&mut lines);
        }
    }
}

/// A [`Layer`] writing every event into a [`LogBuffer`].
pub struct UiTracingLayer {
    buffer: LogBuffer,
}

impl UiTracingLayer {
    /// Create the layer and the buffer a frontend drains.
    pub fn new() -> (Self, LogBuffer) {
        let buffer = LogBuffer::default();
        (
            Self {
                buffer: buffer.clone(),
            },
            buffer,
        )
    }
}

impl<S: Subscriber + for<'a> LookupSpan<'a>> Layer<S> for UiTracingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        let level = match *event.metadata().level() {
            Level::TRACE => LogLevel::Trace,
            Level::DEBUG => LogLevel::Debug,
            Level::INFO => LogLevel::Info,
            Level::WARN => LogLevel::Warn,
            Level::ERROR => LogLevel::Error,
        };

        self.buffer.push(LogLine {
            time: Local::now().format("%H:%M:%S").to_string(),
            level,
            message: visitor.finish(),
        });
    }
}

/// Collects the `message` field and any structured fields of one event.
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: Vec<String>,
}

impl LineVisitor {
    /// `message {k=v, ...}`, or just the fields when there is no message.
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields.join(" "),
            (false, false) => format!("{} {{{}}}", self.message, self.fields.join(", ")),
        }
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={value}", field.name()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            // `format_args!` messages arrive here and print without quotes.
            self.message = format!("{value:?}");
        } else {
            self.fields.push(format!("{}={value:?}", field.name()));
        }
    }
}
