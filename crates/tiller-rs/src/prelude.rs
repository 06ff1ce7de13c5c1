//! Convenience re-exports for common `tiller-rs` types.
//!
//! ```ignore
//! use tiller_rs::prelude::*;
//! ```
//!
//! Covers driving a prompt, sharing it through [`UiState`], and reading
//! mode properties. The tracing layer and tool-name constants stay in
//! their modules.

// ── Modes ───────────────────────────────────────────────────────────
pub use crate::mode::{
    AgentMode, MODE_ORDER, ModeConfig, ModeIndicator, SafetyTier, lookup, mode_icon, next_mode,
    parse_mode, safety_class,
};

// ── Question prompts ────────────────────────────────────────────────
pub use crate::question::{
    AnswerRecord, Choice, Dispatch, Focus, FocusTarget, NoFocus, Question, QuestionSession,
    SessionCommand, SessionOutcome,
};

// ── Shared UI state ─────────────────────────────────────────────────
pub use crate::config::PromptConfig;
pub use crate::ui::ask_user_tool::AskUserTool;
pub use crate::ui::{
    UiState, ask_questions, cycle_mode, dispatch_prompt, poll_prompt, resolve_prompt,
    start_prompt,
};

// ── Tools ───────────────────────────────────────────────────────────
pub use crate::tools::{Tool, ToolFuture, ToolSet};
pub use crate::{ToolDef, json_schema_for};
