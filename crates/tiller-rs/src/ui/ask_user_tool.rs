//! LLM-callable tool for asking the human operator questions.
//!
//! When the model needs human input during its tool-use loop it calls
//! `ask_user` with one or more questions. The tool installs them as a
//! prompt via [`ask_questions`] and polls [`UiState`] until the operator
//! answers or cancels.
//!
//! In headless mode (no UI state) the tool returns `unavailable`
//! immediately so the calling code can fall back on its own. If the
//! frontend quits while a prompt is pending the prompt counts as cancelled.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::question::{Question, SessionOutcome};
use crate::tools::core::{Tool, ToolFuture};
use crate::tools::names;
use crate::{ToolDef, json_schema_for};

use super::{UiState, ask_questions, poll_prompt, resolve_prompt};

/// Arguments for the `ask_user` tool.
#[derive(Deserialize, JsonSchema)]
struct AskUserArgs {
    /// Questions to ask, shown as tabs. Each has optional choices; the
    /// operator can always type a free-text answer instead.
    questions: Vec<Question>,
}

/// Tool that lets the model ask the operator one or more questions.
///
/// ```ignore
/// let tools = ToolSet::new().with(AskUserTool::new(Some(ui_state.clone())));
/// ```
pub struct AskUserTool {
    ui_state: Option<Arc<Mutex<UiState>>>,
    poll_interval: Duration,
}

impl AskUserTool {
    /// Pass `Some(state)` when a frontend is attached, `None` for headless.
    pub fn new(ui_state: Option<Arc<Mutex<UiState>>>) -> Self {
        let poll_interval = ui_state
            .as_ref()
            .and_then(|s| s.lock().ok().map(|s| s.config.poll_interval))
            .unwrap_or(Duration::from_millis(200));
        Self {
            ui_state,
            poll_interval,
        }
    }
}

impl Tool for AskUserTool {
    fn definition(&self) -> ToolDef {
        ToolDef::new(
            names::ASK_USER,
            "Ask the human operator one or more questions and wait for the answers. \
             Each question may list choices; the operator can always answer in free text \
             instead. Use this when you need human judgment before proceeding, not for \
             routine decisions you can make yourself.",
            json_schema_for::<AskUserArgs>(),
        )
    }

    fn execute(&self, arguments: &str) -> ToolFuture<'_> {
        let arguments = arguments.to_string();
        Box::pin(async move {
            let args: AskUserArgs = match serde_json::from_str(&arguments) {
                Ok(a) => a,
                Err(e) => return format!("Error: invalid arguments: {e}"),
            };

            if args.questions.is_empty() {
                return "Error: at least 1 question is required".to_string();
            }

            let Some(ref state) = self.ui_state else {
                warn!("ask_user called without a frontend attached");
                return serde_json::json!({"status": "unavailable", "answers": []}).to_string();
            };

            debug!(count = args.questions.len(), "Asking operator");
            ask_questions(state, args.questions);

            loop {
                if let Some(outcome) = poll_prompt(state) {
                    return format_outcome(&outcome);
                }
                let quit = match state.lock() {
                    Ok(s) => s.quit_requested,
                    Err(_) => return format_outcome(&SessionOutcome::Cancelled),
                };
                // A frontend that quit can no longer answer.
                if quit {
                    warn!("Frontend quit with a prompt pending");
                    resolve_prompt(state, SessionOutcome::Cancelled);
                    continue;
                }
                tokio::time::sleep(self.poll_interval).await;
            }
        })
    }
}

/// `{"status": "answered"|"cancelled", "answers": [...]}`
fn format_outcome(outcome: &SessionOutcome) -> String {
    match outcome {
        SessionOutcome::Answered(answers) => serde_json::json!({
            "status": "answered",
            "answers": answers,
        })
        .to_string(),
        SessionOutcome::Cancelled => {
            serde_json::json!({"status": "cancelled", "answers": []}).to_string()
        }
    }
}
