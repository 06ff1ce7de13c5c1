//! Operating modes and multi-question prompts for terminal agents.
//!
//! `tiller-rs` holds the two control surfaces an interactive agent exposes
//! to its operator:
//!
//! - **Modes** ([`mode`]): how much autonomy the agent has. Each
//!   [`AgentMode`](mode::AgentMode) maps through a fixed table to a safety
//!   tier, an auto-approval flag, and configuration overrides such as a
//!   tool allow-list. `shift+tab` style cycling follows
//!   [`MODE_ORDER`](mode::MODE_ORDER).
//! - **Question prompts** ([`question`]): one or more questions shown as
//!   tabs, each with enumerated choices plus a free-text "Other" answer.
//!   A [`QuestionSession`](question::QuestionSession) turns user commands
//!   into state changes and ends with exactly one
//!   [`SessionOutcome`](question::SessionOutcome).
//!
//! Neither surface renders anything. Frontends (see the `tiller-tui`
//! crate) read the state, direct focus through
//! [`FocusTarget`](question::FocusTarget), and feed commands back in.
//!
//! # Where to find things
//!
//! - **Drive a prompt directly:** [`question::QuestionSession`] and
//!   [`question::SessionCommand`].
//! - **Share a prompt between an agent and a frontend:** [`ui::UiState`],
//!   [`ui::ask_questions`], [`ui::dispatch_prompt`], [`ui::poll_prompt`].
//! - **Let the model ask questions:** [`ui::ask_user_tool::AskUserTool`].
//! - **Restrict tools by mode:** [`tools::ToolSet::definitions_for_mode`]
//!   and [`mode::ModeConfig::filter_tools`].
//! - **Show logs inside the frontend:** [`ui::tracing::UiTracingLayer`].
//! - **Tune defaults:** [`config::PromptConfig`].
//!
//! # Example
//!
//! ```
//! use tiller_rs::prelude::*;
//!
//! let mut session = QuestionSession::new(vec![
//!     Question::new("Proceed?", vec![Choice::new("yes"), Choice::new("no")]),
//!     Question::new("Anything else?", vec![]),
//! ]);
//! let mut host = NoFocus;
//! session.start(&mut host);
//!
//! let outcome = session.dispatch(SessionCommand::Submit, &mut host);
//! assert_eq!(
//!     outcome,
//!     Dispatch::Finished(SessionOutcome::Answered(vec![
//!         AnswerRecord { question: "Proceed?".into(), answer: "yes".into(), is_other: false },
//!         AnswerRecord { question: "Anything else?".into(), answer: "".into(), is_other: true },
//!     ]))
//! );
//! ```

pub mod config;
pub mod mode;
pub mod prelude;
pub mod question;
pub mod tools;
pub mod ui;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Generate a JSON Schema `Value` from a type implementing `JsonSchema`.
///
/// Used for tool parameter schemas.
pub fn json_schema_for<T: JsonSchema>() -> serde_json::Value {
    let schema = schemars::schema_for!(T);
    serde_json::to_value(schema)
        .unwrap_or_else(|_| serde_json::json!({"type": "object", "properties": {}}))
}

/// The type of a tool definition. Currently always `Function`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum ToolType {
    #[serde(rename = "function")]
    Function,
}

/// Tool definition in the OpenAI function-calling format.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ToolDef {
    #[serde(rename = "type")]
    pub tool_type: ToolType,
    pub function: FunctionDef,
}

impl ToolDef {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            tool_type: ToolType::Function,
            function: FunctionDef {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FunctionDef {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_def_serializes_in_function_format() {
        let def = ToolDef::new("grep", "Search files", serde_json::json!({"type": "object"}));
        let v = serde_json::to_value(&def).unwrap();
        assert_eq!(v["type"], "function");
        assert_eq!(v["function"]["name"], "grep");
        assert_eq!(v["function"]["parameters"]["type"], "object");
    }

    #[test]
    fn schema_for_question_lists_fields() {
        let schema = json_schema_for::<question::Question>();
        let props = schema["properties"].as_object().unwrap();
        assert!(props.contains_key("question"));
        assert!(props.contains_key("choices"));
    }
}
