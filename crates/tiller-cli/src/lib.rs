//! Command-line front door for `tiller` prompts.
//!
//! The `tiller` binary opens the terminal prompt, collects the operator's
//! answers through the `ask_user` tool, and prints them as JSON so shell
//! scripts can branch on them.
//!
//! ```sh
//! # Questions from flags: TEXT|CHOICE|CHOICE...
//! tiller ask -q "Deploy now?|yes|no - wait for review" -q "Release notes?"
//!
//! # Questions from a file, opening in plan mode
//! tiller ask --questions questions.json --mode plan
//!
//! # The mode table
//! tiller modes
//! ```
//!
//! # Library usage
//!
//! ```ignore
//! use tiller_cli::{AskConfig, questions_from_flags};
//!
//! let questions = questions_from_flags(&["Proceed?|yes|no".into()])?;
//! let config = AskConfig::default();
//! let state = config.build_ui_state();
//! let tools = config.build_tool_set(&state);
//! ```

pub mod config;
pub mod output;
pub mod questions;

pub use config::AskConfig;
pub use output::{ExitStatus, modes_json, render_result};
pub use questions::{load_questions, parse_questions, questions_from_flags};
