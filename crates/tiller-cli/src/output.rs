//! JSON printed on stdout.

use serde_json::{Value, json};
use tiller_rs::mode::{AgentMode, MODE_ORDER, lookup, mode_icon, safety_class};

/// How an ask session ended, for the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Answered,
    Cancelled,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            Self::Answered => 0,
            Self::Cancelled => 1,
        }
    }
}

/// Every mode in cycle order with its table entry.
pub fn modes_json() -> Value {
    MODE_ORDER
        .iter()
        .map(|&mode| {
            let config = lookup(mode);
            json!({
                "mode": mode,
                "name": config.display_name,
                "description": config.description,
                "icon": mode_icon(mode),
                "safety": config.safety,
                "safety_class": safety_class(config.safety),
                "auto_approve": config.auto_approve,
                "config_overrides": config.config_overrides,
            })
        })
        .collect()
}

/// Turn an `ask_user` tool result into the printed document.
///
/// Adds the mode the operator left the indicator in. Tool errors come back
/// as `Err` with the `Error: ` prefix removed.
pub fn render_result(mode: AgentMode, raw: &str) -> Result<(Value, ExitStatus), String> {
    if let Some(message) = raw.strip_prefix("Error: ") {
        return Err(message.to_string());
    }
    let mut doc: Value =
        serde_json::from_str(raw).map_err(|e| format!("unexpected tool output: {e}"))?;
    let status = match doc["status"].as_str() {
        Some("answered") => ExitStatus::Answered,
        _ => ExitStatus::Cancelled,
    };
    if let Some(obj) = doc.as_object_mut() {
        obj.insert("mode".to_string(), json!(mode));
    }
    Ok((doc, status))
}
