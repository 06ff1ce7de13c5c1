//! The fixed mode table and the cycle order.
//!
//! [`AgentMode`] is a plain tag. Everything a mode *means* lives in a
//! separate, read-only table reached through [`lookup`]. The table is built
//! once on first access and never mutated afterwards.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ToolDef;
use crate::tools::names;

/// Categorical risk label attached to a mode.
///
/// There is no ordering between tiers; renderers map each one to its own
/// visual class (see [`safety_class`](super::safety_class)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyTier {
    Safe,
    Neutral,
    Yolo,
}

/// The agent's autonomy level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentMode {
    /// Every tool execution asks for approval.
    Default,
    /// Read-only exploration with a restricted tool set.
    Plan,
    /// Every tool execution is approved automatically.
    AutoApprove,
}

/// Order in which `shift+tab` walks through the modes.
///
/// Not declaration order: cycling starts from the most
/// permissive mode and steps down.
pub const MODE_ORDER: [AgentMode; 3] =
    [AgentMode::AutoApprove, AgentMode::Plan, AgentMode::Default];

/// Override key carrying the tool allow-list.
pub const ENABLED_TOOLS_KEY: &str = "enabled_tools";

/// Tools available while planning. Read-only by construction.
pub const PLAN_MODE_TOOLS: [&str; 3] = [names::GREP, names::READ_FILE, names::TODO];

/// Properties of a single mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeConfig {
    pub display_name: &'static str,
    pub description: &'static str,
    pub safety: SafetyTier,
    /// Whether tool executions skip the approval prompt.
    pub auto_approve: bool,
    /// Configuration keys the agent loop overrides while in this mode.
    pub config_overrides: Map<String, Value>,
}

impl ModeConfig {
    /// Tool names this mode restricts the agent to, or `None` when the mode
    /// leaves the tool set alone.
    pub fn enabled_tools(&self) -> Option<Vec<&str>> {
        let list = self.config_overrides.get(ENABLED_TOOLS_KEY)?.as_array()?;
        Some(list.iter().filter_map(Value::as_str).collect())
    }

    /// Whether a tool with this name may be offered to the model.
    pub fn allows_tool(&self, name: &str) -> bool {
        self.enabled_tools()
            .is_none_or(|enabled| enabled.contains(&name))
    }

    /// Keep only the definitions this mode allows.
    ///
    /// Allow-list entries without a matching definition are ignored.
    pub fn filter_tools(&self, all_tools: &[ToolDef]) -> Vec<ToolDef> {
        all_tools
            .iter()
            .filter(|t| self.allows_tool(&t.function.name))
            .cloned()
            .collect()
    }

    /// Whether the approval pipeline should prompt before executing tools.
    pub fn requires_approval(&self) -> bool {
        !self.auto_approve
    }
}

struct ModeTable {
    default: ModeConfig,
    plan: ModeConfig,
    auto_approve: ModeConfig,
}

static MODE_CONFIGS: LazyLock<ModeTable> = LazyLock::new(|| {
    let mut plan_overrides = Map::new();
    plan_overrides.insert(
        ENABLED_TOOLS_KEY.to_string(),
        Value::from(PLAN_MODE_TOOLS.to_vec()),
    );

    ModeTable {
        default: ModeConfig {
            display_name: "Default",
            description: "Requires approval for tool executions",
            safety: SafetyTier::Neutral,
            auto_approve: false,
            config_overrides: Map::new(),
        },
        plan: ModeConfig {
            display_name: "Plan",
            description: "Read-only mode for exploration and planning",
            safety: SafetyTier::Safe,
            auto_approve: true,
            config_overrides: plan_overrides,
        },
        auto_approve: ModeConfig {
            display_name: "Auto Approve",
            description: "Auto-approves all tool executions",
            safety: SafetyTier::Yolo,
            auto_approve: true,
            config_overrides: Map::new(),
        },
    }
});

/// Look up the table entry for a mode.
pub fn lookup(mode: AgentMode) -> &'static ModeConfig {
    let table = &*MODE_CONFIGS;
    match mode {
        AgentMode::Default => &table.default,
        AgentMode::Plan => &table.plan,
        AgentMode::AutoApprove => &table.auto_approve,
    }
}

/// Parse a mode name case-insensitively. Anything that is not exactly a
/// mode name (surrounding whitespace included) yields `None`.
pub fn parse_mode(value: &str) -> Option<AgentMode> {
    match value.to_ascii_lowercase().as_str() {
        "default" => Some(AgentMode::Default),
        "plan" => Some(AgentMode::Plan),
        "auto_approve" => Some(AgentMode::AutoApprove),
        _ => None,
    }
}

/// The mode after `current` in [`MODE_ORDER`], wrapping at the end.
pub fn next_mode(current: AgentMode) -> AgentMode {
    let idx = MODE_ORDER
        .iter()
        .position(|m| *m == current)
        .unwrap_or_default();
    MODE_ORDER[(idx + 1) % MODE_ORDER.len()]
}

impl AgentMode {
    /// Wire name (`"default"`, `"plan"`, `"auto_approve"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Plan => "plan",
            Self::AutoApprove => "auto_approve",
        }
    }
}

impl fmt::Display for AgentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_mode(s).ok_or_else(|| {
            let known: Vec<&str> = MODE_ORDER.iter().map(|m| m.as_str()).collect();
            format!("unknown mode '{s}' (expected one of: {})", known.join(", "))
        })
    }
}
