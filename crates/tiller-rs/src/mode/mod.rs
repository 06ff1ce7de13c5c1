//! Agent operating modes.
//!
//! A mode decides how much approval tool executions need and which tools
//! the agent may see. The pieces:
//!
//! - [`AgentMode`] and [`SafetyTier`]: plain tags.
//! - [`lookup`]: the read-only table mapping a mode to its [`ModeConfig`].
//! - [`next_mode`] / [`MODE_ORDER`]: the fixed cycling order.
//! - [`ModeIndicator`]: the current mode plus its display caption.
//!
//! ```
//! use tiller_rs::mode::{AgentMode, lookup, next_mode, parse_mode};
//!
//! let mode = parse_mode("PLAN").unwrap();
//! assert!(lookup(mode).auto_approve);
//! assert_eq!(next_mode(mode), AgentMode::Default);
//! ```

mod indicator;
mod registry;

pub use indicator::{DEFAULT_CYCLE_HINT, ModeIndicator};
pub use registry::{
    AgentMode, ENABLED_TOOLS_KEY, MODE_ORDER, ModeConfig, PLAN_MODE_TOOLS, SafetyTier, lookup,
    next_mode, parse_mode,
};

/// Icon shown in front of the mode caption.
pub fn mode_icon(mode: AgentMode) -> &'static str {
    match mode {
        AgentMode::Default => "\u{23f5}",
        AgentMode::Plan => "\u{23f8}\u{fe0e}",
        AgentMode::AutoApprove => "\u{23f5}\u{23f5}",
    }
}

/// Style class a renderer attaches for a safety tier.
pub fn safety_class(tier: SafetyTier) -> &'static str {
    match tier {
        SafetyTier::Safe => "mode-safe",
        SafetyTier::Neutral => "mode-neutral",
        SafetyTier::Yolo => "mode-yolo",
    }
}
