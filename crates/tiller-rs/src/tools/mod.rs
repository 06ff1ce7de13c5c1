//! Tool abstractions and mode-aware dispatch.
//!
//! - [`core`]: the [`Tool`] trait and the [`ToolSet`] dispatcher, with
//!   [`ToolSet::definitions_for_mode`] applying a mode's tool allow-list.
//! - [`names`]: canonical tool name constants.

pub mod core;
pub mod names;

pub use core::{Tool, ToolFuture, ToolSet};
