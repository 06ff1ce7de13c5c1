//! Canonical tool name constants.
//!
//! Mode allow-lists and tool definitions reference these instead of
//! scattering string literals.

pub const READ_FILE: &str = "read_file";
pub const GREP: &str = "grep";
pub const TODO: &str = "todo";
pub const ASK_USER: &str = "ask_user";
