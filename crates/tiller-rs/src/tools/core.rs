//! Tool abstraction and mode-aware dispatch.
//!
//! The [`Tool`] trait defines what every tool implements: a static API
//! definition (name, description, JSON schema) and an async `execute`
//! method. Tools are collected into a [`ToolSet`], which exports
//! definitions and dispatches calls by name. Both operations can be
//! narrowed to what an [`AgentMode`] allows.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::ToolDef;
use crate::mode::{AgentMode, lookup};

/// Boxed future returned by [`Tool::execute`].
pub type ToolFuture<'a> = Pin<Box<dyn Future<Output = String> + Send + 'a>>;

// ── Tool trait ─────────────────────────────────────────────────────

/// A tool that an LLM agent can invoke via function-calling.
///
/// Errors are returned as `"Error: ..."` strings rather than panicking;
/// the result goes back to the model either way.
pub trait Tool: Send + Sync {
    /// The tool definition sent to the LLM API.
    fn definition(&self) -> ToolDef;

    /// Execute the tool with the given raw JSON arguments string.
    fn execute(&self, arguments: &str) -> ToolFuture<'_>;

    /// The tool's name, taken from its definition.
    fn name(&self) -> String {
        self.definition().function.name.clone()
    }
}

// ── ToolSet ────────────────────────────────────────────────────────

/// A collection of tools that can be dispatched by name.
///
/// ```ignore
/// let tools = ToolSet::new()
///     .with(AskUserTool::new(Some(ui_state.clone())))
///     .with_default_timeout(Some(Duration::from_secs(600)));
///
/// // Definitions the model may see while planning.
/// let defs = tools.definitions_for_mode(AgentMode::Plan);
/// ```
#[derive(Default)]
pub struct ToolSet {
    tools: HashMap<String, Box<dyn Tool>>,
    /// `None` disables timeouts.
    default_timeout: Option<Duration>,
}

impl fmt::Debug for ToolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSet")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .field("default_timeout", &self.default_timeout)
            .finish()
    }
}

impl ToolSet {
    /// Create an empty tool set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a timeout for every tool execution. Pass `None` to disable.
    pub fn with_default_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: impl Tool + 'static) {
        self.tools.insert(tool.name(), Box::new(tool));
    }

    /// Register a tool (builder pattern).
    pub fn with(mut self, tool: impl Tool + 'static) -> Self {
        self.register(tool);
        self
    }

    /// All tool definitions, sorted by name.
    pub fn definitions(&self) -> Vec<ToolDef> {
        let mut defs: Vec<ToolDef> = self.tools.values().map(|t| t.definition()).collect();
        defs.sort_by(|a, b| a.function.name.cmp(&b.function.name));
        defs
    }

    /// Definitions the given mode allows, sorted by name.
    pub fn definitions_for_mode(&self, mode: AgentMode) -> Vec<ToolDef> {
        lookup(mode).filter_tools(&self.definitions())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute a tool by name.
    pub async fn execute(&self, name: &str, arguments: &str) -> String {
        let Some(tool) = self.tools.get(name) else {
            return format!("Error: unknown tool '{name}'");
        };

        debug!(tool = name, arguments, "Executing tool");
        let start = Instant::now();

        let result = match self.default_timeout {
            Some(limit) => match tokio::time::timeout(limit, tool.execute(arguments)).await {
                Ok(r) => r,
                Err(_) => {
                    info!(
                        "Tool {name} timed out after {:.1}s",
                        start.elapsed().as_secs_f64()
                    );
                    format!(
                        "Error: tool '{name}' timed out after {:.0} seconds",
                        limit.as_secs_f64()
                    )
                }
            },
            None => tool.execute(arguments).await,
        };

        debug!(
            tool = name,
            elapsed_ms = start.elapsed().as_millis() as u64,
            result_bytes = result.len(),
            "Tool finished"
        );
        result
    }

    /// Execute a tool by name, refusing tools the mode does not enable.
    pub async fn execute_in_mode(&self, mode: AgentMode, name: &str, arguments: &str) -> String {
        if !lookup(mode).allows_tool(name) {
            warn!(tool = name, %mode, "Tool not enabled in current mode");
            return format!("Error: tool '{name}' is not enabled in {mode} mode");
        }
        self.execute(name, arguments).await
    }
}
