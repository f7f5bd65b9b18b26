//! Tool registry

pub mod ares;

pub use ares::AresInternetTool;

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};

use crate::parser::ActionInput;
use crate::AgentError;

/// Errors raised while running a tool
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not configured: {0}")]
    Config(String),

    #[error("HTTP request failed - {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("{0}")]
    Failed(String),

    #[error("tool panicked: {0}")]
    Panicked(String),
}

type BoxedTool = Box<dyn Tool + Send + Sync>;

/// An external capability the model can invoke by name
#[async_trait]
pub trait Tool: Send + Sync {
    /// Display name; the registry key is derived from it
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    /// Free-text hint describing the expected input
    fn arg(&self) -> &str;

    /// Block shown to the model in the tool catalogue
    fn catalogue_entry(&self) -> String {
        format!(
            "Tool Name: {}\nTool Description: {}\nTool Input: {}",
            self.name(),
            self.description(),
            self.arg()
        )
    }

    async fn run(&self, input: ActionInput) -> Result<String, ToolError>;
}

/// Lookup key for a tool name: trimmed, lowercased, spaces as underscores
pub fn normalize_tool_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Registered tools, in registration order
pub struct ToolRegistry {
    tools: Vec<BoxedTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a registry from a caller-supplied list
    pub fn from_tools(tools: Vec<BoxedTool>) -> crate::Result<Self> {
        let mut registry = Self::new();
        for tool in tools {
            registry.register_boxed(tool)?;
        }
        Ok(registry)
    }

    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> crate::Result<()> {
        self.register_boxed(Box::new(tool))
    }

    /// Add a tool; a second tool normalizing to the same key is rejected
    pub fn register_boxed(&mut self, tool: BoxedTool) -> crate::Result<()> {
        let key = normalize_tool_name(tool.name());
        if key.is_empty() {
            return Err(AgentError::EmptyToolName);
        }

        if let Some(&existing) = self.index.get(&key) {
            return Err(AgentError::DuplicateTool {
                key,
                existing: self.tools[existing].name().to_string(),
                incoming: tool.name().to_string(),
            });
        }

        debug!("Registered tool '{}' as '{}'", tool.name(), key);
        self.index.insert(key, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Look up by any spelling that normalizes to a registered key
    pub fn get(&self, name: &str) -> Option<&(dyn Tool + Send + Sync)> {
        self.index
            .get(&normalize_tool_name(name))
            .map(|&i| self.tools[i].as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.index.contains_key(&normalize_tool_name(name))
    }

    /// Display names, in registration order
    pub fn names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name().to_string()).collect()
    }

    /// Normalized keys, in registration order
    pub fn keys(&self) -> Vec<String> {
        self.tools
            .iter()
            .map(|t| normalize_tool_name(t.name()))
            .collect()
    }

    /// Catalogue blocks separated by blank lines
    pub fn catalogue(&self) -> String {
        self.tools
            .iter()
            .map(|t| t.catalogue_entry())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry with the tools enabled in `config`
pub fn default_tools(config: &reagent_config::Config) -> crate::Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();

    if config.tools.ares.enabled {
        registry.register(AresInternetTool::from_config(config)?)?;
    }

    info!("◆ {} TOOL(S) READY: {:?}", registry.len(), registry.keys());
    Ok(registry)
}
