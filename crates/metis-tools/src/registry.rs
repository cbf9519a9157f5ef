//! Registry - Tool registration and discovery
//!
//! This module provides a registry for managing the tools available to the
//! agent. The registry is map-like, keyed by tool name: registering a second
//! tool under an existing name replaces the first (last write wins).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// The default parameter schema: an object with no properties.
fn empty_object_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {},
        "required": []
    })
}

/// Tool metadata and schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique tool name
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// JSON schema for parameters
    pub parameters: serde_json::Value,
}

impl ToolDefinition {
    /// Create a new tool definition with the empty object schema
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: empty_object_schema(),
        }
    }

    /// Set the parameters schema
    #[must_use]
    pub fn with_parameters(mut self, parameters: serde_json::Value) -> Self {
        self.parameters = parameters;
        self
    }
}

/// Result of a tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Whether execution succeeded
    pub success: bool,
    /// Output data
    pub output: serde_json::Value,
    /// Error message if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Execution duration in milliseconds
    pub duration_ms: u64,
}

impl ToolResult {
    /// Create a successful result
    #[must_use]
    pub fn success(output: serde_json::Value, duration_ms: u64) -> Self {
        Self {
            success: true,
            output,
            error: None,
            duration_ms,
        }
    }

    /// Create a failed result
    #[must_use]
    pub fn failure(error: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            success: false,
            output: serde_json::Value::Null,
            error: Some(error.into()),
            duration_ms,
        }
    }
}

/// Trait for tool implementations
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool definition
    fn definition(&self) -> &ToolDefinition;

    /// Execute the tool with given input
    async fn execute(&self, input: serde_json::Value) -> Result<ToolResult>;

    /// Validate input before execution
    fn validate_input(&self, input: &serde_json::Value) -> Result<()> {
        if !input.is_object() {
            return Err(Error::InvalidInput("input must be an object".to_string()));
        }
        Ok(())
    }
}

/// Registry for managing tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    definitions: HashMap<String, ToolDefinition>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            definitions: HashMap::new(),
        }
    }

    /// Register a tool. A tool registered under an existing name replaces
    /// the previous registration.
    ///
    /// # Errors
    /// Returns `Error::InvalidDefinition` if the tool's name or description
    /// is empty.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let def = tool.definition();
        if def.name.trim().is_empty() {
            return Err(Error::InvalidDefinition(
                "tool name must not be empty".to_string(),
            ));
        }
        if def.description.trim().is_empty() {
            return Err(Error::InvalidDefinition(format!(
                "tool '{}' has no description",
                def.name
            )));
        }

        let name = def.name.clone();
        debug!(tool = %name, "Registering tool");
        self.definitions.insert(name.clone(), def.clone());
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Get a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Get a tool definition by name
    #[must_use]
    pub fn get_definition(&self, name: &str) -> Option<&ToolDefinition> {
        self.definitions.get(name)
    }

    /// Check if a tool exists
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// List all tool names
    #[must_use]
    pub fn list_names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// List all tool definitions
    #[must_use]
    pub fn list_definitions(&self) -> Vec<&ToolDefinition> {
        self.definitions.values().collect()
    }

    /// Get tool count
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Convert definitions to the LLM tool format
    #[must_use]
    pub fn to_llm_tools(&self) -> Vec<metis_llm::ToolDefinition> {
        self.definitions
            .values()
            .map(|def| {
                metis_llm::ToolDefinition::new(&def.name, &def.description, def.parameters.clone())
            })
            .collect()
    }
}
