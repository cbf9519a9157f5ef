//! MCP configuration loading

use super::provider::ToolProvider;
use crate::error::{Error, Result};
use crate::registry::{ToolDefinition, ToolResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// A tool declared in an MCP configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpToolSpec {
    /// Tool name
    pub name: String,
    /// Tool description
    #[serde(default)]
    pub description: String,
    /// Parameter schema; the empty object schema when absent
    #[serde(default)]
    pub parameters: Option<serde_json::Value>,
}

/// An MCP configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpConfig {
    /// Configuration name
    pub name: String,
    /// Configuration version
    #[serde(default)]
    pub version: Option<String>,
    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,
    /// Declared tools
    #[serde(default)]
    pub tools: Vec<McpToolSpec>,
}

/// Loads MCP configurations and exposes their tools as a [`ToolProvider`].
///
/// Server communication is a stub: every invocation returns a structured
/// "not yet implemented" failure result.
#[derive(Debug, Default)]
pub struct McpIntegration {
    configs: Vec<McpConfig>,
}

impl McpIntegration {
    /// Create an empty integration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a single MCP configuration file
    ///
    /// # Errors
    /// Returns an error if the file is missing or not valid JSON.
    pub fn load_config(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::InvalidInput(format!("MCP config not readable: {}: {e}", path.display()))
        })?;

        let config: McpConfig = serde_json::from_str(&contents)?;
        debug!(
            config = %config.name,
            tools = config.tools.len(),
            path = %path.display(),
            "Loaded MCP config"
        );
        self.configs.push(config);
        Ok(())
    }

    /// Load every `.json` configuration file from a directory
    ///
    /// Non-JSON files are skipped; a file that fails to parse is skipped
    /// with a warning. Returns the number of configs loaded.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be read.
    pub fn load_config_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|e| {
            Error::InvalidInput(format!(
                "MCP config directory not readable: {}: {e}",
                dir.display()
            ))
        })?;

        let mut loaded = 0;
        for entry in entries {
            let entry = entry.map_err(Error::Io)?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match self.load_config(&path) {
                Ok(()) => loaded += 1,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping invalid MCP config");
                }
            }
        }

        Ok(loaded)
    }

    /// Number of loaded configurations
    #[must_use]
    pub fn config_count(&self) -> usize {
        self.configs.len()
    }

    /// Write an example configuration file
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn write_example_config(path: impl AsRef<Path>) -> Result<()> {
        let example = McpConfig {
            name: "example-mcp".to_string(),
            version: Some("1.0.0".to_string()),
            description: Some("Example MCP configuration".to_string()),
            tools: vec![McpToolSpec {
                name: "example_tool".to_string(),
                description: "An example MCP tool".to_string(),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "input": {
                            "type": "string",
                            "description": "Example input parameter"
                        }
                    },
                    "required": ["input"]
                })),
            }],
        };

        let json = serde_json::to_string_pretty(&example)?;
        std::fs::write(path, json).map_err(Error::Io)
    }
}

#[async_trait::async_trait]
impl ToolProvider for McpIntegration {
    fn name(&self) -> &str {
        "mcp"
    }

    fn describe(&self) -> Vec<ToolDefinition> {
        self.configs
            .iter()
            .flat_map(|config| config.tools.iter())
            .map(|spec| {
                let mut def = ToolDefinition::new(&spec.name, &spec.description);
                if let Some(parameters) = &spec.parameters {
                    def = def.with_parameters(parameters.clone());
                }
                def
            })
            .collect()
    }

    async fn invoke(&self, tool: &str, args: serde_json::Value) -> Result<ToolResult> {
        Ok(ToolResult {
            success: false,
            output: serde_json::json!({
                "tool": tool,
                "args": args
            }),
            error: Some("MCP tool execution is not yet fully implemented".to_string()),
            duration_ms: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::register_provider;
    use crate::registry::ToolRegistry;
    use std::sync::Arc;

    #[test]
    fn test_example_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mcp-config.json");

        McpIntegration::write_example_config(&path).unwrap();

        let mut mcp = McpIntegration::new();
        mcp.load_config(&path).unwrap();

        assert_eq!(mcp.config_count(), 1);
        let tools = mcp.describe();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "example_tool");
        assert_eq!(tools[0].parameters["required"][0], "input");
    }

    #[test]
    fn test_load_missing_config_is_an_error() {
        let mut mcp = McpIntegration::new();
        let result = mcp.load_config("/nonexistent/mcp.json");
        assert!(result.is_err());
        assert_eq!(mcp.config_count(), 0);
    }

    #[test]
    fn test_load_config_dir_skips_non_json() {
        let dir = tempfile::tempdir().unwrap();
        McpIntegration::write_example_config(dir.path().join("a.json")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a config").unwrap();
        std::fs::write(dir.path().join("broken.json"), "{oops").unwrap();

        let mut mcp = McpIntegration::new();
        let loaded = mcp.load_config_dir(dir.path()).unwrap();

        assert_eq!(loaded, 1);
        assert_eq!(mcp.config_count(), 1);
    }

    #[test]
    fn test_tool_spec_without_parameters_gets_default_schema() {
        let config: McpConfig = serde_json::from_str(
            r#"{"name": "minimal", "tools": [{"name": "t", "description": "d"}]}"#,
        )
        .unwrap();

        let mut mcp = McpIntegration::new();
        mcp.configs.push(config);

        let tools = mcp.describe();
        assert_eq!(tools[0].parameters["type"], "object");
    }

    #[tokio::test]
    async fn test_invoke_is_a_stub() {
        let mcp = McpIntegration::new();
        let result = mcp
            .invoke("anything", serde_json::json!({"x": 1}))
            .await
            .unwrap();

        assert!(!result.success);
        assert!(result.error.unwrap().contains("not yet fully implemented"));
        assert_eq!(result.output["tool"], "anything");
    }

    #[tokio::test]
    async fn test_registered_mcp_tool_reports_stub_through_registry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mcp-config.json");
        McpIntegration::write_example_config(&path).unwrap();

        let mut mcp = McpIntegration::new();
        mcp.load_config(&path).unwrap();

        let mut registry = ToolRegistry::new();
        let count = register_provider(&mut registry, Arc::new(mcp)).unwrap();
        assert_eq!(count, 1);

        let tool = registry.get("example_tool").unwrap();
        let result = tool
            .execute(serde_json::json!({"input": "hi"}))
            .await
            .unwrap();
        assert!(!result.success);
    }
}
