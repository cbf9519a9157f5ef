//! Web search tool — placeholder until a search API integration lands

use crate::error::Result;
use crate::registry::{Tool, ToolDefinition, ToolResult};

/// Placeholder web search tool.
///
/// Declared so the model knows the capability exists; invoking it returns a
/// fixed "not implemented" result.
pub struct WebSearchTool {
    definition: ToolDefinition,
}

impl WebSearchTool {
    /// Create a new web search tool
    #[must_use]
    pub fn new() -> Self {
        let definition = ToolDefinition::new(
            "web_search",
            "Search the web for information (placeholder)",
        )
        .with_parameters(serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                }
            },
            "required": ["query"]
        }));

        Self { definition }
    }
}

impl Default for WebSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for WebSearchTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, _input: serde_json::Value) -> Result<ToolResult> {
        Ok(ToolResult::failure(
            "Web search is not yet implemented. This would require an external search API.",
            0,
        ))
    }
}
