use crate::error::{Error, Result};
use crate::registry::{Tool, ToolDefinition, ToolResult};
use std::time::Instant;
use tracing::debug;

/// Tool for writing file contents
pub struct FileWriteTool {
    definition: ToolDefinition,
}

impl FileWriteTool {
    /// Create a new file write tool
    #[must_use]
    pub fn new() -> Self {
        let definition =
            ToolDefinition::new("write_file", "Write content to a file on the filesystem")
                .with_parameters(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "path": {
                            "type": "string",
                            "description": "The path to the file to write"
                        },
                        "content": {
                            "type": "string",
                            "description": "The content to write to the file"
                        }
                    },
                    "required": ["path", "content"]
                }));

        Self { definition }
    }
}

impl Default for FileWriteTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for FileWriteTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolResult> {
        let start = Instant::now();

        let path = input
            .get("path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::InvalidInput("missing 'path' parameter".to_string()))?;

        let content = input
            .get("content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::InvalidInput("missing 'content' parameter".to_string()))?;

        debug!(path = %path, bytes = %content.len(), "Writing file");

        tokio::fs::write(path, content).await.map_err(Error::Io)?;

        let duration = start.elapsed().as_millis() as u64;

        Ok(ToolResult::success(
            serde_json::json!({
                "message": format!("File written to {path}"),
                "path": path,
                "bytes_written": content.len()
            }),
            duration,
        ))
    }
}
