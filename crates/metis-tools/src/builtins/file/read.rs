use crate::error::{Error, Result};
use crate::registry::{Tool, ToolDefinition, ToolResult};
use std::time::Instant;
use tokio::io::AsyncReadExt;
use tracing::debug;

/// Default read cap (1MB)
const DEFAULT_MAX_BYTES: u64 = 1_048_576;

/// Tool for reading file contents
pub struct FileReadTool {
    definition: ToolDefinition,
}

impl FileReadTool {
    /// Create a new file read tool
    #[must_use]
    pub fn new() -> Self {
        let definition =
            ToolDefinition::new("read_file", "Read the contents of a file from the filesystem")
                .with_parameters(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "path": {
                            "type": "string",
                            "description": "The path to the file to read"
                        },
                        "max_bytes": {
                            "type": "integer",
                            "description": "Maximum bytes to read (default: 1MB)"
                        }
                    },
                    "required": ["path"]
                }));

        Self { definition }
    }
}

impl Default for FileReadTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for FileReadTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolResult> {
        let start = Instant::now();

        let path = input
            .get("path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::InvalidInput("missing 'path' parameter".to_string()))?;

        let max_bytes = input
            .get("max_bytes")
            .and_then(|v| v.as_u64())
            .unwrap_or(DEFAULT_MAX_BYTES);

        debug!(path = %path, max_bytes = %max_bytes, "Reading file");

        let file = tokio::fs::File::open(path).await.map_err(Error::Io)?;

        let mut contents = Vec::new();
        let mut take = file.take(max_bytes);
        take.read_to_end(&mut contents).await.map_err(Error::Io)?;

        let truncated = contents.len() as u64 >= max_bytes;
        let content = String::from_utf8_lossy(&contents).to_string();
        let duration = start.elapsed().as_millis() as u64;

        Ok(ToolResult::success(
            serde_json::json!({
                "content": content,
                "path": path,
                "size": contents.len(),
                "truncated": truncated
            }),
            duration,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[tokio::test]
    async fn test_read_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hello metis").unwrap();

        let tool = FileReadTool::new();
        let result = tool
            .execute(serde_json::json!({"path": file.path()}))
            .await
            .unwrap();

        assert!(result.success);
        assert!(result.output["content"]
            .as_str()
            .unwrap()
            .contains("hello metis"));
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let tool = FileReadTool::new();
        let result = tool
            .execute(serde_json::json!({"path": "/nonexistent/definitely/missing"}))
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_read_respects_max_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", "x".repeat(64)).unwrap();

        let tool = FileReadTool::new();
        let result = tool
            .execute(serde_json::json!({"path": file.path(), "max_bytes": 16}))
            .await
            .unwrap();

        assert_eq!(result.output["content"].as_str().unwrap().len(), 16);
        assert_eq!(result.output["truncated"], true);
    }
}
