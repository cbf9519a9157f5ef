use crate::error::{Error, Result};
use crate::registry::{Tool, ToolDefinition, ToolResult};
use chrono::{DateTime, Utc};
use std::time::Instant;
use tracing::debug;

/// Tool for listing directory contents
pub struct FileListTool {
    definition: ToolDefinition,
}

impl FileListTool {
    /// Create a new directory listing tool
    #[must_use]
    pub fn new() -> Self {
        let definition = ToolDefinition::new("list_directory", "List the contents of a directory")
            .with_parameters(serde_json::json!({
                "type": "object",
                "properties": {
                    "path": {
                        "type": "string",
                        "description": "The path to the directory to list"
                    }
                },
                "required": ["path"]
            }));

        Self { definition }
    }
}

impl Default for FileListTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for FileListTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolResult> {
        let start = Instant::now();

        let path = input
            .get("path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::InvalidInput("missing 'path' parameter".to_string()))?;

        debug!(path = %path, "Listing directory");

        let mut entries = tokio::fs::read_dir(path).await.map_err(Error::Io)?;
        let mut contents = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(Error::Io)? {
            let metadata = entry.metadata().await.map_err(Error::Io)?;
            let modified = metadata
                .modified()
                .ok()
                .map(|t| DateTime::<Utc>::from(t).to_rfc3339());

            contents.push(serde_json::json!({
                "name": entry.file_name().to_string_lossy(),
                "type": if metadata.is_dir() { "directory" } else { "file" },
                "size": metadata.len(),
                "modified": modified
            }));
        }

        // Stable output order regardless of filesystem iteration order
        contents.sort_by(|a, b| {
            a["name"]
                .as_str()
                .unwrap_or_default()
                .cmp(b["name"].as_str().unwrap_or_default())
        });

        let duration = start.elapsed().as_millis() as u64;

        Ok(ToolResult::success(
            serde_json::json!({
                "path": path,
                "contents": contents
            }),
            duration,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "aaa").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let tool = FileListTool::new();
        let result = tool
            .execute(serde_json::json!({"path": dir.path()}))
            .await
            .unwrap();

        assert!(result.success);
        let contents = result.output["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 2);
        assert_eq!(contents[0]["name"], "a.txt");
        assert_eq!(contents[0]["type"], "file");
        assert_eq!(contents[0]["size"], 3);
        assert_eq!(contents[1]["name"], "sub");
        assert_eq!(contents[1]["type"], "directory");
    }

    #[tokio::test]
    async fn test_list_missing_directory() {
        let tool = FileListTool::new();
        let result = tool
            .execute(serde_json::json!({"path": "/nonexistent/dir"}))
            .await;

        assert!(result.is_err());
    }
}
