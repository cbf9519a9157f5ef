//! Time tool - current date and time

use crate::error::Result;
use crate::registry::{Tool, ToolDefinition, ToolResult};
use chrono::{Local, Utc};
use std::time::Instant;

/// Tool reporting the current date and time
pub struct CurrentTimeTool {
    definition: ToolDefinition,
}

impl CurrentTimeTool {
    /// Create a new current time tool
    #[must_use]
    pub fn new() -> Self {
        let definition = ToolDefinition::new("get_current_time", "Get the current date and time");
        Self { definition }
    }
}

impl Default for CurrentTimeTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for CurrentTimeTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, _input: serde_json::Value) -> Result<ToolResult> {
        let start = Instant::now();

        let timestamp = Utc::now().to_rfc3339();
        let formatted = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        Ok(ToolResult::success(
            serde_json::json!({
                "timestamp": timestamp,
                "formatted": formatted
            }),
            start.elapsed().as_millis() as u64,
        ))
    }
}
