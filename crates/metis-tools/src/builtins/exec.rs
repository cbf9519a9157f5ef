//! Exec tool - shell command execution

use crate::error::{Error, Result};
use crate::registry::{Tool, ToolDefinition, ToolResult};
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::debug;

/// Command execution timeout (seconds)
const EXEC_TIMEOUT_SECS: u64 = 60;

/// Tool for executing shell commands
pub struct ExecTool {
    definition: ToolDefinition,
}

impl ExecTool {
    /// Create a new exec tool
    #[must_use]
    pub fn new() -> Self {
        let definition = ToolDefinition::new(
            "execute_command",
            "Execute a shell command and return the output",
        )
        .with_parameters(serde_json::json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": "The shell command to execute"
                }
            },
            "required": ["command"]
        }));

        Self { definition }
    }
}

impl Default for ExecTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for ExecTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolResult> {
        let start = Instant::now();

        let command = input
            .get("command")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::InvalidInput("missing 'command' parameter".to_string()))?;

        debug!(command = %command, "Executing command");

        let child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Execution(e.to_string()))?;

        let output = tokio::time::timeout(
            std::time::Duration::from_secs(EXEC_TIMEOUT_SECS),
            child.wait_with_output(),
        )
        .await
        .map_err(|_| Error::Timeout(EXEC_TIMEOUT_SECS * 1000))?
        .map_err(|e| Error::Execution(e.to_string()))?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
        let exit_code = output.status.code().unwrap_or(-1);
        let duration = start.elapsed().as_millis() as u64;

        if output.status.success() {
            Ok(ToolResult::success(
                serde_json::json!({
                    "stdout": stdout,
                    "stderr": stderr,
                    "exit_code": exit_code
                }),
                duration,
            ))
        } else {
            // Keep stdout/stderr so the model can see why the command failed
            Ok(ToolResult {
                success: false,
                output: serde_json::json!({
                    "stdout": stdout,
                    "stderr": stderr,
                    "exit_code": exit_code
                }),
                error: Some(format!("command exited with code {exit_code}")),
                duration_ms: duration,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_execute_command() {
        let tool = ExecTool::new();
        let result = tool
            .execute(serde_json::json!({"command": "echo hello"}))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.output["stdout"], "hello");
        assert_eq!(result.output["exit_code"], 0);
    }

    #[tokio::test]
    async fn test_failed_command_keeps_output() {
        let tool = ExecTool::new();
        let result = tool
            .execute(serde_json::json!({"command": "echo oops >&2; exit 3"}))
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.output["exit_code"], 3);
        assert_eq!(result.output["stderr"], "oops");
        assert!(result.error.unwrap().contains("3"));
    }

    #[tokio::test]
    async fn test_missing_command_parameter() {
        let tool = ExecTool::new();
        let result = tool.execute(serde_json::json!({})).await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
