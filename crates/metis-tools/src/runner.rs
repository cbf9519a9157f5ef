//! Runner - Tool execution engine
//!
//! This module executes tools looked up from the registry with timeout
//! handling and schema validation. `execute` surfaces failures as errors;
//! `invoke` is the containment boundary used by the chat loop — every
//! failure (unknown tool, bad arguments, handler error, timeout) comes back
//! as a structured failure `ToolResult`, never as an error the loop has to
//! unwind.

use crate::error::{Error, Result};
use crate::registry::{ToolRegistry, ToolResult};
use crate::schema;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, error, instrument, warn};

/// Configuration for the tool runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Default timeout for tool execution
    pub default_timeout: Duration,
    /// Maximum timeout allowed
    pub max_timeout: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_secs(30),
            max_timeout: Duration::from_secs(300),
        }
    }
}

impl RunnerConfig {
    /// Create a new configuration with a default timeout
    #[must_use]
    pub fn new(default_timeout: Duration) -> Self {
        Self {
            default_timeout,
            ..Default::default()
        }
    }

    /// Set the maximum timeout
    #[must_use]
    pub fn with_max_timeout(mut self, max_timeout: Duration) -> Self {
        self.max_timeout = max_timeout;
        self
    }
}

/// Tool runner for executing tools with safety measures
pub struct ToolRunner {
    registry: Arc<ToolRegistry>,
    config: RunnerConfig,
}

impl ToolRunner {
    /// Create a new tool runner
    #[must_use]
    pub fn new(registry: Arc<ToolRegistry>, config: RunnerConfig) -> Self {
        Self { registry, config }
    }

    /// Create with default configuration
    #[must_use]
    pub fn with_defaults(registry: Arc<ToolRegistry>) -> Self {
        Self::new(registry, RunnerConfig::default())
    }

    /// Get the registry
    #[must_use]
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Execute a tool by name.
    ///
    /// # Errors
    /// Returns an error when the tool is unknown, the arguments fail schema
    /// validation, or execution times out. A handler that itself fails is
    /// reported as a failure `ToolResult`, not an error.
    #[instrument(skip(self, input), fields(tool = %tool_name))]
    pub async fn execute(&self, tool_name: &str, input: serde_json::Value) -> Result<ToolResult> {
        let tool = self
            .registry
            .get(tool_name)
            .ok_or_else(|| Error::NotFound(tool_name.to_string()))?;

        let definition = tool.definition();
        schema::validate_arguments(&definition.parameters, &input)?;
        tool.validate_input(&input)?;

        let execution_timeout = self.config.default_timeout.min(self.config.max_timeout);

        let start = Instant::now();
        debug!(tool = %tool_name, timeout_ms = %execution_timeout.as_millis(), "Executing tool");

        let result = match timeout(execution_timeout, tool.execute(input)).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                let duration = start.elapsed().as_millis() as u64;
                error!(tool = %tool_name, error = %e, "Tool execution failed");
                ToolResult::failure(e.to_string(), duration)
            }
            Err(_) => {
                let duration = start.elapsed().as_millis() as u64;
                warn!(tool = %tool_name, timeout_ms = %execution_timeout.as_millis(), "Tool execution timed out");
                return Err(Error::Timeout(duration));
            }
        };

        debug!(
            tool = %tool_name,
            success = %result.success,
            duration_ms = %result.duration_ms,
            "Tool execution completed"
        );

        Ok(result)
    }

    /// Execute a tool, converting every failure into a failure `ToolResult`.
    ///
    /// This is the boundary the chat loop calls: nothing escapes as an
    /// error, so a misbehaving tool (or a hallucinated tool name) becomes a
    /// structured result the model can read and recover from.
    #[instrument(skip(self, input), fields(tool = %tool_name))]
    pub async fn invoke(&self, tool_name: &str, input: serde_json::Value) -> ToolResult {
        match self.execute(tool_name, input).await {
            Ok(result) => result,
            Err(e) => {
                warn!(tool = %tool_name, error = %e, "Tool invocation failed");
                ToolResult::failure(e.to_string(), 0)
            }
        }
    }
}

impl Clone for ToolRunner {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Tool, ToolDefinition};

    struct FailingTool {
        definition: ToolDefinition,
    }

    impl FailingTool {
        fn new() -> Self {
            Self {
                definition: ToolDefinition::new("failing", "Always fails"),
            }
        }
    }

    #[async_trait::async_trait]
    impl Tool for FailingTool {
        fn definition(&self) -> &ToolDefinition {
            &self.definition
        }

        async fn execute(&self, _input: serde_json::Value) -> Result<ToolResult> {
            Err(Error::Execution("deliberate failure".to_string()))
        }
    }

    struct SlowTool {
        definition: ToolDefinition,
    }

    #[async_trait::async_trait]
    impl Tool for SlowTool {
        fn definition(&self) -> &ToolDefinition {
            &self.definition
        }

        async fn execute(&self, _input: serde_json::Value) -> Result<ToolResult> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(ToolResult::success(serde_json::Value::Null, 0))
        }
    }

    struct StrictTool {
        definition: ToolDefinition,
    }

    impl StrictTool {
        fn new() -> Self {
            let definition = ToolDefinition::new("strict", "Needs a path").with_parameters(
                serde_json::json!({
                    "type": "object",
                    "properties": {"path": {"type": "string"}},
                    "required": ["path"]
                }),
            );
            Self { definition }
        }
    }

    #[async_trait::async_trait]
    impl Tool for StrictTool {
        fn definition(&self) -> &ToolDefinition {
            &self.definition
        }

        async fn execute(&self, input: serde_json::Value) -> Result<ToolResult> {
            Ok(ToolResult::success(input, 0))
        }
    }

    fn runner_with(tools: Vec<Arc<dyn Tool>>) -> ToolRunner {
        let mut registry = ToolRegistry::new();
        for tool in tools {
            registry.register(tool).unwrap();
        }
        ToolRunner::with_defaults(Arc::new(registry))
    }

    #[tokio::test]
    async fn test_invoke_unknown_tool_is_contained() {
        let runner = runner_with(vec![]);
        let result = runner.invoke("nonexistent", serde_json::json!({})).await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn test_execute_unknown_tool_errors() {
        let runner = runner_with(vec![]);
        let result = runner.execute("nonexistent", serde_json::json!({})).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_failing_handler_becomes_failure_result() {
        let runner = runner_with(vec![Arc::new(FailingTool::new())]);
        let result = runner.execute("failing", serde_json::json!({})).await.unwrap();

        assert!(!result.success);
        assert!(result.error.unwrap().contains("deliberate failure"));
    }

    #[tokio::test]
    async fn test_schema_violation_is_contained_by_invoke() {
        let runner = runner_with(vec![Arc::new(StrictTool::new())]);
        let result = runner.invoke("strict", serde_json::json!({})).await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("path"));
    }

    #[tokio::test]
    async fn test_valid_arguments_pass_through() {
        let runner = runner_with(vec![Arc::new(StrictTool::new())]);
        let result = runner
            .invoke("strict", serde_json::json!({"path": "/tmp/x"}))
            .await;

        assert!(result.success);
        assert_eq!(result.output["path"], "/tmp/x");
    }

    #[tokio::test]
    async fn test_timeout() {
        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(SlowTool {
                definition: ToolDefinition::new("slow", "Sleeps"),
            }))
            .unwrap();
        let runner = ToolRunner::new(
            Arc::new(registry),
            RunnerConfig::new(Duration::from_millis(20)),
        );

        let result = runner.execute("slow", serde_json::json!({})).await;
        assert!(matches!(result, Err(Error::Timeout(_))));

        // And invoke contains it
        let contained = runner.invoke("slow", serde_json::json!({})).await;
        assert!(!contained.success);
    }
}
