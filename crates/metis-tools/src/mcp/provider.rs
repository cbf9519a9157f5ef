//! Capability-provider interface and the bridge into the tool registry

use crate::error::Result;
use crate::registry::{Tool, ToolDefinition, ToolRegistry, ToolResult};
use std::sync::Arc;
use tracing::debug;

/// A pluggable source of tools.
///
/// Anything that can describe a set of tools and dispatch an invocation by
/// name can be registered alongside the built-ins. The provider owns the
/// transport (if any); the registry only sees [`Tool`] objects.
#[async_trait::async_trait]
pub trait ToolProvider: Send + Sync {
    /// Provider name (for logging)
    fn name(&self) -> &str;

    /// Describe the tools this provider offers
    fn describe(&self) -> Vec<ToolDefinition>;

    /// Invoke one of the described tools by name
    async fn invoke(&self, tool: &str, args: serde_json::Value) -> Result<ToolResult>;
}

/// One provider-backed tool exposed through the native [`Tool`] trait.
pub struct ProviderTool {
    definition: ToolDefinition,
    tool_name: String,
    provider: Arc<dyn ToolProvider>,
}

impl ProviderTool {
    /// Create a new bridge for the given provider tool.
    #[must_use]
    pub fn new(definition: ToolDefinition, provider: Arc<dyn ToolProvider>) -> Self {
        let tool_name = definition.name.clone();
        Self {
            definition,
            tool_name,
            provider,
        }
    }
}

#[async_trait::async_trait]
impl Tool for ProviderTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolResult> {
        debug!(
            provider = %self.provider.name(),
            tool = %self.tool_name,
            "Dispatching tool call to provider"
        );
        self.provider.invoke(&self.tool_name, input).await
    }
}

/// Register every tool a provider describes.
///
/// Returns the number of tools registered.
///
/// # Errors
/// Returns an error if a described tool has an invalid definition.
pub fn register_provider(
    registry: &mut ToolRegistry,
    provider: Arc<dyn ToolProvider>,
) -> Result<usize> {
    let definitions = provider.describe();
    let count = definitions.len();

    for definition in definitions {
        registry.register(Arc::new(ProviderTool::new(
            definition,
            Arc::clone(&provider),
        )))?;
    }

    Ok(count)
}
