//! Agent - the tool-calling chat loop
//!
//! `Agent::send` drives the conversation protocol: append the user turn,
//! ask the model, execute any requested tool calls in order, feed the
//! results back, and repeat until the model answers in plain text. Tool
//! failures are contained as structured results the model can read;
//! provider failures are not caught and propagate to the caller.

use crate::conversation::Conversation;
use crate::error::{Error, Result};
use metis_llm::{
    CompletionRequest, LlmProvider, Message, ToolCall, ToolCompletionRequest,
    ToolCompletionResponse,
};
use metis_tools::{ToolRegistry, ToolResult, ToolRunner};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default system prompt
const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant with access to various \
     tools. Use them when appropriate to help the user.";

/// Agent configuration
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Model name; empty selects the provider's default
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens per completion
    pub max_tokens: u32,
    /// System prompt injected at request time (not stored in the log)
    pub system_prompt: String,
    /// Cap on model/tool rounds per `send` call
    pub max_tool_iterations: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: String::new(),
            temperature: 0.7,
            max_tokens: 2000,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tool_iterations: 10,
        }
    }
}

impl AgentConfig {
    /// Build a configuration from environment variables.
    ///
    /// Reads `MODEL`, `TEMPERATURE` and `MAX_TOKENS`; unset or unparsable
    /// values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            model: std::env::var("MODEL").unwrap_or(defaults.model),
            temperature: std::env::var("TEMPERATURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.temperature),
            max_tokens: std::env::var("MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_tokens),
            ..defaults
        }
    }

    /// Set the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the system prompt
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Set the iteration cap
    #[must_use]
    pub fn with_max_tool_iterations(mut self, cap: usize) -> Self {
        self.max_tool_iterations = cap;
        self
    }
}

/// A chat agent owning one conversation
pub struct Agent {
    provider: Arc<dyn LlmProvider>,
    runner: ToolRunner,
    conversation: Conversation,
    config: AgentConfig,
}

impl Agent {
    /// Create a new agent
    #[must_use]
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        registry: Arc<ToolRegistry>,
        config: AgentConfig,
    ) -> Self {
        Self {
            provider,
            runner: ToolRunner::with_defaults(registry),
            conversation: Conversation::new(),
            config,
        }
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Get the tool registry
    #[must_use]
    pub fn registry(&self) -> &ToolRegistry {
        self.runner.registry()
    }

    /// Send a user message and run the loop until the model answers in
    /// plain text. Returns that answer.
    ///
    /// # Errors
    /// Propagates provider failures unchanged (the call is non-committed:
    /// turns appended before the failure stay in the log — reset or retry
    /// as needed). Fails with `Error::LoopLimit` when the model keeps
    /// requesting tools past the configured cap.
    pub async fn send(&mut self, text: impl Into<String>) -> Result<String> {
        let text = text.into();
        debug!(chars = text.len(), "User message received");
        self.conversation.append(Message::user(text));

        let tools = self.runner.registry().to_llm_tools();

        let mut iteration = 0usize;
        loop {
            iteration += 1;
            if iteration > self.config.max_tool_iterations {
                warn!(
                    cap = self.config.max_tool_iterations,
                    "Tool loop exceeded iteration cap"
                );
                return Err(Error::LoopLimit(self.config.max_tool_iterations));
            }

            let response = self.request_model(&tools).await?;

            if !response.has_tool_calls() {
                let content = response.content.unwrap_or_default();
                self.conversation.append(Message::assistant(content.clone()));
                debug!(iterations = iteration, "Final answer produced");
                return Ok(content);
            }

            let calls = response.tool_calls;
            self.conversation.append(Message::assistant_with_tool_calls(
                response.content.unwrap_or_default(),
                calls.clone(),
            ));

            // Results are appended in request order, one per call, before
            // the next model request
            for call in &calls {
                let result = self.run_tool_call(call).await;
                let content = serde_json::to_string(&result)?;
                self.conversation
                    .append(Message::tool_response(&call.id, content));
            }
        }
    }

    async fn request_model(
        &self,
        tools: &[metis_llm::ToolDefinition],
    ) -> Result<ToolCompletionResponse> {
        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages: self
                .conversation
                .messages_with_system(&self.config.system_prompt),
            max_tokens: Some(self.config.max_tokens),
            temperature: Some(self.config.temperature),
            stop: None,
        };

        if tools.is_empty() {
            let response = self.provider.complete(request).await?;
            return Ok(ToolCompletionResponse {
                content: Some(response.content),
                tool_calls: Vec::new(),
                usage: response.usage,
                finish_reason: response.finish_reason,
                model: response.model,
            });
        }

        let response = self
            .provider
            .complete_with_tools(ToolCompletionRequest::new(request, tools.to_vec()))
            .await?;
        Ok(response)
    }

    async fn run_tool_call(&self, call: &ToolCall) -> ToolResult {
        info!(tool = %call.name, args = %call.arguments, "Executing tool call");

        let input: serde_json::Value = match serde_json::from_str(&call.arguments) {
            Ok(value) => value,
            Err(e) => {
                warn!(tool = %call.name, error = %e, "Malformed tool call arguments");
                return ToolResult::failure(format!("invalid tool arguments: {e}"), 0);
            }
        };

        self.runner.invoke(&call.name, input).await
    }

    /// Clear the conversation
    pub fn reset_conversation(&mut self) {
        self.conversation.reset();
    }

    /// Get an owned copy of the conversation turns
    #[must_use]
    pub fn history(&self) -> Vec<Message> {
        self.conversation.snapshot()
    }

    /// Get the conversation
    #[must_use]
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Persist the conversation to a file
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save_conversation(&self, path: impl AsRef<Path>) -> Result<()> {
        self.conversation.persist(path)
    }

    /// Restore the conversation from a file (no-op when the file is missing)
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_conversation(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.conversation.restore(path)
    }
}
