//! Integration tests for Metis
//!
//! These tests verify the integration between the crates:
//! - metis-llm: provider types driving the loop
//! - metis-tools: registry, runner, and built-in tools
//! - metis-core: the agent loop end to end

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use metis_core::{Agent, AgentConfig};
use metis_llm::{
    CompletionRequest, CompletionResponse, LlmProvider, ToolCall, ToolCompletionRequest,
    ToolCompletionResponse,
};
use metis_tools::{register_builtins, register_provider, McpIntegration, ToolRegistry};

/// Provider that replays a fixed script of responses.
struct ScriptedProvider {
    replies: Mutex<VecDeque<ToolCompletionResponse>>,
}

impl ScriptedProvider {
    fn new(replies: Vec<ToolCompletionResponse>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
        }
    }

    fn pop(&self) -> metis_llm::Result<ToolCompletionResponse> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| metis_llm::Error::Api("script exhausted".to_string()))
    }
}

#[async_trait::async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn supports_tools(&self) -> bool {
        true
    }

    fn available_models(&self) -> Vec<String> {
        vec!["scripted".to_string()]
    }

    fn default_model(&self) -> &str {
        "scripted"
    }

    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> metis_llm::Result<CompletionResponse> {
        let reply = self.pop()?;
        Ok(CompletionResponse {
            content: reply.content.unwrap_or_default(),
            usage: reply.usage,
            finish_reason: reply.finish_reason,
            model: reply.model,
        })
    }

    async fn complete_with_tools(
        &self,
        _request: ToolCompletionRequest,
    ) -> metis_llm::Result<ToolCompletionResponse> {
        self.pop()
    }
}

fn final_reply(text: &str) -> ToolCompletionResponse {
    ToolCompletionResponse {
        content: Some(text.to_string()),
        tool_calls: Vec::new(),
        usage: None,
        finish_reason: Some("stop".to_string()),
        model: "scripted".to_string(),
    }
}

fn tool_reply(id: &str, name: &str, arguments: &str) -> ToolCompletionResponse {
    ToolCompletionResponse {
        content: None,
        tool_calls: vec![ToolCall {
            id: id.to_string(),
            name: name.to_string(),
            arguments: arguments.to_string(),
        }],
        usage: None,
        finish_reason: Some("tool_calls".to_string()),
        model: "scripted".to_string(),
    }
}

/// The model asks to write a file; the file actually lands on disk and the
/// loop reaches a final answer.
#[tokio::test]
async fn test_agent_writes_file_through_tool_loop() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("note.txt");
    let arguments = serde_json::json!({
        "path": path,
        "content": "from the loop"
    })
    .to_string();

    let mut registry = ToolRegistry::new();
    register_builtins(&mut registry).unwrap();

    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_reply("call_1", "write_file", &arguments),
        final_reply("Saved the note."),
    ]));

    let mut agent = Agent::new(provider, Arc::new(registry), AgentConfig::default());
    let answer = agent.send("write me a note").await.unwrap();

    assert_eq!(answer, "Saved the note.");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "from the loop");
    assert_eq!(agent.history().len(), 4);
}

/// MCP-declared tools flow through the same registry and come back as the
/// stub result, which the loop feeds to the model without aborting.
#[tokio::test]
async fn test_agent_survives_mcp_stub_tool() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("mcp-config.json");
    McpIntegration::write_example_config(&config_path).unwrap();

    let mut mcp = McpIntegration::new();
    mcp.load_config(&config_path).unwrap();

    let mut registry = ToolRegistry::new();
    register_builtins(&mut registry).unwrap();
    let bridged = register_provider(&mut registry, Arc::new(mcp)).unwrap();
    assert_eq!(bridged, 1);

    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_reply("call_1", "example_tool", r#"{"input": "hello"}"#),
        final_reply("That tool is not wired up yet."),
    ]));

    let mut agent = Agent::new(provider, Arc::new(registry), AgentConfig::default());
    let answer = agent.send("try the example tool").await.unwrap();

    assert_eq!(answer, "That tool is not wired up yet.");

    let tool_turn: serde_json::Value =
        serde_json::from_str(&agent.history()[2].content).unwrap();
    assert_eq!(tool_turn["success"], false);
    assert!(tool_turn["error"]
        .as_str()
        .unwrap()
        .contains("not yet fully implemented"));
}

/// A conversation survives a save/load cycle across agent instances.
#[tokio::test]
async fn test_conversation_survives_agent_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conversation.json");

    let provider = Arc::new(ScriptedProvider::new(vec![final_reply("remembered")]));
    let mut agent = Agent::new(
        provider,
        Arc::new(ToolRegistry::new()),
        AgentConfig::default(),
    );
    agent.send("remember this").await.unwrap();
    agent.save_conversation(&path).unwrap();

    let provider = Arc::new(ScriptedProvider::new(vec![]));
    let mut restarted = Agent::new(
        provider,
        Arc::new(ToolRegistry::new()),
        AgentConfig::default(),
    );
    restarted.load_conversation(&path).unwrap();

    let history = restarted.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].content, "remember this");
    assert_eq!(history[1].content, "remembered");
}
