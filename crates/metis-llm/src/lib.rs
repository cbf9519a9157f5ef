//! Metis LLM - LLM provider abstraction
//!
//! This crate provides the LLM integration for Metis:
//! - Provider: trait definition and the core message/tool-call types
//! - OpenAI: OpenAI-compatible chat-completions provider (reqwest)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod openai;
pub mod provider;
mod util;

pub use error::{Error, Result};
pub use openai::{OpenAiConfig, OpenAiProvider};
pub use provider::{
    CompletionRequest, CompletionResponse, LlmProvider, Message, MessageRole, TokenUsage, ToolCall,
    ToolChoice, ToolCompletionRequest, ToolCompletionResponse, ToolDefinition,
};
