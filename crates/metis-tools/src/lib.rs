//! Metis Tools - Tool Registry and Execution Engine
//!
//! This crate provides the tool system for Metis:
//! - Registry: Tool registration and discovery
//! - Runner: Tool execution engine with timeouts and error containment
//! - Builtins: Built-in tools (file, exec, time, web search)
//! - Mcp: external capability-provider configuration (stub)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod builtins;
pub mod error;
pub mod mcp;
pub mod registry;
pub mod runner;
pub mod schema;

pub use builtins::register_builtins;
pub use error::{Error, Result};
pub use mcp::{register_provider, McpIntegration, ProviderTool, ToolProvider};
pub use registry::{Tool, ToolDefinition, ToolRegistry, ToolResult};
pub use runner::{RunnerConfig, ToolRunner};
