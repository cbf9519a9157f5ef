//! MCP (Model Context Protocol) integration
//!
//! Loads MCP tool declarations from JSON configuration files and exposes
//! them through the generic [`ToolProvider`] interface. Any provider — an
//! MCP config set, or a future network-backed client — plugs into the
//! registry the same way a built-in tool does, via [`ProviderTool`].
//!
//! Actual MCP server communication is not implemented: invoking a declared
//! tool returns a structured "not yet implemented" result.

mod config;
mod provider;

pub use config::{McpConfig, McpIntegration, McpToolSpec};
pub use provider::{register_provider, ProviderTool, ToolProvider};
