//! Builtins - Built-in tools for Metis
//!
//! This module provides the core set of built-in tools:
//! - File tools: read_file, write_file, list_directory
//! - Exec tool: execute_command (shell command execution)
//! - Time tool: get_current_time
//! - Web search: web_search (placeholder)

mod exec;
mod file;
mod time;
mod web_search;

pub use exec::ExecTool;
pub use file::{FileListTool, FileReadTool, FileWriteTool};
pub use time::CurrentTimeTool;
pub use web_search::WebSearchTool;

use crate::error::Result;
use crate::registry::ToolRegistry;
use std::sync::Arc;

/// Register all built-in tools with the registry
///
/// # Errors
/// Returns an error if any built-in definition is rejected by the registry.
pub fn register_builtins(registry: &mut ToolRegistry) -> Result<()> {
    // File tools
    registry.register(Arc::new(FileReadTool::new()))?;
    registry.register(Arc::new(FileWriteTool::new()))?;
    registry.register(Arc::new(FileListTool::new()))?;

    // Exec tool
    registry.register(Arc::new(ExecTool::new()))?;

    // Time tool
    registry.register(Arc::new(CurrentTimeTool::new()))?;

    // Web search tool (placeholder, no API integration yet)
    registry.register(Arc::new(WebSearchTool::new()))?;

    Ok(())
}
