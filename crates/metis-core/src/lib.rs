//! Metis Core - conversation state and the chat loop
//!
//! This crate ties the provider and tool layers together:
//! - Conversation: ordered, append-only turn log with persist/restore
//! - Agent: the tool-calling loop driving model turns and tool execution

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod agent;
pub mod conversation;
pub mod error;

pub use agent::{Agent, AgentConfig};
pub use conversation::Conversation;
pub use error::{Error, Result};
