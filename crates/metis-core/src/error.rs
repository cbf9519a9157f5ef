//! Error types for metis-core

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (missing credential, bad settings)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// LLM provider error
    #[error("llm error: {0}")]
    Llm(#[from] metis_llm::Error),

    /// Tool system error
    #[error("tool error: {0}")]
    Tool(#[from] metis_tools::Error),

    /// The tool loop exceeded the configured iteration cap
    #[error("tool loop exceeded {0} iterations")]
    LoopLimit(usize),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
