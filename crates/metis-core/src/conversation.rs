//! Conversation - ordered, append-only turn log
//!
//! One conversation belongs to exactly one agent. Turns are appended and
//! never mutated; the log only shrinks via an explicit [`Conversation::reset`]
//! or is replaced wholesale by [`Conversation::restore`]. The system prompt
//! is not stored here — it is prepended at request time.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use metis_llm::Message;
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

/// A conversation log
#[derive(Debug, Clone)]
pub struct Conversation {
    /// Conversation ID
    pub id: Uuid,
    messages: Vec<Message>,
    /// Last activity timestamp
    pub last_activity: DateTime<Utc>,
}

impl Conversation {
    /// Create a new empty conversation
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            messages: Vec::new(),
            last_activity: Utc::now(),
        }
    }

    /// Append a turn
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
        self.last_activity = Utc::now();
    }

    /// Clear all turns
    pub fn reset(&mut self) {
        self.messages.clear();
        self.last_activity = Utc::now();
    }

    /// Get the turns
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Get an owned copy of the turns; later appends do not affect it
    #[must_use]
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    /// Get the turns with a system prompt prepended
    #[must_use]
    pub fn messages_with_system(&self, system_prompt: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.messages.len() + 1);
        messages.push(Message::system(system_prompt));
        messages.extend(self.messages.iter().cloned());
        messages
    }

    /// Number of turns
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the conversation is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Serialize the full ordered turn sequence to a file (pretty JSON)
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.messages)?;
        std::fs::write(path, json).map_err(Error::Io)?;
        debug!(path = %path.display(), turns = self.messages.len(), "Conversation persisted");
        Ok(())
    }

    /// Replace the turn sequence with the contents of a file.
    ///
    /// A missing file is not an error: the current state is left untouched.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn restore(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "No conversation file, keeping current state");
            return Ok(());
        }

        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        self.messages = serde_json::from_str(&contents)?;
        self.last_activity = Utc::now();
        debug!(path = %path.display(), turns = self.messages.len(), "Conversation restored");
        Ok(())
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
