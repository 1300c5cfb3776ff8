//! Chat room mediator.
//!
//! Members never talk to each other directly. Every message goes through the
//! room, which looks the recipient up by name and delivers it.

use crate::core::Record;
use crate::types::SharedSink;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("user {0} not found")]
    UnknownRecipient(String),

    #[error("sender {0} is not a member of this room")]
    UnknownSender(String),

    #[error("user {0} is already registered")]
    DuplicateMember(String),
}

/// A routed message between two members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectMessage {
    pub from: String,
    pub to: String,
    pub text: String,
}

/// Routes direct messages between registered members.
pub struct ChatRoom {
    members: Vec<String>,
    sink: SharedSink,
}

impl ChatRoom {
    pub fn new(sink: SharedSink) -> Self {
        Self {
            members: Vec::new(),
            sink,
        }
    }

    pub fn register(&mut self, name: impl Into<String>) -> Result<(), ChatError> {
        let name = name.into();
        if self.is_member(&name) {
            return Err(ChatError::DuplicateMember(name));
        }
        debug!(member = %name, "Member registered");
        self.members.push(name);
        Ok(())
    }

    pub fn is_member(&self, name: &str) -> bool {
        self.members.iter().any(|member| member == name)
    }

    /// Registered names in registration order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Delivers `text` from `from` to `to`.
    ///
    /// An unknown recipient is an error and nothing is delivered.
    pub fn send(&self, from: &str, to: &str, text: &str) -> anyhow::Result<()> {
        if !self.is_member(from) {
            return Err(ChatError::UnknownSender(from.to_string()).into());
        }
        if !self.is_member(to) {
            warn!(from, to, "Message addressed to unknown user");
            return Err(ChatError::UnknownRecipient(to.to_string()).into());
        }
        let line = format!("{} to {}: {}", from, to, text);
        self.sink.emit(Record::new(to, line))?;
        Ok(())
    }

    /// Convenience wrapper over [`ChatRoom::send`].
    pub fn deliver(&self, message: &DirectMessage) -> anyhow::Result<()> {
        self.send(&message.from, &message.to, &message.text)
    }
}
