//! Severity-filtered handler chain.
//!
//! A message enters at the head and is offered to every handler in chain
//! order. Each handler whose threshold is at or below the message level writes
//! it; propagation never stops early, so one message can be recorded by
//! several handlers.

use crate::core::Record;
use crate::types::SharedSink;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Message severity, also used as a handler threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Level {
    Info = 1,
    Debug = 2,
    Error = 3,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Error => "error",
        };
        f.write_str(name)
    }
}

/// A message travelling through the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub level: Level,
    pub text: String,
}

impl Message {
    pub fn new(level: Level, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// The write action a handler performs. Every kind has one, so there is no
/// handler that can be asked to write without knowing how.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    Console,
    File,
    Error,
}

impl HandlerKind {
    pub fn label(self) -> &'static str {
        match self {
            HandlerKind::Console => "Console Logger",
            HandlerKind::File => "File Logger",
            HandlerKind::Error => "Error Logger",
        }
    }

    fn render(self, text: &str) -> Record {
        Record::new(self.label(), format!("{}: {}", self.label(), text))
    }
}

/// One filtering stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handler {
    /// Unique name within a chain.
    pub name: String,
    pub kind: HandlerKind,
    /// Minimum severity this handler accepts.
    pub threshold: Level,
}

impl Handler {
    pub fn new(name: impl Into<String>, kind: HandlerKind, threshold: Level) -> Self {
        Self {
            name: name.into(),
            kind,
            threshold,
        }
    }

    pub fn accepts(&self, message: &Message) -> bool {
        self.threshold <= message.level
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("a handler chain needs at least one handler")]
    EmptyChain,

    #[error("handler name '{name}' is used more than once")]
    Cycle { name: String },
}

/// An assembled chain. Handlers live in one ordered arena; the successor of
/// the handler at index `i` is the one at `i + 1`.
pub struct HandlerChain {
    handlers: Vec<Handler>,
    sink: SharedSink,
}

impl HandlerChain {
    /// Wires `handlers` into a chain in the given order.
    pub fn build(handlers: Vec<Handler>, sink: SharedSink) -> Result<Self, ConfigurationError> {
        if handlers.is_empty() {
            return Err(ConfigurationError::EmptyChain);
        }
        if let Some(dup) = handlers.iter().duplicates_by(|h| h.name.as_str()).next() {
            return Err(ConfigurationError::Cycle {
                name: dup.name.clone(),
            });
        }
        let chain = Self { handlers, sink };
        debug!(
            handlers = ?chain.iter().map(|h| h.name.as_str()).collect::<Vec<_>>(),
            "Handler chain assembled"
        );
        Ok(chain)
    }

    /// The entry point of the chain.
    pub fn head(&self) -> &Handler {
        // `build` rejects empty chains.
        &self.handlers[0]
    }

    /// The handler that follows position `index`, if any.
    pub fn successor(&self, index: usize) -> Option<&Handler> {
        index
            .checked_add(1)
            .and_then(|next| self.handlers.get(next))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Handler> {
        self.handlers.iter()
    }

    /// Offers `message` to every handler, head to tail.
    #[instrument(skip_all, fields(level = %message.level))]
    pub fn submit(&self, message: &Message) {
        let mut cursor = Some((0, self.head()));
        while let Some((index, handler)) = cursor {
            if handler.accepts(message) {
                let record = handler.kind.render(&message.text);
                if let Err(e) = self.sink.emit(record) {
                    warn!(
                        handler = %handler.name,
                        sink = self.sink.name(),
                        "Handler failed to write message: {}",
                        e
                    );
                }
            }
            cursor = self.successor(index).map(|next| (index + 1, next));
        }
    }
}

/// Collects handlers in order and builds a [`HandlerChain`].
#[derive(Debug, Default)]
pub struct ChainBuilder {
    handlers: Vec<Handler>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `handler` as the successor of the current tail.
    pub fn then(mut self, handler: Handler) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn build(self, sink: SharedSink) -> Result<HandlerChain, ConfigurationError> {
        HandlerChain::build(self.handlers, sink)
    }
}
