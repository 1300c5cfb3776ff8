//! Core domain types and service traits for fanout
//!
//! This module defines the record every demonstration emits and the sink
//! contract through which records leave a component.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One observable side effect produced by a handler, subscriber, chat member
/// or glyph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Record {
    /// Who produced the record (e.g., "Console Logger", "Email", "Alice")
    pub source: String,
    /// The rendered line of text
    pub line: String,
}

impl Record {
    pub fn new(source: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            line: line.into(),
        }
    }
}

/// Errors raised while handing a record to a sink.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("failed to write record: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize record: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("sink rejected record: {0}")]
    Rejected(String),
}

// =============================================================================
// Service Traits
// =============================================================================

/// Receives the records emitted by the demonstrations.
pub trait Sink: Send + Sync {
    /// A short, descriptive name for the sink (e.g., "stdout", "memory").
    /// Used for logging.
    fn name(&self) -> &str;

    /// Accepts one record
    ///
    /// # Returns
    /// * `Ok(())` if the record was written
    /// * `Err` if writing failed (I/O error, serialization error, etc.)
    fn emit(&self, record: Record) -> Result<(), SinkError>;
}
