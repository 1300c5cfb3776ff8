// src/formatting.rs

use crate::config::OutputFormat;
use crate::core::{Record, SinkError};

/// A trait for turning records into printable text.
pub trait TextFormatter: Send + Sync {
    fn format_line(&self, record: &Record) -> Result<String, SinkError>;
}

/// Prints the record's line exactly as the component rendered it.
pub struct PlainTextFormatter;

impl TextFormatter for PlainTextFormatter {
    fn format_line(&self, record: &Record) -> Result<String, SinkError> {
        Ok(record.line.clone())
    }
}

/// Prints one JSON object per record.
pub struct JsonFormatter;

impl TextFormatter for JsonFormatter {
    fn format_line(&self, record: &Record) -> Result<String, SinkError> {
        Ok(serde_json::to_string(record)?)
    }
}

/// Picks the formatter matching the configured output format.
pub fn formatter_for(format: &OutputFormat) -> Box<dyn TextFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::PlainText => Box::new(PlainTextFormatter),
    }
}
