//! Sink implementations
//!
//! `StdoutSink` prints records in the configured format, `MemorySink` keeps
//! them in order so callers (and tests) can inspect exactly what was emitted.

use crate::config::OutputFormat;
use crate::core::{Record, Sink, SinkError};
use crate::formatting::{formatter_for, TextFormatter};
use std::io::Write;
use std::sync::{Mutex, PoisonError};

/// Writes every record to standard output, one per line.
pub struct StdoutSink {
    formatter: Box<dyn TextFormatter>,
}

impl StdoutSink {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            formatter: formatter_for(&format),
        }
    }
}

impl Sink for StdoutSink {
    fn name(&self) -> &str {
        "stdout"
    }

    fn emit(&self, record: Record) -> Result<(), SinkError> {
        let line = self.formatter.format_line(&record)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", line)?;
        Ok(())
    }
}

/// Records everything it receives, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Record>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all records received so far.
    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns only the rendered lines, which is what most assertions need.
    pub fn lines(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|record| record.line.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Sink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    fn emit(&self, record: Record) -> Result<(), SinkError> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
        Ok(())
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// A sink that can be switched into a failing state.
    #[derive(Debug, Default)]
    pub struct FailableSink {
        pub inner: MemorySink,
        fail_on_emit: AtomicBool,
    }

    impl FailableSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_fail_on_emit(&self, fail: bool) {
            self.fail_on_emit.store(fail, Ordering::SeqCst);
        }
    }

    impl Sink for FailableSink {
        fn name(&self) -> &str {
            "failable_mock"
        }

        fn emit(&self, record: Record) -> Result<(), SinkError> {
            if self.fail_on_emit.load(Ordering::SeqCst) {
                return Err(SinkError::Rejected(format!(
                    "configured to fail ({})",
                    record.source
                )));
            }
            self.inner.emit(record)
        }
    }
}
