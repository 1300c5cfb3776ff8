//! A simple subscriber that logs received articles.
//!
//! Useful for watching a newsletter's traffic without producing records.

use super::{Article, Subscriber};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

#[derive(Debug, Default)]
pub struct LoggingSubscriber {
    received: AtomicUsize,
}

impl LoggingSubscriber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of articles received so far.
    pub fn received(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }
}

impl Subscriber for LoggingSubscriber {
    fn name(&self) -> &str {
        "log"
    }

    fn notify(&self, article: &Article) -> anyhow::Result<()> {
        self.received.fetch_add(1, Ordering::SeqCst);
        info!(?article, "Received article via newsletter");
        Ok(())
    }
}
