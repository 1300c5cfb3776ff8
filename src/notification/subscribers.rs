//! Concrete newsletter subscribers.

use super::{Article, Subscriber};
use crate::core::Record;
use crate::types::SharedSink;
use anyhow::Context;

/// Delivers articles by e-mail.
pub struct EmailSubscriber {
    address: String,
    sink: SharedSink,
}

impl EmailSubscriber {
    pub fn new(address: impl Into<String>, sink: SharedSink) -> Self {
        Self {
            address: address.into(),
            sink,
        }
    }
}

impl Subscriber for EmailSubscriber {
    fn name(&self) -> &str {
        &self.address
    }

    fn notify(&self, article: &Article) -> anyhow::Result<()> {
        let line = format!(
            "Email sent to {}: New article published - {}",
            self.address, article
        );
        self.sink
            .emit(Record::new("Email", line))
            .with_context(|| format!("email to {} via {}", self.address, self.sink.name()))
    }
}

/// Delivers articles by text message.
pub struct SmsSubscriber {
    phone_number: String,
    sink: SharedSink,
}

impl SmsSubscriber {
    pub fn new(phone_number: impl Into<String>, sink: SharedSink) -> Self {
        Self {
            phone_number: phone_number.into(),
            sink,
        }
    }
}

impl Subscriber for SmsSubscriber {
    fn name(&self) -> &str {
        &self.phone_number
    }

    fn notify(&self, article: &Article) -> anyhow::Result<()> {
        let line = format!(
            "SMS sent to {}: New article published - {}",
            self.phone_number, article
        );
        self.sink
            .emit(Record::new("SMS", line))
            .with_context(|| format!("SMS to {} via {}", self.phone_number, self.sink.name()))
    }
}
