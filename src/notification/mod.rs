//! Publish/subscribe delivery of newsletter articles.
//!
//! A `Newsletter` keeps an ordered list of subscribers and notifies each of
//! them, synchronously and in subscription order, whenever an article is
//! published. The publisher only knows the `Subscriber` trait, never the
//! concrete receiver types.
pub mod logging_subscriber;
pub mod newsletter;
pub mod subscribers;

use std::fmt;

pub use logging_subscriber::LoggingSubscriber;
pub use newsletter::{Article, Newsletter, NotificationFailure, PublishError, PublishReport};
pub use subscribers::{EmailSubscriber, SmsSubscriber};

/// Opaque handle issued by [`Newsletter::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(u64);

impl SubscriberId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Receives published articles.
pub trait Subscriber: Send + Sync {
    /// A unique, descriptive name for the subscriber (e.g., an address).
    /// Used for logging and failure reports.
    fn name(&self) -> &str;

    /// Delivers one article to this subscriber
    ///
    /// # Returns
    /// * `Ok(())` if the notification was delivered
    /// * `Err` if delivery failed; the publisher records it and moves on
    fn notify(&self, article: &Article) -> anyhow::Result<()>;
}
