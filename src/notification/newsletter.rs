//! The publisher side of the newsletter.

use super::{Subscriber, SubscriberId};
use crate::types::SharedSubscriber;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// A published article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
}

impl Article {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl From<&str> for Article {
    fn from(title: &str) -> Self {
        Self::new(title)
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// A subscriber that failed to take delivery of an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationFailure {
    pub id: SubscriberId,
    pub subscriber: String,
    pub reason: String,
}

/// Outcome of one `publish` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub article: Article,
    /// Subscribers notified successfully, in notification order.
    pub delivered: Vec<SubscriberId>,
    pub failures: Vec<NotificationFailure>,
}

impl PublishReport {
    pub fn attempted(&self) -> usize {
        self.delivered.len() + self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Converts a report with failures into an error.
    pub fn into_result(self) -> Result<Self, PublishError> {
        if self.is_complete() {
            Ok(self)
        } else {
            Err(PublishError::Partial {
                attempted: self.attempted(),
                article: self.article,
                failures: self.failures,
            })
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    #[error("{} of {attempted} subscribers were not notified of '{article}'", .failures.len())]
    Partial {
        article: Article,
        attempted: usize,
        failures: Vec<NotificationFailure>,
    },
}

impl PublishError {
    pub fn failures(&self) -> &[NotificationFailure] {
        match self {
            PublishError::Partial { failures, .. } => failures,
        }
    }

    pub fn failure_count(&self) -> usize {
        self.failures().len()
    }
}

/// The publisher. Subscribers are shared, so the same subscriber may sit on
/// several newsletters at once.
#[derive(Default)]
pub struct Newsletter {
    subscribers: Vec<(SubscriberId, SharedSubscriber)>,
    latest: Option<Article>,
    next_id: u64,
}

impl Newsletter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `subscriber` to the end of the notification order.
    ///
    /// Subscribing the same `Arc` twice is a no-op that returns the id issued
    /// the first time.
    pub fn subscribe(&mut self, subscriber: SharedSubscriber) -> SubscriberId {
        if let Some((id, _)) = self
            .subscribers
            .iter()
            .find(|(_, existing)| Arc::ptr_eq(existing, &subscriber))
        {
            debug!(subscriber = subscriber.name(), %id, "Already subscribed");
            return *id;
        }

        let id = SubscriberId::new(self.next_id);
        self.next_id += 1;
        debug!(subscriber = subscriber.name(), %id, "Subscribed");
        self.subscribers.push((id, subscriber));
        id
    }

    /// Removes the subscriber behind `id`. Returns `false` if it was not
    /// subscribed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        match self.subscribers.iter().position(|(existing, _)| *existing == id) {
            Some(index) => {
                let (_, subscriber) = self.subscribers.remove(index);
                debug!(subscriber = subscriber.name(), %id, "Unsubscribed");
                true
            }
            None => false,
        }
    }

    /// Stores `article` as the latest and notifies every current subscriber
    /// in subscription order.
    ///
    /// A failing subscriber does not stop the broadcast; it is listed in the
    /// returned report instead.
    #[instrument(skip_all, fields(article = %article))]
    pub fn publish(&mut self, article: Article) -> PublishReport {
        self.latest = Some(article.clone());

        let mut delivered = Vec::with_capacity(self.subscribers.len());
        let mut failures = Vec::new();

        for (id, subscriber) in &self.subscribers {
            match subscriber.notify(&article) {
                Ok(()) => delivered.push(*id),
                Err(e) => {
                    warn!(subscriber = subscriber.name(), %id, "Notification failed: {:#}", e);
                    failures.push(NotificationFailure {
                        id: *id,
                        subscriber: subscriber.name().to_string(),
                        reason: format!("{:#}", e),
                    });
                }
            }
        }

        info!(
            delivered = delivered.len(),
            failed = failures.len(),
            "Article published"
        );

        PublishReport {
            article,
            delivered,
            failures,
        }
    }

    pub fn latest(&self) -> Option<&Article> {
        self.latest.as_ref()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Subscriber ids in notification order.
    pub fn subscriber_ids(&self) -> Vec<SubscriberId> {
        self.subscribers.iter().map(|(id, _)| *id).collect()
    }

    /// Looks up a subscriber by handle.
    pub fn get(&self, id: SubscriberId) -> Option<&dyn Subscriber> {
        self.subscribers
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, subscriber)| subscriber.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::sync::Mutex;

    // A fake subscriber for testing delivery order.
    struct FakeSubscriber {
        name: String,
        log: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl FakeSubscriber {
        fn new(name: &str, log: Arc<Mutex<Vec<String>>>) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                log,
                fail: false,
            })
        }

        fn failing(name: &str, log: Arc<Mutex<Vec<String>>>) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                log,
                fail: true,
            })
        }
    }

    impl Subscriber for FakeSubscriber {
        fn name(&self) -> &str {
            &self.name
        }

        fn notify(&self, article: &Article) -> anyhow::Result<()> {
            if self.fail {
                bail!("mailbox full");
            }
            self.log
                .lock()
                .unwrap()
                .push(format!("{} <- {}", self.name, article));
            Ok(())
        }
    }

    #[test]
    fn test_notifies_in_subscription_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut newsletter = Newsletter::new();
        newsletter.subscribe(FakeSubscriber::new("s1", log.clone()));
        newsletter.subscribe(FakeSubscriber::new("s2", log.clone()));

        let report = newsletter.publish("X".into());

        assert_eq!(*log.lock().unwrap(), vec!["s1 <- X", "s2 <- X"]);
        assert_eq!(report.delivered.len(), 2);
        assert!(report.is_complete());
        assert_eq!(newsletter.latest(), Some(&Article::new("X")));
    }

    #[test]
    fn test_unsubscribed_receives_nothing() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut newsletter = Newsletter::new();
        let s1 = newsletter.subscribe(FakeSubscriber::new("s1", log.clone()));
        newsletter.subscribe(FakeSubscriber::new("s2", log.clone()));

        assert!(newsletter.unsubscribe(s1));
        newsletter.publish("first".into());
        newsletter.publish("second".into());

        assert_eq!(*log.lock().unwrap(), vec!["s2 <- first", "s2 <- second"]);
    }

    #[test]
    fn test_unsubscribe_unknown_is_noop() {
        let mut newsletter = Newsletter::new();
        assert!(!newsletter.unsubscribe(SubscriberId::new(42)));
    }

    #[test]
    fn test_duplicate_subscribe_is_noop() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut newsletter = Newsletter::new();
        let subscriber = FakeSubscriber::new("s1", log.clone());

        let first = newsletter.subscribe(subscriber.clone());
        let second = newsletter.subscribe(subscriber);
        newsletter.publish("once".into());

        assert_eq!(first, second);
        assert_eq!(newsletter.subscriber_count(), 1);
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_failure_does_not_stop_broadcast() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut newsletter = Newsletter::new();
        newsletter.subscribe(FakeSubscriber::new("s1", log.clone()));
        let bad = newsletter.subscribe(FakeSubscriber::failing("bad", log.clone()));
        newsletter.subscribe(FakeSubscriber::new("s3", log.clone()));

        let report = newsletter.publish("news".into());

        assert_eq!(*log.lock().unwrap(), vec!["s1 <- news", "s3 <- news"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].id, bad);
        assert_eq!(report.failures[0].subscriber, "bad");
        assert_eq!(report.failures[0].reason, "mailbox full");
        assert_eq!(report.attempted(), 3);

        let err = report.into_result().unwrap_err();
        assert_eq!(
            err.to_string(),
            "1 of 3 subscribers were not notified of 'news'"
        );
    }

    #[test]
    fn test_publish_without_subscribers() {
        let mut newsletter = Newsletter::new();
        let report = newsletter.publish("quiet".into());
        assert_eq!(report.attempted(), 0);
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_ids_are_not_reused() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut newsletter = Newsletter::new();
        let a = newsletter.subscribe(FakeSubscriber::new("a", log.clone()));
        newsletter.unsubscribe(a);
        let b = newsletter.subscribe(FakeSubscriber::new("b", log));
        assert_ne!(a, b);
        assert_eq!(newsletter.get(b).map(|s| s.name()), Some("b"));
        assert!(newsletter.get(a).is_none());
    }
}
