#![allow(dead_code)]
use anyhow::bail;
use fanout::notification::{Article, Subscriber};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

/// A mock Subscriber that appends "<name>:<title>" to a shared journal, so
/// several subscribers can be checked for relative order.
#[derive(Clone, Debug)]
pub struct RecordingSubscriber {
    pub name: String,
    pub journal: Arc<Mutex<Vec<String>>>,
}

impl RecordingSubscriber {
    pub fn new(name: &str, journal: Arc<Mutex<Vec<String>>>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            journal,
        })
    }
}

impl Subscriber for RecordingSubscriber {
    fn name(&self) -> &str {
        &self.name
    }

    fn notify(&self, article: &Article) -> anyhow::Result<()> {
        self.journal
            .lock()
            .unwrap()
            .push(format!("{}:{}", self.name, article.title));
        Ok(())
    }
}

/// A mock Subscriber that fails while `fail_on_notify` is set.
#[derive(Debug, Default)]
pub struct FailableSubscriber {
    pub articles: Mutex<Vec<Article>>,
    fail_on_notify: AtomicBool,
}

impl FailableSubscriber {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_fail_on_notify(&self, fail: bool) {
        self.fail_on_notify.store(fail, Ordering::SeqCst);
    }
}

impl Subscriber for FailableSubscriber {
    fn name(&self) -> &str {
        "failable_mock"
    }

    fn notify(&self, article: &Article) -> anyhow::Result<()> {
        if self.fail_on_notify.load(Ordering::SeqCst) {
            bail!("mock subscriber configured to fail");
        }
        self.articles.lock().unwrap().push(article.clone());
        Ok(())
    }
}
