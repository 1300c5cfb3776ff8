#![allow(dead_code)]
use fanout::{
    app::App,
    config::Config,
    outputs::MemorySink,
    types::SharedSubscriber,
};
use std::sync::Arc;

/// Builds an `App` that records into memory instead of printing.
pub struct TestAppBuilder {
    pub config: Config,
    subscribers: Vec<SharedSubscriber>,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            subscribers: Vec::new(),
        }
    }

    pub fn with_subscriber(mut self, subscriber: SharedSubscriber) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    pub fn build(self) -> (App, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let mut builder = App::builder(self.config).sink_override(sink.clone());
        for subscriber in self.subscribers {
            builder = builder.with_subscriber(subscriber);
        }
        (builder.build(), sink)
    }
}
