//! The demonstration runner, decoupled from the entry point.

use crate::{
    chain::HandlerChain,
    cli::Demo,
    config::{Config, SubscriberConfig},
    flyweight::GlyphFactory,
    mediator::ChatRoom,
    notification::{EmailSubscriber, LoggingSubscriber, Newsletter, SmsSubscriber},
    outputs::StdoutSink,
    types::{SharedSink, SharedSubscriber},
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Counts of the problems a run tolerated without aborting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Messages submitted to the handler chain.
    pub chain_messages: usize,
    /// Articles published on the newsletter.
    pub articles: usize,
    /// Subscriber notifications that failed.
    pub failed_notifications: usize,
    /// Chat messages that could not be delivered.
    pub undelivered_messages: usize,
    /// Distinct glyphs created while rendering.
    pub glyphs: usize,
}

/// A configured set of demonstrations, ready to run.
pub struct App {
    config: Config,
    sink: SharedSink,
    extra_subscribers: Vec<SharedSubscriber>,
}

impl App {
    /// Creates a new `AppBuilder` to construct an `App`.
    pub fn builder(config: Config) -> AppBuilder {
        AppBuilder::new(config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the selected demonstration(s), in a fixed order for `Demo::All`.
    pub fn run(&self, demo: Demo) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        if matches!(demo, Demo::All | Demo::Chain) {
            summary.chain_messages = self.run_chain()?;
        }
        if matches!(demo, Demo::All | Demo::Newsletter) {
            let (articles, failed) = self.run_newsletter()?;
            summary.articles = articles;
            summary.failed_notifications = failed;
        }
        if matches!(demo, Demo::All | Demo::Chat) {
            summary.undelivered_messages = self.run_chat()?;
        }
        if matches!(demo, Demo::All | Demo::Flyweight) {
            summary.glyphs = self.run_flyweight()?;
        }
        info!(?summary, "Run finished");
        Ok(summary)
    }

    /// Sends every configured message through the handler chain.
    #[instrument(skip_all)]
    pub fn run_chain(&self) -> Result<usize> {
        let chain = HandlerChain::build(self.config.chain.handlers.clone(), self.sink.clone())
            .context("invalid handler chain configuration")?;
        for message in &self.config.chain.messages {
            chain.submit(message);
        }
        Ok(self.config.chain.messages.len())
    }

    /// Publishes every configured article. Returns the number of articles and
    /// the number of failed notifications.
    #[instrument(skip_all)]
    pub fn run_newsletter(&self) -> Result<(usize, usize)> {
        let mut newsletter = Newsletter::new();
        for subscriber in &self.config.newsletter.subscribers {
            let subscriber: SharedSubscriber = match subscriber {
                SubscriberConfig::Email { address } => {
                    Arc::new(EmailSubscriber::new(address.clone(), self.sink.clone()))
                }
                SubscriberConfig::Sms { phone_number } => {
                    Arc::new(SmsSubscriber::new(phone_number.clone(), self.sink.clone()))
                }
            };
            newsletter.subscribe(subscriber);
        }
        for subscriber in &self.extra_subscribers {
            newsletter.subscribe(subscriber.clone());
        }
        if self.config.newsletter.log_articles {
            newsletter.subscribe(Arc::new(LoggingSubscriber::new()));
        }
        debug!(
            subscribers = newsletter.subscriber_count(),
            ids = ?newsletter.subscriber_ids(),
            "Newsletter ready"
        );

        let mut failed = 0;
        for title in &self.config.newsletter.articles {
            let report = newsletter.publish(title.as_str().into());
            if let Err(e) = report.into_result() {
                warn!("{}", e);
                failed += e.failure_count();
            }
        }
        Ok((self.config.newsletter.articles.len(), failed))
    }

    /// Routes every configured chat message. Returns the number that could
    /// not be delivered.
    #[instrument(skip_all)]
    pub fn run_chat(&self) -> Result<usize> {
        let mut room = ChatRoom::new(self.sink.clone());
        for member in &self.config.chat.members {
            room.register(member.clone())
                .context("invalid chat room configuration")?;
        }

        let mut undelivered = 0;
        for message in &self.config.chat.messages {
            if let Err(e) = room.deliver(message) {
                warn!(from = %message.from, to = %message.to, "Chat message not delivered: {:#}", e);
                undelivered += 1;
            }
        }
        Ok(undelivered)
    }

    /// Renders the configured text once per font with shared glyphs. Returns
    /// the number of distinct glyphs.
    #[instrument(skip_all)]
    pub fn run_flyweight(&self) -> Result<usize> {
        let mut factory = GlyphFactory::new();
        for font in &self.config.flyweight.fonts {
            factory
                .render_text(&self.config.flyweight.text, font, self.sink.as_ref())
                .with_context(|| format!("failed to render text in font {}", font))?;
        }
        Ok(factory.len())
    }
}

/// Builder for the demonstration runner.
///
/// Lets tests swap the stdout sink for a recorder and attach their own
/// subscribers to the newsletter.
pub struct AppBuilder {
    config: Config,
    sink_override: Option<SharedSink>,
    extra_subscribers: Vec<SharedSubscriber>,
}

impl AppBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sink_override: None,
            extra_subscribers: Vec::new(),
        }
    }

    /// Overrides the record sink.
    pub fn sink_override(mut self, sink: SharedSink) -> Self {
        self.sink_override = Some(sink);
        self
    }

    /// Subscribes `subscriber` to the newsletter after the configured ones.
    pub fn with_subscriber(mut self, subscriber: SharedSubscriber) -> Self {
        self.extra_subscribers.push(subscriber);
        self
    }

    pub fn build(self) -> App {
        let sink = match self.sink_override {
            Some(sink) => sink,
            None => {
                let format = self.config.output.format.clone();
                debug!(%format, "Initializing StdoutSink");
                Arc::new(StdoutSink::new(format)) as SharedSink
            }
        };
        App {
            config: self.config,
            sink,
            extra_subscribers: self.extra_subscribers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outputs::MemorySink;

    fn app_with_memory() -> (App, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let app = App::builder(Config::default())
            .sink_override(sink.clone())
            .build();
        (app, sink)
    }

    #[test]
    fn test_chain_demo_output() {
        let (app, sink) = app_with_memory();
        let summary = app.run(Demo::Chain).unwrap();
        assert_eq!(summary.chain_messages, 3);
        assert_eq!(
            sink.lines(),
            vec![
                "Console Logger: This is an informational message.",
                "File Logger: This is a debug message.",
                "Console Logger: This is a debug message.",
                "Error Logger: This is an error message.",
                "File Logger: This is an error message.",
                "Console Logger: This is an error message.",
            ]
        );
    }

    #[test]
    fn test_chat_demo_counts_unknown_recipient() {
        let (app, sink) = app_with_memory();
        let summary = app.run(Demo::Chat).unwrap();
        assert_eq!(summary.undelivered_messages, 1);
        assert_eq!(sink.lines().len(), 2);
    }

    #[test]
    fn test_flyweight_demo() {
        let (app, sink) = app_with_memory();
        let summary = app.run(Demo::Flyweight).unwrap();
        assert_eq!(summary.glyphs, 3);
        assert_eq!(sink.lines().len(), 10);
    }
}
