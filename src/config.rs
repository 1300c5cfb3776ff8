//! Configuration management for fanout
//!
//! This module defines the main `Config` struct and its sub-structs. It uses
//! the `figment` crate to layer built-in defaults, a `fanout.toml` file,
//! `FANOUT_` environment variables and command-line flags, in that order.
//! The defaults reproduce the classic usage examples of each pattern.

use crate::chain::{Handler, HandlerKind, Level, Message};
use crate::cli::Cli;
use crate::mediator::DirectMessage;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The configuration file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "fanout.toml";

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// The logging level (or full `EnvFilter` directive) for the application.
    pub log_level: String,
    /// How records are printed.
    pub output: OutputConfig,
    /// Layout of the handler chain and the messages sent through it.
    pub chain: ChainConfig,
    /// Subscribers and articles for the newsletter.
    pub newsletter: NewsletterConfig,
    /// Members and messages for the chat room.
    pub chat: ChatConfig,
    /// Text and fonts for the glyph renderer.
    pub flyweight: FlyweightConfig,
}

/// The format for stdout output.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    PlainText,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("Json"),
            OutputFormat::PlainText => f.write_str("PlainText"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChainConfig {
    /// Handlers from head to tail.
    pub handlers: Vec<Handler>,
    pub messages: Vec<Message>,
}

/// One newsletter subscriber.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SubscriberConfig {
    Email { address: String },
    Sms { phone_number: String },
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NewsletterConfig {
    /// Subscribers in subscription order.
    pub subscribers: Vec<SubscriberConfig>,
    pub articles: Vec<String>,
    /// Also attach a subscriber that logs every article.
    #[serde(default)]
    pub log_articles: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChatConfig {
    pub members: Vec<String>,
    pub messages: Vec<DirectMessage>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FlyweightConfig {
    pub text: String,
    pub fonts: Vec<String>,
}

impl Config {
    /// Loads the application configuration.
    ///
    /// The file named by `cli.config` is used if given and must exist.
    /// Otherwise `fanout.toml` in the working directory is read when present.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = match &cli.config {
            Some(path) => {
                std::fs::metadata(path).with_context(|| {
                    format!("cannot read configuration file {}", path.display())
                })?;
                path.clone()
            }
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            // Allow overriding with environment variables, e.g., FANOUT_OUTPUT__FORMAT=Json
            .merge(Env::prefixed("FANOUT_").split("__"))
            .merge(cli.clone())
            .extract()?;
        Ok(config)
    }
}

// Provide a default implementation for tests and easy setup.
impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            output: OutputConfig {
                format: OutputFormat::PlainText,
            },
            chain: ChainConfig {
                handlers: vec![
                    Handler::new("error", HandlerKind::Error, Level::Error),
                    Handler::new("file", HandlerKind::File, Level::Debug),
                    Handler::new("console", HandlerKind::Console, Level::Info),
                ],
                messages: vec![
                    Message::new(Level::Info, "This is an informational message."),
                    Message::new(Level::Debug, "This is a debug message."),
                    Message::new(Level::Error, "This is an error message."),
                ],
            },
            newsletter: NewsletterConfig {
                subscribers: vec![
                    SubscriberConfig::Email {
                        address: "example1@email.com".to_string(),
                    },
                    SubscriberConfig::Sms {
                        phone_number: "123-456-7890".to_string(),
                    },
                ],
                articles: vec!["Understanding the Observer Pattern".to_string()],
                log_articles: false,
            },
            chat: ChatConfig {
                members: vec!["John".to_string(), "Alice".to_string(), "Bob".to_string()],
                messages: vec![
                    DirectMessage {
                        from: "John".to_string(),
                        to: "Alice".to_string(),
                        text: "Hi Alice!".to_string(),
                    },
                    DirectMessage {
                        from: "Alice".to_string(),
                        to: "John".to_string(),
                        text: "Hey John!".to_string(),
                    },
                    DirectMessage {
                        from: "Bob".to_string(),
                        to: "everyone".to_string(),
                        text: "Hello everyone!".to_string(),
                    },
                ],
            },
            flyweight: FlyweightConfig {
                text: "AABBC".to_string(),
                fonts: vec!["Arial".to_string(), "Times New Roman".to_string()],
            },
        }
    }
}
