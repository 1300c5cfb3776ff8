//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the application using the
//! `clap` crate. These arguments are parsed at startup and then merged with
//! the configuration from the `fanout.toml` file and environment variables.

use clap::{Parser, ValueEnum};
use figment::{
    value::{Dict, Map, Tag, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// Runs the handler chain, newsletter, chat room and glyph demonstrations.
#[derive(Parser, Debug, Default, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Which demonstration to run.
    #[arg(value_enum, default_value_t = Demo::All)]
    pub demo: Demo,

    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print records as JSON lines.
    #[arg(long)]
    pub json: bool,

    /// Log level or filter directive (e.g. "debug", "fanout::chain=trace").
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

#[derive(ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    #[default]
    All,
    Chain,
    Newsletter,
    Chat,
    Flyweight,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();

        if let Some(level) = &self.log_level {
            dict.insert("log_level".into(), Value::from(level.clone()));
        }

        // `--json` only ever switches JSON on; its absence leaves the file or
        // environment setting alone.
        if self.json {
            let mut output = Dict::new();
            output.insert("format".into(), Value::from("Json"));
            dict.insert("output".into(), Value::Dict(Tag::Default, output));
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}
