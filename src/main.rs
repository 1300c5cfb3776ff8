//! fanout - pattern demonstrations
//!
//! Runs the handler chain, newsletter, chat room and glyph demonstrations
//! and prints the records they emit.

use anyhow::Result;
use clap::Parser;
use fanout::{app::App, cli::Cli, config::Config};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = Config::load(&cli).unwrap_or_else(|err| {
        // Manually initialize logging for this specific error
        tracing_subscriber::fmt().with_writer(std::io::stderr).init();
        error!("Failed to load configuration: {:#}", err);
        std::process::exit(1);
    });

    // Records go to stdout, so logs go to stderr.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let app = App::builder(config).build();
    let config = app.config();

    info!("-------------------- Configuration --------------------");
    info!("Log Level: {}", config.log_level);
    info!("Output Format: {}", config.output.format);
    info!("Chain Handlers: {}", config.chain.handlers.len());
    info!(
        "Newsletter Subscribers: {}",
        config.newsletter.subscribers.len()
    );
    info!("Chat Members: {}", config.chat.members.len());
    info!("-------------------------------------------------------");

    let summary = app.run(cli.demo)?;

    if summary.failed_notifications > 0 {
        error!(
            "{} newsletter notification(s) failed",
            summary.failed_notifications
        );
    }

    Ok(())
}
