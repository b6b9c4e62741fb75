pub mod core;
pub mod providers;
pub mod reply;
pub mod server;
pub mod twiml;

use crate::core::config::AppConfig;
use crate::core::{Channel, CommandConfig, Dispatcher, RateSource};
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

pub enum AppCommand {
    /// Run the webhook server.
    Serve,
    /// Answer a single message and print the reply.
    Ask { message: String, channel: Channel },
}

/// Parses, dispatches and renders one inbound message.
pub async fn respond(
    body: &str,
    channel: Channel,
    source: &dyn RateSource,
    config: &CommandConfig,
) -> String {
    let parsed = crate::core::parse(body);
    debug!(verb = ?parsed.verb, %channel, "Parsed message");
    let reply = Dispatcher::new(source, config).dispatch(&parsed).await;
    reply::format(&reply, channel, config)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?.with_env_overrides()?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let source = Arc::new(providers::BlockchainTickerSource::new(
        &config.providers.blockchain,
    )?);

    match command {
        AppCommand::Serve => {
            let state = server::AppState {
                source,
                config: config.command_config(),
            };
            let listener = server::bind(&config.server.host, config.server.port).await?;
            server::serve(listener, state).await
        }
        AppCommand::Ask { message, channel } => {
            let text = respond(&message, channel, source.as_ref(), &config.command_config()).await;
            println!("{text}");
            Ok(())
        }
    }
}
