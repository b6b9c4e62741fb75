use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use smsbtc::core::Channel;
use smsbtc::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Run the SMS/WhatsApp webhook server
    Serve,
    /// Answer one message locally and print the reply
    Ask {
        /// Message text, e.g. "$btcprice usd"
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,

        /// Render the reply as a WhatsApp message
        #[arg(short, long)]
        whatsapp: bool,
    },
}

impl From<Commands> for smsbtc::AppCommand {
    fn from(cmd: Commands) -> smsbtc::AppCommand {
        match cmd {
            Commands::Serve => smsbtc::AppCommand::Serve,
            Commands::Ask { message, whatsapp } => smsbtc::AppCommand::Ask {
                message: message.join(" "),
                channel: if whatsapp { Channel::Rich } else { Channel::Sms },
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => smsbtc::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = smsbtc::core::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = include_str!("../docs/example_config.yaml");

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
