//! Provisioner - main entry point.

use anyhow::Context;
use clap::Parser;
use provisioner::commands::dispatch;
use provisioner::{AppContext, AppResult, Cli, Config};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.log.level, config.log.json);

    let context = AppContext::from_config(&config).await?;

    info!("Twilio API: {}", config.twilio.api_base_url);
    info!("OpenAI API: {}", config.openai.base_url);
    if context.test_mode {
        info!("Provisioning in test mode - numbers will not be purchased");
    }

    match dispatch(&context, &cli.command).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {}", e);
            Err(e)
        }
    }
}

fn init_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so command output can be piped
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
