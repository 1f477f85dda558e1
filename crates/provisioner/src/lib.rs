//! Provisioner - operator tool for messaging numbers and generated media.
//!
//! Loads configuration once, builds the Twilio and OpenAI clients, and runs
//! one command per invocation:
//! - search, purchase and webhook wiring for Twilio numbers
//! - outbound texts and inbound routing checks
//! - image and speech generation, optionally attached to a record

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{AppError, AppResult};

use anyhow::Context;
use openai_media_client::OpenAiMediaClient;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use twilio_client::{InMemoryAccountDirectory, TwilioClient};

/// Shared state the command handlers are built from.
#[derive(Clone)]
pub struct AppContext {
    pub twilio: Arc<TwilioClient>,
    pub openai: Arc<OpenAiMediaClient>,
    pub accounts: Arc<InMemoryAccountDirectory>,
    pub webhook_base_url: String,
    pub test_mode: bool,
    pub attachments_dir: PathBuf,
}

impl AppContext {
    /// Build clients and load accounts from configuration.
    pub async fn from_config(config: &Config) -> AppResult<Self> {
        let twilio = TwilioClient::new(&config.twilio).context("Failed to create Twilio client")?;
        let openai =
            OpenAiMediaClient::new(&config.openai).context("Failed to create OpenAI client")?;
        let accounts = load_accounts(config.storage.accounts_path.as_deref()).await?;

        Ok(Self {
            twilio: Arc::new(twilio),
            openai: Arc::new(openai),
            accounts: Arc::new(accounts),
            webhook_base_url: config.webhooks.base_url.clone(),
            test_mode: config.provisioning.test_mode,
            attachments_dir: config.storage.attachments_dir.clone(),
        })
    }
}

/// Load the account directory from a JSON file, or start empty.
pub async fn load_accounts(path: Option<&Path>) -> AppResult<InMemoryAccountDirectory> {
    let Some(path) = path else {
        return Ok(InMemoryAccountDirectory::new());
    };

    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read accounts from {}", path.display()))?;
    let directory = InMemoryAccountDirectory::from_json(&json)
        .with_context(|| format!("Failed to parse accounts in {}", path.display()))?;

    info!("Loaded {} accounts from {}", directory.len().await, path.display());
    Ok(directory)
}
