//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use openai_media_client::OpenAiConfig;
use serde::Deserialize;
use std::path::PathBuf;
use twilio_client::TwilioConfig;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Twilio configuration
    pub twilio: TwilioConfig,

    /// OpenAI configuration
    pub openai: OpenAiConfig,

    /// Inbound webhook configuration
    #[serde(default)]
    pub webhooks: WebhookConfig,

    /// Number provisioning configuration
    #[serde(default)]
    pub provisioning: ProvisioningConfig,

    /// Local storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// Public base URL that serves /inbound_sms and /inbound_call
    #[serde(default = "default_webhook_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProvisioningConfig {
    /// Skip the actual purchase (webhooks are still configured)
    #[serde(default)]
    pub test_mode: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory for media attachments
    #[serde(default = "default_attachments_dir")]
    pub attachments_dir: PathBuf,

    /// JSON file with the accounts that can own numbers
    #[serde(default)]
    pub accounts_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable logs
    #[serde(default)]
    pub json: bool,
}

// Default implementations
impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            base_url: default_webhook_base_url(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            attachments_dir: default_attachments_dir(),
            accounts_path: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value functions
fn default_webhook_base_url() -> String {
    "http://localhost:3000".into()
}

fn default_attachments_dir() -> PathBuf {
    PathBuf::from("storage/attachments")
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_source(
            config::Environment::default()
                .separator("__")
                // try_parsing(true) would turn +15551234567 into a number
                // and drop the + prefix. Keep strings as strings.
                .try_parsing(false),
        )
    }

    fn from_source<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(source)
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
