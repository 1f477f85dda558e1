//! Webhook wiring commands.

use crate::cli::{ShowWebhooksArgs, WebhooksArgs};
use crate::commands::CommandHandler;
use crate::error::AppResult;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;
use twilio_client::TwilioClient;

pub struct ConfigureWebhooksHandler {
    twilio: Arc<TwilioClient>,
    base_url: String,
}

impl ConfigureWebhooksHandler {
    pub fn new(twilio: Arc<TwilioClient>, base_url: impl Into<String>) -> Self {
        Self {
            twilio,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CommandHandler for ConfigureWebhooksHandler {
    type Args = WebhooksArgs;

    fn name(&self) -> &str {
        "webhooks"
    }

    async fn execute(&self, args: &WebhooksArgs) -> AppResult<String> {
        let number = args.number.as_str();
        let base_url = args.base_url.as_deref().unwrap_or(self.base_url.as_str());

        match self.twilio.configure_webhooks(number, base_url).await? {
            Some(setup) => {
                let mut out = format!(
                    "Configured {}\n  sms:   {}\n  voice: {}",
                    setup.number_sid, setup.sms_url, setup.voice_url
                );
                if let Some(warning) = setup.campaign_warning {
                    out.push_str(&format!("\n  campaign registration failed: {}", warning));
                }
                Ok(out)
            }
            None => {
                warn!("{} not found among incoming numbers", number);
                Ok(format!("No incoming number matches {}.", number))
            }
        }
    }
}

pub struct ShowWebhooksHandler {
    twilio: Arc<TwilioClient>,
}

impl ShowWebhooksHandler {
    pub fn new(twilio: Arc<TwilioClient>) -> Self {
        Self { twilio }
    }
}

#[async_trait]
impl CommandHandler for ShowWebhooksHandler {
    type Args = ShowWebhooksArgs;

    fn name(&self) -> &str {
        "show-webhooks"
    }

    async fn execute(&self, args: &ShowWebhooksArgs) -> AppResult<String> {
        let urls = self.twilio.webhook_urls(&args.number).await?;

        Ok(format!(
            "sms:   {}\nvoice: {}",
            urls.sms_url.as_deref().unwrap_or("-"),
            urls.voice_url.as_deref().unwrap_or("-")
        ))
    }
}
