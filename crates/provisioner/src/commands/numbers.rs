//! Number search and purchase commands.

use crate::cli::{PurchaseArgs, SearchArgs};
use crate::commands::CommandHandler;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use twilio_client::{InMemoryAccountDirectory, TwilioClient};

pub struct SearchHandler {
    twilio: Arc<TwilioClient>,
}

impl SearchHandler {
    pub fn new(twilio: Arc<TwilioClient>) -> Self {
        Self { twilio }
    }
}

#[async_trait]
impl CommandHandler for SearchHandler {
    type Args = SearchArgs;

    fn name(&self) -> &str {
        "search"
    }

    async fn execute(&self, args: &SearchArgs) -> AppResult<String> {
        let numbers = self.twilio.find_available_numbers(&args.area_code).await?;

        if numbers.is_empty() {
            return Ok(format!("No numbers available in area code {}.", args.area_code));
        }

        Ok(numbers
            .iter()
            .map(|n| format!("{}  {}  {} {}", n.number, n.friendly_name, n.city, n.zip))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

pub struct PurchaseHandler {
    twilio: Arc<TwilioClient>,
    accounts: Arc<InMemoryAccountDirectory>,
    webhook_base_url: String,
    test_mode: bool,
}

impl PurchaseHandler {
    pub fn new(
        twilio: Arc<TwilioClient>,
        accounts: Arc<InMemoryAccountDirectory>,
        webhook_base_url: impl Into<String>,
        test_mode: bool,
    ) -> Self {
        Self {
            twilio,
            accounts,
            webhook_base_url: webhook_base_url.into(),
            test_mode,
        }
    }
}

#[async_trait]
impl CommandHandler for PurchaseHandler {
    type Args = PurchaseArgs;

    fn name(&self) -> &str {
        "purchase"
    }

    async fn execute(&self, args: &PurchaseArgs) -> AppResult<String> {
        let number = args.number.as_str();
        let test_mode = self.test_mode || args.test;

        let account = self
            .accounts
            .get(&args.account_id)
            .await
            .ok_or_else(|| AppError::UnknownAccount(args.account_id.clone()))?;

        let setup = self
            .twilio
            .purchase_available_number(
                number,
                &account,
                self.accounts.as_ref(),
                &self.webhook_base_url,
                test_mode,
            )
            .await?;

        info!("Provisioned {} for {}", number, account.display_name);

        let mut lines = vec![if test_mode {
            format!("Test mode: {} was not purchased.", number)
        } else {
            format!("Purchased {} for {}.", number, account.display_name)
        }];

        match setup {
            Some(setup) => {
                lines.push(format!("Webhooks configured on {}.", setup.number_sid));
                if let Some(warning) = setup.campaign_warning {
                    lines.push(format!("Campaign registration failed: {}", warning));
                }
            }
            None => lines.push(format!(
                "{} is not listed on the account yet; run `webhooks {}` later.",
                number, number
            )),
        }

        Ok(lines.join("\n"))
    }
}
