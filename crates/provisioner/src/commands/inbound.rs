//! Inbound routing commands.

use crate::cli::{ResolveArgs, VerifySidArgs};
use crate::commands::CommandHandler;
use crate::error::AppResult;
use async_trait::async_trait;
use std::sync::Arc;
use twilio_client::{InMemoryAccountDirectory, TwilioClient};

/// Resolves an inbound message's destination to the owning account.
pub struct ResolveHandler {
    twilio: Arc<TwilioClient>,
    accounts: Arc<InMemoryAccountDirectory>,
}

impl ResolveHandler {
    pub fn new(twilio: Arc<TwilioClient>, accounts: Arc<InMemoryAccountDirectory>) -> Self {
        Self { twilio, accounts }
    }
}

#[async_trait]
impl CommandHandler for ResolveHandler {
    type Args = ResolveArgs;

    fn name(&self) -> &str {
        "resolve"
    }

    async fn execute(&self, args: &ResolveArgs) -> AppResult<String> {
        match self
            .twilio
            .resolve_inbound(&args.to, &args.from, self.accounts.as_ref())
            .await
        {
            Some(route) => Ok(format!(
                "{} ({}) <- {} via {}",
                route.account.display_name, route.account.id, route.source, route.destination
            )),
            None => Ok(format!("Unroutable: no account owns {}.", args.to)),
        }
    }
}

pub struct VerifySidHandler {
    twilio: Arc<TwilioClient>,
}

impl VerifySidHandler {
    pub fn new(twilio: Arc<TwilioClient>) -> Self {
        Self { twilio }
    }
}

#[async_trait]
impl CommandHandler for VerifySidHandler {
    type Args = VerifySidArgs;

    fn name(&self) -> &str {
        "verify-sid"
    }

    async fn execute(&self, args: &VerifySidArgs) -> AppResult<String> {
        if self.twilio.verify_account_sid(&args.account_sid) {
            Ok("Account SID matches.".into())
        } else {
            Ok("Account SID does not match.".into())
        }
    }
}
