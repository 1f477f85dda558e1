//! Send command - outbound SMS.

use crate::cli::SendArgs;
use crate::commands::CommandHandler;
use crate::error::AppResult;
use async_trait::async_trait;
use std::sync::Arc;
use twilio_client::TwilioClient;

pub struct SendHandler {
    twilio: Arc<TwilioClient>,
}

impl SendHandler {
    pub fn new(twilio: Arc<TwilioClient>) -> Self {
        Self { twilio }
    }
}

#[async_trait]
impl CommandHandler for SendHandler {
    type Args = SendArgs;

    fn name(&self) -> &str {
        "send"
    }

    async fn execute(&self, args: &SendArgs) -> AppResult<String> {
        let message = self
            .twilio
            .send_text(&args.to, &args.body(), args.from.as_deref())
            .await?;

        Ok(format!(
            "Sent {} ({})",
            message.sid,
            message.status.as_deref().unwrap_or("accepted")
        ))
    }
}
