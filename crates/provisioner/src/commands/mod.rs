//! Operator command handlers.

mod inbound;
mod media;
mod numbers;
mod send;
mod webhooks;

pub use inbound::{ResolveHandler, VerifySidHandler};
pub use media::{AudioHandler, ImageHandler};
pub use numbers::{PurchaseHandler, SearchHandler};
pub use send::SendHandler;
pub use webhooks::{ConfigureWebhooksHandler, ShowWebhooksHandler};

use crate::cli::Command;
use crate::error::AppResult;
use crate::AppContext;
use async_trait::async_trait;
use tracing::debug;

/// Command handler trait.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Parsed arguments of the command.
    type Args: Send + Sync;

    /// Command name (e.g., "search", "purchase").
    fn name(&self) -> &str;

    /// Execute the command, returning the text to print.
    async fn execute(&self, args: &Self::Args) -> AppResult<String>;
}

async fn run<H: CommandHandler>(handler: H, args: &H::Args) -> AppResult<String> {
    debug!(command = handler.name(), "Running command");
    handler.execute(args).await
}

/// Build the handler for `command` from `context` and run it.
pub async fn dispatch(context: &AppContext, command: &Command) -> AppResult<String> {
    match command {
        Command::Search(args) => run(SearchHandler::new(context.twilio.clone()), args).await,
        Command::Purchase(args) => {
            let handler = PurchaseHandler::new(
                context.twilio.clone(),
                context.accounts.clone(),
                &context.webhook_base_url,
                context.test_mode,
            );
            run(handler, args).await
        }
        Command::Webhooks(args) => {
            let handler =
                ConfigureWebhooksHandler::new(context.twilio.clone(), &context.webhook_base_url);
            run(handler, args).await
        }
        Command::ShowWebhooks(args) => {
            run(ShowWebhooksHandler::new(context.twilio.clone()), args).await
        }
        Command::Send(args) => run(SendHandler::new(context.twilio.clone()), args).await,
        Command::Resolve(args) => {
            let handler = ResolveHandler::new(context.twilio.clone(), context.accounts.clone());
            run(handler, args).await
        }
        Command::VerifySid(args) => run(VerifySidHandler::new(context.twilio.clone()), args).await,
        Command::Image(args) => {
            run(ImageHandler::new(context.openai.clone(), &context.attachments_dir), args).await
        }
        Command::Audio(args) => {
            run(AudioHandler::new(context.openai.clone(), &context.attachments_dir), args).await
        }
    }
}
