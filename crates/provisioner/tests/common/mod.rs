//! Common test utilities for integration tests.

use clap::Parser;
use openai_media_client::{OpenAiConfig, OpenAiMediaClient};
use provisioner::commands::dispatch;
use provisioner::{AppContext, AppResult, Cli};
use std::path::Path;
use std::sync::Arc;
use twilio_client::{Account, InMemoryAccountDirectory, TwilioClient, TwilioConfig};
use wiremock::MockServer;

pub const NUMBERS_PATH: &str = "/2010-04-01/Accounts/AC123/IncomingPhoneNumbers.json";
pub const WEBHOOK_BASE_URL: &str = "https://hooks.example.com";

/// Build an app context whose clients both talk to `mock_server`.
pub fn test_context(mock_server: &MockServer, attachments_dir: &Path) -> AppContext {
    let twilio_config = TwilioConfig::new("AC123", "test-token", "+15550000000")
        .with_base_url(mock_server.uri())
        .with_campaign_sid("MG456");
    let openai_config = OpenAiConfig::new("test-api-key").with_base_url(mock_server.uri());

    let accounts = InMemoryAccountDirectory::from_accounts([
        Account::new("acct-1", "Acme").with_messaging_number("+15551234567"),
        Account::new("acct-2", "Globex"),
    ]);

    AppContext {
        twilio: Arc::new(TwilioClient::new(&twilio_config).unwrap()),
        openai: Arc::new(OpenAiMediaClient::new(&openai_config).unwrap()),
        accounts: Arc::new(accounts),
        webhook_base_url: WEBHOOK_BASE_URL.into(),
        test_mode: false,
        attachments_dir: attachments_dir.to_path_buf(),
    }
}

/// Parse `line` as provisioner arguments.
pub fn parse(line: &str) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("provisioner").chain(line.split_whitespace()))
}

/// Parse `line` and run it against `context`.
pub async fn run(context: &AppContext, line: &str) -> AppResult<String> {
    let cli = parse(line).unwrap_or_else(|e| panic!("invalid command line {:?}: {}", line, e));
    dispatch(context, &cli.command).await
}
