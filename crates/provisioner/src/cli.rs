//! Command-line interface.

use clap::{Args, Parser, Subcommand};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "provisioner", version)]
#[command(about = "Provision messaging numbers and generate media")]
#[command(
    after_help = "Configuration is read from the environment (TWILIO__*, OPENAI__*, \
                  WEBHOOKS__BASE_URL, PROVISIONING__TEST_MODE, STORAGE__*, LOG__LEVEL, LOG__JSON)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search local numbers in an area code
    Search(SearchArgs),
    /// Buy a number for an account and wire its webhooks
    Purchase(PurchaseArgs),
    /// Point a number's inbound SMS and voice webhooks at the base URL
    Webhooks(WebhooksArgs),
    /// Show a number's current inbound webhooks
    ShowWebhooks(ShowWebhooksArgs),
    /// Send a text message
    Send(SendArgs),
    /// Resolve an inbound message to the account owning its destination
    Resolve(ResolveArgs),
    /// Check an account SID against the configured one
    VerifySid(VerifySidArgs),
    /// Generate an image
    Image(ImageArgs),
    /// Generate speech audio
    Audio(AudioArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SearchArgs {
    pub area_code: String,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PurchaseArgs {
    pub number: String,
    pub account_id: String,
    /// Skip the purchase itself; webhooks are still configured
    #[arg(long)]
    pub test: bool,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct WebhooksArgs {
    pub number: String,
    /// Override the configured webhook base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ShowWebhooksArgs {
    pub number: String,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SendArgs {
    pub to: String,
    #[arg(required = true)]
    pub message: Vec<String>,
    /// Sender number (default: the configured number)
    #[arg(long, value_name = "NUMBER")]
    pub from: Option<String>,
}

impl SendArgs {
    pub fn body(&self) -> String {
        self.message.join(" ")
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ResolveArgs {
    pub to: String,
    pub from: String,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct VerifySidArgs {
    pub account_sid: String,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ImageArgs {
    #[arg(required = true)]
    pub prompt: Vec<String>,
    #[arg(long, value_name = "WxH")]
    pub size: Option<String>,
    #[command(flatten)]
    pub output: OutputArgs,
}

impl ImageArgs {
    pub fn prompt(&self) -> String {
        self.prompt.join(" ")
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AudioArgs {
    #[arg(required = true)]
    pub text: Vec<String>,
    #[arg(long)]
    pub voice: Option<String>,
    #[arg(long, value_parser = ["mp3", "wav", "opus", "aac", "flac"])]
    pub format: Option<String>,
    #[command(flatten)]
    pub output: OutputArgs,
}

impl AudioArgs {
    pub fn text(&self) -> String {
        self.text.join(" ")
    }
}

/// Where generated media ends up.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct OutputArgs {
    /// Attach to a record attribute in the attachments directory
    #[arg(long, value_name = "RECORD/ATTRIBUTE", conflicts_with = "out")]
    pub attach: Option<AttachTarget>,
    /// Save to this path (default: openai.<ext> in the working directory)
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

/// `record/attribute` pair naming an attachment slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachTarget {
    pub record: String,
    pub attribute: String,
}

impl FromStr for AttachTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((record, attribute)) if !record.is_empty() && !attribute.is_empty() => {
                Ok(Self {
                    record: record.to_string(),
                    attribute: attribute.to_string(),
                })
            }
            _ => Err(format!("expected RECORD/ATTRIBUTE, got {:?}", s)),
        }
    }
}

impl fmt::Display for AttachTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.record, self.attribute)
    }
}
