//! Twilio client for messaging number provisioning.
//!
//! Buys phone numbers, wires their inbound SMS and voice webhooks, joins
//! them to a messaging campaign, sends texts, and maps inbound traffic back
//! to the account that owns the number.

mod accounts;
mod client;
mod config;
mod error;
pub mod phone;
mod types;

pub use accounts::{Account, AccountDirectory, InMemoryAccountDirectory};
pub use client::{TwilioClient, AVAILABLE_NUMBER_LIMIT};
pub use config::TwilioConfig;
pub use error::TwilioError;
pub use phone::{internationalize, strip_internationalize};
pub use types::*;
