//! Twilio API types.
//!
//! Response shapes are owned by Twilio and drift between API versions, so
//! every field that is not needed for control flow is optional.

use crate::accounts::Account;
use serde::{Deserialize, Serialize};

/// Message resource returned when a text is queued.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResource {
    pub sid: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

/// A number owned by the Twilio account.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingPhoneNumber {
    pub sid: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub sms_url: Option<String>,
    #[serde(default)]
    pub voice_url: Option<String>,
}

/// One page of the incoming phone number listing.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingPhoneNumberPage {
    #[serde(default)]
    pub incoming_phone_numbers: Vec<IncomingPhoneNumber>,
    #[serde(default)]
    pub next_page_uri: Option<String>,
}

/// Inventory entry from the available-number search.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailablePhoneNumberRecord {
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailablePhoneNumberPage {
    #[serde(default)]
    pub available_phone_numbers: Vec<AvailablePhoneNumberRecord>,
}

/// Purchasable number, as offered to a caller choosing a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableNumber {
    /// E.164 number to pass to a purchase.
    pub number: String,
    /// Display form, e.g. "(555) 123-4567".
    pub friendly_name: String,
    pub city: String,
    pub zip: String,
}

impl From<AvailablePhoneNumberRecord> for AvailableNumber {
    fn from(record: AvailablePhoneNumberRecord) -> Self {
        Self {
            friendly_name: record
                .friendly_name
                .unwrap_or_else(|| record.phone_number.clone()),
            number: record.phone_number,
            city: record.locality.unwrap_or_default(),
            zip: record.postal_code.unwrap_or_default(),
        }
    }
}

/// Messaging service phone number resource.
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignPhoneNumber {
    #[serde(default)]
    pub sid: Option<String>,
    #[serde(default)]
    pub service_sid: Option<String>,
}

/// Inbound callback URLs configured on a number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookUrls {
    pub sms_url: Option<String>,
    pub voice_url: Option<String>,
}

/// Outcome of wiring a number's inbound webhooks.
///
/// Campaign registration never fails the setup; its failure is carried in
/// `campaign_warning` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookSetup {
    /// Twilio SID of the matched incoming number.
    pub number_sid: String,
    pub sms_url: String,
    pub voice_url: String,
    pub campaign_warning: Option<String>,
}

impl WebhookSetup {
    pub fn campaign_registered(&self) -> bool {
        self.campaign_warning.is_none()
    }
}

/// Inbound text or call resolved to the account that owns the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundRoute {
    pub account: Account,
    /// Destination number without the `+1` marker.
    pub destination: String,
    /// Sender number without the `+1` marker.
    pub source: String,
}
