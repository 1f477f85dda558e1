//! Twilio credentials and endpoints.

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

/// Twilio configuration, built once at startup and shared by reference.
#[derive(Debug, Clone, Deserialize)]
pub struct TwilioConfig {
    /// Account SID, also used as the Basic auth username
    pub account_sid: String,

    /// Auth token
    pub auth_token: SecretString,

    /// Default sender for outbound texts
    pub from_number: String,

    /// Messaging service (A2P campaign) that purchased numbers join
    #[serde(default)]
    pub campaign_sid: Option<String>,

    /// REST API host
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Messaging API host
    #[serde(default = "default_messaging_base_url")]
    pub messaging_base_url: String,

    /// Prefix for the friendly name given to purchased numbers
    #[serde(default = "default_friendly_name_prefix")]
    pub friendly_name_prefix: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

impl TwilioConfig {
    /// Configuration with default endpoints for the given credentials.
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from_number: impl Into<String>,
    ) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: SecretString::new(auth_token.into()),
            from_number: from_number.into(),
            campaign_sid: None,
            api_base_url: default_api_base_url(),
            messaging_base_url: default_messaging_base_url(),
            friendly_name_prefix: default_friendly_name_prefix(),
            timeout: default_timeout(),
        }
    }

    /// Point both API hosts at `base_url` (used against mock servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.api_base_url = base_url.clone();
        self.messaging_base_url = base_url;
        self
    }

    pub fn with_campaign_sid(mut self, campaign_sid: impl Into<String>) -> Self {
        self.campaign_sid = Some(campaign_sid.into());
        self
    }
}

fn default_api_base_url() -> String {
    "https://api.twilio.com".into()
}

fn default_messaging_base_url() -> String {
    "https://messaging.twilio.com".into()
}

fn default_friendly_name_prefix() -> String {
    "Provisioned".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}
