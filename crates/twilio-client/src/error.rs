//! Twilio client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TwilioError {
    /// Network, DNS or TLS failure talking to Twilio.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Twilio answered with a non-2xx status.
    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not configured: {0}")]
    NotConfigured(String),
}

impl TwilioError {
    /// HTTP status of a provider rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            TwilioError::Api { status, .. } => Some(*status),
            TwilioError::Http(e) => e.status().map(|s| s.as_u16()),
            TwilioError::Json(_) | TwilioError::NotConfigured(_) => None,
        }
    }
}
