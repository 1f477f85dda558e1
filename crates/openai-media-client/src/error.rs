//! Media generation errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediaError {
    /// Network, DNS or TLS failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the provider or the image download.
    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    /// 2xx response carrying an error object.
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Response contained neither inline image data nor an image URL")]
    MissingImage,

    #[error("Base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Attachment failed: {0}")]
    Attachment(String),
}

impl MediaError {
    /// HTTP status of a provider rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            MediaError::Api { status, .. } => Some(*status),
            MediaError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
