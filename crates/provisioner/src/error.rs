//! Application error types.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Twilio error: {0}")]
    Twilio(#[from] twilio_client::TwilioError),

    #[error("Media error: {0}")]
    Media(#[from] openai_media_client::MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown account: {0}")]
    UnknownAccount(String),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
