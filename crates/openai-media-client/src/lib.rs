//! OpenAI image and speech generation.
//!
//! Generated media lands in a temporary file owned by the returned handle,
//! or is handed straight to an [`AttachmentSink`].

mod client;
mod config;
mod error;
mod media;
mod sink;
mod types;

pub use client::{OpenAiMediaClient, DEFAULT_AUDIO_FORMAT, DEFAULT_IMAGE_SIZE, DEFAULT_VOICE};
pub use config::OpenAiConfig;
pub use error::MediaError;
pub use media::{GeneratedMedia, MediaOutput};
pub use sink::{AttachmentRef, AttachmentSink, DirectorySink};
pub use types::*;
