//! Image and speech generation commands.
//!
//! `--attach record/attribute` stores the result in the attachments
//! directory; otherwise it is saved to `--out` (default: `openai.<ext>` in
//! the working directory).

use crate::cli::{AudioArgs, ImageArgs, OutputArgs};
use crate::commands::CommandHandler;
use crate::error::AppResult;
use async_trait::async_trait;
use openai_media_client::{AttachmentSink, DirectorySink, MediaOutput, OpenAiMediaClient};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

fn attachment_sink(root: &Path, output: &OutputArgs) -> Option<DirectorySink> {
    output
        .attach
        .as_ref()
        .map(|target| DirectorySink::new(root, &target.record, &target.attribute))
}

/// Describe the output, saving unattached media to disk first.
async fn finish(output: MediaOutput, out: Option<&Path>) -> AppResult<String> {
    match output {
        MediaOutput::Attached(attachment) => Ok(format!(
            "Attached {} ({}, {} bytes, sha256 {})",
            attachment.key, attachment.content_type, attachment.byte_size, attachment.checksum
        )),
        MediaOutput::Generated(media) => {
            let target = out
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(media.filename()));
            tokio::fs::write(&target, media.content()).await?;
            info!("Saved generated media to {}", target.display());
            Ok(format!(
                "Saved {} ({}, {} bytes)",
                target.display(),
                media.mime_type(),
                media.len()
            ))
        }
    }
}

pub struct ImageHandler {
    openai: Arc<OpenAiMediaClient>,
    attachments_dir: PathBuf,
}

impl ImageHandler {
    pub fn new(openai: Arc<OpenAiMediaClient>, attachments_dir: impl Into<PathBuf>) -> Self {
        Self {
            openai,
            attachments_dir: attachments_dir.into(),
        }
    }
}

#[async_trait]
impl CommandHandler for ImageHandler {
    type Args = ImageArgs;

    fn name(&self) -> &str {
        "image"
    }

    async fn execute(&self, args: &ImageArgs) -> AppResult<String> {
        let sink = attachment_sink(&self.attachments_dir, &args.output);

        let output = self
            .openai
            .generate_image(
                &args.prompt(),
                args.size.as_deref(),
                sink.as_ref().map(|s| s as &dyn AttachmentSink),
            )
            .await?;

        finish(output, args.output.out.as_deref()).await
    }
}

pub struct AudioHandler {
    openai: Arc<OpenAiMediaClient>,
    attachments_dir: PathBuf,
}

impl AudioHandler {
    pub fn new(openai: Arc<OpenAiMediaClient>, attachments_dir: impl Into<PathBuf>) -> Self {
        Self {
            openai,
            attachments_dir: attachments_dir.into(),
        }
    }
}

#[async_trait]
impl CommandHandler for AudioHandler {
    type Args = AudioArgs;

    fn name(&self) -> &str {
        "audio"
    }

    async fn execute(&self, args: &AudioArgs) -> AppResult<String> {
        let sink = attachment_sink(&self.attachments_dir, &args.output);

        let output = self
            .openai
            .generate_audio(
                &args.text(),
                args.voice.as_deref(),
                args.format.as_deref(),
                sink.as_ref().map(|s| s as &dyn AttachmentSink),
            )
            .await?;

        finish(output, args.output.out.as_deref()).await
    }
}
