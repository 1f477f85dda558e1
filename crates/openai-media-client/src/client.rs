//! OpenAI media generation HTTP client.

use crate::config::OpenAiConfig;
use crate::error::MediaError;
use crate::media::{GeneratedMedia, MediaOutput};
use crate::sink::AttachmentSink;
use crate::types::*;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";
pub const DEFAULT_VOICE: &str = "alloy";
pub const DEFAULT_AUDIO_FORMAT: &str = "mp3";

/// Client for OpenAI image and speech generation.
///
/// The API key is stored using `SecretString` to prevent accidental
/// exposure in logs or debug output.
#[derive(Clone)]
pub struct OpenAiMediaClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
    image_model: String,
    speech_model: String,
}

impl OpenAiMediaClient {
    /// Create a new media client.
    pub fn new(config: &OpenAiConfig) -> Result<Self, MediaError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            image_model: config.image_model.clone(),
            speech_model: config.speech_model.clone(),
        })
    }

    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    pub fn speech_model(&self) -> &str {
        &self.speech_model
    }

    /// Generate a PNG image from `prompt`.
    ///
    /// Inline base64 content is used when present; otherwise the image is
    /// downloaded from the returned URL. With `bind_to` the image is attached
    /// to the sink and the attachment is returned instead of the temporary
    /// media.
    #[instrument(skip(self, prompt, bind_to), fields(prompt_len = prompt.len()))]
    pub async fn generate_image(
        &self,
        prompt: &str,
        size: Option<&str>,
        bind_to: Option<&dyn AttachmentSink>,
    ) -> Result<MediaOutput, MediaError> {
        let request = ImageRequest {
            model: &self.image_model,
            prompt,
            size: size.unwrap_or(DEFAULT_IMAGE_SIZE),
            response_format: self.image_model.starts_with("dall-e").then_some("b64_json"),
        };

        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key.expose_secret()))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(extract_error(response, "Image generation failed").await);
        }

        let body = response.text().await?;
        let parsed: ImageResponse = serde_json::from_str(&body)?;

        if let Some(error) = parsed.error {
            let message = error
                .message
                .or(error.error_type)
                .unwrap_or_else(|| "unknown provider error".into());
            warn!("Image generation reported an error: {}", message);
            return Err(MediaError::Provider(message));
        }

        let image = parsed.data.into_iter().next().ok_or(MediaError::MissingImage)?;
        let content = match (image.b64_json.filter(|b| !b.is_empty()), image.url) {
            (Some(b64), _) => STANDARD.decode(b64.trim())?,
            (None, Some(url)) => self.download(&url).await?,
            (None, None) => return Err(MediaError::MissingImage),
        };

        info!("Generated image ({} bytes)", content.len());
        let media = GeneratedMedia::new(content, MediaKind::Image, "png", "image/png".into())?;
        deliver(media, bind_to).await
    }

    /// Synthesize speech for `text`.
    ///
    /// The response body is the raw audio in `format`; there is no envelope to
    /// decode.
    #[instrument(skip(self, text, bind_to), fields(text_len = text.len()))]
    pub async fn generate_audio(
        &self,
        text: &str,
        voice: Option<&str>,
        format: Option<&str>,
        bind_to: Option<&dyn AttachmentSink>,
    ) -> Result<MediaOutput, MediaError> {
        let format = format.unwrap_or(DEFAULT_AUDIO_FORMAT);
        let request = SpeechRequest {
            model: &self.speech_model,
            voice: voice.unwrap_or(DEFAULT_VOICE),
            input: text,
            response_format: format,
        };

        let response = self
            .client
            .post(format!("{}/audio/speech", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key.expose_secret()))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(extract_error(response, "Audio generation failed").await);
        }

        let content = response.bytes().await?.to_vec();
        info!("Generated audio ({} bytes, {})", content.len(), format);

        let media = GeneratedMedia::new(content, MediaKind::Audio, format, format!("audio/{}", format))?;
        deliver(media, bind_to).await
    }

    /// Fetch an image from a provider-hosted URL.
    ///
    /// The URL is pre-signed, so no credentials are sent.
    #[instrument(skip(self, url))]
    async fn download(&self, url: &str) -> Result<Vec<u8>, MediaError> {
        debug!("Downloading generated image");
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(extract_error(response, "Image download failed").await);
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Hand the media to `bind_to`, or return it to the caller.
///
/// When attached, the temporary file is dropped here.
async fn deliver(
    media: GeneratedMedia,
    bind_to: Option<&dyn AttachmentSink>,
) -> Result<MediaOutput, MediaError> {
    match bind_to {
        Some(sink) => {
            let attachment = sink
                .attach(media.content(), media.mime_type(), &media.filename())
                .await?;
            debug!(key = %attachment.key, "Attached {}", media.kind());
            Ok(MediaOutput::Attached(attachment))
        }
        None => Ok(MediaOutput::Generated(media)),
    }
}

async fn extract_error(response: reqwest::Response, context: &str) -> MediaError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".into());
    warn!(status = %status, "{}: {}", context, body);

    MediaError::Api {
        status: status.as_u16(),
        body,
    }
}
