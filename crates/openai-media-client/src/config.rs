//! OpenAI credentials and model selection.

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    /// API key
    pub api_key: SecretString,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Image generation model
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Text-to-speech model
    #[serde(default = "default_speech_model")]
    pub speech_model: String,

    /// Request timeout; image generation routinely takes tens of seconds
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            base_url: default_base_url(),
            image_model: default_image_model(),
            speech_model: default_speech_model(),
            timeout: default_timeout(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".into()
}

fn default_image_model() -> String {
    "gpt-image-1".into()
}

fn default_speech_model() -> String {
    "gpt-4o-mini-tts".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(120)
}
