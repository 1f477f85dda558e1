//! Attachment sinks that take ownership of generated media.

use crate::error::MediaError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Reference to stored media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentRef {
    /// Storage key, unique within the sink.
    pub key: String,
    pub filename: String,
    pub content_type: String,
    pub byte_size: u64,
    /// Hex SHA-256 of the content.
    pub checksum: String,
    pub created_at: DateTime<Utc>,
}

/// A record attribute that generated media can be attached to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttachmentSink: Send + Sync {
    /// Store `content` and return a reference to it.
    async fn attach(
        &self,
        content: &[u8],
        content_type: &str,
        filename: &str,
    ) -> Result<AttachmentRef, MediaError>;
}

/// Stores attachments as files under `{root}/{record}/{attribute}/`.
///
/// Attaching again replaces the previous file of the same name.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
    record: String,
    attribute: String,
}

impl DirectorySink {
    pub fn new(
        root: impl Into<PathBuf>,
        record: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            record: record.into(),
            attribute: attribute.into(),
        }
    }

    fn key(&self, filename: &str) -> Result<String, MediaError> {
        for segment in [self.record.as_str(), self.attribute.as_str(), filename] {
            if segment.is_empty()
                || segment == "."
                || segment == ".."
                || segment.contains(['/', '\\'])
            {
                return Err(MediaError::Attachment(format!(
                    "invalid path segment: {:?}",
                    segment
                )));
            }
        }
        Ok(format!("{}/{}/{}", self.record, self.attribute, filename))
    }
}

#[async_trait]
impl AttachmentSink for DirectorySink {
    #[instrument(skip(self, content), fields(len = content.len()))]
    async fn attach(
        &self,
        content: &[u8],
        content_type: &str,
        filename: &str,
    ) -> Result<AttachmentRef, MediaError> {
        let key = self.key(filename)?;
        let dir = self.root.join(&self.record).join(&self.attribute);

        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(filename), content).await?;

        let checksum = hex::encode(Sha256::digest(content));
        debug!(key = %key, "Stored attachment");

        Ok(AttachmentRef {
            key,
            filename: filename.to_string(),
            content_type: content_type.to_string(),
            byte_size: content.len() as u64,
            checksum,
            created_at: Utc::now(),
        })
    }
}
