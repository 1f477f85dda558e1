//! Generated media backed by a scoped temporary file.

use crate::error::MediaError;
use crate::sink::AttachmentRef;
use crate::types::MediaKind;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Filename stem used for generated media.
const FILE_STEM: &str = "openai";

/// Bytes returned by a generation call.
///
/// The content is also written to a temporary file, which is deleted when
/// the handle is dropped unless it is [`persist`](Self::persist)ed first.
#[derive(Debug)]
pub struct GeneratedMedia {
    content: Vec<u8>,
    kind: MediaKind,
    extension: String,
    mime_type: String,
    file: NamedTempFile,
}

impl GeneratedMedia {
    pub(crate) fn new(
        content: Vec<u8>,
        kind: MediaKind,
        extension: &str,
        mime_type: String,
    ) -> Result<Self, MediaError> {
        let mut file = tempfile::Builder::new()
            .prefix(FILE_STEM)
            .suffix(&format!(".{}", extension))
            .tempfile()?;
        file.write_all(&content)?;
        file.flush()?;

        Ok(Self {
            content,
            kind,
            extension: extension.to_string(),
            mime_type,
            file,
        })
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Name given to the media when attached, e.g. `openai.png`.
    pub fn filename(&self) -> String {
        format!("{}.{}", FILE_STEM, self.extension)
    }

    /// Location of the temporary file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Keep the temporary file by moving it to `path`.
    pub fn persist(self, path: impl AsRef<Path>) -> Result<File, MediaError> {
        self.file
            .persist(path)
            .map_err(|e| MediaError::Io(e.error))
    }
}

/// Result of a generation call.
#[derive(Debug)]
pub enum MediaOutput {
    /// No sink was given; the caller owns the temporary media.
    Generated(GeneratedMedia),
    /// The media was handed to a sink and the temporary file released.
    Attached(AttachmentRef),
}

impl MediaOutput {
    pub fn content_type(&self) -> &str {
        match self {
            MediaOutput::Generated(media) => media.mime_type(),
            MediaOutput::Attached(attachment) => &attachment.content_type,
        }
    }

    pub fn byte_size(&self) -> u64 {
        match self {
            MediaOutput::Generated(media) => media.len() as u64,
            MediaOutput::Attached(attachment) => attachment.byte_size,
        }
    }

    pub fn into_generated(self) -> Option<GeneratedMedia> {
        match self {
            MediaOutput::Generated(media) => Some(media),
            MediaOutput::Attached(_) => None,
        }
    }

    pub fn into_attachment(self) -> Option<AttachmentRef> {
        match self {
            MediaOutput::Attached(attachment) => Some(attachment),
            MediaOutput::Generated(_) => None,
        }
    }
}
