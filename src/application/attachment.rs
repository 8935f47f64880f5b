//! Validation of files attached to an inbound message.

use thiserror::Error;

use crate::domain::action::StagedAttachment;
use crate::domain::foundation::ErrorCode;

/// File extensions accepted as attachments.
pub const SUPPORTED_EXTENSIONS: [&str; 9] =
    ["pdf", "docx", "jpg", "jpeg", "png", "csv", "xlsx", "txt", "md"];

/// A file as received from the client.
#[derive(Clone, PartialEq, Eq)]
pub struct IncomingAttachment {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for IncomingAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncomingAttachment")
            .field("filename", &self.filename)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentError {
    #[error("The attachment has no file name.")]
    MissingFilename,

    #[error("Unsupported file type '{filename}'. Supported types: {}.", SUPPORTED_EXTENSIONS.join(", "))]
    UnsupportedType { filename: String },

    #[error("The attachment '{filename}' is {size} bytes; the limit is {max} bytes.")]
    TooLarge { filename: String, size: usize, max: usize },

    #[error("The attachment '{filename}' is empty.")]
    Empty { filename: String },
}

impl AttachmentError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::UnsupportedAttachment
    }
}

impl IncomingAttachment {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Lower-cased extension, if the name has one.
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
    }

    /// Checks name, type and size, and converts into a staged descriptor.
    pub fn validate(self, max_bytes: usize) -> Result<StagedAttachment, AttachmentError> {
        let filename = self.filename.trim().to_string();
        if filename.is_empty() {
            return Err(AttachmentError::MissingFilename);
        }

        let supported = self
            .extension()
            .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()));
        if !supported {
            return Err(AttachmentError::UnsupportedType { filename });
        }
        if self.bytes.is_empty() {
            return Err(AttachmentError::Empty { filename });
        }
        if self.bytes.len() > max_bytes {
            return Err(AttachmentError::TooLarge {
                filename,
                size: self.bytes.len(),
                max: max_bytes,
            });
        }

        Ok(StagedAttachment::new(filename, self.bytes))
    }
}
