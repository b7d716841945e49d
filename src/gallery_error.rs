use std::io;
use thiserror::Error;

/// Failures of a single remote operation. Each one is caught where it happens,
/// logged with its tag or file, and turned into an empty list or an uncounted upload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GalleryError {
    /// Listing endpoint answered with a non-success status
    #[error("HTTP error {status} for tag \"{tag}\". Enable \"Resource list\" in the media host security settings.")]
    RemoteList { tag: String, status: u16 },

    /// Listing request could not be sent or its body could not be parsed
    #[error("communication failure for tag \"{tag}\": {reason}")]
    RemoteCommunication { tag: String, reason: String },

    /// Upload response carried no secure url, or the transport failed
    #[error("upload of \"{file}\" rejected: {message}")]
    UploadRejected { file: String, message: String },
}

impl GalleryError {
    /// Short human readable reason, without the tag or file context.
    pub fn reason(&self) -> String {
        match self {
            GalleryError::RemoteList { status, .. } => format!("HTTP error {}", status),
            GalleryError::RemoteCommunication { reason, .. } => reason.clone(),
            GalleryError::UploadRejected { message, .. } => message.clone(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("can not read config: {0}")]
    Io(#[from] io::Error),

    #[error("malformed config: {0}")]
    Json(#[from] json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
