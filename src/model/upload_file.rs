use std::fmt;
use std::fmt::Formatter;

use bytes::Bytes;

/// A user selected file waiting to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub content: Bytes,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        UploadFile { name: name.into(), content: content.into() }
    }
}

impl fmt::Display for UploadFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "(name={}, len={})", self.name, self.content.len())
    }
}

/// What the media host reports back for an accepted upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub secure_url: String,
    pub original_filename: String,
}
