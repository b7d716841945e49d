use std::fmt;
use std::fmt::Formatter;

use crate::config::GalleryConfig;

/// One remote image as the gallery shows it. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    /// Size constrained, auto optimized rendition used for thumbnails
    pub display_url: String,
    /// Unmodified original rendition
    pub full_url: String,
    pub download_url: String,
    pub name: String,
}

impl ImageDescriptor {
    /// Builds the descriptor of a listed resource. An empty `format` counts as absent.
    pub fn from_resource(config: &GalleryConfig, public_id: &str, format: Option<&str>) -> Self {
        let format = format.filter(|f| !f.is_empty());
        let full_url = config.image_url(public_id, format, false);

        ImageDescriptor {
            display_url: config.image_url(public_id, format, true),
            download_url: full_url.clone(),
            full_url,
            name: display_name(public_id, format),
        }
    }
}

/// Last path segment of the public id, plus the format extension.
pub fn display_name(public_id: &str, format: Option<&str>) -> String {
    let base = public_id.rsplit('/').next().unwrap_or(public_id);
    match format {
        Some(format) if !format.is_empty() => format!("{}.{}", base, format),
        _ => base.to_string(),
    }
}

impl fmt::Display for ImageDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "(name={}, url={})", self.name, self.full_url)
    }
}
