use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::gallery_error::ConfigError;

pub static DEFAULT_CONFIG_PATH: &str = "gallery.json";
pub static DEFAULT_THUMBNAIL_TRANSFORMATION: &str = "w_400,h_400,c_fill,g_auto,q_auto,f_auto";
static DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";
static DEFAULT_DELIVERY_BASE: &str = "https://res.cloudinary.com";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawTag")]
pub struct TagConfig {
    pub name: String,
    pub title: Option<String>,
}

impl TagConfig {
    pub fn new(name: impl Into<String>) -> Self {
        TagConfig { name: name.into(), title: None }
    }

    pub fn with_title(name: impl Into<String>, title: impl Into<String>) -> Self {
        TagConfig { name: name.into(), title: Some(title.into()) }
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTag {
    Name(String),
    Titled { name: String, title: Option<String> },
}

impl From<RawTag> for TagConfig {
    fn from(raw: RawTag) -> Self {
        match raw {
            RawTag::Name(name) => TagConfig { name, title: None },
            RawTag::Titled { name, title } => TagConfig { name, title },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GalleryConfig {
    /// Media host identifier
    pub cloud_name: String,
    /// Unsigned upload credential
    pub upload_preset: String,
    pub tags: Vec<TagConfig>,
    #[serde(default = "default_transformation")]
    pub thumbnail_transformation: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_delivery_base")]
    pub delivery_base: String,
}

fn default_transformation() -> String {
    DEFAULT_THUMBNAIL_TRANSFORMATION.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_delivery_base() -> String {
    DEFAULT_DELIVERY_BASE.to_string()
}

impl GalleryConfig {
    pub fn new(cloud_name: &str, upload_preset: &str, tags: Vec<TagConfig>) -> Self {
        GalleryConfig {
            cloud_name: cloud_name.to_string(),
            upload_preset: upload_preset.to_string(),
            tags,
            thumbnail_transformation: default_transformation(),
            api_base: default_api_base(),
            delivery_base: default_delivery_base(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: GalleryConfig = json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cloud_name.trim().is_empty() {
            return Err(ConfigError::Invalid("cloud_name is empty".to_string()));
        }
        if self.upload_preset.trim().is_empty() {
            return Err(ConfigError::Invalid("upload_preset is empty".to_string()));
        }
        if self.tags.is_empty() {
            return Err(ConfigError::Invalid("no tags configured".to_string()));
        }

        let mut seen = HashSet::new();
        for tag in &self.tags {
            if tag.name.trim().is_empty() || tag.name.contains('/') {
                return Err(ConfigError::Invalid(format!("tag name {:?} is not valid", tag.name)));
            }
            if !seen.insert(tag.name.as_str()) {
                return Err(ConfigError::Invalid(format!("tag {} is listed twice", tag.name)));
            }
        }

        Ok(())
    }

    pub fn tag(&self, name: &str) -> Option<&TagConfig> {
        self.tags.iter().find(|t| t.name == name)
    }

    pub fn tag_names(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.name.clone()).collect()
    }

    pub fn listing_url(&self, tag: &str) -> String {
        format!("{}/{}/image/list/{}.json", self.delivery_base.trim_end_matches('/'), self.cloud_name, tag)
    }

    pub fn upload_url(&self) -> String {
        format!("{}/{}/upload", self.api_base.trim_end_matches('/'), self.cloud_name)
    }

    pub fn image_url(&self, public_id: &str, format: Option<&str>, thumbnail: bool) -> String {
        let mut url = format!("{}/{}/image/upload/", self.delivery_base.trim_end_matches('/'), self.cloud_name);
        if thumbnail {
            url.push_str(&self.thumbnail_transformation);
            url.push('/');
        }
        url.push_str(public_id);
        if let Some(format) = format {
            url.push('.');
            url.push_str(format);
        }
        url
    }
}
