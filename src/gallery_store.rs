use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::diagnostics::Diagnostics;
use crate::model::ImageDescriptor;
use crate::repository::ImageRepository;

pub type ImageList = Arc<[ImageDescriptor]>;

/// Tag to image list mapping. Lists are only ever replaced whole, and a reader
/// holding a snapshot keeps seeing the list it got.
#[derive(Debug, Default)]
pub struct GalleryStore {
    entries: RwLock<HashMap<String, ImageList>>,
}

impl GalleryStore {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = tags.into_iter().map(|t| (t.into(), empty())).collect();
        GalleryStore { entries: RwLock::new(entries) }
    }

    /// Snapshot of the list for `tag`, empty when the tag is unknown or not loaded yet.
    pub fn get(&self, tag: &str) -> ImageList {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(tag)
            .cloned()
            .unwrap_or_else(empty)
    }

    pub fn replace(&self, tag: &str, images: Vec<ImageDescriptor>) {
        let list: ImageList = images.into();
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(tag.to_string(), list);
    }

    /// Image count per tag, in the given order.
    pub fn counts(&self, tags: &[String]) -> Vec<(String, usize)> {
        tags.iter().map(|t| (t.clone(), self.get(t).len())).collect()
    }

    /// Lists every tag one after another and swaps each result in. A failed
    /// listing is logged and leaves that tag empty.
    pub async fn reload_all<R: ImageRepository>(&self, repo: &R, tags: &[String], log: &Diagnostics) {
        log.log("Loading all galleries from the media host...");
        for tag in tags {
            let images = match repo.list_by_tag(tag).await {
                Ok(images) => {
                    log.log(format!("Tag \"{}\": {} images found.", tag, images.len()));
                    images
                }
                Err(err) => {
                    log.warn(format!("Error fetching images for tag \"{}\": {}", tag, err));
                    Vec::new()
                }
            };
            self.replace(tag, images);
        }
        log.log("Gallery load finished.");
    }
}

fn empty() -> ImageList {
    Arc::from(Vec::new())
}
