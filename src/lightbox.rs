use crate::grid::PointerTarget;
use crate::model::ImageDescriptor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightboxState {
    Closed,
    Open { tag: String, index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxFrame {
    pub image_url: String,
    pub alt: String,
    pub download_url: String,
    pub download_name: String,
    /// `"<1-based index> / <total>"`
    pub caption: String,
}

/// Maps any requested index onto `0..len`: below zero goes to the last item,
/// at or past `len` goes to the first. `len` must not be zero.
pub fn wrap_index(requested: isize, len: usize) -> usize {
    if requested < 0 {
        len - 1
    } else if requested as usize >= len {
        0
    } else {
        requested as usize
    }
}

#[derive(Debug)]
pub struct Lightbox {
    state: LightboxState,
    scroll_locked: bool,
}

impl Default for Lightbox {
    fn default() -> Self {
        Lightbox { state: LightboxState::Closed, scroll_locked: false }
    }
}

impl Lightbox {
    pub fn open(&mut self, tag: &str, images: &[ImageDescriptor], index: isize) -> Option<LightboxFrame> {
        if images.is_empty() {
            return None;
        }

        let index = wrap_index(index, images.len());
        self.state = LightboxState::Open { tag: tag.to_string(), index };
        self.scroll_locked = true;
        Some(frame(images, index))
    }

    pub fn navigate(&mut self, images: &[ImageDescriptor], step: isize) -> Option<LightboxFrame> {
        let (tag, current) = match &self.state {
            LightboxState::Open { tag, index } => (tag.clone(), *index),
            LightboxState::Closed => return None,
        };
        self.open(&tag, images, current as isize + step)
    }

    pub fn next(&mut self, images: &[ImageDescriptor]) -> Option<LightboxFrame> {
        self.navigate(images, 1)
    }

    pub fn previous(&mut self, images: &[ImageDescriptor]) -> Option<LightboxFrame> {
        self.navigate(images, -1)
    }

    pub fn close(&mut self) {
        self.state = LightboxState::Closed;
        self.scroll_locked = false;
    }

    pub fn pointer(&mut self, target: PointerTarget) -> bool {
        if self.is_open() && target == PointerTarget::Background {
            self.close();
            return true;
        }
        false
    }

    pub fn state(&self) -> &LightboxState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, LightboxState::Open { .. })
    }

    pub fn active_tag(&self) -> Option<&str> {
        match &self.state {
            LightboxState::Open { tag, .. } => Some(tag),
            LightboxState::Closed => None,
        }
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }
}

fn frame(images: &[ImageDescriptor], index: usize) -> LightboxFrame {
    let image = &images[index];
    LightboxFrame {
        image_url: image.full_url.clone(),
        alt: image.name.clone(),
        download_url: image.download_url.clone(),
        download_name: image.name.clone(),
        caption: format!("{} / {}", index + 1, images.len()),
    }
}
