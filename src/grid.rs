use crate::model::ImageDescriptor;

pub static LOADING_MESSAGE: &str = "Loading gallery...";
pub static EMPTY_MESSAGE: &str = "The gallery is empty. No files found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The dimmed area around the overlay content
    Background,
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCard {
    pub index: usize,
    pub thumbnail_url: String,
    pub alt: String,
    pub download_url: String,
    pub download_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridContent {
    Loading { message: &'static str },
    Empty { message: &'static str },
    Cards(Vec<GridCard>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    pub tag: String,
    pub title: String,
    pub content: GridContent,
}

impl GridView {
    pub fn loading(tag: &str, title: &str) -> Self {
        GridView {
            tag: tag.to_string(),
            title: title.to_string(),
            content: GridContent::Loading { message: LOADING_MESSAGE },
        }
    }

    pub fn cards(&self) -> &[GridCard] {
        match &self.content {
            GridContent::Cards(cards) => cards,
            _ => &[],
        }
    }
}

pub fn grid_view(tag: &str, title: &str, images: &[ImageDescriptor]) -> GridView {
    let content = if images.is_empty() {
        GridContent::Empty { message: EMPTY_MESSAGE }
    } else {
        GridContent::Cards(
            images
                .iter()
                .enumerate()
                .map(|(index, image)| GridCard {
                    index,
                    thumbnail_url: image.display_url.clone(),
                    alt: image.name.clone(),
                    download_url: image.download_url.clone(),
                    download_name: image.name.clone(),
                })
                .collect(),
        )
    };

    GridView { tag: tag.to_string(), title: title.to_string(), content }
}

#[derive(Debug, Default)]
pub struct GridModal {
    visible: bool,
    active_tag: Option<String>,
}

impl GridModal {
    pub fn open(&mut self, tag: &str) {
        self.active_tag = Some(tag.to_string());
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn pointer(&mut self, target: PointerTarget) -> bool {
        if self.visible && target == PointerTarget::Background {
            self.close();
            return true;
        }
        false
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn active_tag(&self) -> Option<&str> {
        self.active_tag.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::testing::image;

    #[test]
    fn empty_list_shows_empty_message() {
        let view = grid_view("alexa", "Alexa & Edi", &[]);
        assert_eq!(view.content, GridContent::Empty { message: EMPTY_MESSAGE });
        assert!(view.cards().is_empty());
    }

    #[test]
    fn one_card_per_image_in_store_order() {
        let images = vec![image("familie/a", "jpg"), image("familie/b", "png")];
        let view = grid_view("familie", "familie", &images);

        let cards = view.cards();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].index, 0);
        assert_eq!(cards[0].thumbnail_url, images[0].display_url);
        assert_eq!(cards[1].download_url, images[1].download_url);
        assert_eq!(cards[1].download_name, "b.png");
    }

    #[test]
    fn loading_placeholder_has_no_cards() {
        let view = GridView::loading("alexa", "alexa");
        assert_eq!(view.content, GridContent::Loading { message: LOADING_MESSAGE });
        assert!(view.cards().is_empty());
    }

    #[test]
    fn closes_only_on_background() {
        let mut modal = GridModal::default();
        modal.open("alexa");

        assert!(!modal.pointer(PointerTarget::Content));
        assert!(modal.is_visible());
        assert!(modal.pointer(PointerTarget::Background));
        assert!(!modal.is_visible());
        assert_eq!(modal.active_tag(), Some("alexa"));
    }
}
