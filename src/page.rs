use log::debug;

use crate::config::GalleryConfig;
use crate::diagnostics::Diagnostics;
use crate::gallery_store::GalleryStore;
use crate::grid::{grid_view, GridModal, GridView, PointerTarget};
use crate::lightbox::{Lightbox, LightboxFrame};
use crate::model::UploadFile;
use crate::repository::ImageRepository;
use crate::upload::{UploadOutcome, UploadPanel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Escape,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    OpenGallery(String),
    CloseGrid,
    GridPointer(PointerTarget),
    SelectThumbnail(usize),
    Next,
    Previous,
    CloseLightbox,
    LightboxPointer(PointerTarget),
    Key(Key),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub grid: Option<GridView>,
    pub lightbox: Option<LightboxFrame>,
    pub scroll_locked: bool,
    pub status: String,
}

pub struct GalleryPage<R> {
    config: GalleryConfig,
    repo: R,
    store: GalleryStore,
    log: Diagnostics,
    grid: GridModal,
    grid_view: Option<GridView>,
    lightbox: Lightbox,
    frame: Option<LightboxFrame>,
    upload: UploadPanel,
}

impl<R: ImageRepository> GalleryPage<R> {
    pub fn new(config: GalleryConfig, repo: R) -> Self {
        let store = GalleryStore::new(config.tag_names());
        GalleryPage {
            config,
            repo,
            store,
            log: Diagnostics::new(),
            grid: GridModal::default(),
            grid_view: None,
            lightbox: Lightbox::default(),
            frame: None,
            upload: UploadPanel::default(),
        }
    }

    pub async fn initialize(&self) {
        self.log.log("Initializing page...");
        self.reload().await;
        self.log.log("All galleries are ready for display.");
    }

    pub async fn reload(&self) {
        self.store.reload_all(&self.repo, &self.config.tag_names(), &self.log).await;
    }

    pub fn handle(&mut self, event: PageEvent) -> PageView {
        debug!("page event {:?}", event);
        match event {
            PageEvent::OpenGallery(tag) => self.open_gallery(&tag),
            PageEvent::CloseGrid => self.close_grid(),
            PageEvent::GridPointer(target) => {
                if self.grid.pointer(target) {
                    self.grid_view = None;
                }
            }
            PageEvent::SelectThumbnail(index) => self.show_lightbox(index),
            // navigation and keys only act while the lightbox is open
            _ if !self.lightbox.is_open() => {}
            PageEvent::Next | PageEvent::Key(Key::Right) => self.navigate(1),
            PageEvent::Previous | PageEvent::Key(Key::Left) => self.navigate(-1),
            PageEvent::CloseLightbox | PageEvent::Key(Key::Escape) => self.close_lightbox(),
            PageEvent::LightboxPointer(target) => {
                if self.lightbox.pointer(target) {
                    self.frame = None;
                }
            }
            PageEvent::Key(Key::Other) => {}
        }
        self.view()
    }

    pub fn view(&self) -> PageView {
        PageView {
            grid: self.grid_view.clone().filter(|_| self.grid.is_visible()),
            lightbox: self.frame.clone().filter(|_| self.lightbox.is_open()),
            scroll_locked: self.lightbox.scroll_locked(),
            status: self.upload.status().to_string(),
        }
    }

    pub fn select_files(&mut self, files: Vec<UploadFile>) {
        self.upload.select(files);
    }

    pub async fn upload<F: FnMut(usize, usize)>(&mut self, tag: &str, progress: F) -> UploadOutcome {
        let tags = self.config.tag_names();
        self.upload.submit(&self.repo, &self.store, &tags, tag, &self.log, progress).await
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn store(&self) -> &GalleryStore {
        &self.store
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.log
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.upload.is_submit_enabled()
    }

    fn title(&self, tag: &str) -> String {
        self.config
            .tag(tag)
            .map(|t| t.display_title().to_string())
            .unwrap_or_else(|| tag.to_string())
    }

    fn open_gallery(&mut self, tag: &str) {
        let title = self.title(tag);
        self.grid.open(tag);
        self.grid_view = Some(GridView::loading(tag, &title));

        let images = self.store.get(tag);
        self.grid_view = Some(grid_view(tag, &title, &images));
    }

    fn close_grid(&mut self) {
        self.grid.close();
        self.grid_view = None;
    }

    fn show_lightbox(&mut self, index: usize) {
        let tag = match self.grid.active_tag() {
            Some(tag) if self.grid.is_visible() => tag.to_string(),
            _ => return,
        };
        let images = self.store.get(&tag);
        if let Some(frame) = self.lightbox.open(&tag, &images, index as isize) {
            self.close_grid();
            self.frame = Some(frame);
        }
    }

    fn navigate(&mut self, step: isize) {
        let images = match self.lightbox.active_tag() {
            Some(tag) => self.store.get(tag),
            None => return,
        };
        if let Some(frame) = self.lightbox.navigate(&images, step) {
            self.frame = Some(frame);
        }
    }

    fn close_lightbox(&mut self) {
        self.lightbox.close();
        self.frame = None;
    }
}
