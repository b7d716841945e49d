//! Tagged photo gallery backed by a hosted media service: listing, thumbnail grid,
//! lightbox navigation and batch uploads, independent of any particular front-end.

pub mod cloud_store;
pub mod config;
pub mod diagnostics;
pub mod file;
pub mod gallery_error;
pub mod gallery_store;
pub mod grid;
pub mod lightbox;
pub mod model;
pub mod page;
pub mod repository;
pub mod upload;

pub use cloud_store::StoreClient;
pub use config::{GalleryConfig, TagConfig};
pub use diagnostics::Diagnostics;
pub use gallery_error::{ConfigError, GalleryError};
pub use gallery_store::GalleryStore;
pub use model::{ImageDescriptor, UploadFile, UploadReceipt};
pub use page::{GalleryPage, Key, PageEvent, PageView};
pub use repository::ImageRepository;
