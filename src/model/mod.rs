pub mod image;
pub mod upload_file;

pub use image::ImageDescriptor;
pub use upload_file::{UploadFile, UploadReceipt};
