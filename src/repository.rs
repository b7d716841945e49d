use crate::gallery_error::GalleryError;
use crate::model::{ImageDescriptor, UploadFile, UploadReceipt};

/// The two remote operations the gallery needs from a media host.
#[allow(async_fn_in_trait)]
pub trait ImageRepository {
    /// Current listing for `tag`, in the order the host returns it.
    async fn list_by_tag(&self, tag: &str) -> Result<Vec<ImageDescriptor>, GalleryError>;

    /// Uploads one file under `tag`. The new image shows up in later listings eventually.
    async fn upload_one(&self, file: &UploadFile, tag: &str) -> Result<UploadReceipt, GalleryError>;
}
