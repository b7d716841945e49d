use crate::diagnostics::Diagnostics;
use crate::gallery_store::GalleryStore;
use crate::model::UploadFile;
use crate::repository::ImageRepository;

pub static NO_FILES_MESSAGE: &str = "Select files before uploading.";
static IN_PROGRESS_MESSAGE: &str = "Uploading...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub tag: String,
    pub attempted: usize,
    pub succeeded: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Nothing was selected, no request was made
    NoFiles,
    /// Target tag is not one of the configured tags, no request was made
    UnknownTag(String),
    Completed(UploadReport),
}

/// File picker, submit control and status line of the upload form.
#[derive(Debug)]
pub struct UploadPanel {
    selection: Vec<UploadFile>,
    submit_enabled: bool,
    status: String,
}

impl Default for UploadPanel {
    fn default() -> Self {
        UploadPanel { selection: Vec::new(), submit_enabled: true, status: String::new() }
    }
}

impl UploadPanel {
    pub fn select(&mut self, files: Vec<UploadFile>) {
        self.selection = files;
    }

    pub fn selection(&self) -> &[UploadFile] {
        &self.selection
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Uploads the selection one file at a time, then reloads every tag once.
    ///
    /// A failed file is logged and skipped; the batch always runs to the end.
    /// `progress` is told `(done, total)` after each attempt.
    pub async fn submit<R, F>(
        &mut self,
        repo: &R,
        store: &GalleryStore,
        tags: &[String],
        target: &str,
        log: &Diagnostics,
        mut progress: F,
    ) -> UploadOutcome
    where
        R: ImageRepository,
        F: FnMut(usize, usize),
    {
        if self.selection.is_empty() {
            self.status = NO_FILES_MESSAGE.to_string();
            return UploadOutcome::NoFiles;
        }
        if !tags.iter().any(|t| t == target) {
            self.status = format!("Unknown gallery \"{}\".", target);
            return UploadOutcome::UnknownTag(target.to_string());
        }

        self.status = IN_PROGRESS_MESSAGE.to_string();
        self.submit_enabled = false;

        let total = self.selection.len();
        let mut succeeded = 0;
        for (i, file) in self.selection.iter().enumerate() {
            match repo.upload_one(file, target).await {
                Ok(receipt) => {
                    succeeded += 1;
                    log.log(format!("Upload succeeded ({}): {}", target, receipt.original_filename));
                }
                Err(err) => {
                    log.warn(format!("Upload error ({}): {} - {}", target, file.name, err.reason()));
                }
            }
            progress(i + 1, total);
        }

        self.selection.clear();
        self.status = format!("Refreshing gallery \"{}\"...", target);
        store.reload_all(repo, tags, log).await;

        self.submit_enabled = true;
        self.status = format!(
            "Successfully uploaded {} files. Gallery \"{}\" is up to date.",
            succeeded, target
        );
        log.log(format!("Gallery \"{}\" refreshed after upload.", target));

        UploadOutcome::Completed(UploadReport { tag: target.to_string(), attempted: total, succeeded })
    }
}
