use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;

use crate::model::UploadFile;

static IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "heic", "bmp", "tiff"];

/// Regular files directly inside `path`, sorted by name.
pub fn list_files<P: AsRef<Path>>(path: P) -> io::Result<Vec<PathBuf>> {
    let mut paths = vec!();
    for entry in fs::read_dir(path)? {
        match entry {
            Ok(e) if e.path().is_file() => paths.push(e.path()),
            Ok(_) => {}
            Err(e) => warn!("failed to read a path due to {:?}", e),
        }
    }
    paths.sort();

    Ok(paths)
}

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Reads every image among `paths` into memory, skipping anything else.
pub fn read_upload_files(paths: &[PathBuf]) -> io::Result<Vec<UploadFile>> {
    let mut files = Vec::new();

    for path in paths {
        if !is_image(path) {
            warn!("{:?} is not an image", path);
            continue;
        }
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => {
                warn!("{:?} has no usable file name", path);
                continue;
            }
        };
        files.push(UploadFile::new(name, fs::read(path)?));
    }

    Ok(files)
}
