use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use image::{GrayImage, Luma};
use tracing::debug;

use crate::error::ValidateError;
use crate::models::BitMatrix;

static IMAGE_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Write a binarized image (dark = black) as PNG, creating parent directories
pub(crate) fn save_binary_image(binary: &BitMatrix, path: &Path) -> Result<(), ValidateError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(image::ImageError::IoError)?;
    }
    let img = GrayImage::from_fn(binary.width() as u32, binary.height() as u32, |x, y| {
        Luma([if binary.get(x as usize, y as usize) { 0 } else { 255 }])
    });
    img.save(path)?;
    debug!(path = %path.display(), "saved debug image");
    Ok(())
}

/// Fresh file name inside `dir` for one validation attempt
pub(crate) fn debug_image_path(dir: &Path, attempt: &str) -> PathBuf {
    let n = IMAGE_COUNTER.fetch_add(1, Ordering::Relaxed);
    dir.join(format!("scan-{}-{n:04}-{attempt}.png", std::process::id()))
}
