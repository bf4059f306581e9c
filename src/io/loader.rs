//! Image decoding and library assembly from the filesystem

use crate::algorithm::library::Library;
use crate::io::configuration::is_supported_image;
use crate::io::error::{MosaicError, Result};
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Decode an image file into RGBA8
///
/// # Errors
///
/// Returns `ImageLoad` if the file does not exist, cannot be read, or is not
/// a decodable image.
pub fn open_image<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    let path_buf = path.as_ref().to_path_buf();
    let img = image::open(&path_buf).map_err(|e| MosaicError::ImageLoad {
        path: path_buf,
        source: e,
    })?;
    Ok(img.to_rgba8())
}

/// List supported image files directly inside `dir`, sorted by path
///
/// # Errors
///
/// Returns `FileSystem` if the directory cannot be read.
pub fn collect_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_error = |e: std::io::Error| MosaicError::FileSystem {
        path: dir.to_path_buf(),
        operation: "read directory",
        source: e,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() && is_supported_image(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

impl Library {
    /// Load every path in order and shrink each to a `tile_size` thumbnail
    ///
    /// # Errors
    ///
    /// Returns `ImageLoad` for the first path that fails to decode, or
    /// `InvalidParameter` for an unusable tile size.
    pub fn from_paths<P: AsRef<Path>>(paths: &[P], tile_size: u32) -> Result<Self> {
        let images = paths
            .iter()
            .map(open_image)
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Loaded {} library images", images.len());
        Self::from_images(images, tile_size)
    }

    /// Load the supported images of a directory in sorted order
    ///
    /// `limit` keeps only the first entries after sorting.
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the directory cannot be read, `InvalidSourceData`
    /// if it holds no supported images, and any loading error from
    /// [`Library::from_paths`].
    pub fn from_directory(dir: &Path, tile_size: u32, limit: Option<usize>) -> Result<Self> {
        let mut paths = collect_images(dir)?;
        if let Some(limit) = limit {
            paths.truncate(limit);
        }

        if paths.is_empty() {
            return Err(MosaicError::InvalidSourceData {
                reason: format!("no library images found in '{}'", dir.display()),
            });
        }

        Self::from_paths(&paths, tile_size)
    }
}
