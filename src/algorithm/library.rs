//! Fixed tile library shared by every matching run

use crate::io::configuration::MAX_TILE_SIZE;
use crate::io::error::{MosaicError, Result, invalid_parameter};
use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Ordered, immutable set of candidate tiles
///
/// Each entry has a thumbnail used for matching and an original used for
/// rendering. All thumbnails share the same dimensions so any two of them can
/// be compared sample by sample.
#[derive(Clone, Debug, Default)]
pub struct Library {
    thumbnails: Vec<RgbaImage>,
    originals: Vec<RgbaImage>,
    tile_dimensions: (u32, u32),
}

impl Library {
    /// Build a library whose thumbnails are the given images
    ///
    /// The images double as originals. An empty library is accepted; matching
    /// against it fails later with `EmptyLibrary`.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the images do not all share the
    /// dimensions of the first one.
    pub fn new(thumbnails: Vec<RgbaImage>) -> Result<Self> {
        let tile_dimensions = thumbnails.first().map_or((0, 0), RgbaImage::dimensions);

        if let Some(first) = thumbnails.first() {
            for thumbnail in &thumbnails {
                if thumbnail.dimensions() != tile_dimensions {
                    return Err(MosaicError::DimensionMismatch {
                        expected: first.as_raw().len(),
                        actual: thumbnail.as_raw().len(),
                        cell: None,
                    });
                }
            }
        }

        Ok(Self {
            originals: thumbnails.clone(),
            thumbnails,
            tile_dimensions,
        })
    }

    /// Build a library from arbitrary images, shrinking each to a square thumbnail
    ///
    /// # Errors
    ///
    /// Returns an error if `tile_size` is zero or larger than the supported maximum.
    pub fn from_images(images: Vec<RgbaImage>, tile_size: u32) -> Result<Self> {
        validate_tile_size(tile_size)?;

        let thumbnails = images
            .iter()
            .map(|image| imageops::resize(image, tile_size, tile_size, FilterType::Triangle))
            .collect();

        Ok(Self {
            thumbnails,
            originals: images,
            tile_dimensions: (tile_size, tile_size),
        })
    }

    /// Number of tiles in the library
    pub fn len(&self) -> usize {
        self.thumbnails.len()
    }

    /// Test whether the library holds no tiles
    pub fn is_empty(&self) -> bool {
        self.thumbnails.is_empty()
    }

    /// Thumbnails in library order
    pub fn thumbnails(&self) -> &[RgbaImage] {
        &self.thumbnails
    }

    /// Thumbnail at `index`
    pub fn thumbnail(&self, index: usize) -> Option<&RgbaImage> {
        self.thumbnails.get(index)
    }

    /// Full-size image at `index`
    pub fn original(&self, index: usize) -> Option<&RgbaImage> {
        self.originals.get(index)
    }

    /// Shared thumbnail dimensions (width, height); `(0, 0)` when empty
    pub const fn tile_dimensions(&self) -> (u32, u32) {
        self.tile_dimensions
    }
}

/// Reject tile edge lengths the matcher cannot work with
///
/// # Errors
///
/// Returns `InvalidParameter` if `tile_size` is zero or above [`MAX_TILE_SIZE`].
pub fn validate_tile_size(tile_size: u32) -> Result<()> {
    if tile_size == 0 {
        return Err(invalid_parameter(
            "tile_size",
            &tile_size,
            &"must be at least 1",
        ));
    }
    if tile_size > MAX_TILE_SIZE {
        return Err(invalid_parameter(
            "tile_size",
            &tile_size,
            &format!("must not exceed {MAX_TILE_SIZE}"),
        ));
    }
    Ok(())
}
