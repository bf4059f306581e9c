//! Grid traversal of a source image into tile-sized regions

use crate::algorithm::cache::Match;
use crate::algorithm::library::{Library, validate_tile_size};
use crate::algorithm::matcher::find_best_match_direct;
use crate::io::error::{Result, WithContext};
use image::RgbaImage;
use image::imageops;

/// Library index chosen for one grid cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Assignment {
    /// Left edge of the cell in source pixels
    pub x: u32,
    /// Top edge of the cell in source pixels
    pub y: u32,
    /// Chosen library index
    pub index: usize,
    /// Score the index was chosen with
    pub score: f64,
}

impl Assignment {
    /// Cell column and row for a given tile size
    pub const fn cell(&self, tile_size: u32) -> (u32, u32) {
        (self.x / tile_size, self.y / tile_size)
    }
}

/// Number of whole tiles across and down; partial edge tiles are dropped
pub const fn grid_dimensions(width: u32, height: u32, tile_size: u32) -> (u32, u32) {
    if tile_size == 0 {
        return (0, 0);
    }
    (width / tile_size, height / tile_size)
}

/// Crop the `tile_size` square region whose top-left corner is `(x, y)`
pub fn extract_region(source: &RgbaImage, x: u32, y: u32, tile_size: u32) -> RgbaImage {
    imageops::crop_imm(source, x, y, tile_size, tile_size).to_image()
}

/// Visit every whole cell in row-major order and record its match
///
/// `match_region` is called once per cell; `on_cell` receives
/// `(cells done, total cells)` after each one. The first error aborts the
/// traversal.
///
/// # Errors
///
/// Returns `InvalidParameter` for an unusable tile size, or the first error
/// from `match_region` tagged with the cell position.
pub fn tile_regions<M, F>(
    source: &RgbaImage,
    tile_size: u32,
    mut match_region: M,
    mut on_cell: F,
) -> Result<Vec<Assignment>>
where
    M: FnMut(&RgbaImage) -> Result<Match>,
    F: FnMut(usize, usize),
{
    validate_tile_size(tile_size)?;

    let (columns, rows) = grid_dimensions(source.width(), source.height(), tile_size);
    let total = columns as usize * rows as usize;
    let mut assignments = Vec::with_capacity(total);

    for row in 0..rows {
        for column in 0..columns {
            let (x, y) = (column * tile_size, row * tile_size);
            let region = extract_region(source, x, y, tile_size);
            let found = match_region(&region).with_cell(x, y)?;

            assignments.push(Assignment {
                x,
                y,
                index: found.index,
                score: found.score,
            });
            on_cell(assignments.len(), total);
        }
    }

    Ok(assignments)
}

/// Assign every whole tile of `source` its closest library entry
///
/// Uses direct region-against-candidate comparison with no caching.
///
/// # Errors
///
/// Returns `InvalidParameter` for an unusable tile size, `EmptyLibrary` when
/// the source has at least one cell and the library is empty, and
/// `DimensionMismatch` when the thumbnails are not `tile_size` squares.
pub fn tile_source_image(
    source: &RgbaImage,
    library: &Library,
    tile_size: u32,
) -> Result<Vec<Assignment>> {
    tile_regions(
        source,
        tile_size,
        |region| find_best_match_direct(region, library.thumbnails()),
        |_, _| {},
    )
}
