//! Mosaic rendering from assignments and PNG export

use crate::algorithm::library::Library;
use crate::algorithm::tiling::Assignment;
use crate::io::configuration::MAX_CELL_SIZE;
use crate::io::error::{MosaicError, Result, invalid_parameter};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;

/// Draw each assigned library original into its cell of a new canvas
///
/// The canvas is `columns * cell_size` by `rows * cell_size`; the assignment
/// at source pixel `(x, y)` lands in cell `(x / tile_size, y / tile_size)`.
/// Cells without an assignment stay transparent. Each library entry is
/// resized at most once.
///
/// # Errors
///
/// Returns an error if:
/// - `tile_size` or `cell_size` is zero, or `cell_size` exceeds [`MAX_CELL_SIZE`]
/// - The canvas dimensions overflow `u32`
/// - An assignment refers to an index outside the library
/// - An assignment lies outside the `columns` by `rows` grid
pub fn render_mosaic(
    assignments: &[Assignment],
    library: &Library,
    tile_size: u32,
    cell_size: u32,
    columns: u32,
    rows: u32,
) -> Result<RgbaImage> {
    if tile_size == 0 {
        return Err(invalid_parameter("tile_size", &tile_size, &"must be at least 1"));
    }
    if cell_size == 0 || cell_size > MAX_CELL_SIZE {
        return Err(invalid_parameter(
            "cell_size",
            &cell_size,
            &format!("must be between 1 and {MAX_CELL_SIZE}"),
        ));
    }

    let canvas_size = (columns.checked_mul(cell_size), rows.checked_mul(cell_size));
    let (Some(width), Some(height)) = canvas_size else {
        return Err(invalid_parameter(
            "grid",
            &format!("{columns}x{rows}"),
            &format!("{cell_size}px cells overflow the canvas size"),
        ));
    };

    // Every cell offset below fits since column < columns and row < rows
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
    let mut scaled: HashMap<usize, RgbaImage> = HashMap::new();

    for assignment in assignments {
        let (column, row) = assignment.cell(tile_size);
        if column >= columns || row >= rows {
            return Err(MosaicError::InvalidSourceData {
                reason: format!(
                    "assignment at {},{} lies outside the {columns}x{rows} grid",
                    assignment.x, assignment.y
                ),
            });
        }

        let tile = match scaled.entry(assignment.index) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let original = library.original(assignment.index).ok_or(
                    MosaicError::InvalidTileIndex {
                        index: assignment.index,
                        max_tiles: library.len(),
                    },
                )?;
                entry.insert(imageops::resize(
                    original,
                    cell_size,
                    cell_size,
                    FilterType::Triangle,
                ))
            }
        };

        imageops::replace(
            &mut canvas,
            &*tile,
            i64::from(column * cell_size),
            i64::from(row * cell_size),
        );
    }

    Ok(canvas)
}

/// Save a rendered mosaic as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_mosaic(mosaic: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    mosaic
        .save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| MosaicError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
