//! Matching constants and runtime configuration defaults

/// Edge length in pixels of the square source regions and library thumbnails
pub const DEFAULT_TILE_SIZE: u32 = 10;

// Upper bound keeps a single region comparison from dominating memory
/// Largest accepted tile edge length
pub const MAX_TILE_SIZE: u32 = 1024;

/// Fixed seed for reproducible random source selection
pub const DEFAULT_SEED: u64 = 42;

/// File extensions accepted for library and source images
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Largest accepted edge length of a rendered mosaic cell
pub const MAX_CELL_SIZE: u32 = 1024;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_mosaic";
/// Extension of generated mosaics
pub const OUTPUT_EXTENSION: &str = "png";

/// Check whether a path has one of the supported image extensions
pub fn is_supported_image(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
}
