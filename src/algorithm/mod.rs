/// Memoized matches for byte-identical regions
pub mod cache;
/// Pixel-wise difference scoring
pub mod difference;
/// Fixed tile library with matching thumbnails and rendering originals
pub mod library;
/// Best-match search strategies and the per-run matcher context
pub mod matcher;
/// Memoized pairwise difference table
pub mod table;
/// Source image traversal into tile-sized regions
pub mod tiling;
