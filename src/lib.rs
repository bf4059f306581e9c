//! Photomosaic generation by pixel-wise nearest tile matching
//!
//! A source image is cut into a grid of square regions and each region is
//! assigned the library tile with the lowest summed per-channel difference.
//! Assignments are rendered back into a mosaic by a separate collaborator.

#![forbid(unsafe_code)]

/// Difference scoring, memo tables and tile matching
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;

pub use algorithm::library::Library;
pub use algorithm::matcher::{MatchStrategy, MatcherConfig, MatcherContext};
pub use algorithm::tiling::Assignment;
pub use io::error::{MosaicError, Result};
