/// Command-line interface and batch processing
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Image and library loading from disk
pub mod loader;
/// Batch progress display
pub mod progress;
/// Mosaic rendering and PNG export
pub mod render;
