pub mod cache;
pub mod tiling;
