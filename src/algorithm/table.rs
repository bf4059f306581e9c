use crate::algorithm::difference::compute_difference;
use crate::io::error::{MosaicError, Result};
use bitvec::prelude::*;
use image::RgbaImage;
use ndarray::Array2;

/// Lookup performance counters for a memoized table
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of lookups answered from stored values
    pub hits: usize,
    /// Number of lookups that required a computation
    pub misses: usize,
}

/// Square symmetric memo of pairwise difference scores
///
/// Cells start empty and are written at most once; a written cell is never
/// recomputed or overwritten for the lifetime of the table. Writes always
/// fill `(i, j)` and `(j, i)` together.
#[derive(Clone, Debug)]
pub struct DifferenceTable {
    scores: Array2<f64>,
    filled: BitVec,
    size: usize,

    /// Lookup statistics for [`DifferenceTable::get_or_compute`]
    pub stats: CacheStats,
}

impl DifferenceTable {
    /// Create a table for `size` library entries with every cell empty
    pub fn new(size: usize) -> Self {
        Self {
            scores: Array2::zeros((size, size)),
            filled: bitvec![0; size * size],
            size,
            stats: CacheStats::default(),
        }
    }

    /// Eagerly compute every pairwise score of the library
    ///
    /// Trades O(N²) comparisons up front for O(1) lookups during matching.
    /// Only the upper triangle is compared; the diagonal is zero by definition.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if two library images differ in sample count.
    pub fn build(library: &[RgbaImage]) -> Result<Self> {
        let mut table = Self::new(library.len());

        for (i, tile_i) in library.iter().enumerate() {
            table.insert(i, i, 0.0)?;
            for (j, tile_j) in library.iter().enumerate().skip(i + 1) {
                let score = compute_difference(tile_i, tile_j)?;
                table.insert(i, j, score)?;
            }
        }

        log::debug!(
            "Built {n}x{n} difference table ({} comparisons)",
            library.len() * library.len().saturating_sub(1) / 2,
            n = library.len()
        );

        Ok(table)
    }

    /// Number of library entries the table covers
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Stored score for `(i, j)`, or `None` if the cell is empty or out of range
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if self.is_filled(i, j) {
            self.scores.get((i, j)).copied()
        } else {
            None
        }
    }

    /// Test whether `(i, j)` holds a score
    pub fn is_filled(&self, i: usize, j: usize) -> bool {
        i < self.size
            && j < self.size
            && self.filled.get(i * self.size + j).as_deref() == Some(&true)
    }

    /// Store `score` at `(i, j)` and `(j, i)` unless the cell is already written
    ///
    /// Returns `true` when the score was stored and `false` when an existing
    /// value was kept.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileIndex` if either index is outside the table.
    pub fn insert(&mut self, i: usize, j: usize, score: f64) -> Result<bool> {
        self.check_index(i)?;
        self.check_index(j)?;

        if self.is_filled(i, j) {
            return Ok(false);
        }

        for (row, col) in [(i, j), (j, i)] {
            if let Some(cell) = self.scores.get_mut((row, col)) {
                *cell = score;
            }
            self.filled.set(row * self.size + col, true);
        }

        Ok(true)
    }

    /// Retrieve the stored score or compute and store a new one
    ///
    /// The closure is only invoked when `(i, j)` is empty.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileIndex` for out of range indices, or whatever error
    /// the closure produces.
    pub fn get_or_compute<F>(&mut self, i: usize, j: usize, compute_fn: F) -> Result<f64>
    where
        F: FnOnce() -> Result<f64>,
    {
        if let Some(score) = self.get(i, j) {
            self.stats.hits += 1;
            return Ok(score);
        }

        self.check_index(i)?;
        self.check_index(j)?;
        self.stats.misses += 1;
        let score = compute_fn()?;
        self.insert(i, j, score)?;
        Ok(score)
    }

    /// Number of written cells, counting both halves of a symmetric pair
    pub fn filled_count(&self) -> usize {
        self.filled.count_ones()
    }

    /// Test whether every cell holds a score
    pub fn is_complete(&self) -> bool {
        self.filled.all()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.size {
            Ok(())
        } else {
            Err(MosaicError::InvalidTileIndex {
                index,
                max_tiles: self.size,
            })
        }
    }
}
