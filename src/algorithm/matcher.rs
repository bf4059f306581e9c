//! Best-match search over the tile library and the per-run matcher context

use crate::algorithm::cache::{Match, RegionCache, RegionKey};
use crate::algorithm::difference::compute_difference;
use crate::algorithm::library::Library;
use crate::algorithm::table::{CacheStats, DifferenceTable};
use crate::algorithm::tiling::{Assignment, tile_regions};
use crate::io::error::{MosaicError, Result, invalid_parameter};
use image::RgbaImage;

/// How a region's best library entry is determined
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum MatchStrategy {
    /// Compare the region against every library entry
    #[default]
    Direct,
    /// Score candidates through table cell `(candidate, current best)`
    ///
    /// Reproduces the historical sketch output exactly. The table lookup scores
    /// library entries against each other rather than against the region, and
    /// misses are written back under that same key.
    Legacy,
}

/// Matching parameters for one context
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatcherConfig {
    /// Match selection strategy
    pub strategy: MatchStrategy,
    /// Build the complete difference table before the first match
    pub precompute_table: bool,
    /// Reuse matches of byte-identical regions (direct strategy only)
    pub cache_regions: bool,
}

impl MatcherConfig {
    /// Defaults for a strategy: legacy precomputes the table, direct caches regions
    pub fn for_strategy(strategy: MatchStrategy) -> Self {
        Self {
            strategy,
            precompute_table: strategy == MatchStrategy::Legacy,
            cache_regions: strategy == MatchStrategy::Direct,
        }
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self::for_strategy(MatchStrategy::default())
    }
}

/// Eagerly compute the pairwise difference table of a library
///
/// # Errors
///
/// Returns `DimensionMismatch` if two thumbnails differ in sample count.
pub fn build_difference_table(library: &Library) -> Result<DifferenceTable> {
    DifferenceTable::build(library.thumbnails())
}

/// Find the library entry closest to `region`
///
/// Index 0 is the initial candidate and later entries replace it only on a
/// strictly lower score, so ties resolve to the lowest index. The table is
/// consulted and updated only by [`MatchStrategy::Legacy`].
///
/// # Errors
///
/// Returns `EmptyLibrary` for an empty library and `DimensionMismatch` when
/// the region and a library entry differ in sample count.
pub fn find_best_match(
    region: &RgbaImage,
    library: &[RgbaImage],
    table: &mut DifferenceTable,
    strategy: MatchStrategy,
) -> Result<Match> {
    match strategy {
        MatchStrategy::Direct => find_best_match_direct(region, library),
        MatchStrategy::Legacy => find_best_match_legacy(region, library, table),
    }
}

/// Direct region-against-candidate search
///
/// # Errors
///
/// Returns `EmptyLibrary` for an empty library and `DimensionMismatch` when
/// the region and a library entry differ in sample count.
pub fn find_best_match_direct(region: &RgbaImage, library: &[RgbaImage]) -> Result<Match> {
    let mut candidates = library.iter().enumerate();
    let Some((_, first)) = candidates.next() else {
        return Err(MosaicError::EmptyLibrary);
    };

    let mut best = Match {
        index: 0,
        score: compute_difference(region, first)?,
    };

    for (index, candidate) in candidates {
        let score = compute_difference(region, candidate)?;
        if score < best.score {
            best = Match { index, score };
        }
    }

    Ok(best)
}

/// Table-driven search keyed by `(candidate, current best)`
///
/// Only the first candidate is scored against the region unconditionally.
/// Every later candidate takes the table value for itself and the current
/// best; on a miss the region-vs-candidate score is computed and stored under
/// that pair. The returned score is the value the winner was chosen with.
///
/// # Errors
///
/// Returns `EmptyLibrary` for an empty library, `InvalidParameter` when the
/// table does not cover the library, and `DimensionMismatch` when the region
/// and a library entry differ in sample count.
pub fn find_best_match_legacy(
    region: &RgbaImage,
    library: &[RgbaImage],
    table: &mut DifferenceTable,
) -> Result<Match> {
    let Some(first) = library.first() else {
        return Err(MosaicError::EmptyLibrary);
    };
    if table.size() != library.len() {
        return Err(invalid_parameter(
            "difference_table",
            &table.size(),
            &format!("table must cover all {} library entries", library.len()),
        ));
    }

    let mut best = Match {
        index: 0,
        score: compute_difference(region, first)?,
    };

    for (index, candidate) in library.iter().enumerate().skip(1) {
        let score = table.get_or_compute(index, best.index, || {
            compute_difference(region, candidate)
        })?;
        if score < best.score {
            best = Match { index, score };
        }
    }

    Ok(best)
}

/// Library, difference table and region cache owned by one matching run
pub struct MatcherContext {
    library: Library,
    table: DifferenceTable,
    /// Complete table built once per library, restored on every reset
    precomputed: Option<DifferenceTable>,
    regions: RegionCache,
    config: MatcherConfig,
}

impl MatcherContext {
    /// Create a context, building the difference table if configured to
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if table precomputation compares
    /// thumbnails of different sizes.
    pub fn new(library: Library, config: MatcherConfig) -> Result<Self> {
        let precomputed = if config.precompute_table {
            Some(build_difference_table(&library)?)
        } else {
            None
        };
        let table = precomputed
            .clone()
            .unwrap_or_else(|| DifferenceTable::new(library.len()));

        Ok(Self {
            library,
            table,
            precomputed,
            regions: RegionCache::new(),
            config,
        })
    }

    /// Library being matched against
    pub const fn library(&self) -> &Library {
        &self.library
    }

    /// Current state of the difference table
    pub const fn table(&self) -> &DifferenceTable {
        &self.table
    }

    /// Matching parameters
    pub const fn config(&self) -> MatcherConfig {
        self.config
    }

    /// Region cache statistics for the current run
    pub const fn region_stats(&self) -> CacheStats {
        self.regions.stats
    }

    /// Replace the current run's table with a fully computed one
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if two thumbnails differ in sample count.
    pub fn build_difference_table(&mut self) -> Result<()> {
        self.table = build_difference_table(&self.library)?;
        Ok(())
    }

    /// Discard all per-run state so the next source image starts fresh
    ///
    /// A table precomputed at construction is restored rather than rebuilt.
    pub fn reset(&mut self) {
        self.regions.clear();
        self.table = self
            .precomputed
            .clone()
            .unwrap_or_else(|| DifferenceTable::new(self.library.len()));
    }

    /// Find the best library entry for one region
    ///
    /// # Errors
    ///
    /// Returns `EmptyLibrary` for an empty library and `DimensionMismatch` when
    /// the region and a library entry differ in sample count.
    pub fn find_best_match(&mut self, region: &RgbaImage) -> Result<Match> {
        let Self {
            library,
            table,
            regions,
            config,
            precomputed: _,
        } = self;

        if config.cache_regions && config.strategy == MatchStrategy::Direct {
            regions.get_or_compute_match(RegionKey::new(region), || {
                find_best_match_direct(region, library.thumbnails())
            })
        } else {
            find_best_match(region, library.thumbnails(), table, config.strategy)
        }
    }

    /// Assign a library index to every full tile of `source`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for an unusable tile size and any matching
    /// error, tagged with the cell it occurred at. No partial result is kept.
    pub fn tile_source_image(
        &mut self,
        source: &RgbaImage,
        tile_size: u32,
    ) -> Result<Vec<Assignment>> {
        self.tile_source_image_with_progress(source, tile_size, |_, _| {})
    }

    /// Same as [`MatcherContext::tile_source_image`], reporting `(done, total)` after each cell
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for an unusable tile size and any matching
    /// error, tagged with the cell it occurred at.
    pub fn tile_source_image_with_progress<F>(
        &mut self,
        source: &RgbaImage,
        tile_size: u32,
        on_cell: F,
    ) -> Result<Vec<Assignment>>
    where
        F: FnMut(usize, usize),
    {
        let assignments = tile_regions(
            source,
            tile_size,
            |region| self.find_best_match(region),
            on_cell,
        )?;

        log::debug!(
            "Matched {} cells: table {}/{} cells filled ({} hits, {} misses), region cache {} hits, {} misses",
            assignments.len(),
            self.table.filled_count(),
            self.table.size() * self.table.size(),
            self.table.stats.hits,
            self.table.stats.misses,
            self.regions.stats.hits,
            self.regions.stats.misses,
        );

        Ok(assignments)
    }

    /// Give the library back, dropping all per-run state
    pub fn into_library(self) -> Library {
        self.library
    }
}
