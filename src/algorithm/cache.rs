use crate::algorithm::table::CacheStats;
use crate::io::error::Result;
use image::RgbaImage;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Outcome of matching one region against the library
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Match {
    /// Chosen library index
    pub index: usize,
    /// Score the index was chosen with
    pub score: f64,
}

/// Key identifying a region by its exact pixel content
///
/// Two regions cropped from different grid cells share a key only when every
/// sample and both dimensions agree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegionKey {
    samples: Vec<u8>,
    width: u32,
    height: u32,
}

impl RegionKey {
    /// Create a region key from the region's pixels
    pub fn new(region: &RgbaImage) -> Self {
        Self {
            samples: region.as_raw().clone(),
            width: region.width(),
            height: region.height(),
        }
    }
}

impl Hash for RegionKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.samples.hash(state);
        self.width.hash(state);
        self.height.hash(state);
    }
}

/// Memoization cache for region match results
///
/// Flat backgrounds produce many byte-identical regions; their best match is
/// computed once per run.
#[derive(Default)]
pub struct RegionCache {
    /// Region to match mapping
    region_cache: HashMap<RegionKey, Match>,

    /// Cache performance statistics
    pub stats: CacheStats,
}

impl RegionCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve cached result or compute and store new one
    ///
    /// Uses the provided closure to match the region only when an identical
    /// region is not already cached. Failed computations are not stored.
    ///
    /// # Errors
    ///
    /// Propagates the error produced by `compute_fn`.
    pub fn get_or_compute_match<F>(&mut self, region_key: RegionKey, compute_fn: F) -> Result<Match>
    where
        F: FnOnce() -> Result<Match>,
    {
        use std::collections::hash_map::Entry;

        match self.region_cache.entry(region_key) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                Ok(*entry.get())
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                let found = compute_fn()?;
                entry.insert(found);
                Ok(found)
            }
        }
    }

    /// Number of distinct regions cached
    pub fn len(&self) -> usize {
        self.region_cache.len()
    }

    /// Test whether no region has been cached
    pub fn is_empty(&self) -> bool {
        self.region_cache.is_empty()
    }

    /// Drop every cached region and reset statistics
    pub fn clear(&mut self) {
        self.region_cache.clear();
        self.stats = CacheStats::default();
    }
}
