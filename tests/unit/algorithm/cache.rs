//! Tests for region match caching including hit/miss tracking and key uniqueness

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use photomosaic::MosaicError;
    use photomosaic::algorithm::cache::{Match, RegionCache, RegionKey};

    fn solid(value: u8) -> RgbaImage {
        RgbaImage::from_pixel(4, 4, Rgba([value, value, value, 255]))
    }

    // Verifies new cache starts with 0 hits and 0 misses
    // Verified by initializing cache with non-zero hit and miss counts
    #[test]
    fn test_cache_new() {
        let cache = RegionCache::new();
        assert_eq!(cache.stats.hits, 0);
        assert_eq!(cache.stats.misses, 0);
        assert!(cache.is_empty());
    }

    // Tests identical regions produce equal keys
    // Verified by making key equality always return false
    #[test]
    fn test_region_key_equality() {
        assert_eq!(RegionKey::new(&solid(3)), RegionKey::new(&solid(3)));
        assert_ne!(RegionKey::new(&solid(3)), RegionKey::new(&solid(4)));
    }

    // Tests same samples in a different shape produce different keys
    // Verified by omitting dimensions from the key
    #[test]
    fn test_region_key_includes_shape() {
        let wide = RgbaImage::from_pixel(4, 1, Rgba([0, 0, 0, 0]));
        let tall = RgbaImage::from_pixel(1, 4, Rgba([0, 0, 0, 0]));
        assert_ne!(RegionKey::new(&wide), RegionKey::new(&tall));
    }

    // Tests cache miss on first access and hit on second
    // Verified by removing hit counter increment logic
    #[test]
    fn test_cache_miss_and_hit() {
        let mut cache = RegionCache::new();
        let mut compute_count = 0;

        let first = cache
            .get_or_compute_match(RegionKey::new(&solid(9)), || {
                compute_count += 1;
                Ok(Match {
                    index: 2,
                    score: 10.0,
                })
            })
            .unwrap();

        let second = cache
            .get_or_compute_match(RegionKey::new(&solid(9)), || {
                compute_count += 1;
                Ok(Match {
                    index: 7,
                    score: 0.0,
                })
            })
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(second.index, 2);
        assert_eq!(compute_count, 1);
        assert_eq!(cache.stats.hits, 1);
        assert_eq!(cache.stats.misses, 1);
        assert_eq!(cache.len(), 1);
    }

    // Tests errors propagate and are not cached
    // Verified by storing a placeholder match on error
    #[test]
    fn test_cache_error_not_stored() {
        let mut cache = RegionCache::new();

        let result = cache.get_or_compute_match(RegionKey::new(&solid(1)), || {
            Err(MosaicError::EmptyLibrary)
        });

        assert!(matches!(result, Err(MosaicError::EmptyLibrary)));
        assert!(cache.is_empty());
    }

    // Tests clear drops entries and statistics
    // Verified by leaving statistics untouched on clear
    #[test]
    fn test_cache_clear() {
        let mut cache = RegionCache::new();
        cache
            .get_or_compute_match(RegionKey::new(&solid(1)), || {
                Ok(Match {
                    index: 0,
                    score: 0.0,
                })
            })
            .unwrap();

        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats.misses, 0);
    }
}
