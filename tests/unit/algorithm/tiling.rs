//! Tests for grid traversal and source image tiling

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use photomosaic::algorithm::cache::Match;
    use photomosaic::algorithm::tiling::{
        extract_region, grid_dimensions, tile_regions, tile_source_image,
    };
    use photomosaic::{Library, MatchStrategy, MatcherConfig, MatcherContext, MosaicError};

    fn gray(size: u32, value: u8) -> RgbaImage {
        RgbaImage::from_pixel(size, size, Rgba([value, value, value, 255]))
    }

    /// Left half black, right half white
    fn split_source(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        })
    }

    // Tests partial edge tiles are dropped
    // Verified by rounding the column count up
    #[test]
    fn test_grid_dimensions() {
        assert_eq!(grid_dimensions(40, 30, 10), (4, 3));
        assert_eq!(grid_dimensions(45, 39, 10), (4, 3));
        assert_eq!(grid_dimensions(9, 9, 10), (0, 0));
        assert_eq!(grid_dimensions(9, 9, 0), (0, 0));
    }

    // Tests region extraction reads the requested window
    // Verified by cropping from the origin regardless of offset
    #[test]
    fn test_extract_region() {
        let source = split_source(20, 10);
        let left = extract_region(&source, 0, 0, 10);
        let right = extract_region(&source, 10, 0, 10);

        assert_eq!(left.dimensions(), (10, 10));
        assert_eq!(left.get_pixel(9, 9), &Rgba([0, 0, 0, 255]));
        assert_eq!(right.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
    }

    // Tests divisible sources produce one assignment per cell in row-major order
    // Verified by iterating columns in the outer loop
    #[test]
    fn test_row_major_coverage() {
        let source = RgbaImage::new(40, 30);
        let mut visited = Vec::new();

        let assignments = tile_regions(
            &source,
            10,
            |_| {
                Ok(Match {
                    index: 0,
                    score: 0.0,
                })
            },
            |done, total| visited.push((done, total)),
        )
        .unwrap();

        assert_eq!(assignments.len(), (40 / 10) * (30 / 10));
        let coords: Vec<(u32, u32)> = assignments.iter().map(|a| (a.x, a.y)).collect();
        let mut expected = Vec::new();
        for y in (0..30).step_by(10) {
            for x in (0..40).step_by(10) {
                expected.push((x, y));
            }
        }
        assert_eq!(coords, expected);
        assert_eq!(visited.first(), Some(&(1, 12)));
        assert_eq!(visited.last(), Some(&(12, 12)));
    }

    // Tests regions are matched to the closest library entry
    // Verified by assigning every cell the first library entry
    #[test]
    fn test_tile_source_image_assigns_matches() {
        let library = Library::new(vec![gray(10, 0), gray(10, 128), gray(10, 255)]).unwrap();
        let source = split_source(40, 20);

        let assignments = tile_source_image(&source, &library, 10).unwrap();

        let indices: Vec<usize> = assignments.iter().map(|a| a.index).collect();
        assert_eq!(indices, vec![0, 0, 2, 2, 0, 0, 2, 2]);
        assert!(assignments.iter().all(|a| a.score.abs() < f64::EPSILON));
        assert_eq!(assignments.get(5).map(|a| a.cell(10)), Some((1, 1)));
    }

    // Tests sources smaller than a tile produce no assignments even with an empty library
    // Verified by matching a partial edge tile
    #[test]
    fn test_source_smaller_than_tile() {
        let library = Library::new(Vec::new()).unwrap();
        let assignments = tile_source_image(&gray(5, 0), &library, 10).unwrap();
        assert!(assignments.is_empty());
    }

    // Tests empty libraries abort tiling
    // Verified by skipping cells that fail to match
    #[test]
    fn test_empty_library_aborts() {
        let library = Library::new(Vec::new()).unwrap();
        assert!(matches!(
            tile_source_image(&gray(20, 0), &library, 10),
            Err(MosaicError::EmptyLibrary)
        ));
    }

    // Tests mismatched thumbnails abort with the failing cell attached
    // Verified by dropping the cell context
    #[test]
    fn test_dimension_mismatch_reports_cell() {
        let library = Library::new(vec![gray(8, 0)]).unwrap();

        match tile_source_image(&gray(20, 0), &library, 10) {
            Err(MosaicError::DimensionMismatch { cell, .. }) => {
                assert_eq!(cell, Some([0, 0]));
            }
            other => unreachable!("Expected DimensionMismatch, got {other:?}"),
        }
    }

    // Tests zero tile size is rejected
    // Verified by treating zero as one
    #[test]
    fn test_zero_tile_size() {
        let library = Library::new(vec![gray(10, 0)]).unwrap();
        assert!(matches!(
            tile_source_image(&gray(20, 0), &library, 0),
            Err(MosaicError::InvalidParameter { .. })
        ));
    }

    // Tests context tiling agrees with the free function and caches repeated regions
    // Verified by clearing the region cache between cells
    #[test]
    fn test_context_tiling_matches_direct() {
        let library = Library::new(vec![gray(10, 0), gray(10, 128), gray(10, 255)]).unwrap();
        let source = split_source(40, 20);
        let expected = tile_source_image(&source, &library, 10).unwrap();

        let mut context = MatcherContext::new(library, MatcherConfig::default()).unwrap();
        let assignments = context.tile_source_image(&source, 10).unwrap();

        assert_eq!(assignments, expected);
        assert_eq!(context.region_stats().misses, 2);
        assert_eq!(context.region_stats().hits, 6);
    }

    // Tests legacy tiling reproduces table-driven choices per cell
    // Verified by switching legacy tiling to direct comparison
    #[test]
    fn test_context_legacy_tiling() {
        let library = Library::new(vec![gray(10, 128), gray(10, 0), gray(10, 255)]).unwrap();
        let source = gray(20, 0);
        let config = MatcherConfig::for_strategy(MatchStrategy::Legacy);

        let mut context = MatcherContext::new(library, config).unwrap();
        let assignments = context.tile_source_image(&source, 10).unwrap();

        assert_eq!(assignments.len(), 4);
        assert!(assignments.iter().all(|a| a.index == 2));
    }
}
