//! Command-line interface for batch photomosaic generation

use crate::algorithm::library::Library;
use crate::algorithm::matcher::{MatchStrategy, MatcherConfig, MatcherContext};
use crate::algorithm::tiling::grid_dimensions;
use crate::io::configuration::{
    DEFAULT_SEED, DEFAULT_TILE_SIZE, OUTPUT_EXTENSION, OUTPUT_SUFFIX, is_supported_image,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::loader::{collect_images, open_image};
use crate::io::progress::ProgressManager;
use crate::io::render::{export_mosaic, render_mosaic};
use clap::Parser;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "photomosaic")]
#[command(
    author,
    version,
    about = "Rebuild images out of a library of tile images"
)]
/// Command-line arguments for the photomosaic tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Source image or directory of source images
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory of library tile images
    #[arg(short, long, value_name = "DIR")]
    pub library: PathBuf,

    /// Edge length in pixels of each matched region
    #[arg(short, long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: u32,

    /// Edge length in pixels of each rendered cell (defaults to the tile size)
    #[arg(short, long)]
    pub cell_size: Option<u32>,

    /// Use at most this many library images (first in sorted order)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Best-match strategy
    #[arg(short = 'S', long, value_enum, default_value_t = MatchStrategy::Direct)]
    pub strategy: MatchStrategy,

    /// Fill the difference table during matching instead of up front
    #[arg(long)]
    pub lazy_table: bool,

    /// Pick a single random source image from the target directory
    #[arg(short, long)]
    pub random: bool,

    /// Random seed for reproducible source selection
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Suppress progress output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log matching statistics
    #[arg(short, long)]
    pub verbose: bool,

    /// Process files even if output exists
    #[arg(long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Rendered cell edge length
    pub fn effective_cell_size(&self) -> u32 {
        self.cell_size.unwrap_or(self.tile_size)
    }

    /// Logging threshold implied by `--quiet` and `--verbose`
    pub const fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            log::LevelFilter::Warn
        } else if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }

    /// Matcher configuration for the selected strategy
    pub fn matcher_config(&self) -> MatcherConfig {
        let mut config = MatcherConfig::for_strategy(self.strategy);
        if self.lazy_table {
            config.precompute_table = false;
        }
        config
    }
}

/// Orchestrates batch processing of source images with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self {
            cli,
            progress_manager: None,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// The library is loaded once; every source image is a separate matching
    /// run with its own difference table.
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, library loading, or any
    /// source image fails. Processing stops at the first failing source.
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            log::info!("Nothing to process");
            return Ok(());
        }

        let library =
            Library::from_directory(&self.cli.library, self.cli.tile_size, self.cli.limit)?;
        log::info!(
            "Loaded {} library tiles from {}",
            library.len(),
            self.cli.library.display()
        );

        let mut context = MatcherContext::new(library, self.cli.matcher_config())?;

        self.progress_manager = self
            .cli
            .should_show_progress()
            .then(|| ProgressManager::new(files.len()));

        for file in &files {
            self.process_file(&mut context, file)?;
            if let Some(ref pm) = self.progress_manager {
                pm.complete_file();
            }
        }

        if let Some(pm) = self.progress_manager.take() {
            pm.finish();
            log::debug!("Finished {}/{} sources", pm.completed(), files.len());
        }

        Ok(())
    }

    /// Resolve the source images to process
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a supported image nor a
    /// readable directory.
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;

        if target.is_file() {
            if !is_supported_image(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"target file must be a PNG or JPEG image",
                ));
            }
            return Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                vec![]
            });
        }

        if !target.is_dir() {
            return Err(invalid_parameter(
                "target",
                &target.display(),
                &"target must be an image file or directory",
            ));
        }

        // Previously generated mosaics are never used as sources
        let mut files: Vec<PathBuf> = collect_images(target)?
            .into_iter()
            .filter(|path| !Self::is_output_file(path))
            .collect();

        if self.cli.random && !files.is_empty() {
            let mut rng = StdRng::seed_from_u64(self.cli.seed);
            let chosen = files.swap_remove(rng.random_range(0..files.len()));
            log::info!("Randomly selected source {}", chosen.display());
            files = vec![chosen];
        }

        Ok(files
            .into_iter()
            .filter(|path| self.should_process_file(path))
            .collect())
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            log::info!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&self, context: &mut MatcherContext, input_path: &Path) -> Result<()> {
        let start_time = Instant::now();
        let output_path = Self::get_output_path(input_path);
        let tile_size = self.cli.tile_size;

        context.reset();
        let source = open_image(input_path)?;
        let (columns, rows) = grid_dimensions(source.width(), source.height(), tile_size);

        if columns == 0 || rows == 0 {
            log::warn!(
                "Skipping: {} ({}x{} is smaller than one {tile_size}px tile)",
                input_path.display(),
                source.width(),
                source.height()
            );
            return Ok(());
        }

        let progress = self.progress_manager.as_ref();
        if let Some(pm) = progress {
            pm.start_file(input_path, columns as usize * rows as usize);
        }

        let assignments = context.tile_source_image_with_progress(&source, tile_size, |done, _| {
            if let Some(pm) = progress {
                pm.update_cells(done);
            }
        })?;

        let mosaic = render_mosaic(
            &assignments,
            context.library(),
            tile_size,
            self.cli.effective_cell_size(),
            columns,
            rows,
        )?;
        export_mosaic(&mosaic, &output_path)?;

        log::info!(
            "Wrote {} ({columns}x{rows} cells) in {:.2?}",
            output_path.display(),
            start_time.elapsed()
        );

        Ok(())
    }

    fn is_output_file(path: &Path) -> bool {
        path.file_stem()
            .is_some_and(|stem| stem.to_string_lossy().ends_with(OUTPUT_SUFFIX))
    }

    /// Output location for a source image: `<stem>_mosaic.png` beside it
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            OUTPUT_EXTENSION
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}
