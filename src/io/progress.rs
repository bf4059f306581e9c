//! Terminal progress for a mosaic run
//!
//! One bar counts finished sources, a second follows the cells matched in the
//! source currently being tiled. Sources are processed one at a time, so the
//! cell bar is reused for each of them.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;

const SOURCES_TEMPLATE: &str = "[{elapsed_precise}] Sources [{bar:30.cyan/blue}] {pos}/{len}";
const CELLS_TEMPLATE: &str = "{prefix:>24} [{bar:30.green/white}] {pos}/{len} cells";

fn bar_style(template: &str) -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
}

/// Source and cell progress bars for one run
pub struct ProgressManager {
    multi_progress: MultiProgress,
    sources: ProgressBar,
    cells: ProgressBar,
}

impl ProgressManager {
    /// Create the bars for a run over `source_count` source images
    pub fn new(source_count: usize) -> Self {
        let multi_progress = MultiProgress::new();

        let sources = multi_progress.add(ProgressBar::new(source_count as u64));
        sources.set_style(bar_style(SOURCES_TEMPLATE));

        let cells = multi_progress.add(ProgressBar::new(0));
        cells.set_style(bar_style(CELLS_TEMPLATE));

        Self {
            multi_progress,
            sources,
            cells,
        }
    }

    /// Point the cell bar at a new source with `cell_count` grid cells
    pub fn start_file(&self, path: &Path, cell_count: usize) {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        self.cells.reset();
        self.cells.set_length(cell_count as u64);
        self.cells.set_prefix(name.into_owned());
    }

    /// Report the number of cells matched so far in the current source
    pub fn update_cells(&self, done: usize) {
        self.cells.set_position(done as u64);
    }

    /// Count the current source as finished
    ///
    /// Also used for sources that were skipped without tiling.
    pub fn complete_file(&self) {
        if let Some(length) = self.cells.length() {
            self.cells.set_position(length);
        }
        self.sources.inc(1);
    }

    /// Sources finished so far
    pub fn completed(&self) -> u64 {
        self.sources.position()
    }

    /// Remove the bars from the terminal
    pub fn finish(&self) {
        self.sources.finish();
        self.cells.finish_and_clear();
        if let Err(e) = self.multi_progress.clear() {
            log::debug!("Could not clear progress bars: {e}");
        }
    }
}
