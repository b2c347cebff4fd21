//! Batch generation progress display

use crate::io::configuration::{MIN_BATCH_FOR_PROGRESS, PROGRESS_BAR_WIDTH};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Images: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar over a batch of generated images
///
/// Single-image runs and quiet runs use a hidden bar.
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a progress display for `count` images
    pub fn new(count: usize, visible: bool) -> Self {
        let bar = if visible && count > MIN_BATCH_FOR_PROGRESS {
            let bar = ProgressBar::new(count as u64);
            bar.set_style(BATCH_STYLE.clone());
            bar
        } else {
            ProgressBar::hidden()
        };
        Self { bar }
    }

    /// Record one saved image
    pub fn image_saved(&self, path: &Path) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        self.bar.set_message(display_name);
        self.bar.inc(1);
    }

    /// Number of images recorded so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Clean up the progress display
    pub fn finish(&self) {
        self.bar.finish_with_message("All images saved");
    }
}
