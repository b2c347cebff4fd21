//! Command-line interface for loading layers and generating image batches

use crate::engine::{Mixer, MixerPaths};
use crate::io::configuration::{DEFAULT_IMAGE_COUNT, DEFAULT_OUTPUT_DIR, DEFAULT_SETTINGS_FILE};
use crate::io::error::{MixerError, Result, invalid_parameter};
use crate::io::progress::ProgressManager;
use crate::io::settings::MixerSettings;
use crate::io::summary::{CatalogSummary, format_traits};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "layermix")]
#[command(
    author,
    version,
    about = "Generate composite images from layered PNG traits"
)]
/// Command-line arguments for the layer mixer
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Directory whose subdirectories hold the trait variants
    #[arg(short, long, value_name = "DIR")]
    pub components: Option<PathBuf>,

    /// Text file listing the layers to use, bottom first
    #[arg(short = 'l', long, value_name = "FILE")]
    pub order: Option<PathBuf>,

    /// JSON file with exception groups
    #[arg(short, long, value_name = "FILE")]
    pub exceptions: Option<PathBuf>,

    /// Name of the rarity file inside each layer directory
    #[arg(short, long, value_name = "NAME")]
    pub rarity: Option<String>,

    /// Directory receiving the numbered images
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Number of images to generate
    #[arg(short = 'n', long, default_value_t = DEFAULT_IMAGE_COUNT)]
    pub count: usize,

    /// Pause between consecutive images, in milliseconds
    #[arg(short, long, default_value_t = 0)]
    pub delay_ms: u64,

    /// Random seed for reproducible generation
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Settings file with previously used paths
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: PathBuf,

    /// Store the effective paths in the settings file
    #[arg(long)]
    pub save_settings: bool,

    /// Print the catalog summary and exit without generating
    #[arg(long)]
    pub summary: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Paths given on the command line, as settings
    pub fn overrides(&self) -> MixerSettings {
        MixerSettings {
            components_path: self.components.clone(),
            layers_order_path: self.order.clone(),
            exceptions_path: self.exceptions.clone(),
            rarity_filename: self.rarity.clone(),
        }
    }

    /// Stored settings overlaid with the command line
    pub fn effective_settings(&self) -> MixerSettings {
        MixerSettings::load(&self.settings)
            .unwrap_or_default()
            .merged_with(self.overrides())
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Loads a session and generates the requested batch, one image at a time
pub struct BatchRunner {
    cli: Cli,
    mixer: Mixer,
}

impl BatchRunner {
    /// Create a runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let mixer = Mixer::new(cli.seed);
        Self { cli, mixer }
    }

    /// Resolve inputs, load, then generate and save each image in turn
    ///
    /// # Errors
    ///
    /// Returns an error if input validation, loading, generation or saving fails
    pub fn run(&mut self) -> Result<Vec<PathBuf>> {
        if self.cli.count == 0 && !self.cli.summary {
            return Err(invalid_parameter("count", &0, &"must be at least 1"));
        }

        let paths = self.resolve_paths()?;

        if self.cli.save_settings {
            MixerSettings::from(&paths).save(&self.cli.settings)?;
        }

        self.mixer.load(&paths)?;
        self.report_summary();

        if self.cli.summary {
            return Ok(Vec::new());
        }

        let progress = ProgressManager::new(self.cli.count, self.cli.should_show_progress());
        let mut saved = Vec::with_capacity(self.cli.count);

        for index in 0..self.cli.count {
            if index > 0 && self.cli.delay_ms > 0 {
                std::thread::sleep(Duration::from_millis(self.cli.delay_ms));
            }

            self.mixer.generate()?;
            let path = self.mixer.save(&self.cli.output)?;
            progress.image_saved(&path);
            self.report_traits(&path);
            saved.push(path);
        }

        progress.finish();
        info!(count = saved.len(), output = %self.cli.output.display(), "Batch complete");
        Ok(saved)
    }

    /// Validated load inputs from settings and flags
    ///
    /// # Errors
    ///
    /// Returns [`MixerError::InvalidParameter`] if a required path is missing or invalid
    pub fn resolve_paths(&self) -> Result<MixerPaths> {
        self.cli.effective_settings().to_paths()
    }

    /// Session state after [`Self::run`]
    pub const fn mixer(&self) -> &Mixer {
        &self.mixer
    }

    // Allow print for user feedback on the loaded catalog
    #[allow(clippy::print_stdout)]
    fn report_summary(&self) {
        if self.cli.quiet {
            return;
        }
        if let Some(catalog) = self.mixer.catalog() {
            println!("{}", CatalogSummary::new(catalog));
        }
    }

    // Allow print for user feedback on each generated image
    #[allow(clippy::print_stdout)]
    fn report_traits(&self, path: &Path) {
        if self.cli.quiet || self.cli.count > 1 {
            return;
        }
        if let Some(catalog) = self.mixer.catalog() {
            println!("{}", path.display());
            println!("{}", format_traits(catalog, self.mixer.last_traits()));
        }
    }
}

/// Map an error to the process exit code
pub const fn exit_code(error: &MixerError) -> u8 {
    if matches!(error, MixerError::InvalidParameter { .. }) {
        2
    } else if error.is_structural() {
        3
    } else {
        1
    }
}
