//! Mixer constants and runtime configuration defaults

/// Canvas size used when no active layer holds a single variant
pub const DEFAULT_CANVAS_SIZE: (u32, u32) = (1024, 1024);

/// Trait recorded for a layer that contributes nothing to an image
pub const NONE_TRAIT: &str = "none";

/// Placeholder shown for a layer before any image was generated
pub const UNASSIGNED_TRAIT: &str = "---";

// Exception tokens ending with this suffix suppress a whole layer
/// Suffix marking a layer exclusion token
pub const LAYER_EXCLUSION_SUFFIX: char = '/';

/// Extension of variant and output images (compared case-insensitively)
pub const VARIANT_EXTENSION: &str = "png";

/// Extension required for exception and rarity files
pub const RULE_FILE_EXTENSION: &str = "json";

/// Weight assumed when no rarity declaration was loaded at all
pub const UNIFORM_WEIGHT: u32 = 1;

// Output settings
/// Directory receiving generated images when none is given
pub const DEFAULT_OUTPUT_DIR: &str = "output";
/// File holding the persisted input paths
pub const DEFAULT_SETTINGS_FILE: &str = "config.json";
/// Images generated per run when no count is given
pub const DEFAULT_IMAGE_COUNT: usize = 1;

// Progress bar display settings
/// Width of the batch progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Batches at or below this size run without a progress bar
pub const MIN_BATCH_FOR_PROGRESS: usize = 1;
