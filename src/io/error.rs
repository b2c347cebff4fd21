//! Error types for catalog loading, generation and output

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for all mixer operations
///
/// Structural inputs (components root, layer order) fail hard with their own
/// variants. Optional enrichments (exceptions, rarity) never surface here; see
/// [`crate::rules::exceptions::RuleFileError`] and
/// [`crate::rules::rarity::RarityIssue`] for their stage-level reports.
#[derive(Debug, Error)]
pub enum MixerError {
    /// Components root directory could not be scanned
    #[error("There was an error with selected components path '{}': {source}", .path.display())]
    ComponentsPath {
        /// Components root that was scanned
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Layer order file is unusable
    #[error("There was an error with layers order file '{}': {reason}", .path.display())]
    LayersOrderFile {
        /// Path to the layer order file
        path: PathBuf,
        /// What went wrong with the file
        #[source]
        reason: LayersOrderProblem,
    },

    /// Failed to decode a variant image
    #[error("Failed to load image '{}': {source}", .path.display())]
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        #[source]
        source: image::ImageError,
    },

    /// Failed to save a generated image to disk
    #[error("Failed to export image to '{}': {source}", .path.display())]
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        #[source]
        source: image::ImageError,
    },

    /// General file system operation failure
    #[error("File system error during {operation} on '{}': {source}", .path.display())]
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// User supplied parameter failed validation
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Persisted settings could not be written
    #[error("Failed to write settings to '{}': {reason}", .path.display())]
    Settings {
        /// Settings file path
        path: PathBuf,
        /// Description of the failure
        reason: String,
    },

    /// Generation was requested before a successful load
    #[error("No layers are loaded; load a components directory first")]
    NotLoaded,

    /// Save was requested before any image was generated
    #[error("Nothing to save; generate an image first")]
    NoArtifact,
}

/// Reasons the layer order file is rejected
#[derive(Debug, Error)]
pub enum LayersOrderProblem {
    /// The file could not be read as UTF-8 text
    #[error("unreadable: {0}")]
    Unreadable(#[from] std::io::Error),

    /// None of the declared layers exist as directories
    #[error("none of the listed layers exist in the components directory")]
    NoActiveLayers,
}

/// Convenience type alias for mixer results
pub type Result<T> = std::result::Result<T, MixerError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MixerError {
    MixerError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error bound to a path and operation
pub fn file_system(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> MixerError {
    MixerError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}

impl MixerError {
    /// Whether the error aborts a load because of a structural input
    pub const fn is_structural(&self) -> bool {
        matches!(self, Self::ComponentsPath { .. } | Self::LayersOrderFile { .. })
    }
}
