//! Sequentially numbered PNG export of generated images

use crate::generation::GeneratedArtifact;
use crate::io::configuration::VARIANT_EXTENSION;
use crate::io::error::{MixerError, Result, file_system};
use image::ImageFormat;
use std::path::{Path, PathBuf};
use tracing::info;

// Largest `<n>.png` already present; other files are ignored
fn highest_sequence_number(output_dir: &Path) -> Result<u64> {
    let entries =
        std::fs::read_dir(output_dir).map_err(|e| file_system(output_dir, "list output", e))?;

    let mut highest = 0;
    for entry in entries {
        let entry = entry.map_err(|e| file_system(output_dir, "list output", e))?;
        if let Some(number) = sequence_number(&entry.file_name().to_string_lossy()) {
            highest = highest.max(number);
        }
    }
    Ok(highest)
}

/// Parse the number out of an output filename such as `12.png`
pub fn sequence_number(filename: &str) -> Option<u64> {
    let (stem, extension) = filename.rsplit_once('.')?;
    if !extension.eq_ignore_ascii_case(VARIANT_EXTENSION) {
        return None;
    }
    stem.parse().ok()
}

/// Path the next saved image would receive in `output_dir`
///
/// # Errors
///
/// Returns [`MixerError::FileSystem`] if the directory cannot be listed
pub fn next_output_path(output_dir: &Path) -> Result<PathBuf> {
    let next = highest_sequence_number(output_dir)? + 1;
    Ok(output_dir.join(format!("{next}.{VARIANT_EXTENSION}")))
}

/// Save a generated image as `<highest + 1>.png` inside `output_dir`
///
/// The directory is created when missing. Numbering is not atomic: callers
/// writing to the same directory concurrently must serialise their saves.
///
/// # Errors
///
/// Returns an error if:
/// - The output directory cannot be created or listed
/// - The image cannot be encoded or written
pub fn save_artifact(artifact: &GeneratedArtifact, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .map_err(|e| file_system(output_dir, "create directory", e))?;

    let output_path = next_output_path(output_dir)?;

    artifact
        .image
        .save_with_format(&output_path, ImageFormat::Png)
        .map_err(|e| MixerError::ImageExport {
            path: output_path.clone(),
            source: e,
        })?;

    info!(path = %output_path.display(), "Saved generated image");
    Ok(output_path)
}
