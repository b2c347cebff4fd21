//! Discovers layer directories and their variants under a components root

use crate::catalog::layers::{Catalog, LayerDirectory, is_variant_file};
use crate::io::configuration::DEFAULT_CANVAS_SIZE;
use crate::io::error::{LayersOrderProblem, MixerError, Result, file_system};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Load the catalog for a components root and a layer order file
///
/// Every immediate subdirectory of `components_path` is catalogued. Those named
/// in the order file become active layers, in declared order; the rest are
/// kept as skipped layers for diagnostics.
///
/// # Errors
///
/// Returns an error if:
/// - `components_path` cannot be scanned ([`MixerError::ComponentsPath`])
/// - The order file cannot be read, or names no existing directory
///   ([`MixerError::LayersOrderFile`])
/// - A layer directory cannot be listed ([`MixerError::FileSystem`])
pub fn load(components_path: &Path, order_path: &Path) -> Result<Catalog> {
    let directories = scan_layer_directories(components_path)?;
    let declared = read_layer_order(order_path)?;

    let mut active = Vec::new();
    for name in &declared {
        if let Some(path) = directories
            .iter()
            .find_map(|(dir_name, path)| (dir_name == name).then_some(path))
        {
            active.push(LayerDirectory::new(
                name.clone(),
                path.clone(),
                list_variants(path)?,
            ));
        }
    }

    if active.is_empty() {
        return Err(MixerError::LayersOrderFile {
            path: order_path.to_path_buf(),
            reason: LayersOrderProblem::NoActiveLayers,
        });
    }

    let mut skipped = Vec::new();
    for (name, path) in directories {
        if !declared.contains(&name) {
            let variants = list_variants(&path)?;
            skipped.push(LayerDirectory::new(name, path, variants));
        }
    }

    let (total_images, possible_combinations) = count_combinations(&active);
    let canvas_size = detect_canvas_size(&active);

    info!(
        active = active.len(),
        skipped = skipped.len(),
        total_images,
        possible_combinations,
        width = canvas_size.0,
        height = canvas_size.1,
        "Loaded layer catalog"
    );

    Ok(Catalog {
        active,
        skipped,
        total_images,
        possible_combinations,
        canvas_size,
    })
}

/// List immediate subdirectories of the components root, sorted by name
///
/// # Errors
///
/// Returns [`MixerError::ComponentsPath`] if the root is missing or unreadable
pub fn scan_layer_directories(components_path: &Path) -> Result<Vec<(String, PathBuf)>> {
    let to_error = |source| MixerError::ComponentsPath {
        path: components_path.to_path_buf(),
        source,
    };

    let mut directories = Vec::new();
    for entry in fs::read_dir(components_path).map_err(to_error)? {
        let path = entry.map_err(to_error)?.path();
        if path.is_dir() {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            directories.push((name, path));
        }
    }
    directories.sort();
    Ok(directories)
}

/// Read the declared layer order, one layer name per line
///
/// Blank lines are ignored and repeated names keep their first position.
///
/// # Errors
///
/// Returns [`MixerError::LayersOrderFile`] if the file cannot be read as UTF-8
pub fn read_layer_order(order_path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(order_path).map_err(|e| MixerError::LayersOrderFile {
        path: order_path.to_path_buf(),
        reason: LayersOrderProblem::from(e),
    })?;

    let mut order: Vec<String> = Vec::new();
    for line in content.lines().map(str::trim) {
        if !line.is_empty() && !order.iter().any(|name| name == line) {
            order.push(line.to_string());
        }
    }
    Ok(order)
}

/// List PNG files (extension compared case-insensitively) inside a layer directory
///
/// # Errors
///
/// Returns [`MixerError::FileSystem`] if the directory cannot be listed
pub fn list_variants(layer_path: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(layer_path).map_err(|e| file_system(layer_path, "list layer", e))?;

    let mut variants = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| file_system(layer_path, "list layer", e))?;
        let filename = entry.file_name().to_string_lossy().into_owned();
        if entry.path().is_file() && is_variant_file(&filename) {
            variants.push(filename);
        }
    }
    variants.sort();
    Ok(variants)
}

/// Total active images and the number of distinct combinations they allow
///
/// Empty layers do not contribute to the product; the product is reset to
/// zero when there are no images at all.
pub fn count_combinations(active: &[LayerDirectory]) -> (usize, u128) {
    let total_images = active.iter().map(LayerDirectory::len).sum();
    if total_images == 0 {
        return (0, 0);
    }

    let possible_combinations = active
        .iter()
        .filter(|layer| !layer.is_empty())
        .fold(1_u128, |product, layer| {
            product.saturating_mul(layer.len() as u128)
        });

    (total_images, possible_combinations)
}

/// Canvas size taken from the first variant of the first non-empty active layer
///
/// Walks active layers in compositing order. A variant whose header cannot be
/// read is skipped; when nothing is readable the default size applies.
pub fn detect_canvas_size(active: &[LayerDirectory]) -> (u32, u32) {
    for item in active.iter().flat_map(|layer| layer.items()) {
        let path = item.path();
        match image::image_dimensions(&path) {
            Ok(size) => {
                debug!(path = %path.display(), width = size.0, height = size.1, "Canvas size detected");
                return size;
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "Cannot read variant dimensions, trying next");
            }
        }
    }

    debug!(
        width = DEFAULT_CANVAS_SIZE.0,
        height = DEFAULT_CANVAS_SIZE.1,
        "No readable variants, using default canvas size"
    );
    DEFAULT_CANVAS_SIZE
}
