//! Layer directories, variant items and the loaded catalog

use crate::io::configuration::VARIANT_EXTENSION;
use std::path::{Path, PathBuf};

/// One trait category backed by a directory of variant images
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerDirectory {
    name: String,
    path: PathBuf,
    variants: Vec<String>,
}

impl LayerDirectory {
    /// Create a layer from its directory and the PNG filenames inside it
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, variants: Vec<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            variants,
        }
    }

    /// Layer name (the directory name)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory holding the variants
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Variant filenames in listing order
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// Number of PNG variants in the layer
    pub const fn len(&self) -> usize {
        self.variants.len()
    }

    /// Whether the layer holds no PNG variants
    pub const fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Iterate the layer's variants as items
    pub fn items(&self) -> impl Iterator<Item = VariantItem<'_>> {
        self.variants.iter().map(|filename| VariantItem {
            layer: self,
            filename,
        })
    }
}

/// A single selectable variant, identified by its layer and filename
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariantItem<'a> {
    layer: &'a LayerDirectory,
    filename: &'a str,
}

impl<'a> VariantItem<'a> {
    /// Name of the owning layer
    pub fn layer(&self) -> &'a str {
        self.layer.name()
    }

    /// Filename including extension
    pub const fn filename(&self) -> &'a str {
        self.filename
    }

    /// Trait name: the filename without its extension
    pub fn trait_name(&self) -> &'a str {
        trait_name(self.filename)
    }

    /// Location of the image on disk
    pub fn path(&self) -> PathBuf {
        self.layer.path().join(self.filename)
    }
}

/// Strip the extension from a variant filename
pub fn trait_name(filename: &str) -> &str {
    filename
        .rsplit_once('.')
        .map_or(filename, |(stem, _)| stem)
}

/// Whether a filename carries the variant extension, ignoring case
pub fn is_variant_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(VARIANT_EXTENSION))
}

/// Everything discovered by one load of a components directory
///
/// Active layers are kept in compositing order (first = bottom). Skipped
/// layers exist on disk but were not declared in the layer order; they are
/// listed for diagnostics only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    pub(crate) active: Vec<LayerDirectory>,
    pub(crate) skipped: Vec<LayerDirectory>,
    pub(crate) total_images: usize,
    pub(crate) possible_combinations: u128,
    pub(crate) canvas_size: (u32, u32),
}

impl Catalog {
    /// Layers taking part in generation, bottom first
    pub fn active_layers(&self) -> &[LayerDirectory] {
        &self.active
    }

    /// Directories present on disk but absent from the layer order
    pub fn skipped_layers(&self) -> &[LayerDirectory] {
        &self.skipped
    }

    /// Look up an active layer by name
    pub fn active_layer(&self, name: &str) -> Option<&LayerDirectory> {
        self.active.iter().find(|layer| layer.name() == name)
    }

    /// Number of PNG variants over all active layers
    pub const fn total_images(&self) -> usize {
        self.total_images
    }

    /// Product of variant counts over non-empty active layers
    ///
    /// Zero when the active layers hold no images at all.
    pub const fn possible_combinations(&self) -> u128 {
        self.possible_combinations
    }

    /// Fixed canvas size for every image generated from this catalog
    pub const fn canvas_size(&self) -> (u32, u32) {
        self.canvas_size
    }

    /// Active layers holding at least one variant
    pub fn non_empty_active(&self) -> usize {
        self.active.iter().filter(|layer| !layer.is_empty()).count()
    }
}
