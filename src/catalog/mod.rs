//! Layer catalog discovery

/// Layer directories, variant items and the loaded catalog
pub mod layers;
/// Components directory scanning and layer order resolution
pub mod loader;

pub use layers::{Catalog, LayerDirectory, VariantItem};
