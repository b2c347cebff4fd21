//! Image generation from a loaded catalog

/// Source-over canvas stacking
pub mod compositor;
/// Per-layer constrained sampling and the generated artifact
pub mod generator;
/// Seeded weighted random selection
pub mod selection;

pub use generator::{GeneratedArtifact, TraitAssignment, TraitChoice, generate};
pub use selection::RandomSelector;
