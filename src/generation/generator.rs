//! Constrained weighted sampling of one variant per layer
//!
//! Layers are visited bottom to top. Each layer sees the traits committed by
//! the layers below it and nothing above it, so the result of an exception
//! rule depends on the declared layer order.

use crate::catalog::layers::{Catalog, LayerDirectory, VariantItem};
use crate::generation::compositor::Compositor;
use crate::generation::selection::RandomSelector;
use crate::io::configuration::NONE_TRAIT;
use crate::io::error::Result;
use crate::rules::exceptions::ExceptionRules;
use crate::rules::rarity::RarityTable;
use image::RgbaImage;
use std::fmt;
use tracing::debug;

/// Outcome of one layer in a generated image
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TraitChoice {
    /// The chosen variant's trait name
    Trait(String),
    /// The layer contributes nothing
    None,
}

impl TraitChoice {
    /// Trait name, or `"none"` for an empty layer
    pub fn as_str(&self) -> &str {
        match self {
            Self::Trait(name) => name,
            Self::None => NONE_TRAIT,
        }
    }

    /// Whether a variant was drawn for the layer
    pub const fn is_trait(&self) -> bool {
        matches!(self, Self::Trait(_))
    }
}

impl fmt::Display for TraitChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layer-to-trait mapping of one image, in compositing order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TraitAssignment {
    entries: Vec<(String, TraitChoice)>,
}

impl TraitAssignment {
    /// Empty assignment
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Commit the outcome of the next layer
    pub fn commit(&mut self, layer: impl Into<String>, choice: TraitChoice) {
        self.entries.push((layer.into(), choice));
    }

    /// Outcome recorded for a layer
    pub fn get(&self, layer: &str) -> Option<&TraitChoice> {
        self.entries
            .iter()
            .find_map(|(name, choice)| (name == layer).then_some(choice))
    }

    /// Layers and outcomes in compositing order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TraitChoice)> {
        self.entries
            .iter()
            .map(|(layer, choice)| (layer.as_str(), choice))
    }

    /// Committed layers with a real trait, bottom first
    pub fn committed_traits(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|(layer, choice)| match choice {
            TraitChoice::Trait(name) => Some((layer.as_str(), name.as_str())),
            TraitChoice::None => None,
        })
    }

    /// Number of layers recorded
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no layer has been recorded
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One composed image with the traits it was built from
#[derive(Clone, Debug)]
pub struct GeneratedArtifact {
    /// Composited RGBA pixels at the catalog's canvas size
    pub image: RgbaImage,
    /// Outcome for every active layer
    pub traits: TraitAssignment,
}

/// Candidates left for a layer after applying exception rules
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Candidates<'a> {
    /// A layer token silenced the whole layer
    ForcedNone,
    /// Variants still eligible, in listing order (possibly none)
    Eligible(Vec<VariantItem<'a>>),
}

/// Apply the exception rules triggered by already committed traits to a layer
///
/// Every committed trait is looked up in every group it belongs to. A group
/// that also names the layer itself forces the layer empty; otherwise the
/// group's trait tokens for the layer are removed from its candidates.
pub fn resolve_candidates<'a>(
    layer: &'a LayerDirectory,
    committed: &TraitAssignment,
    rules: &ExceptionRules,
) -> Candidates<'a> {
    let mut candidates: Vec<VariantItem<'a>> = layer.items().collect();

    for (trigger_layer, trigger_trait) in committed.committed_traits() {
        for rule in rules.triggered_by(trigger_layer, trigger_trait) {
            if rule.excludes_layer(layer.name()) {
                debug!(
                    layer = layer.name(),
                    trigger_layer, trigger_trait, "Layer excluded by exception rule"
                );
                return Candidates::ForcedNone;
            }

            for excluded in rule.excluded_traits(layer.name()) {
                if let Some(position) = candidates
                    .iter()
                    .position(|item| item.trait_name() == excluded)
                {
                    candidates.remove(position);
                }
            }
        }
    }

    Candidates::Eligible(candidates)
}

/// Generate one image from a loaded catalog
///
/// Every active layer ends up in the trait assignment, either with the drawn
/// trait or with `"none"` when the rules left nothing to draw.
///
/// # Errors
///
/// Returns [`crate::MixerError::ImageLoad`] if a drawn variant cannot be decoded
pub fn generate(
    catalog: &Catalog,
    rules: &ExceptionRules,
    rarity: &RarityTable,
    selector: &mut RandomSelector,
) -> Result<GeneratedArtifact> {
    let mut compositor = Compositor::new(catalog.canvas_size());
    let mut traits = TraitAssignment::new();

    for layer in catalog.active_layers() {
        let candidates = match resolve_candidates(layer, &traits, rules) {
            Candidates::ForcedNone => Vec::new(),
            Candidates::Eligible(candidates) => candidates,
        };

        let weights: Vec<u32> = candidates
            .iter()
            .map(|item| rarity.weight_of(item.trait_name()))
            .collect();

        let Some(item) = selector
            .weighted_choice(&weights)
            .and_then(|index| candidates.get(index))
        else {
            traits.commit(layer.name(), TraitChoice::None);
            continue;
        };

        compositor.stack_file(&item.path())?;
        debug!(layer = layer.name(), trait_name = item.trait_name(), "Layer drawn");
        traits.commit(layer.name(), TraitChoice::Trait(item.trait_name().to_string()));
    }

    Ok(GeneratedArtifact {
        image: compositor.into_image(),
        traits,
    })
}
