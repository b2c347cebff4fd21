//! Rarity weights declared per layer directory
//!
//! Each active layer may hold a rarity file (same filename in every layer)
//! shaped as `[{"weight": 5, "items": ["red", "blue"]}, ...]`. Weights from
//! every layer are merged into one map keyed by trait name.

use crate::catalog::layers::LayerDirectory;
use crate::io::configuration::UNIFORM_WEIGHT;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

/// One weight declaration inside a rarity file
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct RarityEntry {
    /// Relative likelihood of the listed traits
    pub weight: u32,
    /// Trait names (variant filenames without extension)
    pub items: Vec<String>,
}

/// Problem found in a single layer's rarity file
///
/// The affected layer contributes no weights; other layers are unaffected.
#[derive(Debug, Error)]
pub enum RarityIssue {
    /// File exists but could not be read
    #[error("cannot read rarity file '{}': {source}", .path.display())]
    Read {
        /// Rarity file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// File content is not a list of weight entries
    #[error("malformed rarity file '{}': {source}", .path.display())]
    Parse {
        /// Rarity file path
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// Global trait-name to weight mapping
#[derive(Debug, Default)]
pub struct RarityTable {
    weights: HashMap<String, u32>,
    max_weight: Option<u32>,
    issues: Vec<RarityIssue>,
}

impl RarityTable {
    /// Table with no declarations; every trait weighs the same
    pub fn uniform() -> Self {
        Self::default()
    }

    /// Collect rarity files named `filename` from each layer directory
    ///
    /// A layer without the file contributes nothing. A file that cannot be read
    /// or parsed is recorded in [`Self::issues`] and skipped.
    pub fn load(layers: &[LayerDirectory], filename: &str) -> Self {
        let mut table = Self::default();

        for layer in layers {
            let path = layer.path().join(filename);
            if !path.is_file() {
                continue;
            }

            match read_entries(path) {
                Ok(entries) => {
                    debug!(layer = layer.name(), entries = entries.len(), "Loaded rarity file");
                    table.extend(entries);
                }
                Err(issue) => {
                    warn!(layer = layer.name(), %issue, "Skipping rarity file");
                    table.issues.push(issue);
                }
            }
        }

        table
    }

    /// Record weight declarations, later entries overriding earlier ones
    pub fn extend(&mut self, entries: impl IntoIterator<Item = RarityEntry>) {
        for entry in entries {
            self.max_weight = Some(self.max_weight.map_or(entry.weight, |max| max.max(entry.weight)));
            for item in entry.items {
                self.weights.insert(item, entry.weight);
            }
        }
    }

    /// Weight of a trait, or the maximum declared weight when it has none
    pub fn weight_of(&self, trait_name: &str) -> u32 {
        self.weights
            .get(trait_name)
            .copied()
            .unwrap_or_else(|| self.max_weight())
    }

    /// Largest declared weight, or the uniform weight when nothing was declared
    pub fn max_weight(&self) -> u32 {
        self.max_weight.unwrap_or(UNIFORM_WEIGHT)
    }

    /// Number of traits with a declared weight
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether no trait has a declared weight
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Rarity files that were skipped during loading
    pub fn issues(&self) -> &[RarityIssue] {
        &self.issues
    }
}

fn read_entries(path: PathBuf) -> Result<Vec<RarityEntry>, RarityIssue> {
    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(source) => return Err(RarityIssue::Read { path, source }),
    };
    serde_json::from_str(&text).map_err(|source| RarityIssue::Parse { path, source })
}
