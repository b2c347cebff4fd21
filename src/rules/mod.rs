//! Optional generation constraints loaded next to the catalog

/// Mutual-exclusion groups between traits and whole layers
pub mod exceptions;
/// Per-layer rarity declarations merged into one weight table
pub mod rarity;

pub use exceptions::{ExceptionRule, ExceptionRules, RuleToken};
pub use rarity::{RarityEntry, RarityTable};
