//! Mutual-exclusion rules between traits and layers
//!
//! An exceptions file is a JSON array of groups, each group an array of
//! tokens. A token is either `Layer/trait` (a trait, optionally scoped to a
//! layer) or `Layer/` (the whole layer). Once any trait in a group has been
//! committed to an image, later layers lose every trait the group names, and
//! layers named by a layer token contribute nothing at all.

use crate::io::configuration::LAYER_EXCLUSION_SUFFIX;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// One parsed exception token
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RuleToken {
    /// Suppress every variant of the named layer
    LayerExclusion(String),
    /// Refers to a single trait, in one layer or in any layer when unscoped
    TraitExclusion {
        /// Layer the trait belongs to, if the token was scoped
        layer: Option<String>,
        /// Trait name (variant filename without extension)
        name: String,
    },
}

impl RuleToken {
    /// Parse a raw token from an exceptions file
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Some(layer) = raw.strip_suffix(LAYER_EXCLUSION_SUFFIX) {
            return Self::LayerExclusion(layer.to_string());
        }

        match raw.rsplit_once(LAYER_EXCLUSION_SUFFIX) {
            Some((layer, name)) => Self::TraitExclusion {
                layer: Some(layer.to_string()),
                name: name.to_string(),
            },
            None => Self::TraitExclusion {
                layer: None,
                name: raw.to_string(),
            },
        }
    }

    /// Whether this token names `trait_name` as committed in `layer`
    pub fn matches_trait(&self, layer: &str, trait_name: &str) -> bool {
        match self {
            Self::LayerExclusion(_) => false,
            Self::TraitExclusion {
                layer: scope,
                name,
            } => name == trait_name && scope.as_deref().is_none_or(|scope| scope == layer),
        }
    }

    /// Whether this token suppresses the entire `layer`
    pub fn excludes_layer(&self, layer: &str) -> bool {
        matches!(self, Self::LayerExclusion(name) if name == layer)
    }
}

impl fmt::Display for RuleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LayerExclusion(layer) => write!(f, "{layer}{LAYER_EXCLUSION_SUFFIX}"),
            Self::TraitExclusion {
                layer: Some(layer),
                name,
            } => write!(f, "{layer}{LAYER_EXCLUSION_SUFFIX}{name}"),
            Self::TraitExclusion { layer: None, name } => f.write_str(name),
        }
    }
}

/// A group of tokens that cannot all appear in the same image
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExceptionRule {
    tokens: Vec<RuleToken>,
}

impl ExceptionRule {
    /// Build a rule from raw tokens
    pub fn from_raw<S: AsRef<str>>(raw: &[S]) -> Self {
        Self {
            tokens: raw.iter().map(|token| RuleToken::parse(token.as_ref())).collect(),
        }
    }

    /// Tokens of the group in file order
    pub fn tokens(&self) -> &[RuleToken] {
        &self.tokens
    }

    /// Whether the committed trait is a member of this group
    pub fn contains_trait(&self, layer: &str, trait_name: &str) -> bool {
        self.tokens
            .iter()
            .any(|token| token.matches_trait(layer, trait_name))
    }

    /// Whether the group silences `layer` entirely
    pub fn excludes_layer(&self, layer: &str) -> bool {
        self.tokens.iter().any(|token| token.excludes_layer(layer))
    }

    /// Trait names this group removes from `layer` once triggered
    ///
    /// Every trait token scoped to `layer`, or unscoped, is reported, including
    /// the one that matched the trigger.
    pub fn excluded_traits<'a>(&'a self, layer: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.tokens.iter().filter_map(move |token| match token {
            RuleToken::TraitExclusion { layer: scope, name }
                if scope.as_deref().is_none_or(|scope| scope == layer) =>
            {
                Some(name.as_str())
            }
            _ => None,
        })
    }
}

/// Why an exceptions file was not usable
#[derive(Debug, Error)]
pub enum RuleFileError {
    /// File could not be read
    #[error("cannot read exceptions file '{}': {source}", .path.display())]
    Read {
        /// Exceptions file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// File is not a JSON array of string arrays
    #[error("malformed exceptions file '{}': {source}", .path.display())]
    Parse {
        /// Exceptions file path
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// All exception groups of one session
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExceptionRules {
    rules: Vec<ExceptionRule>,
}

impl ExceptionRules {
    /// A rule set that constrains nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build rules from already-split groups of raw tokens
    pub fn from_groups<S: AsRef<str>>(groups: &[Vec<S>]) -> Self {
        Self {
            rules: groups.iter().map(|group| ExceptionRule::from_raw(group)).collect(),
        }
    }

    /// Parse JSON text of the form `[["Layer/trait", "Other/"], ...]`
    ///
    /// # Errors
    ///
    /// Returns the JSON error when the text is not an array of string arrays
    pub fn parse(text: &str) -> std::result::Result<Self, serde_json::Error> {
        let groups: Vec<Vec<String>> = serde_json::from_str(text)?;
        Ok(Self::from_groups(&groups))
    }

    /// Read and parse an exceptions file, reporting what went wrong
    ///
    /// # Errors
    ///
    /// Returns [`RuleFileError`] if the file is unreadable or malformed
    pub fn try_load(path: &Path) -> std::result::Result<Self, RuleFileError> {
        let text = std::fs::read_to_string(path).map_err(|source| RuleFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let rules = Self::parse(&text).map_err(|source| RuleFileError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), groups = rules.len(), "Loaded exception rules");
        Ok(rules)
    }

    /// Read an exceptions file, falling back to no rules on any problem
    pub fn load(path: &Path) -> Self {
        Self::try_load(path).unwrap_or_else(|error| {
            warn!(%error, "Ignoring exceptions file, all combinations are allowed");
            Self::empty()
        })
    }

    /// Groups in file order
    pub fn rules(&self) -> &[ExceptionRule] {
        &self.rules
    }

    /// Number of groups
    pub const fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether there are no groups
    pub const fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Groups having the committed trait as a member
    pub fn triggered_by<'a>(
        &'a self,
        layer: &'a str,
        trait_name: &'a str,
    ) -> impl Iterator<Item = &'a ExceptionRule> + 'a {
        self.rules
            .iter()
            .filter(move |rule| rule.contains_trait(layer, trait_name))
    }
}
