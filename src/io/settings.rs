//! Persisted input paths between runs

use crate::engine::MixerPaths;
use crate::io::configuration::RULE_FILE_EXTENSION;
use crate::io::error::{MixerError, Result, invalid_parameter};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Last used inputs, stored as JSON
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixerSettings {
    /// Components root directory
    pub components_path: Option<PathBuf>,
    /// Layer order file
    pub layers_order_path: Option<PathBuf>,
    /// Exceptions file
    pub exceptions_path: Option<PathBuf>,
    /// Rarity filename looked up in each layer
    pub rarity_filename: Option<String>,
}

impl MixerSettings {
    /// Read settings from `path`
    ///
    /// Missing, unreadable or malformed files yield `None`.
    pub fn load(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                warn!("Failed to read settings at {}: {}", path.display(), err);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(settings) => Some(settings),
            Err(err) => {
                warn!("Failed to parse settings at {}: {}", path.display(), err);
                None
            }
        }
    }

    /// Write settings to `path` as JSON
    ///
    /// # Errors
    ///
    /// Returns [`MixerError::Settings`] if serialisation or writing fails
    pub fn save(&self, path: &Path) -> Result<()> {
        let to_error = |reason: String| MixerError::Settings {
            path: path.to_path_buf(),
            reason,
        };
        let content = serde_json::to_string_pretty(self).map_err(|e| to_error(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| to_error(e.to_string()))?;
        debug!(path = %path.display(), "Settings saved");
        Ok(())
    }

    /// Overlay values from `other`, which take precedence when present
    #[must_use]
    pub fn merged_with(self, other: Self) -> Self {
        Self {
            components_path: other.components_path.or(self.components_path),
            layers_order_path: other.layers_order_path.or(self.layers_order_path),
            exceptions_path: other.exceptions_path.or(self.exceptions_path),
            rarity_filename: other.rarity_filename.or(self.rarity_filename),
        }
    }

    /// Validate the settings and turn them into load inputs
    ///
    /// Empty values count as absent. Components and order paths are required;
    /// an exceptions file and a rarity filename, when given, must be JSON.
    ///
    /// # Errors
    ///
    /// Returns [`MixerError::InvalidParameter`] naming the first offending value
    pub fn to_paths(&self) -> Result<MixerPaths> {
        let components_path = non_empty_path(self.components_path.as_ref())
            .ok_or_else(|| invalid_parameter("components_path", &"", &"You need to fill this field!"))?;
        if components_path.is_file() {
            return Err(invalid_parameter(
                "components_path",
                &components_path.display(),
                &"This field must contain a directory NOT a file!",
            ));
        }

        let layers_order_path = non_empty_path(self.layers_order_path.as_ref()).ok_or_else(|| {
            invalid_parameter("layers_order_path", &"", &"You need to fill this field!")
        })?;
        if layers_order_path.is_dir() {
            return Err(invalid_parameter(
                "layers_order_path",
                &layers_order_path.display(),
                &"This field must contain a file NOT a directory!",
            ));
        }

        let exceptions_path = non_empty_path(self.exceptions_path.as_ref());
        if let Some(path) = &exceptions_path {
            if !has_rule_extension(&path.to_string_lossy()) {
                return Err(invalid_parameter(
                    "exceptions_path",
                    &path.display(),
                    &"Only JSON files are accepted",
                ));
            }
        }

        let rarity_filename = self
            .rarity_filename
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());
        if let Some(name) = rarity_filename {
            if !has_rule_extension(name) {
                return Err(invalid_parameter(
                    "rarity_filename",
                    &name,
                    &"Only JSON files are accepted",
                ));
            }
        }

        Ok(MixerPaths {
            components_path,
            layers_order_path,
            exceptions_path,
            rarity_filename: rarity_filename.map(str::to_string),
        })
    }
}

impl From<&MixerPaths> for MixerSettings {
    fn from(paths: &MixerPaths) -> Self {
        Self {
            components_path: Some(paths.components_path.clone()),
            layers_order_path: Some(paths.layers_order_path.clone()),
            exceptions_path: paths.exceptions_path.clone(),
            rarity_filename: paths.rarity_filename.clone(),
        }
    }
}

fn non_empty_path(path: Option<&PathBuf>) -> Option<PathBuf> {
    path.filter(|path| !path.as_os_str().is_empty()).cloned()
}

fn has_rule_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(RULE_FILE_EXTENSION))
}
