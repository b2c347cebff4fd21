//! Session object owning the loaded tables and the last generated image
//!
//! A [`Mixer`] is driven through `&mut self`, so one owner issues load,
//! generate and save calls one at a time. [`SharedMixer`] wraps it in a mutex
//! for callers that hand engine calls to a worker thread.

use crate::catalog::{Catalog, loader};
use crate::generation::{GeneratedArtifact, RandomSelector, TraitAssignment, generate};
use crate::io::error::{MixerError, Result};
use crate::io::image::save_artifact;
use crate::rules::{ExceptionRules, RarityTable};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

/// Inputs of one load
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MixerPaths {
    /// Root whose subdirectories are the layers
    pub components_path: PathBuf,
    /// Text file listing active layers bottom first
    pub layers_order_path: PathBuf,
    /// Optional JSON file of exception groups
    pub exceptions_path: Option<PathBuf>,
    /// Optional rarity filename looked up in every layer directory
    pub rarity_filename: Option<String>,
}

/// Tables produced by one successful load
#[derive(Debug)]
pub struct LoadedSession {
    /// Discovered layers and counts
    pub catalog: Catalog,
    /// Exception groups, empty when none were usable
    pub rules: ExceptionRules,
    /// Rarity weights, uniform when none were usable
    pub rarity: RarityTable,
}

impl LoadedSession {
    /// Load all tables for the given inputs
    ///
    /// Exception and rarity problems degrade to "no constraints" and "no
    /// weights" respectively and are only logged.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded; see [`loader::load`]
    pub fn load(paths: &MixerPaths) -> Result<Self> {
        let catalog = loader::load(&paths.components_path, &paths.layers_order_path)?;

        let rules = paths
            .exceptions_path
            .as_deref()
            .map_or_else(ExceptionRules::empty, ExceptionRules::load);

        let rarity = paths
            .rarity_filename
            .as_deref()
            .map_or_else(RarityTable::uniform, |filename| {
                RarityTable::load(catalog.active_layers(), filename)
            });

        if !rarity.issues().is_empty() {
            warn!(
                skipped = rarity.issues().len(),
                "Some rarity files were ignored"
            );
        }

        Ok(Self {
            catalog,
            rules,
            rarity,
        })
    }
}

/// Single-owner generation session
pub struct Mixer {
    session: Option<LoadedSession>,
    last: Option<GeneratedArtifact>,
    selector: RandomSelector,
}

impl Mixer {
    /// Create an unloaded mixer; a seed makes generation reproducible
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            session: None,
            last: None,
            selector: RandomSelector::with_seed(seed),
        }
    }

    /// Replace the session with a fresh load
    ///
    /// The previous session and last image are dropped even when loading fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the components root or layer order is unusable
    pub fn load(&mut self, paths: &MixerPaths) -> Result<&LoadedSession> {
        self.session = None;
        self.last = None;

        let session = LoadedSession::load(paths)?;
        info!(
            components = %paths.components_path.display(),
            exception_groups = session.rules.len(),
            weighted_traits = session.rarity.len(),
            "Session loaded"
        );
        Ok(self.session.insert(session))
    }

    /// Generate a new image, replacing the previous one
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Nothing has been loaded ([`MixerError::NotLoaded`])
    /// - A drawn variant cannot be decoded
    pub fn generate(&mut self) -> Result<&GeneratedArtifact> {
        let session = self.session.as_ref().ok_or(MixerError::NotLoaded)?;
        let artifact = generate(
            &session.catalog,
            &session.rules,
            &session.rarity,
            &mut self.selector,
        )?;
        Ok(self.last.insert(artifact))
    }

    /// Save the last generated image into `output_dir`
    ///
    /// # Errors
    ///
    /// Returns an error if nothing was generated yet or writing fails
    pub fn save(&self, output_dir: &Path) -> Result<PathBuf> {
        let artifact = self.last.as_ref().ok_or(MixerError::NoArtifact)?;
        save_artifact(artifact, output_dir)
    }

    /// Currently loaded tables
    pub const fn session(&self) -> Option<&LoadedSession> {
        self.session.as_ref()
    }

    /// Loaded catalog, if any
    pub fn catalog(&self) -> Option<&Catalog> {
        self.session.as_ref().map(|session| &session.catalog)
    }

    /// Most recently generated image
    pub const fn last_artifact(&self) -> Option<&GeneratedArtifact> {
        self.last.as_ref()
    }

    /// Traits of the most recently generated image
    pub fn last_traits(&self) -> Option<&TraitAssignment> {
        self.last.as_ref().map(|artifact| &artifact.traits)
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Cloneable handle serialising every engine call through one mutex
#[derive(Clone)]
pub struct SharedMixer {
    inner: Arc<Mutex<Mixer>>,
}

impl SharedMixer {
    /// Wrap a mixer for use from several threads
    pub fn new(mixer: Mixer) -> Self {
        Self {
            inner: Arc::new(Mutex::new(mixer)),
        }
    }

    // Session fields are replaced wholesale, so a poisoned lock still guards consistent state
    fn lock(&self) -> MutexGuard<'_, Mixer> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load a session, returning the number of active layers
    ///
    /// # Errors
    ///
    /// See [`Mixer::load`]
    pub fn load(&self, paths: &MixerPaths) -> Result<usize> {
        self.lock()
            .load(paths)
            .map(|session| session.catalog.active_layers().len())
    }

    /// Generate an image and return its traits
    ///
    /// # Errors
    ///
    /// See [`Mixer::generate`]
    pub fn generate(&self) -> Result<TraitAssignment> {
        self.lock()
            .generate()
            .map(|artifact| artifact.traits.clone())
    }

    /// Save the last image while holding the lock
    ///
    /// # Errors
    ///
    /// See [`Mixer::save`]
    pub fn save(&self, output_dir: &Path) -> Result<PathBuf> {
        self.lock().save(output_dir)
    }

    /// Generate and save as one uninterrupted step
    ///
    /// # Errors
    ///
    /// See [`Mixer::generate`] and [`Mixer::save`]
    pub fn generate_and_save(&self, output_dir: &Path) -> Result<PathBuf> {
        let mut mixer = self.lock();
        mixer.generate()?;
        mixer.save(output_dir)
    }

    /// Run a read-only closure against the mixer state
    pub fn with<R>(&self, read: impl FnOnce(&Mixer) -> R) -> R {
        read(&self.lock())
    }
}
