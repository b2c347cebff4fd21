//! Layered trait mixer for generative art collections
//!
//! Each subdirectory of a components root is a layer of PNG variants. One
//! variant per active layer is drawn, honouring rarity weights and exception
//! rules, and the draws are alpha-composited bottom to top into a new image.

#![forbid(unsafe_code)]

/// Layer directory discovery and the loaded catalog
pub mod catalog;
/// Single-owner session around load, generate and save
pub mod engine;
/// Constrained weighted sampling and compositing
pub mod generation;
/// Input/output operations and error handling
pub mod io;
/// Exception groups and rarity weights
pub mod rules;

pub use engine::{Mixer, MixerPaths, SharedMixer};
pub use io::error::{MixerError, Result};
