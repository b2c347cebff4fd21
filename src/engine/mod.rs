//! Session management around the generation engine

/// Single-owner mixer session and its shared handle
pub mod mixer;

pub use mixer::{LoadedSession, Mixer, MixerPaths, SharedMixer};
