//! Source-over compositing of variant images onto a fixed-size canvas

use crate::io::error::{MixerError, Result};
use image::{RgbaImage, imageops};
use std::path::Path;

/// Running canvas for one generated image
///
/// Starts fully transparent. Layers are stacked bottom first; every layer is
/// anchored at the top-left corner and clipped to the canvas.
#[derive(Debug, Clone)]
pub struct Compositor {
    canvas: RgbaImage,
}

impl Compositor {
    /// Create a transparent canvas of the given size
    pub fn new((width, height): (u32, u32)) -> Self {
        Self {
            canvas: RgbaImage::new(width, height),
        }
    }

    /// Blend an already decoded layer over the canvas
    pub fn stack(&mut self, layer: &RgbaImage) {
        imageops::overlay(&mut self.canvas, layer, 0, 0);
    }

    /// Decode a variant image and blend it over the canvas
    ///
    /// # Errors
    ///
    /// Returns [`MixerError::ImageLoad`] if the file cannot be decoded
    pub fn stack_file(&mut self, path: &Path) -> Result<()> {
        let layer = image::open(path)
            .map_err(|source| MixerError::ImageLoad {
                path: path.to_path_buf(),
                source,
            })?
            .into_rgba8();
        self.stack(&layer);
        Ok(())
    }

    /// Current canvas
    pub const fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Finish compositing and take the canvas
    pub fn into_image(self) -> RgbaImage {
        self.canvas
    }
}
