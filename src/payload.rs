//! Fixed input sample for benchmarking
//!
//! One rasterized digit image, loaded once and reused identically for every
//! measured call. Matches the `payload.json` format the training pipeline
//! writes: `{"pixels": [<784 floats>]}`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CotejarError, Result};

/// Number of pixels in a rasterized digit image (28x28, flattened)
pub const PIXEL_COUNT: usize = 784;

/// A fixed rasterized digit sample
///
/// Immutable for the duration of a run; the same sample feeds every local
/// inference call and the remote benchmark request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PixelSample {
    pixels: Vec<f32>,
}

impl PixelSample {
    /// Create a sample from a flattened pixel array
    ///
    /// # Errors
    /// Returns `CotejarError::Format` if the array is not exactly
    /// `PIXEL_COUNT` elements long.
    pub fn new(pixels: Vec<f32>) -> Result<Self> {
        if pixels.len() != PIXEL_COUNT {
            return Err(CotejarError::Format {
                reason: format!(
                    "Input must be {} pixels, got {}",
                    PIXEL_COUNT,
                    pixels.len()
                ),
            });
        }
        Ok(Self { pixels })
    }

    /// Load a sample from a JSON file (`{"pixels": [...]}`)
    ///
    /// # Errors
    /// Returns `CotejarError::Io` if the file cannot be read, or
    /// `CotejarError::Format` if the JSON is malformed or the pixel count
    /// is wrong.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let sample: Self = serde_json::from_str(&raw).map_err(|e| CotejarError::Format {
            reason: format!("Failed to parse {}: {}", path.display(), e),
        })?;
        Self::new(sample.pixels)
    }

    /// The flattened pixel values
    #[must_use]
    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }
}
