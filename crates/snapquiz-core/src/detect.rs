//! Question bounds detection.
//!
//! There is no real detector yet. [`PaddingDetector`] stands in for one: it
//! waits a little and proposes the photo minus a fixed margin on every side.
//! The [`QuestionDetector`] trait is the seam where a model-based detector
//! would plug in.

use std::time::Duration;

use log::{debug, info, warn};

use crate::config::{CropConfig, MAX_AUTO_CROP_PADDING};
use crate::geometry::{CropRegion, ImageDimensions};

/// Something that can propose a crop region for a captured photo.
pub trait QuestionDetector {
    /// Return the detected question bounds in image space, or `None` when
    /// nothing was found.
    fn detect(&self, dimensions: ImageDimensions) -> Option<CropRegion>;
}

/// Placeholder detector returning a centred, padded rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddingDetector {
    padding: f64,
    latency: Duration,
}

impl Default for PaddingDetector {
    fn default() -> Self {
        Self::from_config(&CropConfig::default())
    }
}

impl PaddingDetector {
    /// Create a detector. `padding` is clamped to `0.0..=MAX_AUTO_CROP_PADDING`.
    pub fn new(padding: f64, latency: Duration) -> Self {
        let padding = if padding.is_finite() {
            padding.clamp(0.0, MAX_AUTO_CROP_PADDING)
        } else {
            0.0
        };
        Self { padding, latency }
    }

    pub fn from_config(config: &CropConfig) -> Self {
        Self::new(config.auto_crop_padding, config.detection_latency())
    }

    /// Same detector without the artificial delay.
    pub fn immediate(self) -> Self {
        Self {
            latency: Duration::ZERO,
            ..self
        }
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// The padded rectangle for `dimensions`, without waiting.
    pub fn padded_region(&self, dimensions: ImageDimensions) -> Option<CropRegion> {
        if !dimensions.is_valid() {
            return None;
        }
        let p = self.padding;
        Some(CropRegion {
            x: dimensions.width * p,
            y: dimensions.height * p,
            width: dimensions.width * (1.0 - 2.0 * p),
            height: dimensions.height * (1.0 - 2.0 * p),
        })
    }
}

impl QuestionDetector for PaddingDetector {
    fn detect(&self, dimensions: ImageDimensions) -> Option<CropRegion> {
        debug!(
            "auto crop detection started for {}x{} (latency {:?})",
            dimensions.width, dimensions.height, self.latency
        );

        simulate_latency(self.latency);

        match self.padded_region(dimensions) {
            Some(region) => {
                info!("auto crop succeeded: {:?}", region);
                Some(region)
            }
            None => {
                warn!(
                    "auto crop failed: unusable dimensions {}x{}",
                    dimensions.width, dimensions.height
                );
                None
            }
        }
    }
}

// On wasm32 the host awaits its own timer; blocking the only thread would
// freeze the page.
#[cfg(not(target_arch = "wasm32"))]
fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        std::thread::sleep(latency);
    }
}

#[cfg(target_arch = "wasm32")]
fn simulate_latency(_latency: Duration) {}
