//! Tunables for the crop screen.
//!
//! The host app passes a partial object; anything missing falls back to the
//! defaults below, so `{}` is a valid configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geometry::DEFAULT_MAX_DISPLAY_HEIGHT_FRACTION;
use crate::session::CropMode;

/// Smallest crop box edge, in image pixels.
pub const MIN_CROP_SIZE: f64 = 50.0;

/// Touch target size of a corner handle, in screen points.
pub const HANDLE_SIZE: f64 = 40.0;

/// Padding (fraction of each edge) used by the placeholder detector.
pub const AUTO_CROP_PADDING: f64 = 0.15;

/// Largest detector padding; beyond this the region would collapse.
pub const MAX_AUTO_CROP_PADDING: f64 = 0.45;

/// Simulated detector latency.
pub const DETECTION_LATENCY_MS: u64 = 300;

/// JPEG quality for the cropped output (equivalent to 0.9 compression).
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Crop screen configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropConfig {
    /// Minimum crop width and height in image pixels
    pub min_crop_size: f64,
    /// Corner handle size in screen points
    pub handle_size: f64,
    /// Fraction of the available height the photo may take (0.0 to 1.0)
    pub max_display_height_fraction: f64,
    /// Edge padding used by the placeholder detector (0.0 to `MAX_AUTO_CROP_PADDING`)
    pub auto_crop_padding: f64,
    /// Simulated detector latency in milliseconds
    pub detection_latency_ms: u64,
    /// JPEG quality for the cropped image (1 to 100)
    pub jpeg_quality: u8,
    /// Mode the crop screen opens in
    pub default_mode: CropMode,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            min_crop_size: MIN_CROP_SIZE,
            handle_size: HANDLE_SIZE,
            max_display_height_fraction: DEFAULT_MAX_DISPLAY_HEIGHT_FRACTION,
            auto_crop_padding: AUTO_CROP_PADDING,
            detection_latency_ms: DETECTION_LATENCY_MS,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            default_mode: CropMode::Auto,
        }
    }
}

impl CropConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detector latency as a `Duration`.
    pub fn detection_latency(&self) -> Duration {
        Duration::from_millis(self.detection_latency_ms)
    }

    /// Copy with every field pulled into its usable range.
    ///
    /// Non-finite values fall back to the defaults.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let finite_or = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };

        Self {
            min_crop_size: finite_or(self.min_crop_size, defaults.min_crop_size).max(1.0),
            handle_size: finite_or(self.handle_size, defaults.handle_size).max(0.0),
            max_display_height_fraction: finite_or(
                self.max_display_height_fraction,
                defaults.max_display_height_fraction,
            )
            .clamp(0.05, 1.0),
            auto_crop_padding: finite_or(self.auto_crop_padding, defaults.auto_crop_padding)
                .clamp(0.0, MAX_AUTO_CROP_PADDING),
            detection_latency_ms: self.detection_latency_ms,
            jpeg_quality: self.jpeg_quality.clamp(1, 100),
            default_mode: self.default_mode,
        }
    }
}
