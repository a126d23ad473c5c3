//! Crop-region geometry: clamping and screen/image coordinate mapping.
//!
//! Two coordinate spaces are involved when the user edits a crop box:
//!
//! - **Image space**: pixels of the captured photo. `CropRegion` values stored
//!   in a session always live here.
//! - **Screen space**: the photo as rendered on the device, fitted into the
//!   available area while preserving aspect ratio.
//!
//! The two are related by a single uniform scale factor,
//! `display.width / image.width`. Everything in this module is pure so the
//! invariants can be tested without a UI.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fraction of the available height the displayed photo may occupy.
pub const DEFAULT_MAX_DISPLAY_HEIGHT_FRACTION: f64 = 0.7;

/// Errors produced by geometry helpers.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// Width or height is zero, negative, or not finite.
    #[error("Invalid dimensions: {width}x{height} (both must be finite and positive)")]
    InvalidDimensions { width: f64, height: f64 },

    /// The derived scale factor cannot be used to map coordinates.
    #[error("Invalid scale factor: {0}")]
    InvalidScale(f64),
}

/// Pixel extents of a photo or of the on-screen display area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: f64,
    pub height: f64,
}

impl ImageDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when both extents are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Return `self` if usable for coordinate mapping.
    pub fn validate(self) -> Result<Self, GeometryError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(GeometryError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

impl From<(u32, u32)> for ImageDimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
        }
    }
}

/// Rectangle selecting the area of the photo to keep.
///
/// Coordinates are in source-image pixels unless a function explicitly says
/// it returns a screen-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRegion {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Initial guess shown right after capture: a wide band across the
    /// upper-middle of the photo, where a question usually sits.
    pub fn default_for(image: ImageDimensions) -> Self {
        Self {
            x: image.width * 0.1,
            y: image.height * 0.25,
            width: image.width * 0.8,
            height: image.height * 0.35,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Multiply every component by `scale`.
    pub fn scaled(&self, scale: f64) -> Self {
        Self {
            x: self.x * scale,
            y: self.y * scale,
            width: self.width * scale,
            height: self.height * scale,
        }
    }

    /// Component-wise comparison within `epsilon`.
    pub fn approx_eq(&self, other: &CropRegion, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.width - other.width).abs() <= epsilon
            && (self.height - other.height).abs() <= epsilon
    }

    /// Check that the region lies fully inside `image`.
    pub fn is_within(&self, image: ImageDimensions) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= image.width + f64::EPSILON * image.width.max(1.0)
            && self.bottom() <= image.height + f64::EPSILON * image.height.max(1.0)
    }

    /// Round to whole pixels inside a `width` x `height` image.
    ///
    /// The result is at least 1x1 and never extends past the image edge.
    pub fn to_pixel_rect(&self, width: u32, height: u32) -> PixelRect {
        let to_px = |v: f64| if v.is_finite() { v.round().max(0.0) as u32 } else { 0 };

        let left = to_px(self.x).min(width.saturating_sub(1));
        let top = to_px(self.y).min(height.saturating_sub(1));
        let right = to_px(self.right()).min(width).max(left + 1);
        let bottom = to_px(self.bottom()).min(height).max(top + 1);

        PixelRect {
            left,
            top,
            width: right - left,
            height: bottom - top,
        }
    }
}

/// Integer pixel rectangle used by the crop primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// Clamp a proposed image-space rectangle to the image.
///
/// Width and height are raised to `min_size` first, then capped at the image
/// extent, and finally the origin is moved so the rectangle lies fully inside
/// the image. Non-finite components are treated as zero.
///
/// Guarantees, for any input:
/// - `x >= 0`, `y >= 0`, `x + width <= image.width`, `y + height <= image.height`
/// - `width >= min_size` whenever `image.width >= min_size` (same for height)
/// - applying the function twice gives the same result as applying it once
pub fn constrain_crop_region(
    region: &CropRegion,
    image: ImageDimensions,
    min_size: f64,
) -> CropRegion {
    let finite = |v: f64| if v.is_finite() { v } else { 0.0 };

    let bound_w = finite(image.width).max(0.0);
    let bound_h = finite(image.height).max(0.0);
    let min_size = finite(min_size).max(0.0);

    let width = finite(region.width).max(min_size).min(bound_w);
    let height = finite(region.height).max(min_size).min(bound_h);

    let x = fit_origin(finite(region.x), width, bound_w);
    let y = fit_origin(finite(region.y), height, bound_h);

    CropRegion {
        x,
        y,
        width,
        height,
    }
}

/// Clamp `origin` into `0..=bound - length`.
///
/// `(bound - length) + length` can round above `bound`, so the origin is
/// stepped down one ulp at a time until the far edge fits.
fn fit_origin(origin: f64, length: f64, bound: f64) -> f64 {
    let mut origin = origin.min(bound - length).max(0.0);
    while origin > 0.0 && origin + length > bound {
        origin = f64::from_bits(origin.to_bits() - 1);
    }
    origin
}

/// Map an image-space rectangle to screen space, scaling each axis independently.
pub fn scale_to_screen(
    region: &CropRegion,
    image: ImageDimensions,
    screen: ImageDimensions,
) -> Result<CropRegion, GeometryError> {
    let image = image.validate()?;
    let screen = screen.validate()?;
    let sx = screen.width / image.width;
    let sy = screen.height / image.height;

    Ok(CropRegion {
        x: region.x * sx,
        y: region.y * sy,
        width: region.width * sx,
        height: region.height * sy,
    })
}

/// Inverse of [`scale_to_screen`].
pub fn scale_to_image(
    region: &CropRegion,
    image: ImageDimensions,
    screen: ImageDimensions,
) -> Result<CropRegion, GeometryError> {
    let image = image.validate()?;
    let screen = screen.validate()?;
    let sx = image.width / screen.width;
    let sy = image.height / screen.height;

    Ok(CropRegion {
        x: region.x * sx,
        y: region.y * sy,
        width: region.width * sx,
        height: region.height * sy,
    })
}

/// Uniform scale factor between the displayed photo and the source image.
pub fn display_scale(image: ImageDimensions, display: ImageDimensions) -> Result<f64, GeometryError> {
    let image = image.validate()?;
    let display = display.validate()?;
    let scale = display.width / image.width;
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(GeometryError::InvalidScale(scale))
    }
}

/// Size the photo for display inside `available`.
///
/// The photo is fitted to the available width. If that makes it taller than
/// `available.height * max_height_fraction`, it is fitted to that height instead.
pub fn fit_display_dimensions(
    image: ImageDimensions,
    available: ImageDimensions,
    max_height_fraction: f64,
) -> Result<ImageDimensions, GeometryError> {
    let image = image.validate()?;
    let available = available.validate()?;
    let aspect = image.aspect_ratio();

    let mut width = available.width;
    let mut height = width / aspect;

    let max_height = available.height * max_height_fraction.clamp(f64::MIN_POSITIVE, 1.0);
    if height > max_height {
        height = max_height;
        width = height * aspect;
    }

    ImageDimensions::new(width, height).validate()
}

/// Pairing of a source image with the area it is drawn into.
///
/// Gesture handlers receive screen-space deltas; the viewport converts them
/// to image space with its uniform scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    image: ImageDimensions,
    display: ImageDimensions,
    scale: f64,
}

impl Viewport {
    pub fn new(image: ImageDimensions, display: ImageDimensions) -> Result<Self, GeometryError> {
        let scale = display_scale(image, display)?;
        Ok(Self {
            image,
            display,
            scale,
        })
    }

    /// Fit `image` into `available` and build the resulting viewport.
    pub fn fit(
        image: ImageDimensions,
        available: ImageDimensions,
        max_height_fraction: f64,
    ) -> Result<Self, GeometryError> {
        let display = fit_display_dimensions(image, available, max_height_fraction)?;
        Self::new(image, display)
    }

    pub fn image(&self) -> ImageDimensions {
        self.image
    }

    pub fn display(&self) -> ImageDimensions {
        self.display
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Image space to screen space.
    pub fn to_screen(&self, region: &CropRegion) -> CropRegion {
        region.scaled(self.scale)
    }

    /// Screen space to image space.
    pub fn to_image(&self, region: &CropRegion) -> CropRegion {
        region.scaled(1.0 / self.scale)
    }

    /// Convert a screen-space distance to image space.
    pub fn screen_delta_to_image(&self, delta: f64) -> f64 {
        delta / self.scale
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
