//! Crop extraction: the step that runs after the user taps "Confirm".
//!
//! Decodes the captured photo, re-validates the confirmed region against the
//! decoded size, cuts it out and re-encodes it as JPEG.

use log::{error, info};
use thiserror::Error;

use crate::config::CropConfig;
use crate::decode::{decode_photo, DecodeError, DecodedImage};
use crate::encode::{encode_image, EncodeError};
use crate::geometry::{constrain_crop_region, CropRegion};
use crate::transform::apply_crop;

/// Errors that can abort crop extraction.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to decode photo: {0}")]
    Decode(#[from] DecodeError),

    #[error("Failed to encode cropped image: {0}")]
    Encode(#[from] EncodeError),

    #[error("Photo has no pixels")]
    EmptyImage,
}

/// Output of a successful crop.
#[derive(Debug, Clone)]
pub struct CroppedImage {
    /// JPEG bytes.
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Crops photos with a fixed output quality and minimum size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageProcessor {
    quality: u8,
    min_crop_size: f64,
}

impl Default for ImageProcessor {
    fn default() -> Self {
        Self::from_config(&CropConfig::default())
    }
}

impl ImageProcessor {
    pub fn new(quality: u8, min_crop_size: f64) -> Self {
        Self {
            quality: quality.clamp(1, 100),
            min_crop_size,
        }
    }

    pub fn from_config(config: &CropConfig) -> Self {
        let config = config.sanitized();
        Self::new(config.jpeg_quality, config.min_crop_size)
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Cut `region` out of an already decoded image.
    ///
    /// The region is constrained against the image first, so a region computed
    /// for slightly different dimensions still yields a valid crop.
    pub fn crop_image(
        &self,
        image: &DecodedImage,
        region: &CropRegion,
    ) -> Result<DecodedImage, ProcessError> {
        if image.is_empty() {
            return Err(ProcessError::EmptyImage);
        }

        let region = constrain_crop_region(region, image.dimensions(), self.min_crop_size);
        let rect = region.to_pixel_rect(image.width, image.height);
        Ok(apply_crop(image, rect))
    }

    /// Decode `bytes`, crop to `region` and encode the result as JPEG.
    pub fn crop_jpeg(&self, bytes: &[u8], region: &CropRegion) -> Result<CroppedImage, ProcessError> {
        let result = self.crop_jpeg_inner(bytes, region);
        match &result {
            Ok(cropped) => info!(
                "crop processing completed: {}x{}, {} bytes",
                cropped.width,
                cropped.height,
                cropped.bytes.len()
            ),
            Err(e) => error!("crop processing failed: {}", e),
        }
        result
    }

    fn crop_jpeg_inner(&self, bytes: &[u8], region: &CropRegion) -> Result<CroppedImage, ProcessError> {
        let image = decode_photo(bytes)?;
        let cropped = self.crop_image(&image, region)?;
        let bytes = encode_image(&cropped, self.quality)?;

        Ok(CroppedImage {
            bytes,
            width: cropped.width,
            height: cropped.height,
        })
    }
}
