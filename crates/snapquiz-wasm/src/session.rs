//! Crop screen bindings.
//!
//! `JsCropSession` owns the crop box state for one photo. The UI layer
//! forwards gesture callbacks to it and draws whatever `display_region`
//! returns.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const session = new JsCropSession(photo.uri, photo.width, photo.height, screenW, screenH);
//! session.run_initial_detection();
//!
//! pan.onStart(() => session.begin_drag())
//!    .onUpdate((e) => draw(session.update_drag(e.translationX, e.translationY)))
//!    .onEnd((e) => session.end_drag(e.translationX, e.translationY));
//!
//! const cropped = session.confirm_and_crop(photoBytes);
//! ```

use snapquiz_core::{
    AppError, Corner, CropConfig, CropMode, CropSession, ImageDimensions, ImageProcessor,
    PaddingDetector, PhotoData,
};
use wasm_bindgen::prelude::*;

use crate::types::{to_js_error, JsCropRegion, JsCroppedImage};

/// Interactive crop state for one captured photo.
#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession,
    detector: PaddingDetector,
    processor: ImageProcessor,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Create a session with the default configuration.
    ///
    /// `screen_width`/`screen_height` describe the area the photo may occupy.
    #[wasm_bindgen(constructor)]
    pub fn new(
        photo_uri: String,
        image_width: u32,
        image_height: u32,
        screen_width: f64,
        screen_height: f64,
    ) -> Result<JsCropSession, JsValue> {
        Self::from_parts(
            PhotoData::new(photo_uri, image_width, image_height),
            ImageDimensions::new(screen_width, screen_height),
            CropConfig::default(),
        )
        .map_err(to_js_error)
    }

    /// Create a session with a (partial) configuration object, e.g.
    /// `{ minCropSize: 80, defaultMode: "manual" }`.
    pub fn with_config(
        photo_uri: String,
        image_width: u32,
        image_height: u32,
        screen_width: f64,
        screen_height: f64,
        config: JsValue,
    ) -> Result<JsCropSession, JsValue> {
        let config: CropConfig = if config.is_undefined() || config.is_null() {
            CropConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid crop config: {}", e)))?
        };

        Self::from_parts(
            PhotoData::new(photo_uri, image_width, image_height),
            ImageDimensions::new(screen_width, screen_height),
            config,
        )
        .map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn display_width(&self) -> f64 {
        self.inner.viewport().display().width
    }

    #[wasm_bindgen(getter)]
    pub fn display_height(&self) -> f64 {
        self.inner.viewport().display().height
    }

    /// Screen points per image pixel.
    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.inner.viewport().scale()
    }

    /// Current region in image pixels.
    pub fn region(&self) -> JsCropRegion {
        self.inner.region().into()
    }

    /// Current region in screen points.
    pub fn display_region(&self) -> JsCropRegion {
        self.inner.display_region().into()
    }

    /// True in auto-detect mode, false in manual mode.
    #[wasm_bindgen(getter)]
    pub fn auto_mode(&self) -> bool {
        self.inner.mode() == CropMode::Auto
    }

    #[wasm_bindgen(getter)]
    pub fn processing(&self) -> bool {
        self.inner.is_processing()
    }

    /// Corner handle touch target, in screen points.
    #[wasm_bindgen(getter)]
    pub fn handle_size(&self) -> f64 {
        self.inner.config().handle_size
    }

    /// Smallest crop box edge, in image pixels.
    #[wasm_bindgen(getter)]
    pub fn min_crop_size(&self) -> f64 {
        self.inner.config().min_crop_size
    }

    /// Run detection if the session opened in auto mode.
    pub fn run_initial_detection(&mut self) -> Result<Option<JsCropRegion>, JsValue> {
        self.inner
            .run_initial_detection(&self.detector)
            .map(|region| region.map(JsCropRegion::from))
            .map_err(to_js_error)
    }

    /// Flip auto/manual; returns the new `auto_mode`.
    pub fn toggle_mode(&mut self) -> Result<bool, JsValue> {
        self.inner
            .toggle_mode(&self.detector)
            .map(|mode| mode == CropMode::Auto)
            .map_err(to_js_error)
    }

    pub fn begin_drag(&mut self) -> Result<(), JsValue> {
        self.inner.begin_drag().map_err(to_js_error)
    }

    /// Screen-space box for a cumulative pan translation.
    pub fn update_drag(&self, translation_x: f64, translation_y: f64) -> Result<JsCropRegion, JsValue> {
        self.inner
            .update_drag(translation_x, translation_y)
            .map(JsCropRegion::from)
            .map_err(to_js_error)
    }

    /// Commit the pan; returns the new image-space region.
    pub fn end_drag(&mut self, translation_x: f64, translation_y: f64) -> Result<JsCropRegion, JsValue> {
        self.inner
            .end_drag(translation_x, translation_y)
            .map(JsCropRegion::from)
            .map_err(to_js_error)
    }

    pub fn cancel_drag(&mut self) {
        self.inner.cancel_drag();
    }

    /// Move a corner handle (`"topLeft"`, `"topRight"`, `"bottomLeft"`, `"bottomRight"`).
    pub fn resize(&mut self, corner: &str, dx: f64, dy: f64) -> Result<JsCropRegion, JsValue> {
        let corner: Corner = corner.parse().map_err(to_js_error)?;
        self.inner
            .resize(corner, dx, dy)
            .map(JsCropRegion::from)
            .map_err(to_js_error)
    }

    /// Replace the region (image space); the stored value is constrained.
    pub fn set_region(&mut self, region: &JsCropRegion) -> Result<JsCropRegion, JsValue> {
        self.inner
            .set_region(region.into())
            .map(JsCropRegion::from)
            .map_err(to_js_error)
    }

    /// Lock the region and crop `photo_bytes` to it.
    ///
    /// On failure the error message is the user-facing alert text.
    pub fn confirm_and_crop(&mut self, photo_bytes: &[u8]) -> Result<JsCroppedImage, JsValue> {
        let region = self.inner.confirm().map_err(to_js_error)?;
        let result = self.processor.crop_jpeg(photo_bytes, &region);
        self.inner.finish_processing();

        result
            .map(JsCroppedImage::from)
            .map_err(|e| to_js_error(AppError::from(e).alert().message))
    }
}

impl JsCropSession {
    pub(crate) fn from_parts(
        photo: PhotoData,
        available: ImageDimensions,
        config: CropConfig,
    ) -> Result<Self, snapquiz_core::SessionError> {
        let inner = CropSession::new(photo, available, config)?;
        let detector = PaddingDetector::from_config(inner.config());
        let processor = ImageProcessor::from_config(inner.config());
        Ok(Self {
            inner,
            detector,
            processor,
        })
    }
}
