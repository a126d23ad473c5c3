//! WASM-compatible wrapper types for crop data.
//!
//! These wrap the core types so JavaScript can read them through plain
//! getters without serde round-trips on every gesture frame.

use snapquiz_core::{CropRegion, CroppedImage};
use wasm_bindgen::prelude::*;

/// A crop rectangle for JavaScript.
///
/// Whether it is in image or screen space depends on the function that
/// returned it.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsCropRegion {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

#[wasm_bindgen]
impl JsCropRegion {
    #[wasm_bindgen(constructor)]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> JsCropRegion {
        JsCropRegion {
            x,
            y,
            width,
            height,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.height
    }
}

impl From<CropRegion> for JsCropRegion {
    fn from(region: CropRegion) -> Self {
        Self::new(region.x, region.y, region.width, region.height)
    }
}

impl From<&JsCropRegion> for CropRegion {
    fn from(region: &JsCropRegion) -> Self {
        CropRegion::new(region.x, region.y, region.width, region.height)
    }
}

/// A cropped JPEG for JavaScript.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const cropped = session.confirm_and_crop(photoBytes);
/// const blob = new Blob([cropped.bytes()], { type: 'image/jpeg' });
/// ```
#[wasm_bindgen]
pub struct JsCroppedImage {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl JsCroppedImage {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// JPEG bytes as a `Uint8Array` (copied out of WASM memory).
    pub fn bytes(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.bytes.as_slice())
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer also releases it.
    pub fn free(self) {}
}

impl From<CroppedImage> for JsCroppedImage {
    fn from(img: CroppedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            bytes: img.bytes,
        }
    }
}

/// Convert an error into a JavaScript `Error` carrying its message.
pub(crate) fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
