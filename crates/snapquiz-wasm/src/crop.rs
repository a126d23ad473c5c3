//! Stateless crop bindings.
//!
//! These mirror the core geometry helpers for callers that keep the crop box
//! state on the JavaScript side.

use snapquiz_core::geometry;
use snapquiz_core::{
    CropRegion, ImageDimensions, ImageProcessor, PaddingDetector, PhotoData, QuestionDetector,
    Route,
};
use wasm_bindgen::prelude::*;

use crate::types::{to_js_error, JsCropRegion, JsCroppedImage};

/// Clamp a region to the image and to a minimum edge length.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const r = constrain_crop_region(new JsCropRegion(-10, 10, 40, 40), 1000, 800, 50);
/// // r = { x: 0, y: 10, width: 50, height: 50 }
/// ```
#[wasm_bindgen]
pub fn constrain_crop_region(
    region: &JsCropRegion,
    image_width: f64,
    image_height: f64,
    min_size: f64,
) -> JsCropRegion {
    let region: CropRegion = region.into();
    geometry::constrain_crop_region(
        &region,
        ImageDimensions::new(image_width, image_height),
        min_size,
    )
    .into()
}

/// On-screen size of a photo fitted into the available area.
///
/// Returns `[width, height]`.
#[wasm_bindgen]
pub fn fit_display_dimensions(
    image_width: f64,
    image_height: f64,
    available_width: f64,
    available_height: f64,
    max_height_fraction: f64,
) -> Result<Vec<f64>, JsValue> {
    fit_display(
        image_width,
        image_height,
        available_width,
        available_height,
        max_height_fraction,
    )
    .map_err(to_js_error)
}

fn fit_display(
    image_width: f64,
    image_height: f64,
    available_width: f64,
    available_height: f64,
    max_height_fraction: f64,
) -> Result<Vec<f64>, geometry::GeometryError> {
    let display = geometry::fit_display_dimensions(
        ImageDimensions::new(image_width, image_height),
        ImageDimensions::new(available_width, available_height),
        max_height_fraction,
    )?;
    Ok(vec![display.width, display.height])
}

/// Placeholder question detection: the photo minus a 15% margin.
#[wasm_bindgen]
pub fn detect_question_bounds(image_width: f64, image_height: f64) -> Option<JsCropRegion> {
    PaddingDetector::default()
        .detect(ImageDimensions::new(image_width, image_height))
        .map(JsCropRegion::from)
}

/// Decode a photo, crop it to `region` (image pixels) and encode as JPEG.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const bytes = new Uint8Array(await (await fetch(photoUri)).arrayBuffer());
/// const cropped = crop_jpeg(bytes, session.region(), 90);
/// ```
#[wasm_bindgen]
pub fn crop_jpeg(bytes: &[u8], region: &JsCropRegion, quality: u8) -> Result<JsCroppedImage, JsValue> {
    let processor = ImageProcessor::new(quality, snapquiz_core::config::MIN_CROP_SIZE);
    processor
        .crop_jpeg(bytes, &region.into())
        .map(JsCroppedImage::from)
        .map_err(to_js_error)
}

/// Navigation parameters for the crop screen.
#[wasm_bindgen]
pub fn crop_route(photo_uri: String, width: u32, height: u32) -> Result<JsValue, JsValue> {
    let route = Route::crop(&PhotoData::new(photo_uri, width, height));
    serde_wasm_bindgen::to_value(&route).map_err(to_js_error)
}

/// Navigation parameters for the preview screen.
#[wasm_bindgen]
pub fn preview_route(cropped_uri: String) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&Route::preview(cropped_uri)).map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constrain_example() {
        let result = constrain_crop_region(&JsCropRegion::new(-10.0, 10.0, 40.0, 40.0), 1000.0, 800.0, 50.0);
        assert_eq!(result, JsCropRegion::new(0.0, 10.0, 50.0, 50.0));
    }

    #[test]
    fn test_fit_display() {
        let dims = fit_display(4000.0, 3000.0, 400.0, 800.0, 0.7).unwrap();
        assert_eq!(dims, vec![400.0, 300.0]);
        assert!(fit_display(0.0, 3000.0, 400.0, 800.0, 0.7).is_err());
    }

    #[test]
    fn test_detect_question_bounds() {
        let region = detect_question_bounds(1000.0, 800.0).unwrap();
        assert!((region.x() - 150.0).abs() < 1e-9);
        assert!((region.y() - 120.0).abs() < 1e-9);
        assert!(detect_question_bounds(0.0, 0.0).is_none());
    }
}

/// WASM-specific tests that require JsValue.
///
/// Run with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use snapquiz_core::encode::encode_jpeg;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_crop_jpeg() {
        let jpeg = encode_jpeg(&vec![128u8; 200 * 100 * 3], 200, 100, 90).unwrap();
        let cropped = crop_jpeg(&jpeg, &JsCropRegion::new(10.0, 10.0, 80.0, 60.0), 90).unwrap();
        assert_eq!((cropped.width(), cropped.height()), (80, 60));
    }

    #[wasm_bindgen_test]
    fn test_crop_jpeg_rejects_garbage() {
        assert!(crop_jpeg(b"nope", &JsCropRegion::new(0.0, 0.0, 60.0, 60.0), 90).is_err());
    }

    #[wasm_bindgen_test]
    fn test_routes_serialize() {
        let route = crop_route("file:///a.jpg".to_string(), 640, 480).unwrap();
        assert!(route.is_object());
        assert!(preview_route("file:///b.jpg".to_string()).unwrap().is_object());
    }
}
