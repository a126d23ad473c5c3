//! SnapQuiz WASM - WebAssembly bindings for the SnapQuiz crop engine
//!
//! Exposes the snapquiz-core crop session and helpers to the JavaScript app
//! that owns the camera and draws the crop screen.
//!
//! # Module Structure
//!
//! - `session` - Stateful crop screen (`JsCropSession`)
//! - `crop` - Stateless geometry, detection and extraction helpers
//! - `types` - WASM-compatible wrapper types
//! - `logging` - `log` records forwarded to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropSession, preview_route } from '@snapquiz/wasm';
//!
//! await init();
//!
//! const session = new JsCropSession(photo.uri, photo.width, photo.height, window.innerWidth, window.innerHeight);
//! session.run_initial_detection();
//! // ... gestures ...
//! const cropped = session.confirm_and_crop(photoBytes);
//! navigation.navigate(preview_route(await save(cropped.bytes())));
//! ```

use log::LevelFilter;
use wasm_bindgen::prelude::*;

mod crop;
mod logging;
mod session;
mod types;

pub use crop::{
    constrain_crop_region, crop_jpeg, crop_route, detect_question_bounds, fit_display_dimensions,
    preview_route,
};
pub use logging::set_log_level;
pub use session::JsCropSession;
pub use types::{JsCropRegion, JsCroppedImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logging::init_logging(LevelFilter::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_public_types_convert() {
        let region = JsCropRegion::new(1.0, 2.0, 60.0, 70.0);
        let core: snapquiz_core::CropRegion = (&region).into();
        assert_eq!(core, snapquiz_core::CropRegion::new(1.0, 2.0, 60.0, 70.0));
    }
}
