//! SnapQuiz Core - crop engine for photographed homework questions
//!
//! This crate holds everything between "a photo was captured" and "here is
//! the cropped question": crop-box geometry, gesture translation, the
//! auto/manual detection toggle, and crop extraction.
//!
//! Camera access, permissions and rendering belong to the host app; it talks
//! to this crate through plain values ([`PhotoData`], [`CropRegion`],
//! [`Route`]) or through the WASM bindings.

pub mod config;
pub mod decode;
pub mod detect;
pub mod encode;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod process;
pub mod route;
pub mod session;
pub mod transform;

pub use config::CropConfig;
pub use detect::{PaddingDetector, QuestionDetector};
pub use error::{Alert, AppError};
pub use geometry::{
    constrain_crop_region, fit_display_dimensions, scale_to_image, scale_to_screen, CropRegion,
    ImageDimensions, Viewport,
};
pub use gesture::{apply_resize, Corner, DragGesture};
pub use process::{CroppedImage, ImageProcessor, ProcessError};
pub use route::Route;
pub use session::{CropMode, CropSession, SessionError};

/// A frame returned by the camera.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PhotoData {
    /// Where the host stored the capture
    pub uri: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl PhotoData {
    pub fn new(uri: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            uri: uri.into(),
            width,
            height,
        }
    }

    /// Pixel extents as crop geometry dimensions.
    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::from((self.width, self.height))
    }
}
