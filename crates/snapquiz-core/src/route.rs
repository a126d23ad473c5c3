//! Navigation parameters passed between screens.
//!
//! The host navigator serializes these as JSON-compatible objects with
//! camelCase keys, tagged by `screen`:
//!
//! ```json
//! { "screen": "crop", "photoUri": "file:///...", "dimensions": { "width": 4032, "height": 3024 } }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Alert;
use crate::geometry::{CropRegion, ImageDimensions};
use crate::PhotoData;

/// A screen together with the parameters it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "camelCase")]
pub enum Route {
    /// Live camera with the capture button.
    Camera,
    /// Crop box over a freshly captured photo.
    #[serde(rename_all = "camelCase")]
    Crop {
        photo_uri: String,
        dimensions: ImageDimensions,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        initial_region: Option<CropRegion>,
    },
    /// The cropped result, ready to send for analysis.
    #[serde(rename_all = "camelCase")]
    Preview { cropped_uri: String },
    /// Tab bar entry without a screen yet.
    Search,
    /// Tab bar entry without a screen yet.
    Profile,
}

impl Route {
    /// Route to the crop screen for a captured photo.
    pub fn crop(photo: &PhotoData) -> Self {
        Route::Crop {
            photo_uri: photo.uri.clone(),
            dimensions: photo.dimensions(),
            initial_region: None,
        }
    }

    /// Route to the crop screen with a pre-set region.
    pub fn crop_with_region(photo: &PhotoData, region: CropRegion) -> Self {
        Route::Crop {
            photo_uri: photo.uri.clone(),
            dimensions: photo.dimensions(),
            initial_region: Some(region),
        }
    }

    pub fn preview(cropped_uri: impl Into<String>) -> Self {
        Route::Preview {
            cropped_uri: cropped_uri.into(),
        }
    }

    /// Screen name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Camera => "CameraScreen",
            Route::Crop { .. } => "CropScreen",
            Route::Preview { .. } => "PreviewScreen",
            Route::Search => "SearchScreen",
            Route::Profile => "ProfileScreen",
        }
    }

    /// Alert to show instead of navigating, for tabs that are not built yet.
    pub fn unavailable_alert(&self) -> Option<Alert> {
        match self {
            Route::Search => Some(Alert {
                title: "Search",
                message: "Search feature coming soon",
            }),
            Route::Profile => Some(Alert {
                title: "Profile",
                message: "Profile feature coming soon",
            }),
            _ => None,
        }
    }
}
