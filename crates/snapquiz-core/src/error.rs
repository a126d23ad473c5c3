//! User-facing failures.
//!
//! The app never retries on its own: each failure becomes an alert and the
//! user decides what to do next (grant permission, shoot again, re-confirm).

use serde::Serialize;
use thiserror::Error;

use crate::process::ProcessError;

/// Failures that end up in front of the user.
#[derive(Debug, Error)]
pub enum AppError {
    /// Camera access was refused.
    #[error("Camera permission denied")]
    PermissionDenied,

    /// The camera failed to produce a frame.
    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    /// Cropping the confirmed region failed; the operation was aborted.
    #[error("Crop failed: {0}")]
    CropFailed(String),
}

/// Title and body of an alert dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub title: &'static str,
    pub message: &'static str,
}

impl AppError {
    /// Dialog to show for this failure.
    pub fn alert(&self) -> Alert {
        match self {
            AppError::PermissionDenied => Alert {
                title: "Camera Permission",
                message: "We need camera permission to continue",
            },
            AppError::CaptureFailed(_) => Alert {
                title: "Error",
                message: "Failed to take picture",
            },
            AppError::CropFailed(_) => Alert {
                title: "Error",
                message: "Failed to crop image",
            },
        }
    }
}

impl From<ProcessError> for AppError {
    fn from(err: ProcessError) -> Self {
        AppError::CropFailed(err.to_string())
    }
}
