//! Crop screen state.
//!
//! A [`CropSession`] is created when a photo arrives from the camera and owns
//! everything the crop screen mutates: the current image-space region, the
//! auto/manual mode, the active drag and the "processing" flag set while the
//! crop is extracted.
//!
//! Every mutation goes through
//! [`constrain_crop_region`](crate::geometry::constrain_crop_region), so
//! [`CropSession::region`] always satisfies the bounds and minimum-size
//! invariants.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::CropConfig;
use crate::detect::QuestionDetector;
use crate::geometry::{constrain_crop_region, CropRegion, GeometryError, ImageDimensions, Viewport};
use crate::gesture::{apply_resize, Corner, DragGesture, GestureError};
use crate::PhotoData;

/// Whether the crop box follows the detector or only the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropMode {
    #[default]
    Auto,
    Manual,
}

impl CropMode {
    pub fn toggled(self) -> Self {
        match self {
            CropMode::Auto => CropMode::Manual,
            CropMode::Manual => CropMode::Auto,
        }
    }
}

/// Errors raised by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Crop is already being processed")]
    AlreadyProcessing,

    #[error("Gesture error: {0}")]
    Gesture(#[from] GestureError),

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),
}

/// Interactive crop state for one captured photo.
#[derive(Debug, Clone)]
pub struct CropSession {
    photo: PhotoData,
    viewport: Viewport,
    config: CropConfig,
    region: CropRegion,
    mode: CropMode,
    drag: DragGesture,
    processing: bool,
}

impl CropSession {
    /// Start a session with the default centred guess.
    ///
    /// `available` is the screen area the photo may be drawn into.
    pub fn new(
        photo: PhotoData,
        available: ImageDimensions,
        config: CropConfig,
    ) -> Result<Self, SessionError> {
        Self::with_initial_region(photo, available, config, None)
    }

    /// Start a session, seeding the crop box with `initial` when given.
    pub fn with_initial_region(
        photo: PhotoData,
        available: ImageDimensions,
        config: CropConfig,
        initial: Option<CropRegion>,
    ) -> Result<Self, SessionError> {
        let config = config.sanitized();
        let image = photo.dimensions();
        let viewport = Viewport::fit(image, available, config.max_display_height_fraction)?;

        let seed = initial.unwrap_or_else(|| CropRegion::default_for(image));
        let region = constrain_crop_region(&seed, image, config.min_crop_size);

        debug!(
            "crop session for {} ({}x{}), display {:.0}x{:.0}, scale {:.4}",
            photo.uri,
            image.width,
            image.height,
            viewport.display().width,
            viewport.display().height,
            viewport.scale()
        );

        Ok(Self {
            photo,
            viewport,
            mode: config.default_mode,
            config,
            region,
            drag: DragGesture::new(),
            processing: false,
        })
    }

    pub fn photo(&self) -> &PhotoData {
        &self.photo
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    /// Current region in image space.
    pub fn region(&self) -> CropRegion {
        self.region
    }

    /// Current region in screen space, for drawing the box.
    pub fn display_region(&self) -> CropRegion {
        self.viewport.to_screen(&self.region)
    }

    pub fn mode(&self) -> CropMode {
        self.mode
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Replace the region, constraining it first.
    pub fn set_region(&mut self, region: CropRegion) -> Result<CropRegion, SessionError> {
        self.ensure_idle()?;
        Ok(self.adopt(region))
    }

    /// Run the detector once when the screen opens in auto mode.
    pub fn run_initial_detection(
        &mut self,
        detector: &dyn QuestionDetector,
    ) -> Result<Option<CropRegion>, SessionError> {
        match self.mode {
            CropMode::Auto => self.run_detection(detector),
            CropMode::Manual => Ok(None),
        }
    }

    /// Ask `detector` for bounds and adopt them if it finds any.
    pub fn run_detection(
        &mut self,
        detector: &dyn QuestionDetector,
    ) -> Result<Option<CropRegion>, SessionError> {
        self.ensure_idle()?;
        Ok(detector
            .detect(self.viewport.image())
            .map(|detected| self.adopt(detected)))
    }

    /// Flip between auto and manual. Switching to auto re-runs detection.
    pub fn toggle_mode(&mut self, detector: &dyn QuestionDetector) -> Result<CropMode, SessionError> {
        self.ensure_idle()?;
        self.mode = self.mode.toggled();
        info!("crop mode toggled: {:?}", self.mode);

        if self.mode == CropMode::Auto {
            self.run_detection(detector)?;
        }
        Ok(self.mode)
    }

    pub fn begin_drag(&mut self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.drag.begin(&self.region, &self.viewport)?;
        Ok(())
    }

    /// Screen-space box to draw for a cumulative drag translation.
    pub fn update_drag(&self, translation_x: f64, translation_y: f64) -> Result<CropRegion, SessionError> {
        Ok(self
            .drag
            .update(translation_x, translation_y, &self.region, &self.viewport)?)
    }

    /// Commit the drag and return the new image-space region.
    pub fn end_drag(&mut self, translation_x: f64, translation_y: f64) -> Result<CropRegion, SessionError> {
        self.region = self.drag.end(
            translation_x,
            translation_y,
            &self.region,
            &self.viewport,
            self.config.min_crop_size,
        )?;
        debug!("crop box dragged to ({:.1}, {:.1})", self.region.x, self.region.y);
        Ok(self.region)
    }

    /// Drop an in-flight drag, keeping the last committed region.
    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// Move one corner handle by a screen-space delta.
    pub fn resize(&mut self, corner: Corner, dx: f64, dy: f64) -> Result<CropRegion, SessionError> {
        self.ensure_idle()?;
        if self.drag.is_dragging() {
            return Err(GestureError::AlreadyDragging.into());
        }

        self.region = apply_resize(
            &self.region,
            corner,
            dx,
            dy,
            &self.viewport,
            self.config.min_crop_size,
        );
        debug!("crop box resized from {}: {:?}", corner, self.region);
        Ok(self.region)
    }

    /// Lock the region for extraction and return it.
    ///
    /// Gestures and further confirms are rejected until
    /// [`finish_processing`](Self::finish_processing) is called.
    pub fn confirm(&mut self) -> Result<CropRegion, SessionError> {
        self.ensure_idle()?;
        self.drag.cancel();
        self.processing = true;
        info!("confirm crop: {:?}", self.region);
        Ok(self.region)
    }

    /// Clear the processing flag after extraction succeeded or failed.
    pub fn finish_processing(&mut self) {
        self.processing = false;
    }

    fn adopt(&mut self, region: CropRegion) -> CropRegion {
        self.region = constrain_crop_region(&region, self.viewport.image(), self.config.min_crop_size);
        self.region
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.processing {
            Err(SessionError::AlreadyProcessing)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::PaddingDetector;

    /// 1000x800 photo on a 500x1000 screen: displayed at 500x400, scale 0.5.
    fn session() -> CropSession {
        CropSession::new(
            PhotoData::new("file:///photo.jpg", 1000, 800),
            ImageDimensions::new(500.0, 1000.0),
            CropConfig::default(),
        )
        .unwrap()
    }

    fn detector() -> PaddingDetector {
        PaddingDetector::default().immediate()
    }

    struct NothingFound;

    impl QuestionDetector for NothingFound {
        fn detect(&self, _dimensions: ImageDimensions) -> Option<CropRegion> {
            None
        }
    }

    #[test]
    fn test_new_session_uses_default_region() {
        let s = session();
        assert!(s
            .region()
            .approx_eq(&CropRegion::new(100.0, 200.0, 800.0, 280.0), 1e-9));
        assert_eq!(s.mode(), CropMode::Auto);
        assert!(!s.is_processing());
        assert!((s.viewport().scale() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_initial_region_is_constrained() {
        let s = CropSession::with_initial_region(
            PhotoData::new("file:///photo.jpg", 1000, 800),
            ImageDimensions::new(500.0, 1000.0),
            CropConfig::default(),
            Some(CropRegion::new(-10.0, 10.0, 40.0, 40.0)),
        )
        .unwrap();
        assert_eq!(s.region(), CropRegion::new(0.0, 10.0, 50.0, 50.0));
    }

    #[test]
    fn test_invalid_photo_dimensions() {
        let result = CropSession::new(
            PhotoData::new("file:///broken.jpg", 0, 800),
            ImageDimensions::new(500.0, 1000.0),
            CropConfig::default(),
        );
        assert!(matches!(result, Err(SessionError::Geometry(_))));
    }

    #[test]
    fn test_display_region_is_scaled() {
        let s = session();
        let screen = s.display_region();
        assert!(screen.approx_eq(&CropRegion::new(50.0, 100.0, 400.0, 140.0), 1e-9));
    }

    #[test]
    fn test_initial_detection_in_auto_mode() {
        let mut s = session();
        let region = s.run_initial_detection(&detector()).unwrap().unwrap();
        assert!(region.approx_eq(&CropRegion::new(150.0, 120.0, 700.0, 560.0), 1e-9));
        assert_eq!(s.region(), region);
    }

    #[test]
    fn test_initial_detection_skipped_in_manual_mode() {
        let mut config = CropConfig::default();
        config.default_mode = CropMode::Manual;
        let mut s = CropSession::new(
            PhotoData::new("file:///photo.jpg", 1000, 800),
            ImageDimensions::new(500.0, 1000.0),
            config,
        )
        .unwrap();

        let before = s.region();
        assert!(s.run_initial_detection(&detector()).unwrap().is_none());
        assert_eq!(s.region(), before);
    }

    #[test]
    fn test_toggle_mode_runs_detection_when_entering_auto() {
        let mut s = session();
        assert_eq!(s.toggle_mode(&detector()).unwrap(), CropMode::Manual);
        let manual_region = s.region();

        assert_eq!(s.toggle_mode(&detector()).unwrap(), CropMode::Auto);
        assert_ne!(s.region(), manual_region);
        assert!(s
            .region()
            .approx_eq(&CropRegion::new(150.0, 120.0, 700.0, 560.0), 1e-9));
    }

    #[test]
    fn test_detection_without_result_keeps_region() {
        let mut s = session();
        let before = s.region();
        assert!(s.run_detection(&NothingFound).unwrap().is_none());
        assert_eq!(s.region(), before);
    }

    #[test]
    fn test_drag_round_trip() {
        let mut s = session();
        s.begin_drag().unwrap();
        assert!(s.is_dragging());

        let preview = s.update_drag(10.0, 20.0).unwrap();
        assert!(preview.approx_eq(&CropRegion::new(60.0, 120.0, 400.0, 140.0), 1e-9));

        let region = s.end_drag(10.0, 20.0).unwrap();
        assert!(region.approx_eq(&CropRegion::new(120.0, 240.0, 800.0, 280.0), 1e-9));
        assert!(!s.is_dragging());
    }

    #[test]
    fn test_end_drag_without_begin() {
        let mut s = session();
        assert!(matches!(
            s.end_drag(1.0, 1.0),
            Err(SessionError::Gesture(GestureError::NotDragging))
        ));
    }

    #[test]
    fn test_resize_during_drag_rejected() {
        let mut s = session();
        s.begin_drag().unwrap();
        assert!(matches!(
            s.resize(Corner::TopLeft, 1.0, 1.0),
            Err(SessionError::Gesture(GestureError::AlreadyDragging))
        ));

        s.cancel_drag();
        assert!(s.resize(Corner::TopLeft, 1.0, 1.0).is_ok());
    }

    #[test]
    fn test_resize_updates_region() {
        let mut s = session();
        let region = s.resize(Corner::BottomRight, 10.0, 10.0).unwrap();
        assert!(region.approx_eq(&CropRegion::new(100.0, 200.0, 820.0, 300.0), 1e-9));
    }

    #[test]
    fn test_set_region_constrains() {
        let mut s = session();
        let region = s.set_region(CropRegion::new(990.0, 790.0, 10.0, 10.0)).unwrap();
        assert_eq!(region, CropRegion::new(950.0, 750.0, 50.0, 50.0));
    }

    #[test]
    fn test_double_confirm_rejected() {
        let mut s = session();
        let region = s.confirm().unwrap();
        assert_eq!(region, s.region());
        assert!(s.is_processing());

        assert!(matches!(s.confirm(), Err(SessionError::AlreadyProcessing)));
        assert!(matches!(s.begin_drag(), Err(SessionError::AlreadyProcessing)));
        assert!(matches!(
            s.resize(Corner::TopLeft, 1.0, 1.0),
            Err(SessionError::AlreadyProcessing)
        ));
        assert!(matches!(
            s.set_region(CropRegion::new(0.0, 0.0, 60.0, 60.0)),
            Err(SessionError::AlreadyProcessing)
        ));
        assert!(matches!(
            s.toggle_mode(&detector()),
            Err(SessionError::AlreadyProcessing)
        ));
        assert!(matches!(
            s.run_detection(&detector()),
            Err(SessionError::AlreadyProcessing)
        ));
        assert_eq!(s.region(), region);
        assert_eq!(s.mode(), CropMode::Auto);

        s.finish_processing();
        assert!(s.confirm().is_ok());
    }

    #[test]
    fn test_confirm_cancels_active_drag() {
        let mut s = session();
        s.begin_drag().unwrap();
        s.confirm().unwrap();
        assert!(!s.is_dragging());
    }

    #[test]
    fn test_config_is_sanitized() {
        let mut config = CropConfig::default();
        config.min_crop_size = f64::NAN;
        let s = CropSession::new(
            PhotoData::new("file:///photo.jpg", 1000, 800),
            ImageDimensions::new(500.0, 1000.0),
            config,
        )
        .unwrap();
        assert_eq!(s.config().min_crop_size, 50.0);
    }
}
