//! Translation of drag and resize gestures into crop-region updates.
//!
//! Gesture recognizers report translations in screen space. These helpers
//! divide by the viewport scale to get image-space deltas, apply them to the
//! current region and pass the result through
//! [`constrain_crop_region`](crate::geometry::constrain_crop_region).
//!
//! Only one gesture is active at a time, so the drag state is either idle or
//! dragging from a recorded origin.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{constrain_crop_region, CropRegion, Viewport};

/// Errors produced while handling gestures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GestureError {
    /// A drag update or end arrived without a matching begin.
    #[error("No drag gesture is in progress")]
    NotDragging,

    /// A second gesture started while a drag was still active.
    #[error("A drag gesture is already in progress")]
    AlreadyDragging,

    /// Corner name from the host did not match any handle.
    #[error("Unknown crop handle: {0}")]
    UnknownCorner(String),
}

/// Resize handle at one of the crop box corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Name used by the UI layer (`"topLeft"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Corner::TopLeft => "topLeft",
            Corner::TopRight => "topRight",
            Corner::BottomLeft => "bottomLeft",
            Corner::BottomRight => "bottomRight",
        }
    }

    /// True if this handle moves the left edge.
    pub fn moves_left_edge(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    /// True if this handle moves the top edge.
    pub fn moves_top_edge(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Corner {
    type Err = GestureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Corner::ALL
            .into_iter()
            .find(|corner| corner.as_str() == s)
            .ok_or_else(|| GestureError::UnknownCorner(s.to_string()))
    }
}

/// Apply a corner-handle drag to `region`.
///
/// `dx`/`dy` are screen-space deltas. Edges attached to the handle follow the
/// pointer and the opposite edges stay put, then the result is constrained to
/// the image with `min_size`.
pub fn apply_resize(
    region: &CropRegion,
    corner: Corner,
    dx: f64,
    dy: f64,
    viewport: &Viewport,
    min_size: f64,
) -> CropRegion {
    let dx = viewport.screen_delta_to_image(dx);
    let dy = viewport.screen_delta_to_image(dy);
    let mut next = *region;

    if corner.moves_left_edge() {
        next.x += dx;
        next.width -= dx;
    } else {
        next.width += dx;
    }

    if corner.moves_top_edge() {
        next.y += dy;
        next.height -= dy;
    } else {
        next.height += dy;
    }

    constrain_crop_region(&next, viewport.image(), min_size)
}

/// Where a drag gesture currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Dragging; `origin_*` is the box's screen-space top-left when the drag began.
    Dragging { origin_x: f64, origin_y: f64 },
}

/// Tracks a single pan of the whole crop box.
///
/// Translations passed to [`update`](DragGesture::update) and
/// [`end`](DragGesture::end) are cumulative since [`begin`](DragGesture::begin).
#[derive(Debug, Clone, Default)]
pub struct DragGesture {
    state: DragState,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Start dragging `region`.
    pub fn begin(&mut self, region: &CropRegion, viewport: &Viewport) -> Result<(), GestureError> {
        if self.is_dragging() {
            return Err(GestureError::AlreadyDragging);
        }
        let origin = viewport.to_screen(region);
        self.state = DragState::Dragging {
            origin_x: origin.x,
            origin_y: origin.y,
        };
        Ok(())
    }

    /// Screen-space rectangle to draw while the drag is in progress.
    ///
    /// The box keeps its on-screen size and is clamped to the display area.
    pub fn update(
        &self,
        translation_x: f64,
        translation_y: f64,
        region: &CropRegion,
        viewport: &Viewport,
    ) -> Result<CropRegion, GestureError> {
        let DragState::Dragging { origin_x, origin_y } = self.state else {
            return Err(GestureError::NotDragging);
        };

        let size = viewport.to_screen(region);
        let display = viewport.display();
        let x = clamp_axis(origin_x + translation_x, display.width - size.width);
        let y = clamp_axis(origin_y + translation_y, display.height - size.height);

        Ok(CropRegion::new(x, y, size.width, size.height))
    }

    /// Finish the drag and return the new image-space region.
    pub fn end(
        &mut self,
        translation_x: f64,
        translation_y: f64,
        region: &CropRegion,
        viewport: &Viewport,
        min_size: f64,
    ) -> Result<CropRegion, GestureError> {
        let preview = self.update(translation_x, translation_y, region, viewport)?;
        self.state = DragState::Idle;

        let moved = CropRegion::new(
            viewport.screen_delta_to_image(preview.x),
            viewport.screen_delta_to_image(preview.y),
            region.width,
            region.height,
        );
        Ok(constrain_crop_region(&moved, viewport.image(), min_size))
    }

    /// Abandon the drag without changing anything.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

fn clamp_axis(value: f64, max: f64) -> f64 {
    let value = if value.is_finite() { value } else { 0.0 };
    value.min(max).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ImageDimensions;

    const MIN: f64 = 50.0;

    /// 1000x800 photo shown at half size.
    fn viewport() -> Viewport {
        Viewport::new(
            ImageDimensions::new(1000.0, 800.0),
            ImageDimensions::new(500.0, 400.0),
        )
        .unwrap()
    }

    #[test]
    fn test_corner_parse() {
        assert_eq!("topLeft".parse::<Corner>().unwrap(), Corner::TopLeft);
        assert_eq!("bottomRight".parse::<Corner>().unwrap(), Corner::BottomRight);
        assert!(matches!(
            "middle".parse::<Corner>(),
            Err(GestureError::UnknownCorner(name)) if name == "middle"
        ));
    }

    #[test]
    fn test_corner_display_matches_serde() {
        for corner in Corner::ALL {
            let json = serde_json::to_string(&corner).unwrap();
            assert_eq!(json, format!("\"{}\"", corner));
        }
    }

    #[test]
    fn test_resize_bottom_right_grows() {
        let region = CropRegion::new(100.0, 100.0, 200.0, 200.0);
        let result = apply_resize(&region, Corner::BottomRight, 10.0, 20.0, &viewport(), MIN);
        assert_eq!(result, CropRegion::new(100.0, 100.0, 220.0, 240.0));
    }

    #[test]
    fn test_resize_top_left_keeps_opposite_edges() {
        let region = CropRegion::new(100.0, 100.0, 200.0, 200.0);
        let result = apply_resize(&region, Corner::TopLeft, 10.0, 10.0, &viewport(), MIN);
        assert_eq!(result, CropRegion::new(120.0, 120.0, 180.0, 180.0));
        assert_eq!(result.right(), region.right());
        assert_eq!(result.bottom(), region.bottom());
    }

    #[test]
    fn test_resize_top_right() {
        let region = CropRegion::new(100.0, 100.0, 200.0, 200.0);
        let result = apply_resize(&region, Corner::TopRight, 5.0, -5.0, &viewport(), MIN);
        assert_eq!(result, CropRegion::new(100.0, 90.0, 210.0, 210.0));
    }

    #[test]
    fn test_resize_bottom_left() {
        let region = CropRegion::new(100.0, 100.0, 200.0, 200.0);
        let result = apply_resize(&region, Corner::BottomLeft, -5.0, 5.0, &viewport(), MIN);
        assert_eq!(result, CropRegion::new(90.0, 100.0, 210.0, 210.0));
    }

    #[test]
    fn test_resize_cannot_shrink_below_min() {
        let region = CropRegion::new(100.0, 100.0, 200.0, 200.0);
        let result = apply_resize(&region, Corner::BottomRight, -200.0, -200.0, &viewport(), MIN);
        assert_eq!(result.width, MIN);
        assert_eq!(result.height, MIN);
    }

    #[test]
    fn test_resize_cannot_leave_image() {
        let region = CropRegion::new(800.0, 600.0, 200.0, 200.0);
        let result = apply_resize(&region, Corner::BottomRight, 100.0, 100.0, &viewport(), MIN);
        assert!(result.is_within(ImageDimensions::new(1000.0, 800.0)));
    }

    #[test]
    fn test_drag_moves_region() {
        let vp = viewport();
        let region = CropRegion::new(100.0, 100.0, 200.0, 200.0);
        let mut drag = DragGesture::new();

        drag.begin(&region, &vp).unwrap();
        assert!(drag.is_dragging());

        let preview = drag.update(25.0, 10.0, &region, &vp).unwrap();
        assert_eq!(preview, CropRegion::new(75.0, 60.0, 100.0, 100.0));

        let result = drag.end(25.0, 10.0, &region, &vp, MIN).unwrap();
        assert_eq!(result, CropRegion::new(150.0, 120.0, 200.0, 200.0));
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_drag_preview_clamped_to_display() {
        let vp = viewport();
        let region = CropRegion::new(100.0, 100.0, 200.0, 200.0);
        let mut drag = DragGesture::new();
        drag.begin(&region, &vp).unwrap();

        let preview = drag.update(-1000.0, 1000.0, &region, &vp).unwrap();
        assert_eq!(preview, CropRegion::new(0.0, 300.0, 100.0, 100.0));

        let result = drag.end(-1000.0, 1000.0, &region, &vp, MIN).unwrap();
        assert_eq!(result, CropRegion::new(0.0, 600.0, 200.0, 200.0));
    }

    #[test]
    fn test_drag_requires_begin() {
        let vp = viewport();
        let region = CropRegion::new(100.0, 100.0, 200.0, 200.0);
        let mut drag = DragGesture::new();

        assert_eq!(
            drag.update(1.0, 1.0, &region, &vp),
            Err(GestureError::NotDragging)
        );
        assert_eq!(
            drag.end(1.0, 1.0, &region, &vp, MIN),
            Err(GestureError::NotDragging)
        );
    }

    #[test]
    fn test_drag_rejects_second_begin() {
        let vp = viewport();
        let region = CropRegion::new(100.0, 100.0, 200.0, 200.0);
        let mut drag = DragGesture::new();

        drag.begin(&region, &vp).unwrap();
        assert_eq!(drag.begin(&region, &vp), Err(GestureError::AlreadyDragging));

        drag.cancel();
        assert!(drag.begin(&region, &vp).is_ok());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
