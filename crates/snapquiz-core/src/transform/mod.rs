//! Pixel-level transforms applied to the decoded photo.
//!
//! Coordinates are whole pixels with the origin at the top-left corner.
//! Callers convert a [`CropRegion`](crate::geometry::CropRegion) with
//! [`to_pixel_rect`](crate::geometry::CropRegion::to_pixel_rect) first.

mod crop;

pub use crop::apply_crop;
