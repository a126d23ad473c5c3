//! Photo decoding for crop extraction.
//!
//! Camera frames arrive as encoded bytes (usually JPEG, sometimes PNG from
//! the gallery). Phones store the sensor orientation in EXIF rather than
//! rotating the pixels, and the crop region is expressed in the orientation
//! the user saw, so decoding always applies the EXIF rotation first.
//!
//! # Examples
//!
//! ```ignore
//! use snapquiz_core::decode::decode_photo;
//!
//! let bytes = std::fs::read("question.jpg").unwrap();
//! let image = decode_photo(&bytes).unwrap();
//! println!("Decoded {}x{} photo", image.width, image.height);
//! ```

mod photo;
mod types;

pub use photo::{decode_photo, get_orientation};
pub use types::{DecodeError, DecodedImage, Orientation};
