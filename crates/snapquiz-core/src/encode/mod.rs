//! Encoding of the cropped question image.
//!
//! The crop screen hands a JPEG to the analysis step, compressed at quality
//! 90 unless configured otherwise.

mod jpeg;

pub use jpeg::{encode_image, encode_jpeg, EncodeError};
