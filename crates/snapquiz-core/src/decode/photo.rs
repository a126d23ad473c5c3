//! Photo decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode a photo from bytes and rotate it upright according to EXIF.
///
/// The container format is sniffed from the bytes, so JPEG and PNG both work.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a known image
/// format, and `DecodeError::CorruptedFile` if decoding fails part way.
pub fn decode_photo(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let upright = apply_orientation(img, orientation);
    Ok(DecodedImage::from_rgb_image(upright.into_rgb8()))
}

/// Read the EXIF orientation tag, defaulting to `Normal`.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_jpeg;

    /// 3x2 image: top row red, bottom row blue.
    fn two_band_image() -> DynamicImage {
        let mut img = image::RgbImage::new(3, 2);
        for x in 0..3 {
            img.put_pixel(x, 0, image::Rgb([255, 0, 0]));
            img.put_pixel(x, 1, image::Rgb([0, 0, 255]));
        }
        DynamicImage::ImageRgb8(img)
    }

    fn png_bytes(img: &DynamicImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_jpeg_dimensions() {
        let jpeg = encode_jpeg(&vec![200u8; 64 * 48 * 3], 64, 48, 90).unwrap();
        let img = decode_photo(&jpeg).unwrap();

        assert_eq!(img.width, 64);
        assert_eq!(img.height, 48);
        assert_eq!(img.pixels.len(), 64 * 48 * 3);
    }

    #[test]
    fn test_decode_png_is_lossless() {
        let source = two_band_image();
        let img = decode_photo(&png_bytes(&source)).unwrap();

        assert_eq!((img.width, img.height), (3, 2));
        assert_eq!(img.pixels, source.into_rgb8().into_raw());
    }

    #[test]
    fn test_decode_unknown_format() {
        let result = decode_photo(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_photo(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_jpeg() {
        let jpeg = encode_jpeg(&vec![90u8; 32 * 32 * 3], 32, 32, 90).unwrap();
        assert!(decode_photo(&jpeg[..20]).is_err());
    }

    #[test]
    fn test_orientation_without_exif() {
        let jpeg = encode_jpeg(&vec![0u8; 4 * 4 * 3], 4, 4, 90).unwrap();
        assert_eq!(get_orientation(&jpeg), Orientation::Normal);
        assert_eq!(get_orientation(&[1, 2, 3]), Orientation::Normal);
    }

    #[test]
    fn test_rotate90_swaps_and_moves_top_row_right() {
        let rotated = apply_orientation(two_band_image(), Orientation::Rotate90CW).into_rgb8();

        assert_eq!(rotated.dimensions(), (2, 3));
        // Red was on top; after a clockwise quarter turn it is the right column.
        assert_eq!(rotated.get_pixel(1, 0).0, [255, 0, 0]);
        assert_eq!(rotated.get_pixel(0, 0).0, [0, 0, 255]);
    }

    #[test]
    fn test_rotate180_moves_bottom_row_up() {
        let rotated = apply_orientation(two_band_image(), Orientation::Rotate180).into_rgb8();

        assert_eq!(rotated.dimensions(), (3, 2));
        assert_eq!(rotated.get_pixel(0, 0).0, [0, 0, 255]);
        assert_eq!(rotated.get_pixel(2, 1).0, [255, 0, 0]);
    }

    #[test]
    fn test_normal_orientation_is_identity() {
        let source = two_band_image();
        let result = apply_orientation(source.clone(), Orientation::Normal);
        assert_eq!(result.into_rgb8(), source.into_rgb8());
    }
}
