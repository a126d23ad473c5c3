//! Rectangular cropping of RGB images.

use crate::decode::DecodedImage;
use crate::geometry::PixelRect;

/// Copy the pixels inside `rect` into a new image.
///
/// `rect` is clipped to the image, and the output is at least 1x1 for any
/// non-empty source. A rectangle covering the whole image returns a clone.
pub fn apply_crop(image: &DecodedImage, rect: PixelRect) -> DecodedImage {
    if rect.left == 0 && rect.top == 0 && rect.width >= image.width && rect.height >= image.height {
        return image.clone();
    }

    let left = rect.left.min(image.width.saturating_sub(1));
    let top = rect.top.min(image.height.saturating_sub(1));
    let right = left.saturating_add(rect.width).min(image.width);
    let bottom = top.saturating_add(rect.height).min(image.height);

    let out_width = right.saturating_sub(left).max(1).min(image.width);
    let out_height = bottom.saturating_sub(top).max(1).min(image.height);

    let src_stride = image.width as usize * 3;
    let row_len = out_width as usize * 3;
    let mut pixels = Vec::with_capacity(row_len * out_height as usize);

    // Rows are contiguous in the source, so copy a whole row slice at a time.
    for y in top..top + out_height {
        let start = y as usize * src_stride + left as usize * 3;
        pixels.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    DecodedImage {
        width: out_width,
        height: out_height,
        pixels,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
