//! Per-pixel color filters: grayscale and brightness/contrast.

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::luminance::luma_u8;

/// Mid-point the contrast multiplier pivots around.
const CONTRAST_PIVOT: f64 = 128.0;

/// Convert to grayscale, keeping three identical channels.
pub fn grayscale(buffer: &PixelBuffer) -> PixelBuffer {
    let mut out = Vec::with_capacity(buffer.byte_size());
    for px in buffer.pixels().chunks_exact(CHANNELS) {
        let y = luma_u8(px[0], px[1], px[2]);
        out.extend_from_slice(&[y, y, y]);
    }
    PixelBuffer::from_parts_unchecked(buffer.width(), buffer.height(), out)
}

/// Collapse to a single luma channel for filters that work on gray images.
pub(crate) fn to_luma_image(buffer: &PixelBuffer) -> image::GrayImage {
    let luma: Vec<u8> = buffer
        .pixels()
        .chunks_exact(CHANNELS)
        .map(|px| luma_u8(px[0], px[1], px[2]))
        .collect();
    let mut img = image::GrayImage::new(buffer.width(), buffer.height());
    img.copy_from_slice(&luma);
    img
}

/// Expand a single-channel image back to an RGB buffer.
pub(crate) fn from_luma_image(img: &image::GrayImage) -> PixelBuffer {
    let mut out = Vec::with_capacity(img.as_raw().len() * CHANNELS);
    for &v in img.as_raw() {
        out.extend_from_slice(&[v, v, v]);
    }
    PixelBuffer::from_parts_unchecked(img.width(), img.height(), out)
}

/// Apply brightness and contrast to every sample.
///
/// Formula: `out = clamp((p - 128) * contrast + 128 + brightness, 0, 255)`,
/// rounded to the nearest integer. Each channel is adjusted independently.
pub fn adjust_brightness_contrast(
    buffer: &PixelBuffer,
    brightness: f64,
    contrast: f64,
) -> PixelBuffer {
    let lut = brightness_contrast_lut(brightness, contrast);
    let out: Vec<u8> = buffer.pixels().iter().map(|&p| lut[p as usize]).collect();
    PixelBuffer::from_parts_unchecked(buffer.width(), buffer.height(), out)
}

/// Map a single sample through the brightness/contrast formula.
#[inline]
pub fn brightness_contrast_sample(p: u8, brightness: f64, contrast: f64) -> u8 {
    let v = (p as f64 - CONTRAST_PIVOT) * contrast + CONTRAST_PIVOT + brightness;
    v.clamp(0.0, 255.0).round() as u8
}

/// Samples only take 256 values, so the formula is evaluated once per value.
fn brightness_contrast_lut(brightness: f64, contrast: f64) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (i, slot) in lut.iter_mut().enumerate() {
        *slot = brightness_contrast_sample(i as u8, brightness, contrast);
    }
    lut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grayscale_replicates_luma() {
        let buf = PixelBuffer::new(2, 1, vec![255, 0, 0, 10, 10, 10]).unwrap();
        let gray = grayscale(&buf);

        assert_eq!(gray.pixel(0, 0), [76, 76, 76]);
        assert_eq!(gray.pixel(1, 0), [10, 10, 10]);
        assert_eq!(gray.dimensions(), (2, 1));
    }

    #[test]
    fn test_grayscale_does_not_mutate_input() {
        let buf = PixelBuffer::new(1, 1, vec![0, 255, 0]).unwrap();
        let _ = grayscale(&buf);
        assert_eq!(buf.pixel(0, 0), [0, 255, 0]);
    }

    #[test]
    fn test_brightness_on_mid_gray() {
        let buf = PixelBuffer::filled(1, 1, [128, 128, 128]).unwrap();
        let out = adjust_brightness_contrast(&buf, 24.0, 1.0);
        assert_eq!(out.pixel(0, 0), [152, 152, 152]);
    }

    #[test]
    fn test_contrast_rounds_to_nearest() {
        // (200 - 128) * 1.4 + 128 = 228.8
        assert_eq!(brightness_contrast_sample(200, 0.0, 1.4), 229);
        // (56 - 128) * 1.4 + 128 = 27.2
        assert_eq!(brightness_contrast_sample(56, 0.0, 1.4), 27);
    }

    #[test]
    fn test_brightness_contrast_clamps() {
        assert_eq!(brightness_contrast_sample(250, 100.0, 1.0), 255);
        assert_eq!(brightness_contrast_sample(5, -100.0, 1.0), 0);
        assert_eq!(brightness_contrast_sample(0, 0.0, 4.0), 0);
        assert_eq!(brightness_contrast_sample(255, 0.0, 4.0), 255);
    }

    #[test]
    fn test_neutral_parameters_are_identity() {
        let pixels: Vec<u8> = (0..=255u8).flat_map(|v| [v, v, v]).collect();
        let buf = PixelBuffer::new(256, 1, pixels).unwrap();
        let out = adjust_brightness_contrast(&buf, 0.0, 1.0);
        assert_eq!(out, buf);
    }

    #[test]
    fn test_luma_image_roundtrip() {
        let buf = PixelBuffer::new(2, 1, vec![30, 30, 30, 200, 200, 200]).unwrap();
        let luma = to_luma_image(&buf);
        assert_eq!(luma.as_raw(), &vec![30, 200]);
        assert_eq!(from_luma_image(&luma), buf);
    }
}
