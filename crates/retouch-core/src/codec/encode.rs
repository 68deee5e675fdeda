//! Image encoding for save and export.
//!
//! Encoding always happens fully in memory before anything touches the
//! destination, so a failed encode leaves an existing file intact.

use std::path::Path;

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tracing::{debug, warn};

use super::{EncodeError, ImageFormat};
use crate::buffer::PixelBuffer;

/// Encode a buffer to bytes in the given container format.
///
/// `jpeg_quality` is clamped to 1-100 and ignored for lossless formats.
///
/// # Errors
///
/// Returns `EncodeError::EncodingFailed` if the encoder rejects the image.
pub fn encode_bytes(
    buffer: &PixelBuffer,
    format: ImageFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = buffer.dimensions();
    let pixels = buffer.pixels();
    let mut out = Vec::new();

    let result = match format {
        ImageFormat::Jpeg => JpegEncoder::new_with_quality(&mut out, jpeg_quality.clamp(1, 100))
            .write_image(pixels, width, height, ExtendedColorType::Rgb8),
        ImageFormat::Png => {
            PngEncoder::new(&mut out).write_image(pixels, width, height, ExtendedColorType::Rgb8)
        }
        ImageFormat::Bmp => {
            BmpEncoder::new(&mut out).write_image(pixels, width, height, ExtendedColorType::Rgb8)
        }
    };
    result.map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    debug!(?format, width, height, bytes = out.len(), "encoded image");
    Ok(out)
}

/// Encode a buffer and write it to `path`.
///
/// The format is chosen from the extension of `path`.
///
/// # Errors
///
/// Returns `EncodeError::UnsupportedFormat` for an unknown extension (before
/// any I/O), `EncodeError::EncodingFailed` if encoding fails and
/// `EncodeError::Io` if the file cannot be written.
pub fn encode_file(buffer: &PixelBuffer, path: &Path, jpeg_quality: u8) -> Result<(), EncodeError> {
    let format = ImageFormat::from_path(path).ok_or_else(|| {
        EncodeError::UnsupportedFormat(
            path.extension()
                .map(|ext| ext.to_string_lossy().into_owned())
                .unwrap_or_default(),
        )
    })?;

    let bytes = encode_bytes(buffer, format, jpeg_quality)?;
    std::fs::write(path, bytes).map_err(|e| {
        warn!(path = %path.display(), error = %e, "failed to write image file");
        EncodeError::Io(e.to_string())
    })
}
