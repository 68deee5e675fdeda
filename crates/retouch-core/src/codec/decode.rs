//! Image decoding with EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageReader};
use tracing::{debug, warn};

use super::{DecodeError, Orientation};
use crate::buffer::PixelBuffer;

/// Read and decode an image file.
///
/// The container format is detected from the file content, not the
/// extension. EXIF orientation is applied so the buffer is upright.
///
/// # Errors
///
/// Returns `DecodeError::Io` if the file cannot be read and the other
/// variants as for [`decode_bytes`].
pub fn decode_file(path: &Path) -> Result<PixelBuffer, DecodeError> {
    let bytes = std::fs::read(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "failed to read image file");
        DecodeError::Io(e.to_string())
    })?;
    decode_bytes(&bytes)
}

/// Decode an in-memory JPEG, PNG or BMP image.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedFormat` if the format cannot be
/// determined, `DecodeError::Corrupted` if decoding fails, and
/// `DecodeError::EmptyImage` for a zero-sized image.
pub fn decode_bytes(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::UnsupportedFormat);
    }

    let img = reader.decode().map_err(|e| match e {
        ImageError::Unsupported(_) => DecodeError::UnsupportedFormat,
        other => DecodeError::Corrupted(other.to_string()),
    })?;

    let orientation = extract_orientation(bytes);
    let rgb = apply_orientation(img, orientation).into_rgb8();
    debug!(
        width = rgb.width(),
        height = rgb.height(),
        ?orientation,
        "decoded image"
    );

    PixelBuffer::from_rgb_image(rgb).map_err(|_| DecodeError::EmptyImage)
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
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
