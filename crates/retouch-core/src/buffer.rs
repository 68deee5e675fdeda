//! Immutable RGB pixel buffers.
//!
//! Every image the editor holds (the current image, the original, each
//! history slot and each live-session base) is a [`PixelBuffer`]. Sample
//! storage is shared behind an `Arc`, so cloning a buffer is O(1) and no
//! holder can observe another holder's mutation: there is no mutation.

use std::sync::Arc;

use thiserror::Error;

/// Number of interleaved channels per pixel (RGB).
pub const CHANNELS: usize = 3;

/// Errors raised when constructing a [`PixelBuffer`] from raw parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data length doesn't match the dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },
}

/// A 2D RGB8 image value. Once constructed it is never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl PixelBuffer {
    /// Create a buffer from dimensions and row-major RGB samples.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidDimensions`] for a zero-sized image and
    /// [`BufferError::InvalidPixelData`] if `pixels.len() != width * height * 3`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::InvalidDimensions { width, height });
        }

        let expected = expected_len(width, height);
        if pixels.len() != expected {
            return Err(BufferError::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels: pixels.into(),
        })
    }

    /// Create a buffer where every pixel has the same color.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidDimensions`] for a zero-sized image.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::InvalidDimensions { width, height });
        }
        let count = width as usize * height as usize;
        let pixels: Vec<u8> = rgb.iter().copied().cycle().take(count * CHANNELS).collect();
        Self::new(width, height, pixels)
    }

    /// Take ownership of an `image::RgbImage`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidDimensions`] if the image is empty.
    pub fn from_rgb_image(img: image::RgbImage) -> Result<Self, BufferError> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Build a buffer from filter output whose dimensions are already known
    /// to be valid (non-zero, matching length).
    pub(crate) fn from_parts_unchecked(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert!(width > 0 && height > 0, "zero-sized filter output");
        debug_assert_eq!(
            pixels.len(),
            expected_len(width, height),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels: pixels.into(),
        }
    }

    /// Copy into an `image::RgbImage` for handing to `image`/`imageproc`.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        let mut img = image::RgbImage::new(self.width, self.height);
        img.copy_from_slice(&self.pixels);
        img
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row-major RGB samples.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The RGB triple at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// True if both buffers share the same sample storage.
    pub fn shares_storage(&self, other: &PixelBuffer) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

fn expected_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS
}
