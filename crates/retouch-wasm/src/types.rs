//! WASM-compatible wrapper types for image data.

use retouch_core::PixelBuffer;
use wasm_bindgen::prelude::*;

/// A read-only image snapshot for JavaScript.
///
/// Wraps a core [`PixelBuffer`]. Snapshots share storage with the session,
/// so taking one is cheap; `pixels()` is where the copy into JS happens.
#[wasm_bindgen]
pub struct JsImage {
    inner: PixelBuffer,
}

#[wasm_bindgen]
impl JsImage {
    /// Image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Returns RGB pixel data as a `Uint8Array` copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }

    /// Returns RGBA pixel data with opaque alpha, ready for `ImageData`.
    pub fn rgba_pixels(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.inner.pixel_count() * 4);
        for px in self.inner.pixels().chunks_exact(3) {
            out.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        out
    }
}

impl From<&PixelBuffer> for JsImage {
    fn from(buffer: &PixelBuffer) -> Self {
        Self {
            inner: buffer.clone(),
        }
    }
}
