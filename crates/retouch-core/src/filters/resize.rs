//! Percentage resizing.
//!
//! Downscaling uses exact area averaging: every destination pixel is the
//! coverage-weighted mean of the source pixels it spans, which keeps thin
//! detail from aliasing away. Upscaling falls back to bilinear resampling.
//! All functions return new buffers without modifying the input.

use image::imageops::{self, FilterType};

use crate::buffer::{PixelBuffer, CHANNELS};

/// Dimensions after scaling by `percent`.
///
/// Each axis is `round(dim * percent / 100)`, never less than 1 pixel.
pub fn scaled_dimensions(width: u32, height: u32, percent: u32) -> (u32, u32) {
    let scale = |dim: u32| -> u32 {
        let scaled = (dim as f64 * percent as f64 / 100.0).round();
        (scaled as u32).max(1)
    };
    (scale(width), scale(height))
}

/// Resize to `percent` of the current dimensions.
pub fn resize_percent(buffer: &PixelBuffer, percent: u32) -> PixelBuffer {
    let (width, height) = scaled_dimensions(buffer.width(), buffer.height(), percent);
    resize_exact(buffer, width, height)
}

/// Resize to exact dimensions. Zero dimensions are bumped to 1.
pub fn resize_exact(buffer: &PixelBuffer, width: u32, height: u32) -> PixelBuffer {
    let (width, height) = (width.max(1), height.max(1));

    // Fast path: if dimensions match, just clone
    if buffer.dimensions() == (width, height) {
        return buffer.clone();
    }

    if width <= buffer.width() && height <= buffer.height() {
        return area_downscale(buffer, width, height);
    }

    let resized = imageops::resize(&buffer.to_rgb_image(), width, height, FilterType::Triangle);
    PixelBuffer::from_parts_unchecked(width, height, resized.into_raw())
}

/// Source contributions `(index, weight)` for each destination index along
/// one axis. Weights for one destination index sum to 1.
fn area_weights(src_len: u32, dst_len: u32) -> Vec<Vec<(usize, f32)>> {
    let scale = src_len as f64 / dst_len as f64;

    (0..dst_len)
        .map(|i| {
            let start = i as f64 * scale;
            let end = ((i + 1) as f64 * scale).min(src_len as f64);
            let first = start.floor() as u32;
            let last = (end.ceil() as u32).min(src_len);

            (first..last)
                .filter_map(|j| {
                    let overlap = end.min(j as f64 + 1.0) - start.max(j as f64);
                    (overlap > 1e-9).then(|| (j as usize, (overlap / scale) as f32))
                })
                .collect()
        })
        .collect()
}

/// Area-averaging downscale, done as two separable passes.
fn area_downscale(buffer: &PixelBuffer, width: u32, height: u32) -> PixelBuffer {
    let (src_w, src_h) = (buffer.width() as usize, buffer.height() as usize);
    let (dst_w, dst_h) = (width as usize, height as usize);
    let src = buffer.pixels();

    let x_weights = area_weights(buffer.width(), width);
    let y_weights = area_weights(buffer.height(), height);

    // Horizontal pass: src_h rows of dst_w pixels.
    let mut rows = vec![0.0f32; src_h * dst_w * CHANNELS];
    for y in 0..src_h {
        let src_row = &src[y * src_w * CHANNELS..(y + 1) * src_w * CHANNELS];
        for (dx, weights) in x_weights.iter().enumerate() {
            let dst_idx = (y * dst_w + dx) * CHANNELS;
            for &(sx, w) in weights {
                for c in 0..CHANNELS {
                    rows[dst_idx + c] += src_row[sx * CHANNELS + c] as f32 * w;
                }
            }
        }
    }

    // Vertical pass.
    let mut out = vec![0u8; dst_w * dst_h * CHANNELS];
    for (dy, weights) in y_weights.iter().enumerate() {
        for dx in 0..dst_w {
            let mut acc = [0.0f32; CHANNELS];
            for &(sy, w) in weights {
                let idx = (sy * dst_w + dx) * CHANNELS;
                for c in 0..CHANNELS {
                    acc[c] += rows[idx + c] * w;
                }
            }
            let dst_idx = (dy * dst_w + dx) * CHANNELS;
            for c in 0..CHANNELS {
                out[dst_idx + c] = acc[c].clamp(0.0, 255.0).round() as u8;
            }
        }
    }

    PixelBuffer::from_parts_unchecked(width, height, out)
}
