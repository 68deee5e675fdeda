//! Neighbourhood filters: Gaussian blur and Canny edge detection.

use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;

use super::color::{from_luma_image, to_luma_image};
use crate::buffer::PixelBuffer;

/// Default Canny hysteresis thresholds.
pub const DEFAULT_EDGE_LOW: f32 = 50.0;
pub const DEFAULT_EDGE_HIGH: f32 = 150.0;

/// Standard deviation for a Gaussian kernel of odd size `k`.
///
/// Matches the usual "sigma from aperture" convention:
/// `0.3 * ((k - 1) * 0.5 - 1) + 0.8`.
pub fn sigma_for_kernel(kernel_size: u32) -> f32 {
    0.3 * ((kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Gaussian blur with a square kernel of `kernel_size` pixels.
///
/// Even sizes are bumped to the next odd size. A size of 0 or 1 is the
/// identity and returns the input unchanged.
pub fn blur(buffer: &PixelBuffer, kernel_size: u32) -> PixelBuffer {
    let k = if kernel_size % 2 == 0 {
        kernel_size + 1
    } else {
        kernel_size
    };
    if k <= 1 {
        return buffer.clone();
    }

    let blurred = gaussian_blur_f32(&buffer.to_rgb_image(), sigma_for_kernel(k));
    PixelBuffer::from_parts_unchecked(buffer.width(), buffer.height(), blurred.into_raw())
}

/// Canny edge detection on the luma channel.
///
/// Edges are white on black, replicated into all three channels.
pub fn edge_detect(buffer: &PixelBuffer, low: f32, high: f32) -> PixelBuffer {
    let edges = canny(&to_luma_image(buffer), low, high);
    from_luma_image(&edges)
}
