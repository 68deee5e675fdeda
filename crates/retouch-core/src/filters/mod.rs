//! The filter library: pure functions from one [`PixelBuffer`] to a new one.
//!
//! No filter mutates its input. The edit session decides *when* a filter runs
//! and with which parameters; the filters themselves know nothing about
//! history or live adjustments.
//!
//! - [`grayscale`] - BT.601 luma replicated into RGB
//! - [`blur`] - Gaussian blur with an odd square kernel
//! - [`edge_detect`] - Canny edges, white on black
//! - [`adjust_brightness_contrast`] - linear brightness/contrast around mid-gray
//! - [`rotate`] / [`flip`] - lossless quarter turns and mirrors
//! - [`resize_percent`] - area-averaging downscale, bilinear upscale
//!
//! [`PixelBuffer`]: crate::buffer::PixelBuffer

mod blur;
mod color;
mod geometry;
mod resize;

pub use blur::{blur, edge_detect, sigma_for_kernel, DEFAULT_EDGE_HIGH, DEFAULT_EDGE_LOW};
pub use color::{adjust_brightness_contrast, brightness_contrast_sample, grayscale};
pub use geometry::{flip, rotate, FlipAxis, Rotation};
pub use resize::{resize_exact, resize_percent, scaled_dimensions};
