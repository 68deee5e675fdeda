//! Codec boundary: decoding files into [`PixelBuffer`]s and encoding them back.
//!
//! This module provides functionality for:
//! - Decoding JPEG, PNG and BMP images from a path or from memory
//! - Applying EXIF orientation so decoded buffers are upright
//! - Encoding buffers to JPEG (configurable quality), PNG or BMP
//!
//! Formats are detected from content on decode and chosen from the
//! destination extension on encode.
//!
//! [`PixelBuffer`]: crate::buffer::PixelBuffer

mod decode;
mod encode;
mod types;

pub use decode::{decode_bytes, decode_file};
pub use encode::{encode_bytes, encode_file};
pub use types::{DecodeError, EncodeError, ImageFormat, Orientation};
