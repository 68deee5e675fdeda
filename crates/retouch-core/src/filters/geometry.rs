//! Lossless geometric transforms: quarter-turn rotations and mirror flips.

use image::imageops;
use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;

/// Clockwise quarter-turn rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    /// Parse a clockwise angle in degrees. Only 90, 180 and 270 are accepted.
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees {
            90 => Some(Rotation::Cw90),
            180 => Some(Rotation::Cw180),
            270 => Some(Rotation::Cw270),
            _ => None,
        }
    }

    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Cw90 => 90,
            Rotation::Cw180 => 180,
            Rotation::Cw270 => 270,
        }
    }

    /// Returns true if this rotation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Rotation::Cw90 | Rotation::Cw270)
    }
}

/// Mirror axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipAxis {
    /// Mirror left/right.
    Horizontal,
    /// Mirror top/bottom.
    Vertical,
}

/// Rotate clockwise by a quarter-turn multiple.
pub fn rotate(buffer: &PixelBuffer, rotation: Rotation) -> PixelBuffer {
    let img = buffer.to_rgb_image();
    let out = match rotation {
        Rotation::Cw90 => imageops::rotate90(&img),
        Rotation::Cw180 => imageops::rotate180(&img),
        Rotation::Cw270 => imageops::rotate270(&img),
    };
    let (w, h) = out.dimensions();
    PixelBuffer::from_parts_unchecked(w, h, out.into_raw())
}

/// Mirror along `axis`.
pub fn flip(buffer: &PixelBuffer, axis: FlipAxis) -> PixelBuffer {
    let img = buffer.to_rgb_image();
    let out = match axis {
        FlipAxis::Horizontal => imageops::flip_horizontal(&img),
        FlipAxis::Vertical => imageops::flip_vertical(&img),
    };
    PixelBuffer::from_parts_unchecked(buffer.width(), buffer.height(), out.into_raw())
}
