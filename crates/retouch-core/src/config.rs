//! Session configuration.
//!
//! There is no config file: a shell builds a [`SessionConfig`] (or takes the
//! default) and hands it to [`EditSession::with_config`]. Every field has a
//! default, so partial configs deserialize cleanly.
//!
//! [`EditSession::with_config`]: crate::session::EditSession::with_config

use serde::{Deserialize, Serialize};

use crate::filters::{DEFAULT_EDGE_HIGH, DEFAULT_EDGE_LOW};

/// Default number of undo snapshots kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 15;

/// Default JPEG quality used when saving.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Top-level settings for one edit session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum undo depth; the oldest snapshot is evicted beyond this.
    pub history_limit: usize,
    /// JPEG quality (1-100) for `.jpg`/`.jpeg` output.
    pub jpeg_quality: u8,
    /// Canny low hysteresis threshold.
    pub edge_low: f32,
    /// Canny high hysteresis threshold.
    pub edge_high: f32,
    /// Step sizes and bounds for the live adjustment tools.
    pub live: LiveSettings,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            edge_low: DEFAULT_EDGE_LOW,
            edge_high: DEFAULT_EDGE_HIGH,
            live: LiveSettings::default(),
        }
    }
}

impl SessionConfig {
    /// Repair values a deserialized config may carry: history limit of at
    /// least 1, finite ordered edge thresholds, and normalized live settings.
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        let (edge_low, edge_high) = ordered(
            finite_or(self.edge_low, defaults.edge_low),
            finite_or(self.edge_high, defaults.edge_high),
        );
        Self {
            history_limit: self.history_limit.max(1),
            jpeg_quality: self.jpeg_quality.clamp(1, 100),
            edge_low,
            edge_high,
            live: self.live.normalized(),
        }
    }
}

/// How live-adjustment levels map to filter parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveSettings {
    /// Brightness offset added per brightness level.
    pub brightness_step: f64,
    /// Contrast multiplier change per contrast level.
    pub contrast_step: f64,
    /// Lower bound of the effective contrast multiplier.
    pub contrast_min: f64,
    /// Upper bound of the effective contrast multiplier.
    pub contrast_max: f64,
    /// Resize percentage change per scale level.
    pub scale_step_percent: u32,
    /// Smallest reachable scale percentage.
    pub scale_min_percent: u32,
    /// Largest reachable scale percentage.
    pub scale_max_percent: u32,
}

impl Default for LiveSettings {
    fn default() -> Self {
        Self {
            brightness_step: 12.0,
            contrast_step: 0.08,
            contrast_min: 0.2,
            contrast_max: 4.0,
            scale_step_percent: 10,
            scale_min_percent: 10,
            scale_max_percent: 400,
        }
    }
}

impl LiveSettings {
    /// Replace non-finite values with defaults, order each min/max pair and
    /// keep the scale step and floor at 1% or more.
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        let (contrast_min, contrast_max) = ordered(
            finite_or(self.contrast_min, defaults.contrast_min),
            finite_or(self.contrast_max, defaults.contrast_max),
        );
        let (scale_min_percent, scale_max_percent) =
            ordered(self.scale_min_percent.max(1), self.scale_max_percent.max(1));
        Self {
            brightness_step: finite_or(self.brightness_step, defaults.brightness_step),
            contrast_step: finite_or(self.contrast_step, defaults.contrast_step),
            contrast_min,
            contrast_max,
            scale_step_percent: self.scale_step_percent.max(1),
            scale_min_percent,
            scale_max_percent,
        }
    }

    /// Gaussian kernel size for a blur level: `2 * level + 1`.
    pub fn blur_kernel(&self, level: u32) -> u32 {
        2 * level + 1
    }

    /// Brightness offset for a brightness level.
    pub fn brightness_offset(&self, level: i32) -> f64 {
        level as f64 * self.brightness_step
    }

    /// Contrast multiplier for a contrast level, clamped to the configured range.
    pub fn contrast_factor(&self, level: i32) -> f64 {
        (1.0 + level as f64 * self.contrast_step).clamp(self.contrast_min, self.contrast_max)
    }

    /// Resize percentage for a signed scale level.
    pub fn scale_percent(&self, level: i32) -> u32 {
        let raw = 100 + level as i64 * self.scale_step_percent as i64;
        raw.clamp(self.scale_min_percent as i64, self.scale_max_percent as i64) as u32
    }

    /// Inclusive range of scale levels whose percentage stays within bounds.
    ///
    /// Pressing past either end is a no-op rather than a hidden step.
    pub fn scale_level_range(&self) -> (i32, i32) {
        let step = self.scale_step_percent.max(1) as i64;
        let below = (100 - self.scale_min_percent.min(100) as i64) / step;
        let above = (self.scale_max_percent.max(100) as i64 - 100) / step;
        (-(below as i32), above as i32)
    }
}

fn finite_or<T: Into<f64> + Copy>(value: T, fallback: T) -> T {
    if value.into().is_finite() {
        value
    } else {
        fallback
    }
}

fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.history_limit, 15);
        assert_eq!(config.jpeg_quality, 95);
        assert_eq!(config.edge_low, 50.0);
        assert_eq!(config.edge_high, 150.0);
    }

    #[test]
    fn test_blur_kernel_is_odd() {
        let live = LiveSettings::default();
        assert_eq!(live.blur_kernel(0), 1);
        assert_eq!(live.blur_kernel(1), 3);
        assert_eq!(live.blur_kernel(3), 7);
    }

    #[test]
    fn test_brightness_offset() {
        let live = LiveSettings::default();
        assert_eq!(live.brightness_offset(2), 24.0);
        assert_eq!(live.brightness_offset(-3), -36.0);
    }

    #[test]
    fn test_contrast_factor_clamps() {
        let live = LiveSettings::default();
        assert!((live.contrast_factor(0) - 1.0).abs() < 1e-12);
        assert!((live.contrast_factor(5) - 1.4).abs() < 1e-12);
        assert!((live.contrast_factor(-20) - 0.2).abs() < 1e-12);
        assert!((live.contrast_factor(100) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_scale_percent() {
        let live = LiveSettings::default();
        assert_eq!(live.scale_percent(0), 100);
        assert_eq!(live.scale_percent(3), 130);
        assert_eq!(live.scale_percent(-2), 80);
        assert_eq!(live.scale_percent(-50), 10);
        assert_eq!(live.scale_percent(1000), 400);
    }

    #[test]
    fn test_scale_level_range() {
        let live = LiveSettings::default();
        assert_eq!(live.scale_level_range(), (-9, 30));
        assert_eq!(live.scale_percent(-9), 10);
        assert_eq!(live.scale_percent(30), 400);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{ "history_limit": 3, "live": { "brightness_step": 5.0 } }"#)
                .unwrap();
        assert_eq!(config.history_limit, 3);
        assert_eq!(config.jpeg_quality, 95);
        assert_eq!(config.live.brightness_step, 5.0);
        assert_eq!(config.live.scale_step_percent, 10);
    }

    #[test]
    fn test_normalized_orders_bounds() {
        let live = LiveSettings {
            contrast_min: 5.0,
            contrast_max: 0.5,
            scale_min_percent: 500,
            scale_max_percent: 50,
            scale_step_percent: 0,
            ..Default::default()
        }
        .normalized();
        assert_eq!((live.contrast_min, live.contrast_max), (0.5, 5.0));
        assert_eq!((live.scale_min_percent, live.scale_max_percent), (50, 500));
        assert_eq!(live.scale_step_percent, 1);
        assert_eq!(live.scale_level_range(), (-50, 400));
        assert_eq!(live.scale_percent(-50), 50);
    }

    #[test]
    fn test_normalized_replaces_non_finite() {
        let config = SessionConfig {
            history_limit: 0,
            edge_low: f32::NAN,
            edge_high: 10.0,
            live: LiveSettings {
                brightness_step: f64::INFINITY,
                contrast_min: f64::NAN,
                ..Default::default()
            },
            ..Default::default()
        }
        .normalized();
        assert_eq!(config.history_limit, 1);
        assert_eq!((config.edge_low, config.edge_high), (10.0, 50.0));
        assert_eq!(config.live.brightness_step, 12.0);
        assert_eq!(config.live.contrast_min, 0.2);
    }

    #[test]
    fn test_defaults_survive_normalization() {
        assert_eq!(SessionConfig::default().normalized(), SessionConfig::default());
    }

    #[test]
    fn test_inverted_config_steps_without_panicking() {
        use crate::codec::{self, ImageFormat};
        use crate::session::{EditSession, Outcome};
        use crate::PixelBuffer;

        let config: SessionConfig = serde_json::from_str(
            r#"{ "live": { "contrast_min": 5.0, "scale_min_percent": 500, "scale_step_percent": 0 } }"#,
        )
        .unwrap();
        let mut session = EditSession::with_config(config);
        let buf = PixelBuffer::filled(8, 8, [90, 120, 200]).unwrap();
        session
            .load_bytes(&codec::encode_bytes(&buf, ImageFormat::Png, 95).unwrap())
            .unwrap();

        assert_eq!(session.increase_blur(), Ok(Outcome::Applied));
        assert_eq!(session.increase_brightness(), Ok(Outcome::Applied));
        assert_eq!(session.increase_contrast(), Ok(Outcome::Applied));
        assert_eq!(session.increase_scale(), Ok(Outcome::Applied));
        // Bounds are reordered to 400%..=500%, so the first press lands on 400%.
        assert_eq!(session.config().live.scale_min_percent, 400);
        assert_eq!(session.dimensions(), Some((32, 32)));
    }
}
