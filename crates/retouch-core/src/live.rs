//! Live adjustment sessions.
//!
//! Blur, brightness/contrast and scale are driven by +/- controls that can be
//! pressed many times. Each press re-renders the tool *from a frozen base
//! snapshot* with parameters derived from the current level, never from the
//! previous step's output, so step order cannot accumulate rounding error.
//! A whole session collapses to a single undo step: history is pushed once,
//! when the session starts.
//!
//! At most one tool can be live. [`LiveSession`] is a tagged union, so
//! starting one tool replaces (and thereby cancels) any other.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::config::LiveSettings;
use crate::filters;

/// The live-adjustable tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiveTool {
    Blur,
    BrightnessContrast,
    Scale,
}

/// The in-progress live adjustment, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LiveSession {
    /// No tool is live.
    #[default]
    Idle,
    /// Gaussian blur, `level >= 1`.
    Blur { level: u32, base: PixelBuffer },
    /// Brightness and contrast share one base; at least one level is non-zero.
    BrightnessContrast {
        brightness: i32,
        contrast: i32,
        base: PixelBuffer,
    },
    /// Resize by a percentage of the base, `level != 0`.
    Scale { level: i32, base: PixelBuffer },
}

/// What the edit session must do after a live step.
#[derive(Debug, Clone, PartialEq)]
pub enum LiveStep {
    /// The session just left rest: record the pre-session image in history,
    /// then show `image`.
    Started(PixelBuffer),
    /// A later step: show `image` without touching history.
    Updated(PixelBuffer),
    /// The level returned to rest: show the base verbatim.
    Ended(PixelBuffer),
    /// The press had no effect (e.g. decreasing blur at rest).
    Unchanged,
}

impl LiveSession {
    pub fn tool(&self) -> Option<LiveTool> {
        match self {
            LiveSession::Idle => None,
            LiveSession::Blur { .. } => Some(LiveTool::Blur),
            LiveSession::BrightnessContrast { .. } => Some(LiveTool::BrightnessContrast),
            LiveSession::Scale { .. } => Some(LiveTool::Scale),
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, LiveSession::Idle)
    }

    /// The snapshot the active session recomputes from.
    pub fn base(&self) -> Option<&PixelBuffer> {
        match self {
            LiveSession::Idle => None,
            LiveSession::Blur { base, .. }
            | LiveSession::BrightnessContrast { base, .. }
            | LiveSession::Scale { base, .. } => Some(base),
        }
    }

    pub fn blur_level(&self) -> u32 {
        match self {
            LiveSession::Blur { level, .. } => *level,
            _ => 0,
        }
    }

    pub fn brightness_level(&self) -> i32 {
        match self {
            LiveSession::BrightnessContrast { brightness, .. } => *brightness,
            _ => 0,
        }
    }

    pub fn contrast_level(&self) -> i32 {
        match self {
            LiveSession::BrightnessContrast { contrast, .. } => *contrast,
            _ => 0,
        }
    }

    pub fn scale_level(&self) -> i32 {
        match self {
            LiveSession::Scale { level, .. } => *level,
            _ => 0,
        }
    }

    /// Drop any active session without producing an image.
    pub fn cancel(&mut self) {
        *self = LiveSession::Idle;
    }

    /// Move the blur level by `delta`, clamped at 0.
    pub fn step_blur(
        &mut self,
        current: &PixelBuffer,
        delta: i32,
        settings: &LiveSettings,
    ) -> LiveStep {
        let (level, base, started) = match self {
            LiveSession::Blur { level, base } => (*level, base.clone(), false),
            _ => (0, current.clone(), true),
        };

        let next = (level as i64 + delta as i64).max(0) as u32;
        if next == level {
            return LiveStep::Unchanged;
        }
        if next == 0 {
            debug!(tool = "blur", "live session ended");
            self.cancel();
            return LiveStep::Ended(base);
        }

        let kernel = settings.blur_kernel(next);
        debug!(tool = "blur", level = next, kernel, "live step");
        let image = filters::blur(&base, kernel);
        *self = LiveSession::Blur { level: next, base };
        finish(started, image)
    }

    /// Move the brightness and/or contrast levels. The session ends only
    /// when both are back at 0.
    pub fn step_brightness_contrast(
        &mut self,
        current: &PixelBuffer,
        brightness_delta: i32,
        contrast_delta: i32,
        settings: &LiveSettings,
    ) -> LiveStep {
        let (brightness, contrast, base, started) = match self {
            LiveSession::BrightnessContrast {
                brightness,
                contrast,
                base,
            } => (*brightness, *contrast, base.clone(), false),
            _ => (0, 0, current.clone(), true),
        };

        let next_b = brightness.saturating_add(brightness_delta);
        let next_c = contrast.saturating_add(contrast_delta);
        if (next_b, next_c) == (brightness, contrast) {
            return LiveStep::Unchanged;
        }
        if next_b == 0 && next_c == 0 {
            debug!(tool = "brightness_contrast", "live session ended");
            self.cancel();
            return LiveStep::Ended(base);
        }

        let offset = settings.brightness_offset(next_b);
        let factor = settings.contrast_factor(next_c);
        debug!(
            tool = "brightness_contrast",
            brightness = next_b,
            contrast = next_c,
            offset,
            factor,
            "live step"
        );
        let image = filters::adjust_brightness_contrast(&base, offset, factor);
        *self = LiveSession::BrightnessContrast {
            brightness: next_b,
            contrast: next_c,
            base,
        };
        finish(started, image)
    }

    /// Move the scale level by `delta` within the configured bounds.
    pub fn step_scale(
        &mut self,
        current: &PixelBuffer,
        delta: i32,
        settings: &LiveSettings,
    ) -> LiveStep {
        let (level, base, started) = match self {
            LiveSession::Scale { level, base } => (*level, base.clone(), false),
            _ => (0, current.clone(), true),
        };

        let (min, max) = settings.scale_level_range();
        let next = level.saturating_add(delta).clamp(min, max);
        if next == level {
            return LiveStep::Unchanged;
        }
        if next == 0 {
            debug!(tool = "scale", "live session ended");
            self.cancel();
            return LiveStep::Ended(base);
        }

        let percent = settings.scale_percent(next);
        debug!(tool = "scale", level = next, percent, "live step");
        let image = filters::resize_percent(&base, percent);
        *self = LiveSession::Scale { level: next, base };
        finish(started, image)
    }
}

fn finish(started: bool, image: PixelBuffer) -> LiveStep {
    if started {
        LiveStep::Started(image)
    } else {
        LiveStep::Updated(image)
    }
}
