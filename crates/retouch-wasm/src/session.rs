//! Edit session bindings.
//!
//! [`JsEditSession`] wraps one core `EditSession`. Edits return `true` when
//! the image changed and `false` when the press was a no-op (edge detection
//! already applied, blur already at rest). Failures throw a JS `Error`;
//! informational ones (nothing loaded, nothing to undo/redo) carry the name
//! `"Notice"` so a shell can show them as a status message.
//!
//! # Example
//!
//! ```typescript
//! import { JsEditSession } from '@retouch/wasm';
//!
//! const session = new JsEditSession({ history_limit: 20 });
//! session.load_bytes(new Uint8Array(await file.arrayBuffer()));
//! session.increase_blur();
//! session.apply_grayscale();
//! const png = session.export_bytes('png');
//! ```

use retouch_core::{EditSession, FlipAxis, ImageFormat, Outcome, Rotation, SessionError};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::types::JsImage;

/// A single editing document.
#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl JsEditSession {
    /// Create a session. `config` is an optional partial `SessionConfig`
    /// object; missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsEditSession, JsValue> {
        if config.is_undefined() || config.is_null() {
            return Ok(Self::default());
        }
        let config = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid session config: {}", e)))?;
        Ok(Self {
            inner: EditSession::with_config(config),
        })
    }

    /// Decode an encoded image and make it the session's document.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner.load_bytes(bytes).map_err(to_js_error)
    }

    /// Encode the current image as `"jpg"`, `"jpeg"`, `"png"` or `"bmp"`.
    pub fn export_bytes(&self, format: &str) -> Result<Vec<u8>, JsValue> {
        let format = parse_format(format).map_err(|e| JsValue::from_str(&e))?;
        self.inner.export_bytes(format).map_err(to_js_error)
    }

    /// MIME type for bytes produced by `export_bytes(format)`, for building
    /// a download `Blob`.
    pub fn export_mime_type(format: &str) -> Result<String, JsValue> {
        let format = parse_format(format).map_err(|e| JsValue::from_str(&e))?;
        Ok(format.mime_type().to_string())
    }

    /// Download file name for `stem` in `format`, with the canonical extension.
    pub fn export_file_name(stem: &str, format: &str) -> Result<String, JsValue> {
        let format = parse_format(format).map_err(|e| JsValue::from_str(&e))?;
        Ok(file_name(stem, format))
    }

    pub fn undo(&mut self) -> Result<(), JsValue> {
        self.inner.undo().map_err(to_js_error)
    }

    pub fn redo(&mut self) -> Result<(), JsValue> {
        self.inner.redo().map_err(to_js_error)
    }

    pub fn apply_grayscale(&mut self) -> Result<bool, JsValue> {
        changed(self.inner.apply_grayscale())
    }

    pub fn apply_edge_detection(&mut self) -> Result<bool, JsValue> {
        changed(self.inner.apply_edge_detection_once())
    }

    /// Rotate clockwise by 90, 180 or 270 degrees.
    pub fn apply_rotate(&mut self, degrees: u32) -> Result<bool, JsValue> {
        let rotation = parse_rotation(degrees).map_err(|e| JsValue::from_str(&e))?;
        changed(self.inner.apply_rotate(rotation))
    }

    /// Mirror along `"horizontal"` or `"vertical"`.
    pub fn apply_flip(&mut self, axis: &str) -> Result<bool, JsValue> {
        let axis = parse_axis(axis).map_err(|e| JsValue::from_str(&e))?;
        changed(self.inner.apply_flip(axis))
    }

    pub fn reset_to_original(&mut self) -> Result<bool, JsValue> {
        changed(self.inner.reset_to_original())
    }

    pub fn increase_blur(&mut self) -> Result<bool, JsValue> {
        changed(self.inner.increase_blur())
    }

    pub fn decrease_blur(&mut self) -> Result<bool, JsValue> {
        changed(self.inner.decrease_blur())
    }

    pub fn increase_brightness(&mut self) -> Result<bool, JsValue> {
        changed(self.inner.increase_brightness())
    }

    pub fn decrease_brightness(&mut self) -> Result<bool, JsValue> {
        changed(self.inner.decrease_brightness())
    }

    pub fn increase_contrast(&mut self) -> Result<bool, JsValue> {
        changed(self.inner.increase_contrast())
    }

    pub fn decrease_contrast(&mut self) -> Result<bool, JsValue> {
        changed(self.inner.decrease_contrast())
    }

    pub fn increase_scale(&mut self) -> Result<bool, JsValue> {
        changed(self.inner.increase_scale())
    }

    pub fn decrease_scale(&mut self) -> Result<bool, JsValue> {
        changed(self.inner.decrease_scale())
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    #[wasm_bindgen(getter)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    /// Snapshot of the image currently shown, if any.
    pub fn current_image(&self) -> Option<JsImage> {
        self.inner.current().map(JsImage::from)
    }

    /// Snapshot of the image as loaded, if any.
    pub fn original_image(&self) -> Option<JsImage> {
        self.inner.original().map(JsImage::from)
    }

    /// Session status as a plain object (see `SessionStatus`).
    pub fn status(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.status())
    }
}

impl Default for JsEditSession {
    fn default() -> Self {
        Self {
            inner: EditSession::new(),
        }
    }
}

fn changed(result: Result<Outcome, SessionError>) -> Result<bool, JsValue> {
    result
        .map(|outcome| outcome == Outcome::Applied)
        .map_err(to_js_error)
}

fn to_js_error(err: SessionError) -> JsValue {
    let error = js_sys::Error::new(&err.to_string());
    if err.is_informational() {
        error.set_name("Notice");
    }
    error.into()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

pub(crate) fn parse_format(format: &str) -> Result<ImageFormat, String> {
    ImageFormat::from_extension(format.trim_start_matches('.'))
        .ok_or_else(|| format!("Unsupported export format: {}", format))
}

fn file_name(stem: &str, format: ImageFormat) -> String {
    let stem = stem.trim();
    let stem = if stem.is_empty() { "image" } else { stem };
    format!("{}.{}", stem, format.extension())
}

pub(crate) fn parse_rotation(degrees: u32) -> Result<Rotation, String> {
    Rotation::from_degrees(degrees)
        .ok_or_else(|| format!("Rotation must be 90, 180 or 270 degrees, got {}", degrees))
}

pub(crate) fn parse_axis(axis: &str) -> Result<FlipAxis, String> {
    match axis.to_ascii_lowercase().as_str() {
        "horizontal" | "h" => Ok(FlipAxis::Horizontal),
        "vertical" | "v" => Ok(FlipAxis::Vertical),
        _ => Err(format!("Unknown flip axis: {}", axis)),
    }
}


/// WASM-specific tests that require JsValue.
///
/// These tests exercise error and config paths that build JS values and can
/// only run on wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Serialize)]
    struct PartialConfig {
        history_limit: usize,
    }

    #[wasm_bindgen_test]
    fn test_new_with_partial_config() {
        let config = serde_wasm_bindgen::to_value(&PartialConfig { history_limit: 3 }).unwrap();
        let session = JsEditSession::new(config).unwrap();
        assert_eq!(session.inner.history().capacity(), 3);
    }

    #[wasm_bindgen_test]
    fn test_new_without_config() {
        let session = JsEditSession::new(JsValue::UNDEFINED).unwrap();
        assert_eq!(session.inner.history().capacity(), 15);
    }

    #[derive(Serialize)]
    struct InvertedLive {
        contrast_min: f64,
        scale_min_percent: u32,
    }

    #[derive(Serialize)]
    struct InvertedConfig {
        live: InvertedLive,
    }

    #[wasm_bindgen_test]
    fn test_inverted_bounds_do_not_abort() {
        let config = serde_wasm_bindgen::to_value(&InvertedConfig {
            live: InvertedLive {
                contrast_min: 5.0,
                scale_min_percent: 500,
            },
        })
        .unwrap();
        let mut session = JsEditSession::new(config).unwrap();
        session.load_bytes(&tests_png()).unwrap();
        assert!(session.increase_brightness().is_ok());
        assert!(session.increase_scale().is_ok());
    }

    fn tests_png() -> Vec<u8> {
        let buf = retouch_core::PixelBuffer::filled(4, 4, [50, 100, 150]).unwrap();
        retouch_core::codec::encode_bytes(&buf, ImageFormat::Png, 95).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_unknown_export_format_rejected() {
        assert!(JsEditSession::export_mime_type("gif").is_err());
    }

    #[wasm_bindgen_test]
    fn test_invalid_config_rejected() {
        let config = JsValue::from_str("not a config");
        assert!(JsEditSession::new(config).is_err());
    }

    #[wasm_bindgen_test]
    fn test_undo_without_image_is_notice() {
        let mut session = JsEditSession::default();
        let err = session.undo().unwrap_err();
        let err: js_sys::Error = err.dyn_into().unwrap();
        assert_eq!(String::from(err.name()), "Notice");
    }

    #[wasm_bindgen_test]
    fn test_bad_bytes_rejected() {
        let mut session = JsEditSession::default();
        assert!(session.load_bytes(b"garbage").is_err());
        assert!(!session.has_image());
    }

    #[wasm_bindgen_test]
    fn test_status_object() {
        let session = JsEditSession::default();
        assert!(session.status().is_ok());
        assert!(session.export_bytes("gif").is_err());
    }
}
