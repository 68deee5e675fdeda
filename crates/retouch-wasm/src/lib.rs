//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate exposes a retouch-core edit session to JavaScript/TypeScript
//! shells. The browser owns the UI and file picking; all image state lives
//! in the session on the WASM side.
//!
//! # Module Structure
//!
//! - `session` - `JsEditSession`, the editing document
//! - `types` - WASM-compatible wrapper types for image data
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditSession } from '@retouch/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = new JsEditSession();
//! session.load_bytes(new Uint8Array(await file.arrayBuffer()));
//! session.apply_rotate(90);
//! const image = session.current_image();
//! console.log(`Now ${image.width}x${image.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod session;
mod types;

pub use session::JsEditSession;
pub use types::JsImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// File extensions accepted by `export_bytes`.
#[wasm_bindgen]
pub fn supported_formats() -> Vec<String> {
    ["jpg", "png", "bmp"].iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_supported_formats_parse() {
        for format in supported_formats() {
            assert!(session::parse_format(&format).is_ok(), "{format}");
        }
    }
}
