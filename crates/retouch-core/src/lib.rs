//! Retouch Core - Image edit session engine
//!
//! This crate provides the editing core for Retouch: an RGB pixel buffer,
//! a library of pure filters, bounded undo/redo history, live adjustment
//! sessions for the +/- tools, and the [`EditSession`] that ties them
//! together. It has no UI; any shell (desktop, CLI, WASM) drives it.

pub mod buffer;
pub mod codec;
pub mod config;
pub mod filters;
pub mod history;
pub mod live;
pub mod luminance;
pub mod session;

pub use buffer::{BufferError, PixelBuffer};
pub use codec::{DecodeError, EncodeError, ImageFormat};
pub use config::{LiveSettings, SessionConfig};
pub use filters::{FlipAxis, Rotation};
pub use history::HistoryManager;
pub use live::{LiveSession, LiveStep, LiveTool};
pub use session::{EditSession, Outcome, SessionError, SessionStatus};
