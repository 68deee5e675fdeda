//! The edit session: one document's image state, history and live tools.
//!
//! [`EditSession`] is the only mutable owner of the image state. Every
//! operation either fully commits (history and current image together) or
//! has no observable effect.
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::session::EditSession;
//!
//! let mut session = EditSession::new();
//! session.load("photo.jpg")?;
//! session.increase_blur()?;
//! session.increase_blur()?;
//! session.apply_grayscale()?;
//! session.undo()?; // back to the blurred image
//! session.undo()?; // back to the original: the blur session was one step
//! session.save_as("photo-edited.png")?;
//! ```

mod error;
mod status;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::buffer::PixelBuffer;
use crate::codec::{self, ImageFormat};
use crate::config::{LiveSettings, SessionConfig};
use crate::filters::{self, FlipAxis, Rotation};
use crate::history::HistoryManager;
use crate::live::{LiveSession, LiveStep};

pub use error::SessionError;
pub use status::SessionStatus;

/// Result of an operation that can legitimately do nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The current image changed.
    Applied,
    /// Nothing changed (edge detection already applied, blur already at
    /// rest, scale at its bound).
    Unchanged,
}

/// One editing document.
#[derive(Debug, Clone)]
pub struct EditSession {
    config: SessionConfig,
    original: Option<PixelBuffer>,
    current: Option<PixelBuffer>,
    filepath: Option<PathBuf>,
    history: HistoryManager,
    live: LiveSession,
    edge_applied: bool,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Create a session with `config`, normalized first so that inverted
    /// bounds or non-finite steps cannot reach the filters.
    pub fn with_config(config: SessionConfig) -> Self {
        let config = config.normalized();
        Self {
            history: HistoryManager::new(config.history_limit),
            config,
            original: None,
            current: None,
            filepath: None,
            live: LiveSession::Idle,
            edge_applied: false,
        }
    }

    // -- Queries ----------------------------------------------------------

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn has_image(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&PixelBuffer> {
        self.current.as_ref()
    }

    /// The buffer captured at load time.
    pub fn original(&self) -> Option<&PixelBuffer> {
        self.original.as_ref()
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.current.as_ref().map(PixelBuffer::dimensions)
    }

    pub fn filepath(&self) -> Option<&Path> {
        self.filepath.as_deref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn live(&self) -> &LiveSession {
        &self.live
    }

    /// True if edge detection was the most recent one-shot edit.
    pub fn edge_applied(&self) -> bool {
        self.edge_applied
    }

    pub fn status(&self) -> SessionStatus {
        let (width, height) = self.dimensions().unzip();
        SessionStatus {
            has_image: self.has_image(),
            width,
            height,
            filepath: self.filepath.as_ref().map(|p| p.display().to_string()),
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            undo_depth: self.history.undo_len(),
            redo_depth: self.history.redo_len(),
            active_tool: self.live.tool(),
            blur_level: self.live.blur_level(),
            brightness_level: self.live.brightness_level(),
            contrast_level: self.live.contrast_level(),
            scale_level: self.live.scale_level(),
            edge_applied: self.edge_applied,
        }
    }

    // -- File operations --------------------------------------------------

    /// Load an image file, replacing the whole document.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Decode` if the file cannot be read or decoded;
    /// the session is left untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        let buffer = codec::decode_file(path)?;
        self.install(buffer, Some(path.to_path_buf()));
        Ok(())
    }

    /// Load an encoded image from memory. The session has no file path
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Decode` if the bytes cannot be decoded.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        let buffer = codec::decode_bytes(bytes)?;
        self.install(buffer, None);
        Ok(())
    }

    fn install(&mut self, buffer: PixelBuffer, filepath: Option<PathBuf>) {
        info!(
            width = buffer.width(),
            height = buffer.height(),
            path = ?filepath,
            "image loaded"
        );
        self.original = Some(buffer.clone());
        self.current = Some(buffer);
        self.filepath = filepath;
        self.history.clear();
        self.cancel_tools();
    }

    /// Write the current image back to the path it was loaded from or last
    /// saved to.
    ///
    /// # Errors
    ///
    /// `NoImageLoaded` without an image, `PathRequired` if no path is known
    /// yet, `Encode` if writing fails.
    pub fn save_in_place(&mut self) -> Result<(), SessionError> {
        let current = self.current.as_ref().ok_or(SessionError::NoImageLoaded)?;
        let path = self.filepath.as_deref().ok_or(SessionError::PathRequired)?;
        codec::encode_file(current, path, self.config.jpeg_quality)?;
        info!(path = %path.display(), "image saved");
        Ok(())
    }

    /// Write the current image to `path` and adopt it as the session's path.
    ///
    /// # Errors
    ///
    /// `NoImageLoaded` without an image, `Encode` if the extension is not
    /// supported or writing fails (the previous path is kept).
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        let current = self.current.as_ref().ok_or(SessionError::NoImageLoaded)?;
        codec::encode_file(current, path, self.config.jpeg_quality)?;
        info!(path = %path.display(), "image saved as");
        self.filepath = Some(path.to_path_buf());
        Ok(())
    }

    /// Encode the current image without writing it anywhere.
    ///
    /// # Errors
    ///
    /// `NoImageLoaded` without an image, `Encode` if encoding fails.
    pub fn export_bytes(&self, format: ImageFormat) -> Result<Vec<u8>, SessionError> {
        let current = self.current.as_ref().ok_or(SessionError::NoImageLoaded)?;
        Ok(codec::encode_bytes(current, format, self.config.jpeg_quality)?)
    }

    // -- History ----------------------------------------------------------

    /// Step back one edit. Ends any live adjustment.
    ///
    /// # Errors
    ///
    /// `NoImageLoaded` or `NothingToUndo`, both informational.
    pub fn undo(&mut self) -> Result<(), SessionError> {
        let current = self.current.as_ref().ok_or(SessionError::NoImageLoaded)?;
        let previous = self
            .history
            .undo(current)
            .ok_or(SessionError::NothingToUndo)?;
        self.current = Some(previous);
        self.cancel_tools();
        Ok(())
    }

    /// Re-apply the most recently undone edit. Ends any live adjustment.
    ///
    /// # Errors
    ///
    /// `NoImageLoaded` or `NothingToRedo`, both informational.
    pub fn redo(&mut self) -> Result<(), SessionError> {
        let current = self.current.as_ref().ok_or(SessionError::NoImageLoaded)?;
        let next = self
            .history
            .redo(current)
            .ok_or(SessionError::NothingToRedo)?;
        self.current = Some(next);
        self.cancel_tools();
        Ok(())
    }

    // -- One-shot edits ---------------------------------------------------

    pub fn apply_grayscale(&mut self) -> Result<Outcome, SessionError> {
        self.commit_one_shot("grayscale", |buffer, _| filters::grayscale(buffer))
    }

    /// Canny edge detection, applied at most once in a row.
    ///
    /// A second call with no other edit in between is a no-op and pushes no
    /// history.
    pub fn apply_edge_detection_once(&mut self) -> Result<Outcome, SessionError> {
        if self.current.is_none() {
            return Err(SessionError::NoImageLoaded);
        }
        if self.edge_applied {
            debug!("edge detection already applied");
            return Ok(Outcome::Unchanged);
        }
        self.commit_one_shot("edge_detect", |buffer, config| {
            filters::edge_detect(buffer, config.edge_low, config.edge_high)
        })?;
        self.edge_applied = true;
        Ok(Outcome::Applied)
    }

    pub fn apply_rotate(&mut self, rotation: Rotation) -> Result<Outcome, SessionError> {
        self.commit_one_shot("rotate", |buffer, _| filters::rotate(buffer, rotation))
    }

    pub fn apply_flip(&mut self, axis: FlipAxis) -> Result<Outcome, SessionError> {
        self.commit_one_shot("flip", |buffer, _| filters::flip(buffer, axis))
    }

    /// Restore the buffer captured at load time, as an undoable edit.
    pub fn reset_to_original(&mut self) -> Result<Outcome, SessionError> {
        let original = self.original.clone().ok_or(SessionError::NoImageLoaded)?;
        info!("reset to original");
        self.commit_one_shot("reset", move |_, _| original)
    }

    /// Push the current image, commit `filter(current)`, end all tools.
    fn commit_one_shot<F>(&mut self, name: &'static str, filter: F) -> Result<Outcome, SessionError>
    where
        F: FnOnce(&PixelBuffer, &SessionConfig) -> PixelBuffer,
    {
        let current = self.current.as_ref().ok_or(SessionError::NoImageLoaded)?;
        let next = filter(current, &self.config);
        self.history.push(Some(current));
        debug!(
            op = name,
            width = next.width(),
            height = next.height(),
            "one-shot edit"
        );
        self.current = Some(next);
        self.cancel_tools();
        Ok(Outcome::Applied)
    }

    // -- Live adjustments -------------------------------------------------

    pub fn increase_blur(&mut self) -> Result<Outcome, SessionError> {
        self.step_live(|live, current, settings| live.step_blur(current, 1, settings))
    }

    pub fn decrease_blur(&mut self) -> Result<Outcome, SessionError> {
        self.step_live(|live, current, settings| live.step_blur(current, -1, settings))
    }

    pub fn increase_brightness(&mut self) -> Result<Outcome, SessionError> {
        self.step_live(|live, current, settings| {
            live.step_brightness_contrast(current, 1, 0, settings)
        })
    }

    pub fn decrease_brightness(&mut self) -> Result<Outcome, SessionError> {
        self.step_live(|live, current, settings| {
            live.step_brightness_contrast(current, -1, 0, settings)
        })
    }

    pub fn increase_contrast(&mut self) -> Result<Outcome, SessionError> {
        self.step_live(|live, current, settings| {
            live.step_brightness_contrast(current, 0, 1, settings)
        })
    }

    pub fn decrease_contrast(&mut self) -> Result<Outcome, SessionError> {
        self.step_live(|live, current, settings| {
            live.step_brightness_contrast(current, 0, -1, settings)
        })
    }

    pub fn increase_scale(&mut self) -> Result<Outcome, SessionError> {
        self.step_live(|live, current, settings| live.step_scale(current, 1, settings))
    }

    pub fn decrease_scale(&mut self) -> Result<Outcome, SessionError> {
        self.step_live(|live, current, settings| live.step_scale(current, -1, settings))
    }

    /// Run one live step and apply its effect on history and the current image.
    fn step_live<F>(&mut self, step: F) -> Result<Outcome, SessionError>
    where
        F: FnOnce(&mut LiveSession, &PixelBuffer, &LiveSettings) -> LiveStep,
    {
        let current = self.current.as_ref().ok_or(SessionError::NoImageLoaded)?;
        let next = match step(&mut self.live, current, &self.config.live) {
            LiveStep::Unchanged => return Ok(Outcome::Unchanged),
            LiveStep::Started(image) => {
                // One history entry for the whole session.
                self.history.push(Some(current));
                image
            }
            LiveStep::Updated(image) | LiveStep::Ended(image) => image,
        };
        self.current = Some(next);
        self.edge_applied = false;
        Ok(Outcome::Applied)
    }

    /// End every live session and clear the edge guard, without history.
    fn cancel_tools(&mut self) {
        self.live.cancel();
        self.edge_applied = false;
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
