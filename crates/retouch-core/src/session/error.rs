//! Errors surfaced by [`EditSession`](super::EditSession) operations.
//!
//! None of these is fatal: every failing operation leaves the session in
//! its prior state.

use thiserror::Error;

use crate::codec::{DecodeError, EncodeError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The file could not be read or decoded.
    #[error("Unreadable image: {0}")]
    Decode(#[from] DecodeError),

    /// The image could not be encoded or written.
    #[error("Could not save image: {0}")]
    Encode(#[from] EncodeError),

    /// An editing operation was attempted before any image was loaded.
    #[error("No image loaded")]
    NoImageLoaded,

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    /// Save was requested but the session has no file path yet; the shell
    /// should ask for one and call `save_as`.
    #[error("No file path; use save as")]
    PathRequired,
}

impl SessionError {
    /// True for conditions a shell should show as a notice rather than an error.
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            SessionError::NoImageLoaded | SessionError::NothingToUndo | SessionError::NothingToRedo
        )
    }
}
