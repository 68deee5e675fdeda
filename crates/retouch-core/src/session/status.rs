//! Read-only snapshot of session state for a shell to enable/disable controls.

use serde::{Deserialize, Serialize};

use crate::live::LiveTool;

/// Everything a shell needs after an operation to refresh its controls and
/// status line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub has_image: bool,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub filepath: Option<String>,
    pub can_undo: bool,
    pub can_redo: bool,
    pub undo_depth: usize,
    pub redo_depth: usize,
    pub active_tool: Option<LiveTool>,
    pub blur_level: u32,
    pub brightness_level: i32,
    pub contrast_level: i32,
    pub scale_level: i32,
    pub edge_applied: bool,
}
