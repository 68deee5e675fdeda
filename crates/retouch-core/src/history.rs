//! Bounded undo/redo history over [`PixelBuffer`] snapshots.
//!
//! The contract of [`HistoryManager::push`] is "record the state you are
//! about to leave": callers push the *pre-edit* image immediately before
//! committing an edit. Any push invalidates the redo branch.

use std::collections::VecDeque;

use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::config::DEFAULT_HISTORY_LIMIT;

/// Two-stack undo/redo. The undo stack never exceeds `capacity`; pushing
/// beyond it evicts the oldest snapshot.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    undo_stack: VecDeque<PixelBuffer>,
    redo_stack: Vec<PixelBuffer>,
    capacity: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl HistoryManager {
    /// Create an empty history holding at most `capacity` undo snapshots.
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            undo_stack: VecDeque::with_capacity(capacity + 1),
            redo_stack: Vec::new(),
            capacity,
        }
    }

    /// Empty both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Record `image` as the state being left. `None` is ignored.
    pub fn push(&mut self, image: Option<&PixelBuffer>) {
        let Some(image) = image else {
            return;
        };

        self.undo_stack.push_back(image.clone());
        if self.undo_stack.len() > self.capacity {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
        debug!(depth = self.undo_stack.len(), "history push");
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Step back. `current` moves onto the redo stack and the most recent
    /// snapshot is returned. Returns `None` if there is nothing to undo.
    pub fn undo(&mut self, current: &PixelBuffer) -> Option<PixelBuffer> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(current.clone());
        debug!(
            undo = self.undo_stack.len(),
            redo = self.redo_stack.len(),
            "history undo"
        );
        Some(previous)
    }

    /// Step forward. `current` moves onto the undo stack and the most recent
    /// redo snapshot is returned. Returns `None` if there is nothing to redo.
    pub fn redo(&mut self, current: &PixelBuffer) -> Option<PixelBuffer> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push_back(current.clone());
        if self.undo_stack.len() > self.capacity {
            self.undo_stack.pop_front();
        }
        debug!(
            undo = self.undo_stack.len(),
            redo = self.redo_stack.len(),
            "history redo"
        );
        Some(next)
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Push(u8),
        Undo,
        Redo,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<u8>().prop_map(Op::Push),
            Just(Op::Undo),
            Just(Op::Redo),
        ]
    }

    fn solid(v: u8) -> PixelBuffer {
        PixelBuffer::filled(1, 1, [v, v, v]).unwrap()
    }

    proptest! {
        /// Property: the undo stack never exceeds its capacity.
        #[test]
        fn prop_undo_depth_bounded(
            capacity in 1usize..=20,
            ops in prop::collection::vec(op_strategy(), 0..80),
        ) {
            let mut history = HistoryManager::new(capacity);
            let mut current = solid(0);

            for op in ops {
                match op {
                    Op::Push(v) => {
                        history.push(Some(&current));
                        current = solid(v);
                    }
                    Op::Undo => {
                        if let Some(prev) = history.undo(&current) {
                            current = prev;
                        }
                    }
                    Op::Redo => {
                        if let Some(next) = history.redo(&current) {
                            current = next;
                        }
                    }
                }
                prop_assert!(history.undo_len() <= capacity);
            }
        }

        /// Property: undo followed by redo returns to the same image.
        #[test]
        fn prop_undo_redo_roundtrip(values in prop::collection::vec(any::<u8>(), 1..20)) {
            let mut history = HistoryManager::default();
            let mut current = solid(0);
            for v in values {
                history.push(Some(&current));
                current = solid(v);
            }

            let before = current.clone();
            let undone = history.undo(&current).unwrap();
            let redone = history.redo(&undone).unwrap();
            prop_assert_eq!(redone, before);
        }
    }
}
