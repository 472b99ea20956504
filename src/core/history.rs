//! Back/forward navigation history.
//!
//! [NavHistory] tracks the current directory plus two stacks. A new forward move clears the
//! forward stack, so forward history only exists right after moving back.
//!
//! The `*_target` functions only peek. The controller reads the target directory first and
//! commits the move afterwards, which keeps the history untouched when the read fails.

use crate::core::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct NavHistory {
    current: PathBuf,
    back: Vec<PathBuf>,
    forward: Vec<PathBuf>,
}

impl NavHistory {
    pub fn new(current: PathBuf) -> Self {
        Self {
            current,
            back: Vec::new(),
            forward: Vec::new(),
        }
    }

    // Getters / Accessors

    #[inline]
    pub fn current(&self) -> &Path {
        &self.current
    }

    /// Back stack, most recent last.
    #[inline]
    pub fn back_stack(&self) -> &[PathBuf] {
        &self.back
    }

    /// Forward stack, most recent last.
    #[inline]
    pub fn forward_stack(&self) -> &[PathBuf] {
        &self.forward
    }

    /// Moves to `path`. Returns `false` when `path` already is the current directory.
    pub fn push(&mut self, path: PathBuf) -> bool {
        if path == self.current {
            return false;
        }
        let previous = std::mem::replace(&mut self.current, path);
        self.back.push(previous);
        self.forward.clear();
        true
    }

    /// Where [NavHistory::back] would go: the top of the back stack, or the parent directory.
    pub fn back_target(&self) -> CoreResult<PathBuf> {
        if let Some(top) = self.back.last() {
            return Ok(top.clone());
        }
        self.current
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(CoreError::no_parent)
    }

    pub fn back(&mut self) -> CoreResult<&Path> {
        let target = match self.back.pop() {
            Some(top) => top,
            None => self
                .current
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(CoreError::no_parent)?,
        };
        let previous = std::mem::replace(&mut self.current, target);
        self.forward.push(previous);
        Ok(&self.current)
    }

    pub fn forward_target(&self) -> CoreResult<PathBuf> {
        self.forward.last().cloned().ok_or_else(CoreError::no_forward)
    }

    pub fn forward(&mut self) -> CoreResult<&Path> {
        let target = self.forward.pop().ok_or_else(CoreError::no_forward)?;
        let previous = std::mem::replace(&mut self.current, target);
        self.back.push(previous);
        Ok(&self.current)
    }
}
