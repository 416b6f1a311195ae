// SPDX-License-Identifier: MIT OR Apache-2.0
//! Undo/redo history over project snapshots.
//!
//! Projects are immutable and share unchanged tracks, so an entry simply
//! keeps the snapshot before and after an edit.

use crate::project::Project;
use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Maximum undo history depth
const MAX_HISTORY: usize = 100;

/// History errors
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Nothing to undo
    #[error("Nothing to undo")]
    NothingToUndo,

    /// Nothing to redo
    #[error("Nothing to redo")]
    NothingToRedo,
}

/// Result type for history operations
pub type Result<T> = std::result::Result<T, HistoryError>;

/// Unique operation ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationId(u64);

impl OperationId {
    /// Get the raw ID value
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// One undoable edit
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Unique operation ID
    pub id: OperationId,
    /// Human-readable description
    pub description: String,
    /// Project before the edit
    pub before: Project,
    /// Project after the edit
    pub after: Project,
    /// Seconds since the Unix epoch
    pub timestamp: u64,
}

/// History statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryStats {
    /// Entries in the undo stack
    pub undo_count: usize,
    /// Entries in the redo stack
    pub redo_count: usize,
    /// Maximum history depth
    pub max_depth: usize,
}

/// Undo/redo history manager
#[derive(Debug)]
pub struct History {
    undo_stack: VecDeque<HistoryEntry>,
    redo_stack: VecDeque<HistoryEntry>,
    next_id: u64,
    max_depth: usize,
}

impl History {
    /// Create a new history manager
    pub fn new() -> Self {
        Self::with_max_depth(MAX_HISTORY)
    }

    /// Create with custom maximum depth
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            next_id: 1,
            max_depth,
        }
    }

    /// Record an edit. Edits that changed nothing are not recorded.
    pub fn commit(
        &mut self,
        description: impl Into<String>,
        before: Project,
        after: Project,
    ) -> Option<OperationId> {
        if before == after {
            return None;
        }

        let id = OperationId(self.next_id);
        self.next_id += 1;

        self.redo_stack.clear();
        self.undo_stack.push_back(HistoryEntry {
            id,
            description: description.into(),
            before,
            after,
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
        });

        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }

        Some(id)
    }

    /// Undo the last edit, returning the project to restore
    pub fn undo(&mut self) -> Result<Project> {
        let entry = self
            .undo_stack
            .pop_back()
            .ok_or(HistoryError::NothingToUndo)?;

        let project = entry.before.clone();
        self.redo_stack.push_back(entry);
        Ok(project)
    }

    /// Redo the last undone edit, returning the project to restore
    pub fn redo(&mut self) -> Result<Project> {
        let entry = self
            .redo_stack
            .pop_back()
            .ok_or(HistoryError::NothingToRedo)?;

        let project = entry.after.clone();
        self.undo_stack.push_back(entry);
        Ok(project)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Get history statistics
    pub fn stats(&self) -> HistoryStats {
        HistoryStats {
            undo_count: self.undo_stack.len(),
            redo_count: self.redo_stack.len(),
            max_depth: self.max_depth,
        }
    }

    /// Get description of next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.back().map(|e| e.description.as_str())
    }

    /// Get description of next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.back().map(|e| e.description.as_str())
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motionspec_timeline::Track;

    #[test]
    fn test_undo_redo() {
        let mut history = History::new();
        let v0 = Project::new("Test");
        let v1 = v0.with_track_added(Track::new("A"));
        let v2 = v1.with_track_added(Track::new("B"));

        history.commit("Add A", v0.clone(), v1.clone());
        history.commit("Add B", v1.clone(), v2.clone());
        assert_eq!(history.undo_description(), Some("Add B"));

        assert_eq!(history.undo().unwrap(), v1);
        assert_eq!(history.undo().unwrap(), v0);
        assert!(matches!(history.undo(), Err(HistoryError::NothingToUndo)));

        assert_eq!(history.redo_description(), Some("Add A"));
        assert_eq!(history.redo().unwrap(), v1);
        assert!(history.can_redo());
    }

    #[test]
    fn test_commit_clears_redo() {
        let mut history = History::new();
        let v0 = Project::new("Test");
        let v1 = v0.with_track_added(Track::new("A"));
        let alt = v0.with_track_added(Track::new("Other"));

        history.commit("Add A", v0.clone(), v1);
        history.undo().unwrap();
        assert!(history.can_redo());

        history.commit("Add Other", v0, alt);
        assert!(!history.can_redo());
        assert!(matches!(history.redo(), Err(HistoryError::NothingToRedo)));
    }

    #[test]
    fn test_noop_not_recorded() {
        let mut history = History::new();
        let v0 = Project::new("Test");
        assert!(history.commit("Nothing", v0.clone(), v0).is_none());
        assert!(!history.can_undo());
    }

    #[test]
    fn test_depth_limit() {
        let mut history = History::with_max_depth(3);
        let mut project = Project::new("Test");
        for i in 0..5 {
            let next = project.with_track_added(Track::new(format!("Track {i}")));
            history.commit(format!("Add {i}"), project, next.clone());
            project = next;
        }

        let stats = history.stats();
        assert_eq!(stats.undo_count, 3);
        assert_eq!(stats.max_depth, 3);
        assert_eq!(history.undo_description(), Some("Add 4"));
    }
}
