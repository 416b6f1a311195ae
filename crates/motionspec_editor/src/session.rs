// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editing session: current project, undo history and cached scale.

use crate::commands::EditCommand;
use crate::history::{History, HistoryError};
use crate::project::{Project, ProjectError};
use motionspec_timeline::{ScaleCache, ScaleOptions, TimelineLayout, TimelineScale};
use thiserror::Error;

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// Command could not be applied
    #[error(transparent)]
    Project(#[from] ProjectError),

    /// Undo/redo failed
    #[error(transparent)]
    History(#[from] HistoryError),
}

/// An open project being edited
#[derive(Debug)]
pub struct EditorSession {
    project: Project,
    history: History,
    cache: ScaleCache,
    saved: Project,
}

impl EditorSession {
    /// Start editing a project
    pub fn new(project: Project, options: ScaleOptions) -> Self {
        Self {
            saved: project.clone(),
            project,
            history: History::new(),
            cache: ScaleCache::with_options(options),
        }
    }

    /// Current snapshot
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Undo/redo history
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Apply a command and record it for undo
    pub fn execute(&mut self, command: EditCommand) -> Result<(), SessionError> {
        let next = command.apply(&self.project)?;
        let description = command.description();
        tracing::debug!("Executing command: {description}");

        let previous = std::mem::replace(&mut self.project, next);
        if self
            .history
            .commit(description, previous, self.project.clone())
            .is_none()
        {
            tracing::trace!("Command left the project unchanged");
        }
        Ok(())
    }

    /// Undo the last command
    pub fn undo(&mut self) -> Result<(), SessionError> {
        self.project = self.history.undo()?;
        Ok(())
    }

    /// Redo the last undone command
    pub fn redo(&mut self) -> Result<(), SessionError> {
        self.project = self.history.redo()?;
        Ok(())
    }

    /// Scale for the current project, rebuilt only when timing changed
    pub fn scale(&mut self) -> &TimelineScale {
        self.cache.get(self.project.tracks())
    }

    /// Bar layout for the current project
    pub fn layout(&mut self) -> TimelineLayout {
        let scale = self.cache.get(self.project.tracks());
        TimelineLayout::with_scale(self.project.tracks(), scale)
    }

    /// Scale cache counters
    pub fn cache(&self) -> &ScaleCache {
        &self.cache
    }

    /// Check if the current snapshot differs from the last saved one.
    ///
    /// Undoing back to the saved snapshot clears this again.
    pub fn has_unsaved_changes(&self) -> bool {
        self.project != self.saved
    }

    /// Mark the current snapshot as saved
    pub fn mark_saved(&mut self) {
        self.saved = self.project.clone();
    }
}
