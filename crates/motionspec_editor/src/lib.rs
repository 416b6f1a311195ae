// SPDX-License-Identifier: MIT OR Apache-2.0
//! Motion spec editor core.
//!
//! Everything the editor needs around the timeline scale:
//! - Project documents with copy-on-write, snapshot-per-edit updates
//! - Discrete edit commands and undo/redo history
//! - Editor settings
//! - A plain-text timeline renderer

pub mod commands;
pub mod history;
pub mod project;
pub mod render;
pub mod session;
pub mod settings;

pub use commands::EditCommand;
pub use history::{History, HistoryError};
pub use project::{Project, ProjectError, ProjectId, PROJECT_EXTENSION, PROJECT_FORMAT_VERSION};
pub use render::TextRenderer;
pub use session::{EditorSession, SessionError};
pub use settings::{EditorSettings, SettingsError};
