// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor commands.
//!
//! Each UI event (form submit, drop after a drag, delete button) becomes
//! one [`EditCommand`]. Applying a command never mutates the current
//! project; it produces the next snapshot, which the session records in
//! its history.

use crate::project::{Project, Result};
use motionspec_timeline::{Property, PropertyId, Track, TrackId};

/// A discrete edit to a project
#[derive(Debug, Clone)]
pub enum EditCommand {
    /// Append a track
    AddTrack(Track),
    /// Delete a track
    RemoveTrack(TrackId),
    /// Rename a track
    RenameTrack {
        /// Target track
        track_id: TrackId,
        /// New name
        name: String,
    },
    /// Append a property to a track
    AddProperty {
        /// Target track
        track_id: TrackId,
        /// Property to add
        property: Property,
    },
    /// Replace a property (matched by id)
    UpdateProperty {
        /// Target track
        track_id: TrackId,
        /// New property contents
        property: Property,
    },
    /// Delete a property
    RemoveProperty {
        /// Target track
        track_id: TrackId,
        /// Property to delete
        property_id: PropertyId,
    },
    /// Move a track from one slot to another (drop after drag)
    MoveTrack {
        /// Current index
        from: usize,
        /// Destination index
        to: usize,
    },
    /// Move a property within its track
    MoveProperty {
        /// Target track
        track_id: TrackId,
        /// Current index
        from: usize,
        /// Destination index
        to: usize,
    },
}

impl EditCommand {
    /// Get a description of this command, for the undo menu
    pub fn description(&self) -> String {
        match self {
            Self::AddTrack(track) => format!("Add track \"{}\"", track.name),
            Self::RemoveTrack(_) => "Remove track".to_string(),
            Self::RenameTrack { name, .. } => format!("Rename track to \"{name}\""),
            Self::AddProperty { property, .. } => format!("Add {}", property.kind.label()),
            Self::UpdateProperty { property, .. } => format!("Edit {}", property.kind.label()),
            Self::RemoveProperty { .. } => "Remove property".to_string(),
            Self::MoveTrack { .. } => "Reorder tracks".to_string(),
            Self::MoveProperty { .. } => "Reorder properties".to_string(),
        }
    }

    /// Produce the project that results from applying this command
    pub fn apply(&self, project: &Project) -> Result<Project> {
        match self {
            Self::AddTrack(track) => Ok(project.with_track_added(track.clone())),
            Self::RemoveTrack(track_id) => project.with_track_removed(*track_id),
            Self::RenameTrack { track_id, name } => {
                project.with_track_renamed(*track_id, name.clone())
            }
            Self::AddProperty { track_id, property } => {
                project.with_property_added(*track_id, property.clone())
            }
            Self::UpdateProperty { track_id, property } => {
                project.with_property_updated(*track_id, property.clone())
            }
            Self::RemoveProperty { track_id, property_id } => {
                project.with_property_removed(*track_id, *property_id)
            }
            Self::MoveTrack { from, to } => project.with_track_moved(*from, *to),
            Self::MoveProperty { track_id, from, to } => {
                project.with_property_moved(*track_id, *from, *to)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectError;
    use motionspec_timeline::PropertyKind;

    #[test]
    fn test_apply_leaves_input_untouched() {
        let project = Project::sample();
        let track = Track::new("Extra");
        let command = EditCommand::AddTrack(track);

        let next = command.apply(&project).unwrap();
        assert_eq!(project.track_count(), 3);
        assert_eq!(next.track_count(), 4);
        assert_eq!(command.description(), "Add track \"Extra\"");
    }

    #[test]
    fn test_apply_reports_missing_track() {
        let project = Project::sample();
        let command = EditCommand::AddProperty {
            track_id: TrackId::new(),
            property: Property::new(PropertyKind::Opacity, 0, 100),
        };
        assert!(matches!(command.apply(&project), Err(ProjectError::TrackNotFound(_))));
    }
}
