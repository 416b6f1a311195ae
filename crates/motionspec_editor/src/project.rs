// SPDX-License-Identifier: MIT OR Apache-2.0
//! Motion spec project document.
//!
//! A [`Project`] is an immutable snapshot. Every edit goes through one of
//! the `with_*` operations, which return a new snapshot and leave the old
//! one untouched. Tracks are shared between snapshots through `Arc` and
//! only the edited track is copied, so keeping old snapshots around for
//! undo costs little.

use indexmap::IndexMap;
use motionspec_timeline::{
    Easing, Property, PropertyId, PropertyKind, TimelineLayout, TimelineScale, Track, TrackId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Current project file format version
pub const PROJECT_FORMAT_VERSION: u32 = 1;

/// Default project file extension
pub const PROJECT_EXTENSION: &str = "motion";

/// Project errors
#[derive(Debug, Error)]
pub enum ProjectError {
    /// File could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// RON parse error
    #[error("Invalid project file: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// RON serialization error
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File written by a newer version
    #[error("Project version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Newest version this build reads
        supported: u32,
    },

    /// Track not found
    #[error("Track not found: {0:?}")]
    TrackNotFound(TrackId),

    /// Property not found
    #[error("Property not found: {0:?}")]
    PropertyNotFound(PropertyId),

    /// Property id already used by a track in this project
    #[error("Duplicate property id: {0:?}")]
    DuplicateProperty(PropertyId),

    /// Move index out of range
    #[error("Index {index} out of range for {len} items")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of items
        len: usize,
    },
}

/// Result type for project operations
pub type Result<T> = std::result::Result<T, ProjectError>;

/// Unique identifier for a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub Uuid);

impl ProjectId {
    /// Create a new random project ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

/// A motion spec: named tracks of animated properties
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// File format version
    pub version: u32,
    /// Unique project ID
    pub id: ProjectId,
    /// Project name
    pub name: String,
    /// Notes shown at the top of the handoff
    #[serde(default)]
    pub description: String,
    /// Tracks in display order
    #[serde(with = "track_list")]
    tracks: IndexMap<TrackId, Arc<Track>>,
}

impl Project {
    /// Create an empty project
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: PROJECT_FORMAT_VERSION,
            id: ProjectId::new(),
            name: name.into(),
            description: String::new(),
            tracks: IndexMap::new(),
        }
    }

    /// A small project showing a typical card entrance
    pub fn sample() -> Self {
        let card = Track::new("Card")
            .with_property(
                Property::new(PropertyKind::Opacity, 0, 200)
                    .with_values("0", "1")
                    .with_easing(Easing::EaseOut),
            )
            .with_property(
                Property::new(PropertyKind::Position, 0, 400)
                    .with_values("24", "0")
                    .with_easing(Easing::CubicBezier([0.2, 0.0, 0.0, 1.0])),
            );
        let icon = Track::new("Icon")
            .with_property(Property::new(PropertyKind::Scale, 300, 250).with_values("0.8", "1"))
            .with_property(
                Property::new(PropertyKind::Rotation, 300, 400)
                    .with_values("-15", "0")
                    .with_easing(Easing::Spring),
            );
        let badge = Track::new("Badge")
            .with_property(Property::new(PropertyKind::MediaSwap, 2500, 0).with_values("idle.png", "done.png"))
            .with_property(
                Property::new(PropertyKind::Custom("Blur".into()), 2500, 300)
                    .with_values("8px", "0px")
                    .with_easing(Easing::Linear),
            );

        Self::new("Card entrance")
            .with_track_added(card)
            .with_track_added(icon)
            .with_track_added(badge)
    }

    /// Get a track
    pub fn track(&self, track_id: TrackId) -> Option<&Track> {
        self.tracks.get(&track_id).map(|t| &**t)
    }

    /// Get all tracks in order
    pub fn tracks(&self) -> impl Iterator<Item = &Track> + Clone {
        self.tracks.values().map(|t| &**t)
    }

    /// Get track count
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Position of a track in display order
    pub fn track_index(&self, track_id: TrackId) -> Option<usize> {
        self.tracks.get_index_of(&track_id)
    }

    /// Track that owns a property
    pub fn find_property(&self, property_id: PropertyId) -> Option<(&Track, &Property)> {
        self.tracks()
            .find_map(|t| t.property(property_id).map(|p| (t, p)))
    }

    /// Build the timeline scale for the current tracks
    pub fn scale(&self) -> TimelineScale {
        TimelineScale::build(self.tracks())
    }

    /// Lay out every property bar of the current tracks
    pub fn layout(&self) -> TimelineLayout {
        TimelineLayout::compute(self.tracks())
    }

    /// New snapshot with a track appended
    pub fn with_track_added(&self, track: Track) -> Self {
        let mut next = self.clone();
        next.tracks.insert(track.id, Arc::new(track));
        next
    }

    /// New snapshot without the given track
    pub fn with_track_removed(&self, track_id: TrackId) -> Result<Self> {
        let mut next = self.clone();
        next.tracks
            .shift_remove(&track_id)
            .ok_or(ProjectError::TrackNotFound(track_id))?;
        Ok(next)
    }

    /// New snapshot with one track edited in place.
    ///
    /// Only the edited track is copied; every other track stays shared
    /// with `self`.
    pub fn with_track_updated(
        &self,
        track_id: TrackId,
        edit: impl FnOnce(&mut Track) -> Result<()>,
    ) -> Result<Self> {
        let mut next = self.clone();
        let track = next
            .tracks
            .get_mut(&track_id)
            .ok_or(ProjectError::TrackNotFound(track_id))?;
        edit(Arc::make_mut(track))?;
        Ok(next)
    }

    /// New snapshot with a track renamed
    pub fn with_track_renamed(&self, track_id: TrackId, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        self.with_track_updated(track_id, |track| {
            track.name = name;
            Ok(())
        })
    }

    /// New snapshot with a property appended to a track.
    ///
    /// Property ids are unique across the whole project; reusing one is an
    /// error rather than a replacement.
    pub fn with_property_added(&self, track_id: TrackId, property: Property) -> Result<Self> {
        if self.find_property(property.id).is_some() {
            return Err(ProjectError::DuplicateProperty(property.id));
        }
        self.with_track_updated(track_id, |track| {
            track.insert_property(property);
            Ok(())
        })
    }

    /// New snapshot with an existing property replaced (matched by id)
    pub fn with_property_updated(&self, track_id: TrackId, property: Property) -> Result<Self> {
        self.with_track_updated(track_id, |track| {
            let slot = track
                .property_mut(property.id)
                .ok_or(ProjectError::PropertyNotFound(property.id))?;
            *slot = property;
            Ok(())
        })
    }

    /// New snapshot without the given property
    pub fn with_property_removed(&self, track_id: TrackId, property_id: PropertyId) -> Result<Self> {
        self.with_track_updated(track_id, |track| {
            track
                .remove_property(property_id)
                .map(|_| ())
                .ok_or(ProjectError::PropertyNotFound(property_id))
        })
    }

    /// New snapshot with the track at `from` spliced in at `to`
    pub fn with_track_moved(&self, from: usize, to: usize) -> Result<Self> {
        let len = self.tracks.len();
        check_index(from, len)?;
        check_index(to, len)?;

        let mut next = self.clone();
        next.tracks.move_index(from, to);
        Ok(next)
    }

    /// New snapshot with a track's property at `from` spliced in at `to`
    pub fn with_property_moved(&self, track_id: TrackId, from: usize, to: usize) -> Result<Self> {
        self.with_track_updated(track_id, |track| {
            let len = track.property_count();
            check_index(from, len)?;
            check_index(to, len)?;
            track.move_property(from, to);
            Ok(())
        })
    }

    /// Serialize to RON
    pub fn to_ron(&self) -> Result<String> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// Deserialize from RON
    pub fn from_ron(s: &str) -> Result<Self> {
        let project: Project = ron::from_str(s)?;
        project.validate()
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(s: &str) -> Result<Self> {
        let project: Project = serde_json::from_str(s)?;
        project.validate()
    }

    /// Load a project; `.json` files are read as JSON, anything else as RON
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let project = if is_json(path) {
            Self::from_json(&content)?
        } else {
            Self::from_ron(&content)?
        };

        tracing::info!(
            "Loaded project: {} ({} tracks) from {:?}",
            project.name,
            project.track_count(),
            path
        );
        Ok(project)
    }

    /// Save a project; `.json` files are written as JSON, anything else as RON
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            self.to_json()?
        } else {
            self.to_ron()?
        };
        std::fs::write(path, content)?;

        tracing::info!("Saved project: {} to {:?}", self.name, path);
        Ok(())
    }

    fn validate(self) -> Result<Self> {
        if self.version > PROJECT_FORMAT_VERSION {
            return Err(ProjectError::UnsupportedVersion {
                found: self.version,
                supported: PROJECT_FORMAT_VERSION,
            });
        }

        // Ids are unique within a track already; check across tracks
        let mut seen = HashSet::new();
        for property in self.tracks().flat_map(Track::properties) {
            if !seen.insert(property.id) {
                return Err(ProjectError::DuplicateProperty(property.id));
            }
        }
        Ok(self)
    }
}

// Track order is part of the document, so compare in order.
impl PartialEq for Project {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.id == other.id
            && self.name == other.name
            && self.description == other.description
            && self.tracks.iter().eq(other.tracks.iter())
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new("Untitled Motion")
    }
}

fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(ProjectError::IndexOutOfRange { index, len })
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Tracks are stored as a plain list; the map is rebuilt from their ids.
mod track_list {
    use super::*;
    use serde::de::Error as _;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        tracks: &IndexMap<TrackId, Arc<Track>>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(tracks.values().map(|t| &**t))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<IndexMap<TrackId, Arc<Track>>, D::Error> {
        let list = Vec::<Track>::deserialize(deserializer)?;
        let mut tracks = IndexMap::with_capacity(list.len());
        for track in list {
            let id = track.id;
            if tracks.insert(id, Arc::new(track)).is_some() {
                return Err(D::Error::custom(format!("duplicate track id {}", id.0)));
            }
        }
        Ok(tracks)
    }
}
