// SPDX-License-Identifier: MIT OR Apache-2.0
//! Track definitions for the motion timeline.

use crate::interval::Interval;
use crate::property::{Property, PropertyId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId(pub Uuid);

impl TrackId {
    /// Create a new random track ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

/// A track groups the properties animated on one layer or element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Unique track ID
    pub id: TrackId,
    /// Track name
    pub name: String,
    /// Free-form notes for the developer
    #[serde(default)]
    pub description: String,
    /// Properties in display order
    #[serde(with = "property_list")]
    properties: IndexMap<PropertyId, Property>,
}

impl Track {
    /// Create a new track
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TrackId::new(),
            name: name.into(),
            description: String::new(),
            properties: IndexMap::new(),
        }
    }

    /// Add a property, builder style
    pub fn with_property(mut self, property: Property) -> Self {
        self.insert_property(property);
        self
    }

    /// Insert or replace a property, keeping its position if it already exists
    pub fn insert_property(&mut self, property: Property) -> PropertyId {
        let id = property.id;
        self.properties.insert(id, property);
        id
    }

    /// Remove a property, preserving the order of the rest
    pub fn remove_property(&mut self, property_id: PropertyId) -> Option<Property> {
        self.properties.shift_remove(&property_id)
    }

    /// Get a property
    pub fn property(&self, property_id: PropertyId) -> Option<&Property> {
        self.properties.get(&property_id)
    }

    /// Get a mutable property
    pub fn property_mut(&mut self, property_id: PropertyId) -> Option<&mut Property> {
        self.properties.get_mut(&property_id)
    }

    /// Get all properties in order
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }

    /// Get property count
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Position of a property in display order
    pub fn property_index(&self, property_id: PropertyId) -> Option<usize> {
        self.properties.get_index_of(&property_id)
    }

    /// Move the property at `from` to `to`, shifting the ones in between.
    ///
    /// Returns `false` when either index is out of range.
    pub fn move_property(&mut self, from: usize, to: usize) -> bool {
        let len = self.properties.len();
        if from >= len || to >= len {
            return false;
        }
        self.properties.move_index(from, to);
        true
    }

    /// Intervals of every property, in display order
    pub fn intervals(&self) -> impl Iterator<Item = Interval> + '_ {
        self.properties.values().map(Property::interval)
    }

    /// End of the latest property, or 0 when empty
    pub fn end_time(&self) -> i64 {
        self.intervals()
            .map(|i| i.clamped().end)
            .max()
            .unwrap_or(0)
    }
}

// Property order is significant, so compare in order.
impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.description == other.description
            && self.properties.iter().eq(other.properties.iter())
    }
}

/// Properties are stored as a plain list; the map is rebuilt from their ids.
mod property_list {
    use super::*;
    use serde::de::Error as _;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        properties: &IndexMap<PropertyId, Property>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(properties.values())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<IndexMap<PropertyId, Property>, D::Error> {
        let list = Vec::<Property>::deserialize(deserializer)?;
        let mut properties = IndexMap::with_capacity(list.len());
        for property in list {
            let id = property.id;
            if properties.insert(id, property).is_some() {
                return Err(D::Error::custom(format!("duplicate property id {}", id.0)));
            }
        }
        Ok(properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyKind;

    #[test]
    fn test_property_order() {
        let a = Property::new(PropertyKind::Opacity, 0, 100);
        let b = Property::new(PropertyKind::Position, 0, 200);
        let c = Property::new(PropertyKind::Scale, 50, 100);
        let (a_id, b_id, c_id) = (a.id, b.id, c.id);

        let mut track = Track::new("Card").with_property(a).with_property(b).with_property(c);
        assert_eq!(track.property_index(c_id), Some(2));

        assert!(track.move_property(2, 0));
        let order: Vec<_> = track.properties().map(|p| p.id).collect();
        assert_eq!(order, vec![c_id, a_id, b_id]);

        assert!(!track.move_property(0, 3));

        let mut reordered = track.clone();
        reordered.move_property(0, 1);
        assert_ne!(reordered, track);

        track.remove_property(a_id);
        let order: Vec<_> = track.properties().map(|p| p.id).collect();
        assert_eq!(order, vec![c_id, b_id]);
    }

    #[test]
    fn test_end_time() {
        let track = Track::new("Title")
            .with_property(Property::new(PropertyKind::Opacity, 100, 300))
            .with_property(Property::new(PropertyKind::Position, 0, 250));
        assert_eq!(track.end_time(), 400);
        assert_eq!(Track::new("Empty").end_time(), 0);
    }

    #[test]
    fn test_serialization_keeps_order() {
        let track = Track::new("Hero")
            .with_property(Property::new(PropertyKind::Scale, 0, 100))
            .with_property(Property::new(PropertyKind::Custom("Blur".into()), 50, 100))
            .with_property(Property::new(PropertyKind::Opacity, 0, 300));

        let ron_str = ron::ser::to_string_pretty(&track, ron::ser::PrettyConfig::default()).unwrap();
        let loaded: Track = ron::from_str(&ron_str).unwrap();
        assert_eq!(loaded, track);
    }

    #[test]
    fn test_duplicate_property_ids_rejected() {
        let opacity = Property::new(PropertyKind::Opacity, 0, 100);
        let mut scale = Property::new(PropertyKind::Scale, 200, 100);
        scale.id = opacity.id;

        let track = Track::new("Card").with_property(opacity.clone());
        let mut ron_str = ron::to_string(&track).unwrap();
        // Splice a second property carrying the same id into the list
        let scale_str = ron::to_string(&scale).unwrap();
        let list_end = ron_str.rfind(']').unwrap();
        ron_str.insert_str(list_end, &format!(",{scale_str}"));

        let err = ron::from_str::<Track>(&ron_str).unwrap_err();
        assert!(err.to_string().contains("duplicate property id"));
    }
}
