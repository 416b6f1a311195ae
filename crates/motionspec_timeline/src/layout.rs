// SPDX-License-Identifier: MIT OR Apache-2.0
//! Bar layout for timeline renderers.
//!
//! Canvas and static exporters both want the same thing: for each property,
//! a left offset and a width in percent of the axis, plus the axis labels.

use crate::property::PropertyId;
use crate::scale::TimelineScale;
use crate::track::{Track, TrackId};

/// One property bar on the timeline
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    /// Property this bar represents
    pub property_id: PropertyId,
    /// Display label
    pub label: String,
    /// Real start (ms)
    pub start_ms: i64,
    /// Real end (ms)
    pub end_ms: i64,
    /// Left offset in percent
    pub left: f64,
    /// Width in percent
    pub width: f64,
}

impl BarLayout {
    /// Right edge in percent
    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Bars of a single track
#[derive(Debug, Clone, PartialEq)]
pub struct TrackLayout {
    /// Track ID
    pub track_id: TrackId,
    /// Track name
    pub name: String,
    /// Bars in property order
    pub bars: Vec<BarLayout>,
}

/// Positioned bars for a set of tracks
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayout {
    /// Track rows in order
    pub tracks: Vec<TrackLayout>,
    /// Latest time point (ms)
    pub total_duration: i64,
}

impl TimelineLayout {
    /// Build a fresh scale and lay out every track against it
    pub fn compute<'a, I>(tracks: I) -> Self
    where
        I: IntoIterator<Item = &'a Track>,
        I::IntoIter: Clone,
    {
        let tracks = tracks.into_iter();
        let scale = TimelineScale::build(tracks.clone());
        Self::with_scale(tracks, &scale)
    }

    /// Lay out tracks against an existing scale
    pub fn with_scale<'a, I>(tracks: I, scale: &TimelineScale) -> Self
    where
        I: IntoIterator<Item = &'a Track>,
    {
        let tracks = tracks
            .into_iter()
            .map(|track| TrackLayout {
                track_id: track.id,
                name: track.name.clone(),
                bars: track
                    .properties()
                    .map(|property| {
                        let interval = property.interval().clamped();
                        let (left, width) = scale.span_percent(interval);
                        BarLayout {
                            property_id: property.id,
                            label: property.summary(),
                            start_ms: interval.start,
                            end_ms: interval.end,
                            left,
                            width,
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            tracks,
            total_duration: scale.total_duration(),
        }
    }

    /// Axis labels, start and end
    pub fn axis_labels(&self) -> (String, String) {
        ("0ms".to_string(), format!("{}ms", self.total_duration))
    }

    /// Number of bars across all tracks
    pub fn bar_count(&self) -> usize {
        self.tracks.iter().map(|t| t.bars.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{Property, PropertyKind};

    #[test]
    fn test_layout_bars() {
        let tracks = vec![
            Track::new("Card")
                .with_property(Property::new(PropertyKind::Opacity, 0, 100)),
            Track::new("Badge")
                .with_property(Property::new(PropertyKind::Scale, 5000, 100)),
        ];
        let layout = TimelineLayout::compute(&tracks);

        assert_eq!(layout.total_duration, 5100);
        assert_eq!(layout.axis_labels(), ("0ms".to_string(), "5100ms".to_string()));
        assert_eq!(layout.bar_count(), 2);

        let card = &layout.tracks[0].bars[0];
        let badge = &layout.tracks[1].bars[0];
        assert_eq!(card.left, 0.0);
        assert!((card.width - badge.width).abs() < 1e-9);
        assert!((badge.right() - 100.0).abs() < 1e-9);
        assert!(badge.left > card.right());
    }

    #[test]
    fn test_empty_layout() {
        let tracks = vec![Track::new("Nothing yet")];
        let layout = TimelineLayout::compute(&tracks);
        assert_eq!(layout.tracks.len(), 1);
        assert!(layout.tracks[0].bars.is_empty());
        assert_eq!(layout.axis_labels().1, "0ms");
    }

    #[test]
    fn test_malformed_property_gets_zero_width() {
        let tracks = vec![Track::new("Edit in progress")
            .with_property(Property::new(PropertyKind::Position, 300, -500))
            .with_property(Property::new(PropertyKind::Opacity, 0, 600))];
        let layout = TimelineLayout::compute(&tracks);
        let bar = &layout.tracks[0].bars[0];
        assert_eq!(bar.width, 0.0);
        assert_eq!((bar.start_ms, bar.end_ms), (300, 300));
        assert!((bar.left - 50.0).abs() < 1e-9);
    }
}
