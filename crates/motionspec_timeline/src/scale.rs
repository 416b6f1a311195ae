// SPDX-License-Identifier: MIT OR Apache-2.0
//! Non-linear timeline scale.
//!
//! Maps real time (ms) onto a 0-100% visual axis. The timeline is cut at
//! every interval boundary; segments covered by at least one interval keep
//! their real length, idle segments are capped at [`MAX_IDLE_VISUAL`] visual
//! units. The result is a piecewise-linear, non-decreasing mapping in which
//! long pauses between bursts of motion no longer squash the bursts into
//! slivers.

use crate::interval::Interval;
use crate::track::Track;
use std::iter;
use tracing::{debug, trace};

/// Maximum visual length of an idle segment, in ms-compatible visual units
pub const MAX_IDLE_VISUAL: f64 = 60.0;

/// Visual length used when every segment collapses to zero
const FALLBACK_VISUAL_DURATION: f64 = 100.0;

/// Tunables for [`TimelineScale`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleOptions {
    /// Cap on the visual length of an idle segment
    pub max_idle_visual: f64,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            max_idle_visual: MAX_IDLE_VISUAL,
        }
    }
}

/// One row of the real → visual table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappingEntry {
    /// Real time (ms)
    pub real: i64,
    /// Accumulated visual units up to `real`
    pub visual: f64,
}

/// Span between two consecutive time points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Segment start (ms)
    pub start: i64,
    /// Segment end (ms)
    pub end: i64,
    /// Whether some interval covers the segment midpoint
    pub active: bool,
    /// Visual units this segment occupies
    pub visual: f64,
}

impl Segment {
    /// Real length (ms)
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// Real time → visual percentage mapping for one set of intervals.
///
/// Built fresh from the current intervals and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineScale {
    mapping: Vec<MappingEntry>,
    segments: Vec<Segment>,
    total_duration: i64,
    total_visual: f64,
    empty: bool,
}

impl TimelineScale {
    /// Build a scale from every property of every track
    pub fn build<'a, I>(tracks: I) -> Self
    where
        I: IntoIterator<Item = &'a Track>,
    {
        Self::build_with(tracks, ScaleOptions::default())
    }

    /// Build a scale from tracks with custom options
    pub fn build_with<'a, I>(tracks: I, options: ScaleOptions) -> Self
    where
        I: IntoIterator<Item = &'a Track>,
    {
        Self::from_intervals_with(tracks.into_iter().flat_map(|t| t.intervals()), options)
    }

    /// Build a scale from bare intervals
    pub fn from_intervals<I>(intervals: I) -> Self
    where
        I: IntoIterator<Item = Interval>,
    {
        Self::from_intervals_with(intervals, ScaleOptions::default())
    }

    /// Build a scale from bare intervals with custom options
    pub fn from_intervals_with<I>(intervals: I, options: ScaleOptions) -> Self
    where
        I: IntoIterator<Item = Interval>,
    {
        let mut malformed = 0usize;
        let intervals: Vec<Interval> = intervals
            .into_iter()
            .map(|interval| {
                if !interval.is_well_formed() {
                    malformed += 1;
                }
                interval.clamped()
            })
            .collect();

        if malformed > 0 {
            debug!(malformed, "Clamped malformed intervals");
        }

        if intervals.is_empty() {
            return Self::empty();
        }

        let mut points: Vec<i64> = iter::once(0)
            .chain(intervals.iter().flat_map(|i| [i.start, i.end]))
            .collect();
        points.sort();
        points.dedup();

        let max_idle = options.max_idle_visual.max(0.0);
        let mut mapping = Vec::with_capacity(points.len());
        let mut segments = Vec::with_capacity(points.len().saturating_sub(1));
        let mut accumulated = 0.0;
        mapping.push(MappingEntry { real: points[0], visual: 0.0 });

        for pair in points.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            let real = (end - start) as f64;
            let active = intervals.iter().any(|i| i.covers_midpoint(start, end));
            let visual = if active { real } else { real.min(max_idle) };

            trace!(start, end, active, visual, "Timeline segment");

            accumulated += visual;
            segments.push(Segment { start, end, active, visual });
            mapping.push(MappingEntry { real: end, visual: accumulated });
        }

        let total_duration = points.last().copied().unwrap_or(0);
        let total_visual = if accumulated > 0.0 {
            accumulated
        } else {
            FALLBACK_VISUAL_DURATION
        };

        debug!(
            intervals = intervals.len(),
            points = points.len(),
            total_duration,
            total_visual,
            "Built timeline scale"
        );

        Self {
            mapping,
            segments,
            total_duration,
            total_visual,
            empty: false,
        }
    }

    /// Scale for a timeline with nothing on it: every time maps to 0%
    pub fn empty() -> Self {
        Self {
            mapping: vec![MappingEntry { real: 0, visual: 0.0 }],
            segments: Vec::new(),
            total_duration: 0,
            total_visual: FALLBACK_VISUAL_DURATION,
            empty: true,
        }
    }

    /// Visual position of `time` (ms), in percent of the axis.
    ///
    /// Always finite and within `0.0..=100.0`. Times at or before 0 map to
    /// 0, times past the last boundary map to 100, NaN maps to 0.
    pub fn percent(&self, time: f64) -> f64 {
        if self.empty {
            return 0.0;
        }

        // First entry with real >= time; ties resolve to the lowest index.
        let idx = self.mapping.partition_point(|e| (e.real as f64) < time);
        if idx == self.mapping.len() {
            return 100.0;
        }
        if idx == 0 {
            return 0.0;
        }

        let prev = self.mapping[idx - 1];
        let next = self.mapping[idx];
        let span = (next.real - prev.real) as f64;
        let fraction = if span > 0.0 {
            (time - prev.real as f64) / span
        } else {
            0.0
        };
        let visual = prev.visual + fraction * (next.visual - prev.visual);

        (visual / self.total_visual * 100.0).clamp(0.0, 100.0)
    }

    /// Left offset and width (both percent) of an interval on the axis
    pub fn span_percent(&self, interval: Interval) -> (f64, f64) {
        let interval = interval.clamped();
        let left = self.percent(interval.start as f64);
        let right = self.percent(interval.end as f64);
        (left, (right - left).max(0.0))
    }

    /// Width (percent) of an interval on the axis
    pub fn width_percent(&self, interval: Interval) -> f64 {
        self.span_percent(interval).1
    }

    /// Latest time point (ms); 0 for an empty timeline
    pub fn total_duration(&self) -> i64 {
        self.total_duration
    }

    /// Sum of all segment visual lengths (100 when that would be zero)
    pub fn total_visual_duration(&self) -> f64 {
        self.total_visual
    }

    /// Whether the scale was built from no intervals at all
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// The real → visual table, one entry per time point
    pub fn mapping(&self) -> &[MappingEntry] {
        &self.mapping
    }

    /// Segments between consecutive time points
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segment containing `time`, if any
    pub fn segment_at(&self, time: i64) -> Option<&Segment> {
        self.segments.iter().find(|s| s.start <= time && time <= s.end)
    }
}

impl Default for TimelineScale {
    fn default() -> Self {
        Self::empty()
    }
}
