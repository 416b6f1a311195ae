// SPDX-License-Identifier: MIT OR Apache-2.0
//! Memoized timeline scale.
//!
//! The editor rebuilds its layout on every keystroke; most of those edits
//! touch names or values rather than timing. [`ScaleCache`] keeps the last
//! scale and only rebuilds when the interval list actually changed.

use crate::interval::Interval;
use crate::scale::{ScaleOptions, TimelineScale};
use crate::track::Track;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::trace;

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that rebuilt the scale
    pub builds: u64,
}

/// Single-entry cache of the most recent [`TimelineScale`]
#[derive(Debug, Clone, Default)]
pub struct ScaleCache {
    options: ScaleOptions,
    key: Option<u64>,
    intervals: Vec<Interval>,
    scale: TimelineScale,
    stats: CacheStats,
}

impl ScaleCache {
    /// Create an empty cache using the default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache with custom scale options
    pub fn with_options(options: ScaleOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Current scale options
    pub fn options(&self) -> ScaleOptions {
        self.options
    }

    /// Change the options; the next lookup rebuilds
    pub fn set_options(&mut self, options: ScaleOptions) {
        if self.options != options {
            self.options = options;
            self.invalidate();
        }
    }

    /// Scale for the given tracks
    pub fn get<'a, I>(&mut self, tracks: I) -> &TimelineScale
    where
        I: IntoIterator<Item = &'a Track>,
    {
        let intervals: Vec<Interval> = tracks.into_iter().flat_map(|t| t.intervals()).collect();
        self.get_for_intervals(&intervals)
    }

    /// Scale for the given intervals.
    ///
    /// The scale does not depend on interval order, so reordering tracks or
    /// properties is still a hit.
    pub fn get_for_intervals(&mut self, intervals: &[Interval]) -> &TimelineScale {
        let mut sorted = intervals.to_vec();
        sorted.sort_unstable_by_key(|i| (i.start, i.end));
        let key = content_key(&sorted, self.options);

        if self.key == Some(key) && self.intervals == sorted {
            self.stats.hits += 1;
            trace!(key, "Timeline scale cache hit");
        } else {
            self.scale = TimelineScale::from_intervals_with(sorted.iter().copied(), self.options);
            self.intervals = sorted;
            self.key = Some(key);
            self.stats.builds += 1;
        }

        &self.scale
    }

    /// Forget the cached scale
    pub fn invalidate(&mut self) {
        self.key = None;
        self.intervals.clear();
    }

    /// Hit/build counters
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

fn content_key(intervals: &[Interval], options: ScaleOptions) -> u64 {
    let mut hasher = DefaultHasher::new();
    intervals.hash(&mut hasher);
    options.max_idle_visual.to_bits().hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{Property, PropertyKind};

    #[test]
    fn test_cache_reuses_scale() {
        let mut track = Track::new("Logo")
            .with_property(Property::new(PropertyKind::Opacity, 0, 300));
        let mut cache = ScaleCache::new();

        let first = cache.get([&track]).clone();
        let second = cache.get([&track]).clone();
        assert_eq!(first, second);
        assert_eq!(cache.stats(), CacheStats { hits: 1, builds: 1 });

        // Renaming does not touch timing
        track.name = "Logo mark".into();
        cache.get([&track]);
        assert_eq!(cache.stats().builds, 1);

        track.insert_property(Property::new(PropertyKind::Scale, 1000, 200));
        let rebuilt = cache.get([&track]).clone();
        assert_eq!(cache.stats().builds, 2);
        assert_eq!(rebuilt, TimelineScale::build([&track]));
    }

    #[test]
    fn test_options_change_rebuilds() {
        let intervals = [Interval::new(0, 100), Interval::new(2000, 2100)];
        let mut cache = ScaleCache::new();
        let default_total = cache.get_for_intervals(&intervals).total_visual_duration();

        cache.set_options(ScaleOptions { max_idle_visual: 10.0 });
        let capped_total = cache.get_for_intervals(&intervals).total_visual_duration();

        assert_eq!(default_total, 260.0);
        assert_eq!(capped_total, 210.0);
        assert_eq!(cache.stats().builds, 2);
    }

    #[test]
    fn test_order_does_not_matter() {
        let mut cache = ScaleCache::new();
        let a = [Interval::new(0, 100), Interval::new(900, 1000)];
        let b = [Interval::new(900, 1000), Interval::new(0, 100)];
        let first = cache.get_for_intervals(&a).clone();
        let second = cache.get_for_intervals(&b).clone();
        assert_eq!(first, second);
        assert_eq!(cache.stats(), CacheStats { hits: 1, builds: 1 });
    }

    #[test]
    fn test_empty_cache_lookup() {
        let mut cache = ScaleCache::new();
        let scale = cache.get_for_intervals(&[]);
        assert!(scale.is_empty());
        assert_eq!(scale.percent(10.0), 0.0);
    }
}
