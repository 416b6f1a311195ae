// SPDX-License-Identifier: MIT OR Apache-2.0
//! Motion spec timeline.
//!
//! This crate provides the timing model behind a motion handoff document:
//! - Tracks holding animated properties (opacity, position, scale,
//!   rotation, media swaps, custom properties)
//! - Millisecond intervals derived from each property's delay and duration
//! - A non-linear timeline scale that compresses idle gaps
//! - Bar layout for renderers
//!
//! ## Architecture
//!
//! The scale is a pure function of the interval set. It is rebuilt on
//! every change (or fetched from a [`ScaleCache`]) and never mutated.

pub mod interval;
pub mod property;
pub mod track;
pub mod scale;
pub mod cache;
pub mod layout;

pub use interval::Interval;
pub use property::{Property, PropertyId, PropertyKind, Easing};
pub use track::{Track, TrackId};
pub use scale::{TimelineScale, ScaleOptions, MappingEntry, Segment, MAX_IDLE_VISUAL};
pub use cache::{ScaleCache, CacheStats};
pub use layout::{TimelineLayout, TrackLayout, BarLayout};
