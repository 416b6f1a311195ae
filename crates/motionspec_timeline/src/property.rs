// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animated property definitions for motion tracks.

use crate::interval::Interval;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyId(pub Uuid);

impl PropertyId {
    /// Create a new random property ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PropertyId {
    fn default() -> Self {
        Self::new()
    }
}

/// What a property animates
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    /// Opacity (0-1)
    Opacity,
    /// Translation
    Position,
    /// Uniform or per-axis scale
    Scale,
    /// Rotation
    Rotation,
    /// Swap of an image/video asset
    MediaSwap,
    /// Any other named property
    Custom(String),
}

impl PropertyKind {
    /// Get the display name
    pub fn label(&self) -> &str {
        match self {
            Self::Opacity => "Opacity",
            Self::Position => "Position",
            Self::Scale => "Scale",
            Self::Rotation => "Rotation",
            Self::MediaSwap => "Media swap",
            Self::Custom(name) => name,
        }
    }

    /// Get the unit values of this kind are usually written in
    pub fn default_unit(&self) -> &'static str {
        match self {
            Self::Position => "px",
            Self::Rotation => "deg",
            Self::Opacity | Self::Scale | Self::MediaSwap | Self::Custom(_) => "",
        }
    }

    /// Built-in kinds, in menu order
    pub fn builtin() -> &'static [PropertyKind] {
        &[
            PropertyKind::Opacity,
            PropertyKind::Position,
            PropertyKind::Scale,
            PropertyKind::Rotation,
            PropertyKind::MediaSwap,
        ]
    }
}

/// Timing curve of a property
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Accelerate
    EaseIn,
    /// Decelerate
    EaseOut,
    /// Accelerate then decelerate
    #[default]
    EaseInOut,
    /// Physically based spring
    Spring,
    /// Cubic bezier control points (x1, y1, x2, y2)
    CubicBezier([f32; 4]),
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::EaseIn => f.write_str("ease-in"),
            Self::EaseOut => f.write_str("ease-out"),
            Self::EaseInOut => f.write_str("ease-in-out"),
            Self::Spring => f.write_str("spring"),
            Self::CubicBezier([x1, y1, x2, y2]) => {
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

/// One animated property on a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Unique property ID
    pub id: PropertyId,
    /// What is animated
    pub kind: PropertyKind,
    /// Start value, as written by the designer
    #[serde(default)]
    pub from: String,
    /// End value, as written by the designer
    #[serde(default)]
    pub to: String,
    /// Delay from the start of the timeline (ms)
    pub delay_ms: i64,
    /// Duration (ms)
    pub duration_ms: i64,
    /// Timing curve
    #[serde(default)]
    pub easing: Easing,
}

impl Property {
    /// Create a new property
    pub fn new(kind: PropertyKind, delay_ms: i64, duration_ms: i64) -> Self {
        Self {
            id: PropertyId::new(),
            kind,
            from: String::new(),
            to: String::new(),
            delay_ms,
            duration_ms,
            easing: Easing::default(),
        }
    }

    /// Set start and end values
    pub fn with_values(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.from = from.into();
        self.to = to.into();
        self
    }

    /// Set the timing curve
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// The span this property is active for
    pub fn interval(&self) -> Interval {
        Interval::from_delay(self.delay_ms, self.duration_ms)
    }

    /// Short human readable summary, e.g. `Opacity 0 → 1`
    pub fn summary(&self) -> String {
        let unit = self.kind.default_unit();
        if self.from.is_empty() && self.to.is_empty() {
            return self.kind.label().to_string();
        }
        format!("{} {}{unit} → {}{unit}", self.kind.label(), self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_interval() {
        let prop = Property::new(PropertyKind::Opacity, 150, 300);
        assert_eq!(prop.interval(), Interval::new(150, 450));
    }

    #[test]
    fn test_summary() {
        let prop = Property::new(PropertyKind::Rotation, 0, 100).with_values("0", "90");
        assert_eq!(prop.summary(), "Rotation 0deg → 90deg");

        let custom = Property::new(PropertyKind::Custom("Blur".into()), 0, 100);
        assert_eq!(custom.summary(), "Blur");
    }

    #[test]
    fn test_easing_display() {
        assert_eq!(Easing::EaseInOut.to_string(), "ease-in-out");
        assert_eq!(
            Easing::CubicBezier([0.4, 0.0, 0.2, 1.0]).to_string(),
            "cubic-bezier(0.4, 0, 0.2, 1)"
        );
    }
}
