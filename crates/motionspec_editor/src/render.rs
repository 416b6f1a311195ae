// SPDX-License-Identifier: MIT OR Apache-2.0
//! Plain-text timeline rendering.
//!
//! Draws each property as a bar of block characters on a fixed-width axis,
//! positioned with the compressed timeline scale.

use crate::settings::RenderSettings;
use motionspec_timeline::{BarLayout, TimelineLayout, TimelineScale};

const FILLED: char = '█';
const EMPTY: char = '·';
const MARKER: char = '◆';

/// Renders layouts and scales as text
#[derive(Debug, Clone)]
pub struct TextRenderer {
    bar_width: usize,
    label_width: usize,
}

impl TextRenderer {
    /// Create a renderer from settings
    pub fn new(settings: &RenderSettings) -> Self {
        Self {
            bar_width: settings.bar_width.max(10),
            label_width: settings.label_width.max(8),
        }
    }

    /// Set the width of the bar area
    pub fn with_bar_width(mut self, bar_width: usize) -> Self {
        self.bar_width = bar_width.max(10);
        self
    }

    /// Render every track of a layout, followed by the axis
    pub fn render_layout(&self, layout: &TimelineLayout) -> String {
        let mut out = String::new();

        for track in &layout.tracks {
            out.push_str(&track.name);
            out.push('\n');

            if track.bars.is_empty() {
                out.push_str("  (no properties)\n");
                continue;
            }

            for bar in &track.bars {
                out.push_str(&format!(
                    "  {label:<width$} {bar} {start}–{end}ms\n",
                    label = truncate(&bar.label, self.label_width),
                    width = self.label_width,
                    bar = self.draw_bar(bar),
                    start = bar.start_ms,
                    end = bar.end_ms,
                ));
            }
        }

        out.push_str(&self.axis(layout));
        out
    }

    /// Render the segment table of a scale
    pub fn render_segments(&self, scale: &TimelineScale) -> String {
        if scale.is_empty() {
            return "No intervals\n".to_string();
        }

        let mut out = format!(
            "{:>8} {:>8} {:>6} {:>10} {:>10}\n",
            "start", "end", "state", "real ms", "visual"
        );
        for segment in scale.segments() {
            out.push_str(&format!(
                "{:>8} {:>8} {:>6} {:>10} {:>10.1}\n",
                segment.start,
                segment.end,
                if segment.active { "active" } else { "idle" },
                segment.duration(),
                segment.visual,
            ));
        }
        out.push_str(&format!(
            "total: {}ms real, {:.1} visual\n",
            scale.total_duration(),
            scale.total_visual_duration()
        ));
        out
    }

    fn draw_bar(&self, bar: &BarLayout) -> String {
        let width = self.bar_width;
        let to_cell = |percent: f64| percent / 100.0 * width as f64;

        let mut cells = vec![EMPTY; width];
        if bar.width <= 0.0 {
            let cell = (to_cell(bar.left).floor() as usize).min(width - 1);
            cells[cell] = MARKER;
        } else {
            let first = (to_cell(bar.left).floor() as usize).min(width - 1);
            let last = (to_cell(bar.right()).ceil() as usize).clamp(first + 1, width);
            for cell in &mut cells[first..last] {
                *cell = FILLED;
            }
        }

        format!("|{}|", cells.into_iter().collect::<String>())
    }

    fn axis(&self, layout: &TimelineLayout) -> String {
        let (start, end) = layout.axis_labels();
        // Bar area starts after the indent, the label column and the '|'
        let indent = 2 + self.label_width + 2;
        let gap = (self.bar_width + 2).saturating_sub(start.len() + end.len());
        format!("{:indent$}{start}{:gap$}{end}\n", "", "")
    }
}

fn truncate(label: &str, width: usize) -> String {
    if label.chars().count() <= width {
        return label.to_string();
    }
    let mut short: String = label.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}
