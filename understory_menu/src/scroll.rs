// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Optional vertical scrolling for the item column.
//!
//! [`ScrollGate`] decides whether the column is wrapped in a scroll region and
//! whether a scrollbar is attached, and keeps the scroll offset for that region.
//!
//! - Scrolling disabled: the column is [`ScrollLayout::Unconstrained`] and
//!   takes its natural height; there is no offset and no scrollbar.
//! - Scrolling enabled: the column is [`ScrollLayout::Scrolling`]. The viewport
//!   is the smaller of the content and the available extent. The scrollbar is
//!   shown only if the caller opted in *and* the content overflows.
//!
//! A region whose content fits is still a region: it simply has a maximum
//! offset of zero, so later resizes do not change the structure.
//!
//! ```
//! use understory_menu::scroll::{ScrollGate, ScrollLayout};
//!
//! let mut gate = ScrollGate::new(true, true);
//! let layout = gate.layout(300.0, 200.0);
//! assert_eq!(layout, ScrollLayout::Scrolling { viewport: 200.0, content: 300.0, scrollbar: true });
//!
//! gate.scroll_by(500.0);
//! assert_eq!(gate.scroll_offset(), 100.0);
//! ```

use kurbo::Size;

use crate::style::MenuMeasurements;

/// How the item column is presented.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ScrollLayout {
    /// No scroll region; the column takes its full natural extent.
    Unconstrained {
        /// Natural extent of the column.
        extent: f64,
    },
    /// The column sits inside a scroll region.
    Scrolling {
        /// Visible extent of the region.
        viewport: f64,
        /// Full extent of the column.
        content: f64,
        /// Whether a scrollbar is attached.
        scrollbar: bool,
    },
}

impl ScrollLayout {
    /// Extent the column occupies on screen.
    #[must_use]
    pub const fn visible_extent(&self) -> f64 {
        match *self {
            Self::Unconstrained { extent } => extent,
            Self::Scrolling { viewport, .. } => viewport,
        }
    }

    /// Returns `true` if a scrollbar should be drawn.
    #[must_use]
    pub const fn shows_scrollbar(&self) -> bool {
        matches!(self, Self::Scrolling { scrollbar: true, .. })
    }
}

/// Scroll region decision plus scroll state for the item column.
#[derive(Clone, Debug)]
pub struct ScrollGate {
    scroll_enabled: bool,
    show_scrollbar_on_overflow: bool,
    scroll_offset: f64,
    viewport_extent: f64,
    content_extent: f64,
}

impl ScrollGate {
    /// Creates a gate.
    ///
    /// `scroll_enabled` decides whether a scroll region exists at all;
    /// `show_scrollbar_on_overflow` is the caller's opt-in for a scrollbar.
    #[must_use]
    pub const fn new(scroll_enabled: bool, show_scrollbar_on_overflow: bool) -> Self {
        Self {
            scroll_enabled,
            show_scrollbar_on_overflow,
            scroll_offset: 0.0,
            viewport_extent: 0.0,
            content_extent: 0.0,
        }
    }

    /// Returns `true` if the column is wrapped in a scroll region.
    #[must_use]
    pub const fn is_scroll_enabled(&self) -> bool {
        self.scroll_enabled
    }

    /// Lays out a column of `content_extent` in `available_extent` of space.
    ///
    /// Negative or non-finite inputs are treated as zero / unbounded
    /// respectively. The current offset is re-clamped to the new range.
    pub fn layout(&mut self, content_extent: f64, available_extent: f64) -> ScrollLayout {
        let content = if content_extent.is_finite() {
            content_extent.max(0.0)
        } else {
            0.0
        };
        let available = if available_extent.is_nan() {
            f64::INFINITY
        } else {
            available_extent.max(0.0)
        };

        self.content_extent = content;
        if !self.scroll_enabled {
            self.viewport_extent = content;
            self.scroll_offset = 0.0;
            return ScrollLayout::Unconstrained { extent: content };
        }

        let overflows = content > available;
        self.viewport_extent = content.min(available);
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll_offset());
        ScrollLayout::Scrolling {
            viewport: self.viewport_extent,
            content,
            scrollbar: self.show_scrollbar_on_overflow && overflows,
        }
    }

    /// Current scroll offset.
    #[must_use]
    pub const fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Largest valid offset for the last layout; zero when the content fits.
    #[must_use]
    pub fn max_scroll_offset(&self) -> f64 {
        (self.content_extent - self.viewport_extent).max(0.0)
    }

    /// Sets the scroll offset, clamped to `0..=max_scroll_offset()`.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        if !self.scroll_enabled || offset.is_nan() {
            return;
        }
        self.scroll_offset = offset.clamp(0.0, self.max_scroll_offset());
    }

    /// Adjusts the scroll offset by `delta`.
    pub fn scroll_by(&mut self, delta: f64) {
        self.set_scroll_offset(self.scroll_offset + delta);
    }

    /// Scrolls the least distance that makes `start..end` fully visible.
    ///
    /// Spans taller than the viewport are aligned to their start.
    pub fn reveal(&mut self, start: f64, end: f64) {
        let view_start = self.scroll_offset;
        let view_end = view_start + self.viewport_extent;
        if start >= view_start && end <= view_end {
            return;
        }
        let target = if start < view_start || end - start > self.viewport_extent {
            start
        } else {
            end - self.viewport_extent
        };
        self.set_scroll_offset(target);
    }
}

/// Natural size of the item column.
///
/// The column is as wide as its widest item and as tall as all items plus the
/// top and bottom padding.
#[must_use]
pub fn measure_column(item_sizes: &[Size], measurements: &MenuMeasurements) -> Size {
    let width = item_sizes
        .iter()
        .map(|s| s.width)
        .fold(0.0_f64, f64::max);
    let items: f64 = item_sizes.iter().map(|s| s.height).sum();
    Size::new(
        width,
        measurements.menu_top_padding + items + measurements.menu_bottom_padding,
    )
}
