// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caller-supplied styling and measurement parameters.

use kurbo::RoundedRectRadii;

/// A straight-alpha RGBA color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgba8(0xff, 0xff, 0xff, 0xff);

    /// Creates a color from its components.
    #[must_use]
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Geometry of the popup surface and its item column.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MenuMeasurements {
    /// Surface elevation, in logical pixels.
    pub elevation: f64,
    /// Corner radii of the surface.
    pub popup_shape: RoundedRectRadii,
    /// Space above the first item.
    pub menu_top_padding: f64,
    /// Space below the last item.
    pub menu_bottom_padding: f64,
}

impl Default for MenuMeasurements {
    fn default() -> Self {
        Self {
            elevation: 4.0,
            popup_shape: RoundedRectRadii::from_single_radius(4.0),
            menu_top_padding: 4.0,
            menu_bottom_padding: 4.0,
        }
    }
}

/// Colors of the popup surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MenuColors {
    /// Background of the popup surface.
    pub surface: Color,
}

impl Default for MenuColors {
    fn default() -> Self {
        Self {
            surface: Color::WHITE,
        }
    }
}

/// Read-only configuration bundle supplied when a popup is opened.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MenuParams {
    /// Surface and column geometry.
    pub measurements: MenuMeasurements,
    /// Surface colors.
    pub colors: MenuColors,
    /// Show a scrollbar when the item column overflows.
    pub show_scrollbar_on_overflow: bool,
    /// Wrap the item column in a scroll region.
    ///
    /// When `false` the column takes its natural height, however tall.
    pub scrollable: bool,
}

impl Default for MenuParams {
    fn default() -> Self {
        Self {
            measurements: MenuMeasurements::default(),
            colors: MenuColors::default(),
            show_scrollbar_on_overflow: true,
            scrollable: true,
        }
    }
}
