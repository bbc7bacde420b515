//! Per-call draw options
//!
//! Every `draw_*` call takes a [`DrawOptions`]; composite primitives carry
//! their own extra options, whose defaults come from the overlay config.

use crate::render::color::Color;
use serde::{Deserialize, Serialize};

/// Material and thickness settings shared by all draw calls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawOptions {
    /// Material color
    pub color: Color,
    /// Material opacity in `[0, 1]`
    pub opacity: f32,
    /// Render through occluders (disables depth testing)
    pub draw_through: bool,
    /// Tube radius for line segments
    pub thickness: f32,
}

impl DrawOptions {
    /// Default options with a different color
    pub fn color(color: Color) -> Self {
        Self { color, ..Self::default() }
    }

    /// Set the opacity
    pub const fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Set the line thickness
    pub const fn with_thickness(mut self, thickness: f32) -> Self {
        self.thickness = thickness;
        self
    }

    /// Render through occluders
    pub const fn through_occluders(mut self) -> Self {
        self.draw_through = true;
        self
    }

    /// Whether the host material should depth test
    pub const fn depth_test(&self) -> bool {
        !self.draw_through
    }
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            opacity: 1.0,
            draw_through: false,
            thickness: 0.01,
        }
    }
}

/// Arrowhead proportions for vectors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorOptions {
    /// Arrowhead length, clamped to the vector length
    pub head_length: f32,
    /// Arrowhead base radius
    pub head_radius: f32,
}

impl Default for VectorOptions {
    fn default() -> Self {
        Self {
            head_length: 0.15,
            head_radius: 0.05,
        }
    }
}

/// Grid plane layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    /// Cells along each span; 0 is treated as 1
    pub divisions: u32,
    /// Opacity of the filled backing quad; 0 draws no quad
    pub fill_opacity: f32,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            divisions: 10,
            fill_opacity: 0.15,
        }
    }
}

/// Number line tick layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberLineOptions {
    /// Distance between ticks; non-positive draws no ticks
    pub tick_spacing: f32,
    /// Full length of each tick mark
    pub tick_size: f32,
    /// Upper bound on ticks per line
    pub max_ticks: u32,
}

impl Default for NumberLineOptions {
    fn default() -> Self {
        Self {
            tick_spacing: 1.0,
            tick_size: 0.1,
            max_ticks: 1000,
        }
    }
}
