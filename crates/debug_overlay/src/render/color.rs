//! Linear RGB colors for overlay primitives

use serde::{Deserialize, Serialize};

/// Linear RGB color, components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Color {
    /// Pure red
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    /// Pure green
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    /// Pure blue
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);
    /// White
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    /// Yellow
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0);
    /// Mid grey, used for grids
    pub const GREY: Self = Self::new(0.5, 0.5, 0.5);

    /// Create a color from components
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create from a packed `0xRRGGBB` value
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    /// Components as an array
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
