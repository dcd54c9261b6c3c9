use serde::{Deserialize, Serialize};

/// Opaque RGB color handed to the host canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const LAVA: Color = Color::rgb(255, 69, 0);
    pub const CRUMBLE: Color = Color::rgb(200, 100, 50);
    pub const SPIKE: Color = Color::rgb(90, 90, 90);
    pub const GOLD: Color = Color::rgb(255, 195, 18);
    pub const GOAL: Color = Color::rgb(130, 88, 255);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

