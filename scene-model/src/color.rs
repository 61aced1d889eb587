//! Vertex and material colors

use serde::{Deserialize, Serialize};

/// RGB color, components nominally in 0..1 but not clamped
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color3 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color3 {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color4 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color4 {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color4 {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<Color3> for Color4 {
    fn from(c: Color3) -> Self {
        Self::new(c.r, c.g, c.b, 1.0)
    }
}
