//! Clear colour resource.
//!
//! The frame is cleared with this colour before sprites are drawn. It is
//! animated by [`cycle_background`](crate::systems::background::cycle_background).

use bevy_ecs::prelude::Resource;
use raylib::prelude::Color;

/// Normalized RGB clear colour.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct BackgroundColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for BackgroundColor {
    fn default() -> Self {
        Self {
            r: 0.1,
            g: 0.1,
            b: 0.2,
        }
    }
}

impl BackgroundColor {
    pub fn to_color(self) -> Color {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color::new(channel(self.r), channel(self.g), channel(self.b), 255)
    }
}
