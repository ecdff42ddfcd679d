//! Background colour cycling.
//!
//! Drives each channel of [`BackgroundColor`] with a sine of elapsed world
//! time, the three channels a third of a turn apart, so the clear colour
//! slowly walks around the hue circle.

use std::f32::consts::PI;

use bevy_ecs::prelude::*;

use crate::resources::backgroundcolor::BackgroundColor;
use crate::resources::worldtime::WorldTime;

const BASE: f32 = 0.3;
const AMPLITUDE: f32 = 0.3;
/// Angular speed in radians per second.
const SPEED: f32 = 3.0;

/// Colour for a given elapsed time in seconds.
pub fn background_at(t: f32) -> BackgroundColor {
    let wave = |phase: f32| BASE + AMPLITUDE * (t * SPEED + phase).sin();
    BackgroundColor {
        r: wave(0.0),
        g: wave(PI * (2.0 / 3.0)),
        b: wave(PI * (4.0 / 3.0)),
    }
}

pub fn cycle_background(time: Res<WorldTime>, mut background: ResMut<BackgroundColor>) {
    *background = background_at(time.elapsed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_at_zero() {
        let bg = background_at(0.0);
        assert!((bg.r - 0.3).abs() < 1e-6);
        assert!((bg.g - (0.3 + 0.3 * (2.0 * PI / 3.0).sin())).abs() < 1e-6);
    }

    #[test]
    fn test_background_channels_stay_in_range() {
        for i in 0..200 {
            let bg = background_at(i as f32 * 0.05);
            for c in [bg.r, bg.g, bg.b] {
                assert!((-1e-6..=0.6 + 1e-6).contains(&c));
            }
        }
    }

    #[test]
    fn test_to_color_is_opaque() {
        let color = background_at(1.0).to_color();
        assert_eq!(color.a, 255);
    }
}
