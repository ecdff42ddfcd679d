//! World time resource.
//!
//! Holds the scaled frame delta and total elapsed time, both in seconds.
//! Written once per frame by [`update_world_time`](crate::systems::time::update_world_time)
//! and read by the animation and background systems.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Scaled frame delta in milliseconds, the unit animators count in.
    pub fn delta_ms(&self) -> f32 {
        self.delta * 1000.0
    }
}
