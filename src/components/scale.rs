use bevy_ecs::prelude::Component;

/// Uniform draw scale applied to a sprite's frame size.
#[derive(Component, Clone, Debug, Copy, PartialEq)]
pub struct Scale(pub f32);

impl Default for Scale {
    fn default() -> Self {
        Scale(1.0)
    }
}
