//! Sprite animation system.
//!
//! Ticks every [`SpriteAnimator`] once per frame with the scaled world delta.
//! The system is generic over the texture type so it runs the same way with
//! raylib textures in the game and with placeholder textures in tests.
//!
//! # Related
//!
//! - [`crate::components::spriteanimator::SpriteAnimator`] – playback state
//! - [`crate::resources::worldtime::WorldTime`] – frame delta source

use bevy_ecs::prelude::*;

use crate::components::spriteanimator::SpriteAnimator;
use crate::resources::worldtime::WorldTime;

/// Advance all animators by this frame's delta.
///
/// Contract
/// - Reads [`WorldTime`] and converts its delta to milliseconds.
/// - Calls [`SpriteAnimator::update`] exactly once per animator.
pub fn sprite_animation<T: Send + Sync + 'static>(
    mut query: Query<&mut SpriteAnimator<T>>,
    time: Res<WorldTime>,
) {
    let dt_ms = time.delta_ms();
    for mut animator in query.iter_mut() {
        animator.update(dt_ms);
    }
}
