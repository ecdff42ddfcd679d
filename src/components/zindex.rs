//! Z-index component for render ordering.
//!
//! Sprites with higher z-index values are drawn on top of those with lower
//! values; see [`render_sprites`](crate::systems::render::render_sprites).

use bevy_ecs::prelude::Component;

/// Rendering order hint for 2D drawing. Higher values are drawn later.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);
