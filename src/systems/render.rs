//! Sprite rendering.
//!
//! Called inside a drawing scope with the target to draw on. Animators are
//! collected with their placement, sorted by [`ZIndex`] and drawn back to
//! front through the [`Blitter`] seam.

use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::scale::Scale;
use crate::components::spriteanimator::SpriteAnimator;
use crate::components::zindex::ZIndex;
use crate::resources::rasterizer::Blitter;

/// Draw the current frame of every positioned animator.
///
/// Entities without [`Scale`] draw at 1:1 and entities without [`ZIndex`]
/// sit at layer 0.
pub fn render_sprites<T, B>(world: &mut World, target: &mut B)
where
    T: Send + Sync + 'static,
    B: Blitter<T>,
{
    let mut q = world.query::<(
        &SpriteAnimator<T>,
        &MapPosition,
        Option<&Scale>,
        Option<&ZIndex>,
    )>();
    let mut to_draw: Vec<_> = q
        .iter(world)
        .map(|(animator, pos, scale, z)| {
            (
                animator,
                *pos,
                scale.copied().unwrap_or_default(),
                z.copied().unwrap_or_default(),
            )
        })
        .collect();

    to_draw.sort_by_key(|(_, _, _, z)| *z);

    for (animator, pos, scale, _z) in to_draw {
        animator.render(target, pos.pos.x, pos.pos.y, scale.0);
    }
}
