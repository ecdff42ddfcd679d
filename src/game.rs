//! Scene setup.
//!
//! Helpers that put the sprite viewer's resources into a [`World`], load an
//! atlas into the [`AtlasStore`], spawn animated sprites and build the
//! per-frame [`Schedule`]. They are generic over the texture type so tests
//! can run the whole tick without a window.

use std::path::Path;
use std::sync::Arc;

use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::mapposition::MapPosition;
use crate::components::scale::Scale;
use crate::components::spriteanimator::SpriteAnimator;
use crate::components::zindex::ZIndex;
use crate::resources::atlasloader::load_atlas;
use crate::resources::atlasstore::AtlasStore;
use crate::resources::backgroundcolor::BackgroundColor;
use crate::resources::gameconfig::GameConfig;
use crate::resources::rasterizer::TextureLoader;
use crate::resources::spriteatlas::{AtlasError, SpriteAtlas};
use crate::resources::worldtime::WorldTime;
use crate::systems::background::cycle_background;
use crate::systems::spriteanimation::sprite_animation;

/// Insert the resources every frame relies on.
pub fn init_world<T: Send + Sync + 'static>(world: &mut World, config: GameConfig) {
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(BackgroundColor::default());
    world.insert_resource(AtlasStore::<T>::new());
    world.insert_resource(config);
}

/// Load the atlas at `path` and register it in the [`AtlasStore`] under `key`.
pub fn load_atlas_into_store<L>(
    world: &mut World,
    key: &str,
    path: impl AsRef<Path>,
    loader: &mut L,
) -> Result<Arc<SpriteAtlas<L::Texture>>, AtlasError>
where
    L: TextureLoader,
    L::Texture: Send + Sync + 'static,
{
    let atlas = load_atlas(path, loader)?;
    let mut store = world.get_resource_or_insert_with(AtlasStore::<L::Texture>::new);
    Ok(store.insert(key, atlas))
}

/// Spawn a sprite playing `tag`, centred on `center` at the given scale.
///
/// An unknown tag leaves the sprite idle on frame 0.
pub fn spawn_animated_sprite<T: Send + Sync + 'static>(
    world: &mut World,
    atlas: Arc<SpriteAtlas<T>>,
    tag: &str,
    center: (f32, f32),
    scale: f32,
) -> Entity {
    let mut animator = SpriteAnimator::new(atlas);
    if !animator.play(tag) {
        warn!("Tag {:?} not found in atlas, sprite stays idle", tag);
    }
    let (w, h) = animator
        .atlas()
        .get_frame(animator.current_frame())
        .map(|frame| (frame.source.width * scale, frame.source.height * scale))
        .unwrap_or((0.0, 0.0));
    let position = MapPosition::new(center.0 - w * 0.5, center.1 - h * 0.5);
    let entity = world
        .spawn((animator, position, Scale(scale), ZIndex(0)))
        .id();
    info!("Spawned animated sprite {:?} playing {:?}", entity, tag);
    entity
}

/// Systems run once per frame, after [`update_world_time`](crate::systems::time::update_world_time).
pub fn build_update_schedule<T: Send + Sync + 'static>() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(cycle_background);
    update.add_systems(sprite_animation::<T>);
    update
}
