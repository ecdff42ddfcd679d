//! Frame tick integration tests for atlas loading, animation and rendering.
//!
//! These drive a bevy `World` the way the viewer's main loop does:
//! `update_world_time`, then the update schedule, then `render_sprites`.
//! Textures are stand-ins, so no window is needed.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bevy_ecs::prelude::*;
use raylib::prelude::Rectangle;

use atlasanim::components::mapposition::MapPosition;
use atlasanim::components::scale::Scale;
use atlasanim::components::spriteanimator::SpriteAnimator;
use atlasanim::components::zindex::ZIndex;
use atlasanim::game::{
    build_update_schedule, init_world, load_atlas_into_store, spawn_animated_sprite,
};
use atlasanim::resources::atlasloader::load_atlas_from_str;
use atlasanim::resources::atlasstore::AtlasStore;
use atlasanim::resources::backgroundcolor::BackgroundColor;
use atlasanim::resources::gameconfig::GameConfig;
use atlasanim::resources::rasterizer::{Blitter, TextureLoader};
use atlasanim::resources::spriteatlas::{AtlasError, SpriteAtlas};
use atlasanim::resources::worldtime::WorldTime;
use atlasanim::systems::render::render_sprites;
use atlasanim::systems::time::update_world_time;

/// Texture stand-in: remembers which image it was loaded from.
#[derive(Debug, Clone, PartialEq)]
struct FakeTexture(PathBuf);

struct FakeLoader;

impl TextureLoader for FakeLoader {
    type Texture = FakeTexture;

    fn load_texture(&mut self, path: &Path) -> Result<FakeTexture, String> {
        Ok(FakeTexture(path.to_path_buf()))
    }
}

#[derive(Default)]
struct RecordingBlitter {
    calls: Vec<(PathBuf, Rectangle, Rectangle)>,
}

impl Blitter<FakeTexture> for RecordingBlitter {
    fn blit(&mut self, texture: &FakeTexture, source: Rectangle, dest: Rectangle) {
        self.calls.push((texture.0.clone(), source, dest));
    }
}

const HERO: &str = r#"{
    "frames": {
        "hero 0.aseprite": { "frame": { "x": 0, "y": 0, "w": 16, "h": 16 }, "duration": 100 },
        "hero 1.aseprite": { "frame": { "x": 16, "y": 0, "w": 16, "h": 16 }, "duration": 100 },
        "hero 2.aseprite": { "frame": { "x": 32, "y": 0, "w": 16, "h": 16 }, "duration": 100 },
        "hero 3.aseprite": { "frame": { "x": 48, "y": 0, "w": 16, "h": 16 }, "duration": 100 },
        "hero 4.aseprite": { "frame": { "x": 0, "y": 16, "w": 32, "h": 16 }, "duration": 250 }
    },
    "meta": {
        "app": "http://www.aseprite.org/",
        "image": "hero.png",
        "frameTags": [
            { "name": "walk", "from": 0, "to": 3, "direction": "forward" },
            { "name": "back", "from": 0, "to": 3, "direction": "reverse" },
            { "name": "bob", "from": 0, "to": 3, "direction": "pingpong" },
            { "name": "sleep", "from": 4, "to": 4, "direction": "forward" }
        ]
    }
}"#;

fn hero_atlas() -> Arc<SpriteAtlas<FakeTexture>> {
    Arc::new(load_atlas_from_str(HERO, Path::new("sprites"), &mut FakeLoader).unwrap())
}

fn make_world() -> World {
    let mut world = World::new();
    init_world::<FakeTexture>(&mut world, GameConfig::new());
    world
}

fn tick(world: &mut World, schedule: &mut Schedule, dt_seconds: f32) {
    update_world_time(world, dt_seconds);
    schedule.run(world);
}

fn frame_of(world: &World, entity: Entity) -> usize {
    world
        .get::<SpriteAnimator<FakeTexture>>(entity)
        .unwrap()
        .current_frame()
}

#[test]
fn animation_system_advances_by_world_delta() {
    let mut world = make_world();
    let mut schedule = build_update_schedule::<FakeTexture>();
    let entity = spawn_animated_sprite(&mut world, hero_atlas(), "walk", (0.0, 0.0), 1.0);

    tick(&mut world, &mut schedule, 0.25);
    assert_eq!(frame_of(&world, entity), 2);

    // 50 ms carried over plus 60 ms crosses one more boundary.
    tick(&mut world, &mut schedule, 0.06);
    assert_eq!(frame_of(&world, entity), 3);
}

#[test]
fn one_long_frame_crosses_every_boundary() {
    let mut world = make_world();
    let mut schedule = build_update_schedule::<FakeTexture>();
    let entity = spawn_animated_sprite(&mut world, hero_atlas(), "walk", (0.0, 0.0), 1.0);

    tick(&mut world, &mut schedule, 1.05);
    assert_eq!(frame_of(&world, entity), 2);
}

#[test]
fn time_scale_speeds_up_playback() {
    let mut world = make_world();
    world.resource_mut::<WorldTime>().time_scale = 2.0;
    let mut schedule = build_update_schedule::<FakeTexture>();
    let entity = spawn_animated_sprite(&mut world, hero_atlas(), "walk", (0.0, 0.0), 1.0);

    tick(&mut world, &mut schedule, 0.1);
    assert_eq!(frame_of(&world, entity), 2);
}

#[test]
fn animators_sharing_an_atlas_keep_their_own_state() {
    let mut world = make_world();
    let mut schedule = build_update_schedule::<FakeTexture>();
    let atlas = hero_atlas();
    let walker = spawn_animated_sprite(&mut world, Arc::clone(&atlas), "walk", (0.0, 0.0), 1.0);
    let backer = spawn_animated_sprite(&mut world, Arc::clone(&atlas), "back", (0.0, 0.0), 1.0);
    let bobber = spawn_animated_sprite(&mut world, Arc::clone(&atlas), "bob", (0.0, 0.0), 1.0);

    let mut seen = Vec::new();
    for _ in 0..7 {
        tick(&mut world, &mut schedule, 0.1);
        seen.push((
            frame_of(&world, walker),
            frame_of(&world, backer),
            frame_of(&world, bobber),
        ));
    }
    assert_eq!(
        seen,
        vec![
            (1, 3, 1),
            (2, 2, 2),
            (3, 1, 3),
            (0, 0, 2),
            (1, 3, 1),
            (2, 2, 0),
            (3, 1, 1),
        ]
    );
    // Three animators plus the local handle.
    assert_eq!(Arc::strong_count(&atlas), 4);
}

#[test]
fn unknown_tag_spawns_idle_sprite() {
    let mut world = make_world();
    let mut schedule = build_update_schedule::<FakeTexture>();
    let entity = spawn_animated_sprite(&mut world, hero_atlas(), "missing-tag", (0.0, 0.0), 1.0);

    tick(&mut world, &mut schedule, 5.0);
    let animator = world.get::<SpriteAnimator<FakeTexture>>(entity).unwrap();
    assert!(!animator.is_playing());
    assert_eq!(animator.current_frame(), 0);
}

#[test]
fn playing_unknown_tag_mid_animation_changes_nothing() {
    let mut world = make_world();
    let mut schedule = build_update_schedule::<FakeTexture>();
    let entity = spawn_animated_sprite(&mut world, hero_atlas(), "bob", (0.0, 0.0), 1.0);
    tick(&mut world, &mut schedule, 0.4);
    assert_eq!(frame_of(&world, entity), 2);

    {
        let mut animator = world.get_mut::<SpriteAnimator<FakeTexture>>(entity).unwrap();
        assert!(!animator.play("missing-tag"));
    }
    // Still heading back toward frame 0.
    tick(&mut world, &mut schedule, 0.1);
    assert_eq!(frame_of(&world, entity), 1);
}

#[test]
fn spawned_sprite_is_centred_on_its_first_frame() {
    let mut world = make_world();
    let entity = spawn_animated_sprite(&mut world, hero_atlas(), "sleep", (100.0, 50.0), 2.0);

    // Frame 4 is 32x16; at scale 2 that is 64x32.
    let pos = world.get::<MapPosition>(entity).unwrap();
    assert_eq!(pos.pos.x, 68.0);
    assert_eq!(pos.pos.y, 34.0);
    assert_eq!(*world.get::<Scale>(entity).unwrap(), Scale(2.0));
}

#[test]
fn render_draws_current_frames_in_z_order() {
    let mut world = make_world();
    let mut schedule = build_update_schedule::<FakeTexture>();
    let atlas = hero_atlas();

    let mut front = SpriteAnimator::new(Arc::clone(&atlas));
    front.play("sleep");
    world.spawn((front, MapPosition::new(5.0, 5.0), ZIndex(10)));

    let mut back = SpriteAnimator::new(Arc::clone(&atlas));
    back.play("walk");
    world.spawn((back, MapPosition::new(1.0, 2.0), Scale(3.0), ZIndex(-1)));

    tick(&mut world, &mut schedule, 0.1);

    let mut blitter = RecordingBlitter::default();
    render_sprites::<FakeTexture, _>(&mut world, &mut blitter);

    assert_eq!(blitter.calls.len(), 2);
    let (texture, src, dest) = &blitter.calls[0];
    assert_eq!(texture, &Path::new("sprites").join("hero.png"));
    assert_eq!(src.x, 16.0);
    assert_eq!((dest.x, dest.y, dest.width, dest.height), (1.0, 2.0, 48.0, 48.0));

    let (_, src, dest) = &blitter.calls[1];
    assert_eq!((src.x, src.y), (0.0, 16.0));
    assert_eq!((dest.width, dest.height), (32.0, 16.0));
}

#[test]
fn sprites_without_position_are_not_drawn() {
    let mut world = make_world();
    let mut animator = SpriteAnimator::new(hero_atlas());
    animator.play("walk");
    world.spawn(animator);

    let mut blitter = RecordingBlitter::default();
    render_sprites::<FakeTexture, _>(&mut world, &mut blitter);
    assert!(blitter.calls.is_empty());
}

#[test]
fn background_cycles_with_elapsed_time() {
    let mut world = make_world();
    let mut schedule = build_update_schedule::<FakeTexture>();
    tick(&mut world, &mut schedule, 0.0);
    let first = *world.resource::<BackgroundColor>();
    tick(&mut world, &mut schedule, 0.5);
    let second = *world.resource::<BackgroundColor>();
    assert_ne!(first, second);
}

#[test]
fn atlas_loaded_from_disk_lands_in_store() {
    let dir = std::env::temp_dir().join("atlasanim_tick_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("hero.json");
    std::fs::write(&path, HERO).unwrap();

    let mut world = make_world();
    let atlas = load_atlas_into_store(&mut world, "hero", &path, &mut FakeLoader).unwrap();
    assert_eq!(atlas.texture(), &FakeTexture(dir.join("hero.png")));

    let store = world.resource::<AtlasStore<FakeTexture>>();
    let stored = store.get("hero").unwrap();
    assert!(Arc::ptr_eq(&atlas, &stored));
    assert_eq!(stored.frame_count(), 5);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn failed_load_leaves_store_untouched() {
    let mut world = make_world();
    let missing = std::env::temp_dir().join("atlasanim_absent/none.json");
    let result = load_atlas_into_store(&mut world, "none", &missing, &mut FakeLoader);
    assert!(matches!(result, Err(AtlasError::FileNotFound { .. })));
    assert!(world.resource::<AtlasStore<FakeTexture>>().is_empty());
}
