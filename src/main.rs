//! Atlas animation viewer.
//!
//! Opens a raylib window, loads a packed sprite sheet and plays one of its
//! tags in the middle of the screen over a slowly cycling background.
//!
//! # Main Loop
//!
//! 1. Read `config.ini` (or `--config`), then apply command line overrides
//! 2. Open the window and load the atlas texture through raylib
//! 3. Spawn one [`SpriteAnimator`] playing the configured tag
//! 4. Each frame: update [`WorldTime`](atlasanim::resources::worldtime::WorldTime),
//!    run the update schedule, clear, draw sprites and the status line
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --atlas assets/sprites/slime.json --tag bounce --scale 6
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use atlasanim::components::spriteanimator::SpriteAnimator;
use atlasanim::game::{
    build_update_schedule, init_world, load_atlas_into_store, spawn_animated_sprite,
};
use atlasanim::resources::backgroundcolor::BackgroundColor;
use atlasanim::resources::gameconfig::GameConfig;
use atlasanim::resources::rasterizer::RaylibTextureLoader;
use atlasanim::systems::render::render_sprites;
use atlasanim::systems::time::update_world_time;
use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};
use raylib::prelude::*;

/// Atlas animation viewer
#[derive(Parser)]
#[command(version, about = "Plays tagged animations from a packed sprite sheet.")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Atlas metadata JSON. Overrides `[sprite] atlas`.
    #[arg(long, value_name = "PATH")]
    atlas: Option<PathBuf>,

    /// Tag to play. Overrides `[sprite] tag`.
    #[arg(long)]
    tag: Option<String>,

    /// Uniform draw scale. Overrides `[sprite] scale`.
    #[arg(long)]
    scale: Option<f32>,
}

fn status_line(world: &World, entity: Entity) -> String {
    match world.get::<SpriteAnimator<Texture2D>>(entity) {
        Some(animator) => match animator.active_tag() {
            Some(tag) => format!(
                "{} ({}) frame {}",
                tag.name,
                tag.direction.name(),
                animator.current_frame()
            ),
            None => format!("idle frame {}", animator.current_frame()),
        },
        None => String::new(),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if let Some(atlas) = cli.atlas {
        config.atlas_path = atlas;
    }
    if let Some(tag) = cli.tag {
        config.tag = tag;
    }
    if let Some(scale) = cli.scale.filter(|s| *s > 0.0) {
        config.scale = scale;
    }

    // --------------- Raylib window ---------------
    let (window_width, window_height) = config.window_size();
    let mut builder = raylib::init();
    builder
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("Atlas Animation");
    if config.vsync {
        builder.vsync();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);

    // --------------- ECS world + atlas ---------------
    // Declared after the window so textures are released before it closes.
    let mut world = World::new();
    init_world::<Texture2D>(&mut world, config.clone());

    let atlas = {
        let mut loader = RaylibTextureLoader::new(&mut rl, &thread);
        match load_atlas_into_store(&mut world, "sprite", &config.atlas_path, &mut loader) {
            Ok(atlas) => atlas,
            Err(e) => {
                error!("Failed to load atlas {:?}: {}", config.atlas_path, e);
                return ExitCode::FAILURE;
            }
        }
    };

    let center = (
        rl.get_screen_width() as f32 * 0.5,
        rl.get_screen_height() as f32 * 0.5,
    );
    let sprite = spawn_animated_sprite(&mut world, atlas, &config.tag, center, config.scale);

    let mut update = build_update_schedule::<Texture2D>();

    info!("Entering main loop");
    // --------------- Main loop ---------------
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();

        let clear = world.resource::<BackgroundColor>().to_color();
        let status = status_line(&world, sprite);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(clear);
        render_sprites::<Texture2D, _>(&mut world, &mut d);
        d.draw_text(&status, 10, 10, 20, Color::RAYWHITE);
        d.draw_fps(10, 36);
    }

    ExitCode::SUCCESS
}
