//! Game configuration resource.
//!
//! Manages window and sprite settings loaded from an INI configuration file.
//! Provides defaults for safe startup and methods to load/save configuration.
//! Command line flags override whatever the file sets (see `main.rs`).
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 800
//! height = 600
//! target_fps = 60
//! vsync = true
//!
//! [sprite]
//! atlas = assets/sprites/character.json
//! tag = idle
//! scale = 4.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 800;
const DEFAULT_WINDOW_HEIGHT: u32 = 600;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_ATLAS_PATH: &str = "./assets/sprites/character.json";
const DEFAULT_TAG: &str = "idle";
const DEFAULT_SCALE: f32 = 4.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    /// Atlas metadata file to load at startup.
    pub atlas_path: PathBuf,
    /// Tag played once the atlas is loaded.
    pub tag: String,
    /// Uniform draw scale of the sprite.
    pub scale: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            atlas_path: PathBuf::from(DEFAULT_ATLAS_PATH),
            tag: DEFAULT_TAG.to_string(),
            scale: DEFAULT_SCALE,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }

        // [sprite] section
        if let Some(atlas) = config.get("sprite", "atlas") {
            self.atlas_path = PathBuf::from(atlas);
        }
        if let Some(tag) = config.get("sprite", "tag") {
            self.tag = tag;
        }
        if let Some(scale) = config.getfloat("sprite", "scale").ok().flatten() {
            if scale > 0.0 {
                self.scale = scale as f32;
            }
        }

        info!(
            "Loaded config: {}x{} window, fps={}, vsync={}, atlas={:?}, tag={:?}, scale={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.atlas_path,
            self.tag,
            self.scale
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));

        // [sprite] section
        config.set(
            "sprite",
            "atlas",
            Some(self.atlas_path.to_string_lossy().into_owned()),
        );
        config.set("sprite", "tag", Some(self.tag.clone()));
        config.set("sprite", "scale", Some(self.scale.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}
