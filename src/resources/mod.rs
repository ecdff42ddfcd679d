//! ECS resources and the atlas core.
//!
//! - [`spriteatlas`] – immutable frames, tags and texture
//! - [`atlasloader`] – JSON metadata parsing into a [`spriteatlas::SpriteAtlas`]
//! - [`rasterizer`] – texture loading and blitting seam, with raylib impls
//! - [`atlasstore`] – loaded atlases by key
//! - [`worldtime`], [`backgroundcolor`], [`gameconfig`] – per-frame state and settings

pub mod atlasloader;
pub mod atlasstore;
pub mod backgroundcolor;
pub mod gameconfig;
pub mod rasterizer;
pub mod spriteatlas;
pub mod worldtime;
