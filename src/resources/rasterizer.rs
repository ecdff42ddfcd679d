//! Rasterizer seam.
//!
//! The atlas core never talks to raylib directly. It loads its image through a
//! [`TextureLoader`] and draws through a [`Blitter`], which keeps the loading
//! and timing code testable without a window. The raylib implementations live
//! here too:
//!
//! - [`RaylibTextureLoader`] decodes and uploads images with `load_texture`.
//! - Every [`RaylibDraw`] handle is a [`Blitter`] for [`Texture2D`].

use std::path::Path;

use raylib::prelude::*;

/// Decodes an image file and produces a texture handle the core treats as
/// opaque.
pub trait TextureLoader {
    type Texture;

    /// Load the image at `path`. The error string ends up in
    /// [`AtlasError::ImageDecodeFailure`](crate::resources::spriteatlas::AtlasError::ImageDecodeFailure).
    fn load_texture(&mut self, path: &Path) -> Result<Self::Texture, String>;
}

/// Copies a source rectangle of a texture to a destination rectangle on the
/// current target surface.
pub trait Blitter<T> {
    fn blit(&mut self, texture: &T, source: Rectangle, dest: Rectangle);
}

/// Loads textures into GPU memory through raylib.
///
/// Requires an open window, so it borrows the handle and thread for the
/// duration of the atlas load only.
pub struct RaylibTextureLoader<'a> {
    rl: &'a mut RaylibHandle,
    thread: &'a RaylibThread,
}

impl<'a> RaylibTextureLoader<'a> {
    pub fn new(rl: &'a mut RaylibHandle, thread: &'a RaylibThread) -> Self {
        Self { rl, thread }
    }
}

impl TextureLoader for RaylibTextureLoader<'_> {
    type Texture = Texture2D;

    fn load_texture(&mut self, path: &Path) -> Result<Texture2D, String> {
        let filename = path.to_string_lossy();
        self.rl
            .load_texture(self.thread, &filename)
            .map_err(|e| e.to_string())
    }
}

impl<D: RaylibDraw> Blitter<Texture2D> for D {
    fn blit(&mut self, texture: &Texture2D, source: Rectangle, dest: Rectangle) {
        self.draw_texture_pro(texture, source, dest, Vector2::zero(), 0.0, Color::WHITE);
    }
}
