//! Atlas animation library.
//!
//! Loads packed sprite sheets (texture + JSON frame/tag metadata) and plays
//! their tagged frame sequences with per-frame timing. Exposes the ECS
//! components, resources and systems for use by the viewer binary and in
//! integration tests.

pub mod components;
pub mod game;
pub mod resources;
pub mod systems;
