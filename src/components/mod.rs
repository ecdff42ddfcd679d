//! ECS components.
//!
//! - [`spriteanimator`] – per-sprite playback state over a shared atlas
//! - [`mapposition`] – where the sprite is drawn
//! - [`scale`] – uniform draw scale
//! - [`zindex`] – draw order

pub mod mapposition;
pub mod scale;
pub mod spriteanimator;
pub mod zindex;
