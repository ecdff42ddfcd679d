//! ECS systems.
//!
//! - [`time`] – advances [`WorldTime`](crate::resources::worldtime::WorldTime)
//! - [`spriteanimation`] – ticks every sprite animator
//! - [`background`] – cycles the clear colour
//! - [`render`] – draws sprites in z order

pub mod background;
pub mod render;
pub mod spriteanimation;
pub mod time;
