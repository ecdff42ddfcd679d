//! Sprite animator component.
//!
//! A [`SpriteAnimator`] plays the frames of one [`FrameTag`] from a shared
//! [`SpriteAtlas`]. It accumulates elapsed milliseconds and, every time the
//! accumulator reaches the current frame's duration, steps the frame index
//! according to the tag's [`Direction`]:
//!
//! - `Forward`: `from, from+1, .., to, from, ..`
//! - `Reverse`: `to, to-1, .., from, to, ..` (playback starts at `from`, so the
//!   first step wraps to `to`)
//! - `PingPong`: `from, .., to, to-1, .., from, from+1, ..` with each endpoint
//!   shown once per turn
//!
//! The animator holds the atlas through an [`Arc`], so an animator can never
//! outlive the frames it indexes into. See
//! [`crate::systems::spriteanimation`] for the system that ticks animators.

use std::sync::Arc;

use bevy_ecs::prelude::Component;
use log::{debug, error};

use crate::resources::rasterizer::Blitter;
use crate::resources::spriteatlas::{Direction, FrameTag, SpriteAtlas};

/// Per-entity playback state over a shared atlas.
///
/// Idle until [`play`](Self::play) selects a tag; [`current_frame`](Self::current_frame)
/// is `0` while idle.
#[derive(Component)]
pub struct SpriteAnimator<T: Send + Sync + 'static> {
    atlas: Arc<SpriteAtlas<T>>,
    current_frame: usize,
    elapsed_ms: f32,
    /// Index into the atlas tag list.
    tag: Option<usize>,
    ping_pong_forward: bool,
}

impl<T: Send + Sync + 'static> SpriteAnimator<T> {
    pub fn new(atlas: Arc<SpriteAtlas<T>>) -> Self {
        Self {
            atlas,
            current_frame: 0,
            elapsed_ms: 0.0,
            tag: None,
            ping_pong_forward: true,
        }
    }

    /// Start playing the first tag named `tag_name` from its first frame.
    ///
    /// An unknown name leaves the animator exactly as it was. Returns whether
    /// the tag was found.
    pub fn play(&mut self, tag_name: &str) -> bool {
        let Some(index) = self.atlas.find_tag_index(tag_name) else {
            debug!("Tag {:?} not found, keeping current animation", tag_name);
            return false;
        };
        let tag = &self.atlas.tags()[index];
        debug!(
            "Playing tag {:?} (frames {}..={}, {})",
            tag.name,
            tag.from,
            tag.to,
            tag.direction.name()
        );
        self.current_frame = tag.from;
        self.tag = Some(index);
        self.elapsed_ms = 0.0;
        self.ping_pong_forward = true;
        true
    }

    /// Return to the idle state.
    pub fn stop(&mut self) {
        self.tag = None;
        self.current_frame = 0;
        self.elapsed_ms = 0.0;
        self.ping_pong_forward = true;
    }

    /// Advance playback by `dt_ms` milliseconds.
    ///
    /// Crosses as many frame boundaries as `dt_ms` covers, honoring each
    /// frame's own duration. Whole playback cycles are skipped in one step,
    /// so a huge delta costs no more than a small one. Idle animators,
    /// single-frame tags and non-positive or non-finite deltas are left
    /// untouched.
    pub fn update(&mut self, dt_ms: f32) {
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }
        let atlas = &*self.atlas;
        let Some(tag) = self.tag.and_then(|index| atlas.tag(index)) else {
            return;
        };
        if tag.is_single_frame() {
            return;
        }
        let Some(cycle) = cycle_ms(atlas, tag) else {
            error!("Animator stopped: tag {:?} has no frames", tag.name);
            self.tag = None;
            return;
        };

        // A full cycle lands on the same frame with the same heading.
        self.elapsed_ms += dt_ms % cycle;
        loop {
            let duration = match atlas.get_frame(self.current_frame) {
                Ok(frame) => frame.duration_ms as f32,
                Err(err) => {
                    error!("Animator stopped: {}", err);
                    self.tag = None;
                    return;
                }
            };
            if self.elapsed_ms < duration {
                break;
            }
            self.elapsed_ms -= duration;
            (self.current_frame, self.ping_pong_forward) =
                next_frame(tag, self.current_frame, self.ping_pong_forward);
        }
    }

    /// Index of the frame on screen; `0` before the first [`play`](Self::play).
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn is_playing(&self) -> bool {
        self.tag.is_some()
    }

    pub fn active_tag(&self) -> Option<&FrameTag> {
        self.tag.and_then(|index| self.atlas.tag(index))
    }

    /// Time already spent on the current frame.
    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    pub fn atlas(&self) -> &Arc<SpriteAtlas<T>> {
        &self.atlas
    }

    /// Draw the current frame with its top-left corner at `(x, y)`.
    pub fn render<B: Blitter<T>>(&self, target: &mut B, x: f32, y: f32, scale: f32) {
        self.atlas
            .render_frame_at(target, self.current_frame, x, y, scale);
    }
}

/// Time for playback of `tag` to come back to the same frame with the same
/// heading: one pass for forward and reverse, a round trip for ping-pong.
fn cycle_ms<T>(atlas: &SpriteAtlas<T>, tag: &FrameTag) -> Option<f32> {
    let frames = atlas.frames().get(tag.from..=tag.to)?;
    let (first, last) = (frames.first()?, frames.last()?);
    let pass: u64 = frames.iter().map(|f| u64::from(f.duration_ms)).sum();
    let total = match tag.direction {
        Direction::Forward | Direction::Reverse => pass,
        // Endpoints are shown once per round trip, inner frames twice.
        Direction::PingPong => {
            2 * pass - u64::from(first.duration_ms) - u64::from(last.duration_ms)
        }
    };
    (total > 0).then_some(total as f32)
}

/// One boundary crossing: the frame after `index` and the new ping-pong
/// heading.
fn next_frame(tag: &FrameTag, index: usize, forward: bool) -> (usize, bool) {
    match tag.direction {
        Direction::Forward => {
            let next = index + 1;
            if next > tag.to {
                (tag.from, forward)
            } else {
                (next, forward)
            }
        }
        Direction::Reverse => {
            if index <= tag.from {
                (tag.to, forward)
            } else {
                (index - 1, forward)
            }
        }
        Direction::PingPong => {
            if forward {
                let next = index + 1;
                (next, next < tag.to)
            } else {
                let next = index.saturating_sub(1);
                (next, next <= tag.from)
            }
        }
    }
}
