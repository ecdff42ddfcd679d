//! Sprite atlas resource.
//!
//! A [`SpriteAtlas`] is one packed texture plus the ordered list of
//! [`Frame`] rectangles cut from it and the named [`FrameTag`] ranges that
//! group frames into animations. It is immutable once built and is shared
//! read-only by every [`SpriteAnimator`](crate::components::spriteanimator::SpriteAnimator)
//! that plays from it.
//!
//! Frames are addressed by position: a tag's `from`/`to` are indices into
//! [`SpriteAtlas::frames`], so the frame order is the document order it was
//! loaded in (see [`crate::resources::atlasloader`]).
//!
//! # Error behaviour
//!
//! - [`SpriteAtlas::get_frame`] returns [`AtlasError::IndexOutOfRange`] for a
//!   bad index.
//! - [`SpriteAtlas::render_frame`] and [`SpriteAtlas::render_frame_at`] ignore a
//!   bad index. They run every tick and must not interrupt the frame loop.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use raylib::prelude::Rectangle;
use thiserror::Error;

use crate::resources::rasterizer::Blitter;

/// Errors raised while building an atlas or querying its frames.
#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("failed to read atlas metadata {}: {source}", .path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed atlas metadata: {0}")]
    MalformedDocument(#[from] serde_json::Error),
    #[error("atlas metadata is missing meta.image")]
    MissingImageField,
    #[error("frame {index} ({name:?}) has no `frame` rectangle")]
    MissingFrameField { index: usize, name: String },
    #[error("frame {index} ({name:?}) has a zero duration")]
    InvalidDuration { index: usize, name: String },
    #[error("tag {tag:?} has unknown direction {direction:?}")]
    InvalidDirection { tag: String, direction: String },
    #[error("tag {tag:?} range {from}..={to} does not fit {frame_count} frames")]
    InvalidTagRange {
        tag: String,
        from: usize,
        to: usize,
        frame_count: usize,
    },
    #[error("failed to load atlas image {}: {reason}", .path.display())]
    ImageDecodeFailure { path: PathBuf, reason: String },
    #[error("frame index {index} out of range (atlas has {frame_count} frames)")]
    IndexOutOfRange { index: usize, frame_count: usize },
}

/// Playback direction of a [`FrameTag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
    PingPong,
}

/// Parses the direction names used in atlas metadata. The error carries the
/// rejected name.
impl FromStr for Direction {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "forward" => Ok(Direction::Forward),
            "reverse" => Ok(Direction::Reverse),
            "pingpong" => Ok(Direction::PingPong),
            _ => Err(name.to_string()),
        }
    }
}

impl Direction {
    pub fn name(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
            Direction::PingPong => "pingpong",
        }
    }
}

/// One sub-rectangle of the atlas texture and how long it stays on screen.
#[derive(Debug, Clone)]
pub struct Frame {
    pub name: String,
    /// Source rectangle in texture pixels.
    pub source: Rectangle,
    /// Display time in milliseconds, always > 0.
    pub duration_ms: u32,
}

/// A named, inclusive range of frame indices and its playback direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTag {
    pub name: String,
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
}

impl FrameTag {
    pub fn new(name: impl Into<String>, from: usize, to: usize, direction: Direction) -> Self {
        Self {
            name: name.into(),
            from,
            to,
            direction,
        }
    }

    /// A tag covering a single frame never advances.
    pub fn is_single_frame(&self) -> bool {
        self.from == self.to
    }
}

/// Check the frame and tag invariants every atlas upholds.
pub(crate) fn validate_parts(frames: &[Frame], tags: &[FrameTag]) -> Result<(), AtlasError> {
    if let Some((index, frame)) = frames.iter().enumerate().find(|(_, f)| f.duration_ms == 0) {
        return Err(AtlasError::InvalidDuration {
            index,
            name: frame.name.clone(),
        });
    }
    let frame_count = frames.len();
    if let Some(tag) = tags.iter().find(|t| t.from > t.to || t.to >= frame_count) {
        return Err(AtlasError::InvalidTagRange {
            tag: tag.name.clone(),
            from: tag.from,
            to: tag.to,
            frame_count,
        });
    }
    Ok(())
}

/// Immutable frames, tags and texture of a packed sprite sheet.
#[derive(Debug)]
pub struct SpriteAtlas<T> {
    frames: Vec<Frame>,
    tags: Vec<FrameTag>,
    texture: T,
    image_path: PathBuf,
}

impl<T> SpriteAtlas<T> {
    /// Build an atlas from already-decoded parts.
    ///
    /// Rejects zero frame durations and tags whose range does not satisfy
    /// `from <= to < frame_count`.
    pub fn from_parts(
        frames: Vec<Frame>,
        tags: Vec<FrameTag>,
        texture: T,
        image_path: impl Into<PathBuf>,
    ) -> Result<Self, AtlasError> {
        validate_parts(&frames, &tags)?;
        Ok(Self::from_validated_parts(frames, tags, texture, image_path.into()))
    }

    /// Build an atlas from parts that already passed [`validate_parts`].
    pub(crate) fn from_validated_parts(
        frames: Vec<Frame>,
        tags: Vec<FrameTag>,
        texture: T,
        image_path: PathBuf,
    ) -> Self {
        Self {
            frames,
            tags,
            texture,
            image_path,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn tags(&self) -> &[FrameTag] {
        &self.tags
    }

    /// Tag by its position in load order.
    pub fn tag(&self, index: usize) -> Option<&FrameTag> {
        self.tags.get(index)
    }

    pub fn texture(&self) -> &T {
        &self.texture
    }

    /// Resolved path of the image the texture was loaded from.
    pub fn image_path(&self) -> &Path {
        &self.image_path
    }

    /// Frame at `index`, or [`AtlasError::IndexOutOfRange`].
    pub fn get_frame(&self, index: usize) -> Result<&Frame, AtlasError> {
        self.frames.get(index).ok_or(AtlasError::IndexOutOfRange {
            index,
            frame_count: self.frames.len(),
        })
    }

    /// First tag named `name`, in load order.
    pub fn find_tag(&self, name: &str) -> Option<&FrameTag> {
        self.find_tag_index(name).map(|i| &self.tags[i])
    }

    pub(crate) fn find_tag_index(&self, name: &str) -> Option<usize> {
        self.tags.iter().position(|tag| tag.name == name)
    }

    /// Blit frame `index` into `dest`. Does nothing for an out-of-range index.
    pub fn render_frame<B: Blitter<T>>(&self, target: &mut B, index: usize, dest: Rectangle) {
        let Some(frame) = self.frames.get(index) else {
            return;
        };
        target.blit(&self.texture, frame.source, dest);
    }

    /// Blit frame `index` with its top-left corner at `(x, y)`, scaled
    /// uniformly. Does nothing for an out-of-range index.
    pub fn render_frame_at<B: Blitter<T>>(
        &self,
        target: &mut B,
        index: usize,
        x: f32,
        y: f32,
        scale: f32,
    ) {
        let Some(frame) = self.frames.get(index) else {
            return;
        };
        let dest = Rectangle {
            x,
            y,
            width: frame.source.width * scale,
            height: frame.source.height * scale,
        };
        target.blit(&self.texture, frame.source, dest);
    }
}
