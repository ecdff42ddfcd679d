//! Atlas metadata loader.
//!
//! Reads the JSON exported by sprite packers such as Aseprite and builds a
//! [`SpriteAtlas`]. Both `frames` layouts are accepted:
//!
//! ```json
//! { "frames": [ { "filename": "idle_0", "frame": {"x":0,"y":0,"w":16,"h":16}, "duration": 120 } ],
//!   "meta": { "image": "hero.png",
//!             "frameTags": [ { "name": "idle", "from": 0, "to": 0, "direction": "forward" } ] } }
//! ```
//!
//! or a map keyed by frame name (`"frames": { "idle_0": { "frame": {...} } }`).
//! Tag `from`/`to` are positions in the frame list, so the map form is read
//! with [`FrameListVisitor`], which keeps entries in document order.
//!
//! Loading is all-or-nothing: the document is fully parsed and validated
//! before the image is handed to the [`TextureLoader`], and any failure is
//! returned as an [`AtlasError`].

use std::fmt;
use std::fs;
use std::path::Path;

use log::info;
use raylib::prelude::Rectangle;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::resources::rasterizer::TextureLoader;
use crate::resources::spriteatlas::{
    AtlasError, Direction, Frame, FrameTag, SpriteAtlas, validate_parts,
};

/// Frame duration used when a record has no `duration`.
pub const DEFAULT_FRAME_DURATION_MS: u32 = 100;

#[derive(Debug, Deserialize)]
struct AtlasDocument {
    #[serde(default)]
    meta: Option<MetaDoc>,
    #[serde(default)]
    frames: FrameList,
}

#[derive(Debug, Default, Deserialize)]
struct MetaDoc {
    image: Option<String>,
    #[serde(rename = "frameTags", default)]
    frame_tags: Vec<TagDoc>,
}

#[derive(Debug, Deserialize)]
struct TagDoc {
    name: String,
    from: usize,
    to: usize,
    direction: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FrameDoc {
    filename: Option<String>,
    frame: Option<RectDoc>,
    duration: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RectDoc {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

impl RectDoc {
    fn to_rectangle(&self) -> Rectangle {
        Rectangle {
            x: self.x as f32,
            y: self.y as f32,
            width: self.w as f32,
            height: self.h as f32,
        }
    }
}

/// Frame records with their names, in document order.
#[derive(Debug, Default)]
struct FrameList(Vec<(String, FrameDoc)>);

impl<'de> Deserialize<'de> for FrameList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FrameListVisitor)
    }
}

struct FrameListVisitor;

impl<'de> Visitor<'de> for FrameListVisitor {
    type Value = FrameList;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a list of frame records or a map of frame name to record")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<FrameList, A::Error> {
        let mut frames = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(record) = seq.next_element::<FrameDoc>()? {
            let name = record.filename.clone().unwrap_or_default();
            frames.push((name, record));
        }
        Ok(FrameList(frames))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FrameList, A::Error> {
        let mut frames = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((name, record)) = map.next_entry::<String, FrameDoc>()? {
            frames.push((name, record));
        }
        Ok(FrameList(frames))
    }
}

/// Load the atlas described by the metadata file at `path`.
///
/// `meta.image` is resolved against the directory containing `path`.
pub fn load_atlas<L: TextureLoader>(
    path: impl AsRef<Path>,
    loader: &mut L,
) -> Result<SpriteAtlas<L::Texture>, AtlasError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| AtlasError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    load_atlas_from_str(&json, base_dir, loader)
}

/// Build an atlas from metadata already in memory. `meta.image` is resolved
/// against `base_dir`.
pub fn load_atlas_from_str<L: TextureLoader>(
    json: &str,
    base_dir: &Path,
    loader: &mut L,
) -> Result<SpriteAtlas<L::Texture>, AtlasError> {
    let doc: AtlasDocument = serde_json::from_str(json)?;
    let meta = doc.meta.unwrap_or_default();
    let image = meta.image.ok_or(AtlasError::MissingImageField)?;

    let frames = doc
        .frames
        .0
        .into_iter()
        .enumerate()
        .map(|(index, (name, record))| match record.frame {
            Some(rect) => Ok(Frame {
                name,
                source: rect.to_rectangle(),
                duration_ms: record.duration.unwrap_or(DEFAULT_FRAME_DURATION_MS),
            }),
            None => Err(AtlasError::MissingFrameField { index, name }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let tags = meta
        .frame_tags
        .into_iter()
        .map(|tag| {
            let direction = tag
                .direction
                .map(|name| name.parse::<Direction>())
                .transpose()
                .map_err(|direction| AtlasError::InvalidDirection {
                    tag: tag.name.clone(),
                    direction,
                })?
                .unwrap_or_default();
            Ok::<_, AtlasError>(FrameTag::new(tag.name, tag.from, tag.to, direction))
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Checked here so a bad document never reaches the texture loader.
    validate_parts(&frames, &tags)?;

    let image_path = base_dir.join(image);
    let texture = loader
        .load_texture(&image_path)
        .map_err(|reason| AtlasError::ImageDecodeFailure {
            path: image_path.clone(),
            reason,
        })?;

    info!(
        "Loaded atlas {}: {} frames, {} tags",
        image_path.display(),
        frames.len(),
        tags.len()
    );

    Ok(SpriteAtlas::from_validated_parts(frames, tags, texture, image_path))
}

impl<T> SpriteAtlas<T> {
    /// Shorthand for [`load_atlas`].
    pub fn load<L: TextureLoader<Texture = T>>(
        path: impl AsRef<Path>,
        loader: &mut L,
    ) -> Result<Self, AtlasError> {
        load_atlas(path, loader)
    }
}
