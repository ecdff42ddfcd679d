//! Sprite atlas storage.
//!
//! Loaded atlases are kept by key and handed out as [`Arc`] clones, so any
//! number of [`SpriteAnimator`](crate::components::spriteanimator::SpriteAnimator)
//! components can share one atlas and its texture.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::resources::spriteatlas::SpriteAtlas;

/// Registry of loaded atlases by key.
#[derive(Resource)]
pub struct AtlasStore<T: Send + Sync + 'static> {
    map: FxHashMap<String, Arc<SpriteAtlas<T>>>,
}

impl<T: Send + Sync + 'static> Default for AtlasStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync + 'static> AtlasStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        AtlasStore {
            map: FxHashMap::default(),
        }
    }

    /// Insert an atlas under `key` and return the shared handle.
    pub fn insert(&mut self, key: impl Into<String>, atlas: SpriteAtlas<T>) -> Arc<SpriteAtlas<T>> {
        let atlas = Arc::new(atlas);
        self.map.insert(key.into(), Arc::clone(&atlas));
        atlas
    }

    /// Get a shared handle to the atlas stored under `key`.
    pub fn get(&self, key: impl AsRef<str>) -> Option<Arc<SpriteAtlas<T>>> {
        self.map.get(key.as_ref()).cloned()
    }

    /// Drop the store's handle for `key`. Animators still holding the atlas
    /// keep it alive.
    pub fn remove(&mut self, key: impl AsRef<str>) -> Option<Arc<SpriteAtlas<T>>> {
        self.map.remove(key.as_ref())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Clear all loaded atlases.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}
