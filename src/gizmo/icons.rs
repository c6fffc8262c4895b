//! Icon textures
//!
//! Camera, light and view-helper gizmos draw sprites sampled from small icon
//! images. The host decodes the images before a composition is constructed;
//! each composition then materializes its own textures from them and
//! releases those textures when it goes away.

use image::RgbaImage;
use rustc_hash::FxHashMap;

use crate::errors::{GizmoError, Result};
use crate::resources::{ResourcePool, Texture, TextureHandle};

/// Icon textures of one composition, keyed by icon name.
#[derive(Debug, Default)]
pub struct IconCache {
    textures: FxHashMap<String, TextureHandle>,
}

impl IconCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a texture for every image not materialized yet.
    ///
    /// Returns the number of textures created.
    pub fn materialize(
        &mut self,
        pool: &mut ResourcePool,
        images: &FxHashMap<String, RgbaImage>,
    ) -> usize {
        let mut created = 0;
        for (name, image) in images {
            if self.textures.contains_key(name) {
                continue;
            }
            let handle = pool.add_texture(Texture::from_image(name.as_str(), image));
            self.textures.insert(name.clone(), handle);
            created += 1;
        }
        created
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<TextureHandle> {
        self.textures.get(name).copied()
    }

    /// Like [`get`](Self::get), but a missing icon is an error.
    pub fn require(&self, name: &str) -> Result<TextureHandle> {
        self.get(name)
            .ok_or_else(|| GizmoError::MissingIcon(name.to_string()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Releases every texture and empties the cache.
    ///
    /// Returns the number of textures that were still alive.
    pub fn release(&mut self, pool: &mut ResourcePool) -> usize {
        self.textures
            .drain()
            .filter(|(_, handle)| pool.release_texture(*handle))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(names: &[&str]) -> FxHashMap<String, RgbaImage> {
        names
            .iter()
            .map(|name| ((*name).to_string(), RgbaImage::new(4, 4)))
            .collect()
    }

    #[test]
    fn materialize_is_idempotent() {
        let mut pool = ResourcePool::new();
        let mut cache = IconCache::new();
        let images = images(&["camera", "light"]);

        assert_eq!(cache.materialize(&mut pool, &images), 2);
        assert_eq!(cache.materialize(&mut pool, &images), 0);
        assert_eq!(pool.stats().textures, 2);
        assert!(cache.require("camera").is_ok());
        assert_eq!(
            cache.require("x"),
            Err(GizmoError::MissingIcon("x".to_string()))
        );
    }

    #[test]
    fn release_frees_textures() {
        let mut pool = ResourcePool::new();
        let mut cache = IconCache::new();
        cache.materialize(&mut pool, &images(&["x", "y", "z"]));

        assert_eq!(cache.release(&mut pool), 3);
        assert!(cache.is_empty());
        assert_eq!(pool.stats().textures, 0);
        assert_eq!(cache.release(&mut pool), 0);
    }
}
