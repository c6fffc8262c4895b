use glam::Vec4;

use crate::resources::pool::TextureHandle;

/// Unlit overlay material.
///
/// Gizmos never take part in lighting; a flat color, an optional map and the
/// depth behaviour are all the render backend needs.
#[derive(Debug, Clone)]
pub struct Material {
    pub label: String,
    pub color: Vec4,
    /// Texture sampled by sprites and icons. Usually borrowed from the
    /// composition's icon cache.
    pub map: Option<TextureHandle>,
    pub depth_test: bool,
    pub transparent: bool,
}

impl Material {
    #[must_use]
    pub fn new(label: impl Into<String>, color: Vec4) -> Self {
        Self {
            label: label.into(),
            color,
            map: None,
            depth_test: true,
            transparent: color.w < 1.0,
        }
    }

    /// Alpha-blended material sampling `map`.
    #[must_use]
    pub fn textured(label: impl Into<String>, map: TextureHandle) -> Self {
        Self {
            label: label.into(),
            color: Vec4::ONE,
            map: Some(map),
            depth_test: false,
            transparent: true,
        }
    }

    #[must_use]
    pub fn with_depth_test(mut self, depth_test: bool) -> Self {
        self.depth_test = depth_test;
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new("Material", Vec4::ONE)
    }
}
