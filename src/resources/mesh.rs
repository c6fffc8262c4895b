use glam::Affine3A;

use crate::resources::pool::{GeometryHandle, MaterialHandle};

/// Whether a sub-resource is released together with its owner or left alive
/// for another owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DestroyOptions {
    #[default]
    Destroy,
    Keep,
}

/// Disposal policy for one `dispose` call.
///
/// Borrowers of shared sub-resources pass `Keep` for what they borrowed so
/// the true owner releases it later. `textures` only matters when the
/// material itself is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MeshDisposeOptions {
    pub geometry: DestroyOptions,
    pub material: DestroyOptions,
    pub textures: DestroyOptions,
}

impl MeshDisposeOptions {
    /// Releases geometry, material and textures.
    pub const FULL: Self = Self {
        geometry: DestroyOptions::Destroy,
        material: DestroyOptions::Destroy,
        textures: DestroyOptions::Destroy,
    };

    /// Releases the geometry only; the material belongs to someone else.
    pub const KEEP_MATERIAL: Self = Self {
        geometry: DestroyOptions::Destroy,
        material: DestroyOptions::Keep,
        textures: DestroyOptions::Keep,
    };

    /// Releases geometry and material but leaves sampled textures alive.
    pub const KEEP_TEXTURES: Self = Self {
        geometry: DestroyOptions::Destroy,
        material: DestroyOptions::Destroy,
        textures: DestroyOptions::Keep,
    };
}

/// A renderable unit: geometry plus material, placed by a world matrix.
///
/// The name is the mesh's declared identity and decides which overlay pass
/// draws it. It is fixed at construction and stays readable after disposal.
#[derive(Debug, Clone)]
pub struct Mesh {
    name: String,
    pub geometry: GeometryHandle,
    pub material: MaterialHandle,
    pub world_matrix: Affine3A,
    pub visible: bool,
    pub(crate) destroyed: bool,
}

impl Mesh {
    #[must_use]
    pub fn new(name: impl Into<String>, geometry: GeometryHandle, material: MaterialHandle) -> Self {
        Self {
            name: name.into(),
            geometry,
            material,
            world_matrix: Affine3A::IDENTITY,
            visible: true,
            destroyed: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}
