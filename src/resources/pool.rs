//! Resource Pool
//!
//! `ResourcePool` is the composition's registry of GPU-backed resources on the
//! CPU side. Every geometry, material, texture and mesh lives in a `SlotMap`
//! and is addressed by a generational handle, so a stale handle simply fails
//! to resolve instead of aliasing a newer resource.
//!
//! Disposal is bookkept here: releasing a sub-resource removes it from its
//! map, which makes a second release of the same handle a silent no-op. The
//! cumulative [`ReleaseCounters`] allow callers (and tests) to verify that
//! every resource is released exactly once.

use slotmap::{SlotMap, new_key_type};

use crate::resources::geometry::Geometry;
use crate::resources::material::Material;
use crate::resources::mesh::{DestroyOptions, Mesh, MeshDisposeOptions};
use crate::resources::texture::Texture;

new_key_type! {
    pub struct GeometryHandle;
    pub struct MaterialHandle;
    pub struct TextureHandle;
    pub struct MeshHandle;
}

/// Running totals of released resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseCounters {
    pub geometries: usize,
    pub materials: usize,
    pub textures: usize,
    pub meshes: usize,
}

/// Snapshot of what the pool currently holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub geometries: usize,
    pub materials: usize,
    pub textures: usize,
    /// Meshes that are not destroyed yet.
    pub live_meshes: usize,
    /// Destroyed meshes still awaiting [`ResourcePool::purge_destroyed_meshes`].
    pub destroyed_meshes: usize,
    /// Bytes of live geometry and texture data.
    pub bytes: usize,
}

#[derive(Default)]
pub struct ResourcePool {
    geometries: SlotMap<GeometryHandle, Geometry>,
    materials: SlotMap<MaterialHandle, Material>,
    textures: SlotMap<TextureHandle, Texture>,
    meshes: SlotMap<MeshHandle, Mesh>,
    released: ReleaseCounters,
}

impl ResourcePool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Creation
    // ========================================================================

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryHandle {
        self.geometries.insert(geometry)
    }

    pub fn add_material(&mut self, material: Material) -> MaterialHandle {
        self.materials.insert(material)
    }

    pub fn add_texture(&mut self, texture: Texture) -> TextureHandle {
        self.textures.insert(texture)
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshHandle {
        self.meshes.insert(mesh)
    }

    /// Registers `geometry` and `material` and a mesh owning both.
    pub fn create_mesh(
        &mut self,
        name: impl Into<String>,
        geometry: Geometry,
        material: Material,
    ) -> MeshHandle {
        let geometry = self.add_geometry(geometry);
        let material = self.add_material(material);
        self.add_mesh(Mesh::new(name, geometry, material))
    }

    // ========================================================================
    // Access
    // ========================================================================

    #[must_use]
    pub fn geometry(&self, handle: GeometryHandle) -> Option<&Geometry> {
        self.geometries.get(handle)
    }

    #[must_use]
    pub fn material(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(handle)
    }

    #[must_use]
    pub fn texture(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(handle)
    }

    #[must_use]
    pub fn mesh(&self, handle: MeshHandle) -> Option<&Mesh> {
        self.meshes.get(handle)
    }

    pub fn mesh_mut(&mut self, handle: MeshHandle) -> Option<&mut Mesh> {
        self.meshes.get_mut(handle)
    }

    #[inline]
    #[must_use]
    pub fn contains_mesh(&self, handle: MeshHandle) -> bool {
        self.meshes.contains_key(handle)
    }

    /// A mesh that no longer resolves counts as destroyed.
    #[inline]
    #[must_use]
    pub fn is_mesh_destroyed(&self, handle: MeshHandle) -> bool {
        self.meshes.get(handle).is_none_or(Mesh::is_destroyed)
    }

    // ========================================================================
    // Disposal
    // ========================================================================

    /// Disposes a mesh and, per `options`, its geometry and material.
    ///
    /// Returns `true` only for the call that actually disposed the mesh;
    /// disposing an already destroyed or unknown mesh does nothing.
    pub fn dispose_mesh(&mut self, handle: MeshHandle, options: MeshDisposeOptions) -> bool {
        let Some(mesh) = self.meshes.get_mut(handle) else {
            return false;
        };
        if mesh.destroyed {
            return false;
        }
        mesh.destroyed = true;
        mesh.visible = false;
        let (geometry, material) = (mesh.geometry, mesh.material);
        self.released.meshes += 1;

        if options.geometry == DestroyOptions::Destroy {
            self.release_geometry(geometry);
        }
        if options.material == DestroyOptions::Destroy {
            self.release_material(material, options.textures);
        }
        true
    }

    /// Returns `true` if the geometry was still alive.
    pub fn release_geometry(&mut self, handle: GeometryHandle) -> bool {
        if self.geometries.remove(handle).is_some() {
            self.released.geometries += 1;
            true
        } else {
            log::trace!("Geometry {handle:?} already released");
            false
        }
    }

    /// Returns `true` if the material was still alive.
    pub fn release_material(&mut self, handle: MaterialHandle, textures: DestroyOptions) -> bool {
        let Some(material) = self.materials.remove(handle) else {
            log::trace!("Material {handle:?} already released");
            return false;
        };
        self.released.materials += 1;
        if textures == DestroyOptions::Destroy
            && let Some(map) = material.map
        {
            self.release_texture(map);
        }
        true
    }

    /// Returns `true` if the texture was still alive.
    pub fn release_texture(&mut self, handle: TextureHandle) -> bool {
        if self.textures.remove(handle).is_some() {
            self.released.textures += 1;
            true
        } else {
            log::trace!("Texture {handle:?} already released");
            false
        }
    }

    /// Drops the bookkeeping entries of destroyed meshes.
    ///
    /// After this, their handles no longer resolve. Returns the number of
    /// entries removed.
    pub fn purge_destroyed_meshes(&mut self) -> usize {
        let before = self.meshes.len();
        self.meshes.retain(|_, mesh| !mesh.destroyed);
        before - self.meshes.len()
    }

    /// Drops the bookkeeping entries of those `handles` that are destroyed.
    ///
    /// Live meshes and handles that no longer resolve are left alone.
    /// Returns the number of entries removed.
    pub fn purge_meshes(&mut self, handles: &[MeshHandle]) -> usize {
        let mut purged = 0;
        for &handle in handles {
            if self.meshes.get(handle).is_some_and(Mesh::is_destroyed) {
                self.meshes.remove(handle);
                purged += 1;
            }
        }
        purged
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn released(&self) -> ReleaseCounters {
        self.released
    }

    #[must_use]
    pub fn stats(&self) -> PoolStats {
        let destroyed_meshes = self.meshes.values().filter(|m| m.destroyed).count();
        let bytes = self.geometries.values().map(Geometry::byte_size).sum::<usize>()
            + self.textures.values().map(Texture::byte_size).sum::<usize>();

        PoolStats {
            geometries: self.geometries.len(),
            materials: self.materials.len(),
            textures: self.textures.len(),
            live_meshes: self.meshes.len() - destroyed_meshes,
            destroyed_meshes,
            bytes,
        }
    }
}
