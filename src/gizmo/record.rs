//! Mesh Lifecycle Tracker
//!
//! A [`GizmoRecord`] owns every mesh built for one gizmo item:
//!
//! - an optional primary mesh,
//! - meshes keyed by [`HandleKey`] (one per axis of a transform handle, icon sprites),
//! - an ordered list of wireframes derived from a model,
//! - materials shared by several of those meshes.
//!
//! Each owned mesh carries the [`MeshDisposeOptions`] it must be disposed
//! with, so sub-resources it only borrows (icon textures, the shared
//! wireframe material) survive its disposal and are released by their owner.
//!
//! [`MeshTracker`] maps gizmo items to their records.

use glam::Affine3A;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::composition::ItemId;
use crate::gizmo::routing::OverlayPasses;
use crate::graph::RenderFrame;
use crate::resources::{
    DestroyOptions, MaterialHandle, MeshDisposeOptions, MeshHandle, ResourcePool,
};

/// Discriminator of the keyed meshes of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HandleKey {
    X,
    Y,
    Z,
    Icon,
}

impl HandleKey {
    pub const AXES: [Self; 3] = [Self::X, Self::Y, Self::Z];
}

/// A mesh owned by a record, with the options it is disposed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedMesh {
    pub handle: MeshHandle,
    pub dispose: MeshDisposeOptions,
}

impl TrackedMesh {
    #[must_use]
    pub fn new(handle: MeshHandle, dispose: MeshDisposeOptions) -> Self {
        Self { handle, dispose }
    }

    /// A mesh that owns its geometry and material outright.
    #[must_use]
    pub fn owned(handle: MeshHandle) -> Self {
        Self::new(handle, MeshDisposeOptions::FULL)
    }
}

/// Meshes and shared materials owned by one gizmo item.
#[derive(Debug, Default)]
pub struct GizmoRecord {
    target: Option<ItemId>,
    primary: Option<TrackedMesh>,
    named: FxHashMap<HandleKey, TrackedMesh>,
    wireframes: SmallVec<[TrackedMesh; 4]>,
    shared_materials: SmallVec<[MaterialHandle; 1]>,
    hidden: bool,
    disposed: bool,
}

impl GizmoRecord {
    #[must_use]
    pub fn new(target: ItemId) -> Self {
        Self {
            target: Some(target),
            ..Default::default()
        }
    }

    /// Item whose transform the record's meshes follow.
    #[inline]
    #[must_use]
    pub fn target(&self) -> Option<ItemId> {
        self.target
    }

    #[inline]
    #[must_use]
    pub fn primary(&self) -> Option<&TrackedMesh> {
        self.primary.as_ref()
    }

    #[must_use]
    pub fn named(&self, key: HandleKey) -> Option<&TrackedMesh> {
        self.named.get(&key)
    }

    #[inline]
    #[must_use]
    pub fn wireframes(&self) -> &[TrackedMesh] {
        &self.wireframes
    }

    #[inline]
    #[must_use]
    pub fn shared_materials(&self) -> &[MaterialHandle] {
        &self.shared_materials
    }

    #[inline]
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub(crate) fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    #[inline]
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // ========================================================================
    // Population
    // ========================================================================

    /// Sets the primary mesh, returning the one it replaces.
    pub fn set_primary(&mut self, mesh: TrackedMesh) -> Option<TrackedMesh> {
        self.primary.replace(mesh)
    }

    /// Sets the mesh stored under `key`, returning the one it replaces.
    pub fn insert_named(&mut self, key: HandleKey, mesh: TrackedMesh) -> Option<TrackedMesh> {
        self.named.insert(key, mesh)
    }

    pub fn push_wireframe(&mut self, mesh: TrackedMesh) {
        self.wireframes.push(mesh);
    }

    /// Single-wireframe slot of older content builders.
    ///
    /// The wireframe list becomes exactly `[mesh]`; the wireframes held so far
    /// are handed back to the caller, who now owns them.
    pub fn set_wireframe(&mut self, mesh: TrackedMesh) -> SmallVec<[TrackedMesh; 4]> {
        let previous = std::mem::take(&mut self.wireframes);
        self.wireframes.push(mesh);
        previous
    }

    /// Records a material the record owns on behalf of several of its meshes.
    pub fn add_shared_material(&mut self, material: MaterialHandle) {
        if !self.shared_materials.contains(&material) {
            self.shared_materials.push(material);
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Every owned mesh: primary, keyed meshes in key order, then wireframes.
    pub fn tracked(&self) -> impl Iterator<Item = &TrackedMesh> {
        let mut named: SmallVec<[(&HandleKey, &TrackedMesh); 4]> = self.named.iter().collect();
        named.sort_unstable_by_key(|(key, _)| **key);

        self.primary
            .iter()
            .chain(named.into_iter().map(|(_, mesh)| mesh))
            .chain(self.wireframes.iter())
    }

    /// Handles of every owned mesh, in [`tracked`](Self::tracked) order.
    pub fn meshes(&self) -> impl Iterator<Item = MeshHandle> + '_ {
        self.tracked().map(|mesh| mesh.handle)
    }

    #[must_use]
    pub fn mesh_count(&self) -> usize {
        usize::from(self.primary.is_some()) + self.named.len() + self.wireframes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mesh_count() == 0
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Places every live mesh at `transform`.
    pub fn update_render_data(&self, pool: &mut ResourcePool, transform: Affine3A) {
        for handle in self.meshes() {
            if let Some(mesh) = pool.mesh_mut(handle)
                && !mesh.is_destroyed()
            {
                mesh.world_matrix = transform;
            }
        }
    }

    /// Removes every owned mesh from the overlay pass currently holding it,
    /// then disposes the meshes and the shared materials.
    ///
    /// Removal is immediate and routed by mesh name; a mesh whose name no
    /// longer resolves is removed from all three overlay passes. Calling this
    /// again does nothing. Returns the number of meshes this call disposed.
    pub fn dispose(
        &mut self,
        pool: &mut ResourcePool,
        frame: &mut RenderFrame,
        passes: &OverlayPasses,
    ) -> usize {
        if self.disposed {
            return 0;
        }
        for handle in self.meshes() {
            let name = pool.mesh(handle).map(|mesh| mesh.name());
            passes.remove_mesh(frame, handle, name);
        }
        self.release(pool)
    }

    /// Disposes meshes and shared materials without touching any pass.
    ///
    /// Used for content that never reached the mutation queue.
    pub(crate) fn release(&mut self, pool: &mut ResourcePool) -> usize {
        if self.disposed {
            return 0;
        }
        self.disposed = true;

        let mut disposed = 0;
        for mesh in self.tracked() {
            if pool.is_mesh_destroyed(mesh.handle) {
                continue;
            }
            if pool.dispose_mesh(mesh.handle, mesh.dispose) {
                disposed += 1;
            }
        }
        // Shared materials go last, after every borrower is gone.
        for material in &self.shared_materials {
            pool.release_material(*material, DestroyOptions::Destroy);
        }
        disposed
    }
}

// ============================================================================
// MeshTracker
// ============================================================================

/// Records of one composition, keyed by gizmo item.
#[derive(Debug, Default)]
pub struct MeshTracker {
    records: FxHashMap<ItemId, GizmoRecord>,
    /// Meshes of destroyed records whose pool entries are not purged yet.
    disposed: Vec<MeshHandle>,
}

impl MeshTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an empty record for `gizmo`.
    ///
    /// An existing record for the same gizmo must have been destroyed first;
    /// it would otherwise be dropped without releasing its meshes.
    pub fn create_record(&mut self, gizmo: ItemId, target: ItemId) -> &mut GizmoRecord {
        self.insert_record(gizmo, GizmoRecord::new(target))
    }

    /// Stores a fully built record.
    pub fn insert_record(&mut self, gizmo: ItemId, record: GizmoRecord) -> &mut GizmoRecord {
        debug_assert!(
            !self.records.contains_key(&gizmo),
            "record of {gizmo:?} replaced without teardown"
        );
        self.records.entry(gizmo).insert_entry(record).into_mut()
    }

    #[must_use]
    pub fn get_record(&self, gizmo: ItemId) -> Option<&GizmoRecord> {
        self.records.get(&gizmo)
    }

    pub fn get_record_mut(&mut self, gizmo: ItemId) -> Option<&mut GizmoRecord> {
        self.records.get_mut(&gizmo)
    }

    #[must_use]
    pub fn contains(&self, gizmo: ItemId) -> bool {
        self.records.contains_key(&gizmo)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &GizmoRecord)> {
        self.records.iter().map(|(id, record)| (*id, record))
    }

    /// Gizmos whose records target `target`.
    #[must_use]
    pub fn records_targeting(&self, target: ItemId) -> SmallVec<[ItemId; 2]> {
        let mut gizmos: SmallVec<[ItemId; 2]> = self
            .records
            .iter()
            .filter(|(_, record)| record.target() == Some(target))
            .map(|(id, _)| *id)
            .collect();
        gizmos.sort_unstable();
        gizmos
    }

    /// Tears down and forgets the record of `gizmo`.
    ///
    /// Returns `false` if there was none.
    pub fn destroy_record(
        &mut self,
        gizmo: ItemId,
        pool: &mut ResourcePool,
        frame: &mut RenderFrame,
        passes: &OverlayPasses,
    ) -> bool {
        let Some(mut record) = self.records.remove(&gizmo) else {
            return false;
        };
        self.disposed.extend(record.meshes());
        let disposed = record.dispose(pool, frame, passes);
        log::debug!("Gizmo record {gizmo:?} destroyed ({disposed} meshes disposed)");
        true
    }

    /// Meshes disposed by this tracker since the last call.
    pub fn take_disposed(&mut self) -> Vec<MeshHandle> {
        std::mem::take(&mut self.disposed)
    }

    /// Tears down every record. Returns the number of records destroyed.
    pub fn dispose_all(
        &mut self,
        pool: &mut ResourcePool,
        frame: &mut RenderFrame,
        passes: &OverlayPasses,
    ) -> usize {
        let mut gizmos: Vec<ItemId> = self.records.keys().copied().collect();
        gizmos.sort_unstable();
        for gizmo in &gizmos {
            self.destroy_record(*gizmo, pool, frame, passes);
        }
        gizmos.len()
    }
}
