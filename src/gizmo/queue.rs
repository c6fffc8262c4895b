//! Deferred Mutation Queue
//!
//! Lifecycle events never touch render passes directly (except teardown).
//! They push mesh handles here, and the queue is drained once per frame at
//! the prepare stage: every pending add first, then every pending remove,
//! each in arrival order. An add followed by a remove of the same mesh
//! before a flush therefore leaves the mesh out of every pass.

use crate::gizmo::routing::OverlayPasses;
use crate::graph::RenderFrame;
use crate::resources::{MeshHandle, ResourcePool};

/// Outcome of one [`MutationQueue::flush`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Meshes inserted into a pass.
    pub added: usize,
    /// Meshes taken out of a pass.
    pub removed: usize,
    /// Entries dropped: unresolvable handles and adds of destroyed meshes.
    pub skipped: usize,
}

#[derive(Debug, Default)]
pub struct MutationQueue {
    to_add: Vec<MeshHandle>,
    to_remove: Vec<MeshHandle>,
}

impl MutationQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue_add(&mut self, mesh: MeshHandle) {
        self.to_add.push(mesh);
    }

    pub fn enqueue_remove(&mut self, mesh: MeshHandle) {
        self.to_remove.push(mesh);
    }

    /// Drops every pending add and remove of `mesh`.
    pub fn cancel(&mut self, mesh: MeshHandle) {
        self.to_add.retain(|m| *m != mesh);
        self.to_remove.retain(|m| *m != mesh);
    }

    #[inline]
    #[must_use]
    pub fn pending_adds(&self) -> &[MeshHandle] {
        &self.to_add
    }

    #[inline]
    #[must_use]
    pub fn pending_removes(&self) -> &[MeshHandle] {
        &self.to_remove
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    pub fn clear(&mut self) {
        self.to_add.clear();
        self.to_remove.clear();
    }

    /// Applies all pending mutations to `frame`, then empties both queues.
    ///
    /// Overlay passes are created on first use. Entries that cannot be
    /// applied are logged and skipped; the flush itself never fails.
    pub fn flush(
        &mut self,
        frame: &mut RenderFrame,
        pool: &ResourcePool,
        passes: &OverlayPasses,
    ) -> FlushReport {
        let mut report = FlushReport::default();

        for &handle in &self.to_add {
            let Some(mesh) = pool.mesh(handle) else {
                log::warn!("Pending add of unknown mesh {handle:?} skipped");
                report.skipped += 1;
                continue;
            };
            if mesh.is_destroyed() {
                log::debug!("Pending add of destroyed mesh '{}' skipped", mesh.name());
                report.skipped += 1;
                continue;
            }
            if frame.find_or_create(&passes.descriptor_for(mesh.name())).add_mesh(handle) {
                report.added += 1;
            }
        }

        for &handle in &self.to_remove {
            let name = pool.mesh(handle).map(|mesh| mesh.name());
            if name.is_none() {
                log::warn!("Pending remove of unknown mesh {handle:?}, clearing all overlay passes");
            }
            if passes.remove_mesh(frame, handle, name) {
                report.removed += 1;
            } else if name.is_none() {
                report.skipped += 1;
            }
        }

        if report.added + report.removed + report.skipped > 0 {
            log::trace!(
                "Gizmo queue flushed: {} added, {} removed, {} skipped",
                report.added,
                report.removed,
                report.skipped
            );
        }
        self.clear();
        report
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::resources::{Geometry, Material, MeshDisposeOptions};

    fn mesh(pool: &mut ResourcePool, name: &str) -> MeshHandle {
        let geometry = Geometry::lines(name, vec![Vec3::ZERO, Vec3::X], vec![0, 1]);
        pool.create_mesh(name, geometry, Material::default())
    }

    #[test]
    fn adds_are_routed_by_name() {
        let mut pool = ResourcePool::new();
        let mut frame = RenderFrame::new();
        let passes = OverlayPasses::default();
        let mut queue = MutationQueue::new();

        let grid = mesh(&mut pool, "FloorGrid");
        let handle = mesh(&mut pool, "translation");
        let icon = mesh(&mut pool, "camera");
        queue.enqueue_add(grid);
        queue.enqueue_add(handle);
        queue.enqueue_add(icon);

        let report = queue.flush(&mut frame, &pool, &passes);
        assert_eq!(report.added, 3);
        assert!(frame.find_pass("front-gizmo").unwrap().contains_mesh(grid));
        assert!(frame.find_pass("behind-gizmo").unwrap().contains_mesh(handle));
        assert!(frame.find_pass("editor-gizmo").unwrap().contains_mesh(icon));
        assert!(queue.is_empty());
    }

    #[test]
    fn add_then_remove_before_flush_leaves_nothing() {
        let mut pool = ResourcePool::new();
        let mut frame = RenderFrame::new();
        let passes = OverlayPasses::default();
        let mut queue = MutationQueue::new();

        let m = mesh(&mut pool, "box");
        queue.enqueue_add(m);
        queue.enqueue_remove(m);
        queue.flush(&mut frame, &pool, &passes);

        assert!(!frame.contains_mesh(m));
    }

    #[test]
    fn duplicate_adds_insert_once() {
        let mut pool = ResourcePool::new();
        let mut frame = RenderFrame::new();
        let passes = OverlayPasses::default();
        let mut queue = MutationQueue::new();

        let m = mesh(&mut pool, "sphere");
        queue.enqueue_add(m);
        queue.enqueue_add(m);
        let report = queue.flush(&mut frame, &pool, &passes);

        assert_eq!(report.added, 1);
        assert_eq!(frame.mesh_count(), 1);
    }

    #[test]
    fn destroyed_and_unknown_meshes_are_skipped() {
        let mut pool = ResourcePool::new();
        let mut frame = RenderFrame::new();
        let passes = OverlayPasses::default();
        let mut queue = MutationQueue::new();

        let purged = mesh(&mut pool, "torus");
        pool.dispose_mesh(purged, MeshDisposeOptions::FULL);
        pool.purge_destroyed_meshes();
        let destroyed = mesh(&mut pool, "cone");
        pool.dispose_mesh(destroyed, MeshDisposeOptions::FULL);

        queue.enqueue_add(destroyed);
        queue.enqueue_add(purged);
        let report = queue.flush(&mut frame, &pool, &passes);

        assert_eq!(report, FlushReport { added: 0, removed: 0, skipped: 2 });
        assert_eq!(frame.mesh_count(), 0);
    }
}
