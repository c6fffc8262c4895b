//! Render Pass
//!
//! A named, prioritized bucket of meshes executed as one stage of a frame's
//! render graph. The pass only stores mesh handles; drawing them is the
//! backend's job.

use bitflags::bitflags;

use crate::resources::MeshHandle;

bitflags! {
    /// Attachments cleared when the pass begins.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ClearFlags: u8 {
        const COLOR   = 1 << 0;
        const DEPTH   = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

/// Clear behaviour of a render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearOptions {
    pub flags: ClearFlags,
    pub color: wgpu::Color,
    pub depth: f32,
    pub stencil: u32,
}

impl ClearOptions {
    /// Load every attachment as-is.
    pub const LOAD: Self = Self {
        flags: ClearFlags::empty(),
        color: wgpu::Color::TRANSPARENT,
        depth: 1.0,
        stencil: 0,
    };

    /// Clear depth to the far plane, keep color and stencil.
    pub const DEPTH_ONLY: Self = Self {
        flags: ClearFlags::DEPTH,
        color: wgpu::Color::TRANSPARENT,
        depth: 1.0,
        stencil: 0,
    };

    #[inline]
    #[must_use]
    pub fn clears(&self, flags: ClearFlags) -> bool {
        self.flags.contains(flags)
    }
}

impl Default for ClearOptions {
    fn default() -> Self {
        Self::LOAD
    }
}

/// Everything needed to create a pass on first use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderPassDescriptor<'a> {
    pub name: &'a str,
    /// Only applied when the pass is created.
    pub priority: i32,
    pub clear: ClearOptions,
}

#[derive(Debug, Clone)]
pub struct RenderPass {
    name: String,
    priority: i32,
    /// Position in the frame's creation sequence; breaks priority ties.
    insertion: u32,
    clear: ClearOptions,
    meshes: Vec<MeshHandle>,
}

impl RenderPass {
    pub(crate) fn new(desc: &RenderPassDescriptor<'_>, insertion: u32) -> Self {
        Self {
            name: desc.name.to_string(),
            priority: desc.priority,
            insertion,
            clear: desc.clear,
            meshes: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    #[inline]
    #[must_use]
    pub fn insertion_index(&self) -> u32 {
        self.insertion
    }

    #[inline]
    #[must_use]
    pub fn clear_options(&self) -> &ClearOptions {
        &self.clear
    }

    /// Sort key inside the frame: priority first, creation order second.
    #[inline]
    #[must_use]
    pub fn sort_key(&self) -> (i32, u32) {
        (self.priority, self.insertion)
    }

    /// Meshes in draw order.
    #[inline]
    #[must_use]
    pub fn meshes(&self) -> &[MeshHandle] {
        &self.meshes
    }

    #[inline]
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    #[inline]
    #[must_use]
    pub fn contains_mesh(&self, mesh: MeshHandle) -> bool {
        self.meshes.contains(&mesh)
    }

    /// Appends `mesh` unless it is already present. Returns whether it was added.
    pub fn add_mesh(&mut self, mesh: MeshHandle) -> bool {
        if self.contains_mesh(mesh) {
            return false;
        }
        self.meshes.push(mesh);
        true
    }

    /// Removes `mesh` if present, keeping the order of the others.
    /// Removing an absent mesh is a no-op.
    pub fn remove_mesh(&mut self, mesh: MeshHandle) -> bool {
        match self.meshes.iter().position(|m| *m == mesh) {
            Some(index) => {
                self.meshes.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    fn pass() -> RenderPass {
        RenderPass::new(
            &RenderPassDescriptor {
                name: "test",
                priority: 10,
                clear: ClearOptions::DEPTH_ONLY,
            },
            0,
        )
    }

    #[test]
    fn add_is_set_like() {
        let mut keys: SlotMap<MeshHandle, ()> = SlotMap::with_key();
        let a = keys.insert(());
        let mut pass = pass();

        assert!(pass.add_mesh(a));
        assert!(!pass.add_mesh(a));
        assert_eq!(pass.mesh_count(), 1);
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut keys: SlotMap<MeshHandle, ()> = SlotMap::with_key();
        let a = keys.insert(());
        let b = keys.insert(());
        let mut pass = pass();
        pass.add_mesh(a);

        assert!(!pass.remove_mesh(b));
        assert!(pass.remove_mesh(a));
        assert!(!pass.remove_mesh(a));
        assert_eq!(pass.mesh_count(), 0);
    }

    #[test]
    fn remove_preserves_order() {
        let mut keys: SlotMap<MeshHandle, ()> = SlotMap::with_key();
        let handles: Vec<_> = (0..4).map(|_| keys.insert(())).collect();
        let mut pass = pass();
        for h in &handles {
            pass.add_mesh(*h);
        }
        pass.remove_mesh(handles[1]);
        assert_eq!(pass.meshes(), &[handles[0], handles[2], handles[3]]);
    }

    #[test]
    fn depth_only_clear() {
        let pass = pass();
        assert!(pass.clear_options().clears(ClearFlags::DEPTH));
        assert!(!pass.clear_options().clears(ClearFlags::COLOR));
    }
}
