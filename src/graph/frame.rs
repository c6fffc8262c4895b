//! Render Frame
//!
//! `RenderFrame` is the pass list of one composition's render graph. Passes
//! are kept sorted by `(priority, insertion index)`: two passes that share a
//! priority execute in the order they were created, so the draw order never
//! depends on anything but the sequence of `add_render_pass` calls.

use crate::graph::pass::{RenderPass, RenderPassDescriptor};
use crate::resources::MeshHandle;

/// Priority of passes that prepare data before regular drawing.
pub const RENDER_PASS_PRIORITY_PREPARE: i32 = 0;
/// Priority of the main scene pass.
pub const RENDER_PASS_PRIORITY_NORMAL: i32 = 1000;
/// Priority of the post-processing stage.
pub const RENDER_PASS_PRIORITY_POSTPROCESS: i32 = 3000;

#[derive(Debug, Default)]
pub struct RenderFrame {
    /// Sorted by `RenderPass::sort_key`.
    passes: Vec<RenderPass>,
    next_insertion: u32,
}

impl RenderFrame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Passes in execution order.
    #[inline]
    #[must_use]
    pub fn render_passes(&self) -> &[RenderPass] {
        &self.passes
    }

    #[must_use]
    pub fn find_pass(&self, name: &str) -> Option<&RenderPass> {
        self.passes.iter().find(|p| p.name() == name)
    }

    pub fn find_pass_mut(&mut self, name: &str) -> Option<&mut RenderPass> {
        self.passes.iter_mut().find(|p| p.name() == name)
    }

    /// Creates and registers a pass. Refuses a name that is already taken.
    ///
    /// Returns `false` if a pass with the same name exists; the existing
    /// pass is left untouched.
    pub fn add_render_pass(&mut self, desc: &RenderPassDescriptor<'_>) -> bool {
        if self.find_pass(desc.name).is_some() {
            return false;
        }
        self.insert(desc);
        true
    }

    /// Returns the pass named `desc.name`, creating it on first use.
    ///
    /// `desc.priority` and `desc.clear` are only used when the pass is
    /// created; an existing pass keeps its original settings.
    pub fn find_or_create(&mut self, desc: &RenderPassDescriptor<'_>) -> &mut RenderPass {
        let index = match self.passes.iter().position(|p| p.name() == desc.name) {
            Some(index) => index,
            None => self.insert(desc),
        };
        &mut self.passes[index]
    }

    fn insert(&mut self, desc: &RenderPassDescriptor<'_>) -> usize {
        let pass = RenderPass::new(desc, self.next_insertion);
        self.next_insertion += 1;

        // Every existing pass was inserted earlier, so the new pass goes
        // after all passes of equal priority.
        let index = self.passes.partition_point(|p| p.priority() <= desc.priority);
        log::debug!(
            "Render pass '{}' created (priority {}, slot {index})",
            desc.name,
            desc.priority
        );
        self.passes.insert(index, pass);
        index
    }

    // ========================================================================
    // Mesh queries
    // ========================================================================

    #[must_use]
    pub fn contains_mesh(&self, mesh: MeshHandle) -> bool {
        self.passes.iter().any(|p| p.contains_mesh(mesh))
    }

    /// Total number of mesh entries across all passes.
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.passes.iter().map(RenderPass::mesh_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::pass::ClearOptions;

    fn desc(name: &str, priority: i32) -> RenderPassDescriptor<'_> {
        RenderPassDescriptor {
            name,
            priority,
            clear: ClearOptions::LOAD,
        }
    }

    fn names(frame: &RenderFrame) -> Vec<&str> {
        frame.render_passes().iter().map(RenderPass::name).collect()
    }

    #[test]
    fn passes_sorted_by_priority() {
        let mut frame = RenderFrame::new();
        frame.add_render_pass(&desc("post", RENDER_PASS_PRIORITY_POSTPROCESS));
        frame.add_render_pass(&desc("prepare", RENDER_PASS_PRIORITY_PREPARE));
        frame.add_render_pass(&desc("main", RENDER_PASS_PRIORITY_NORMAL));

        assert_eq!(names(&frame), vec!["prepare", "main", "post"]);
    }

    #[test]
    fn equal_priority_keeps_insertion_order() {
        let mut frame = RenderFrame::new();
        frame.add_render_pass(&desc("b", 5));
        frame.add_render_pass(&desc("a", 5));
        frame.add_render_pass(&desc("early", 1));
        frame.add_render_pass(&desc("c", 5));

        assert_eq!(names(&frame), vec!["early", "b", "a", "c"]);
    }

    #[test]
    fn find_or_create_is_idempotent() {
        let mut frame = RenderFrame::new();
        let first = frame.find_or_create(&desc("gizmo", 7)).insertion_index();
        let second = frame.find_or_create(&desc("gizmo", 99)).insertion_index();

        assert_eq!(first, second);
        assert_eq!(frame.render_passes().len(), 1);
        assert_eq!(frame.find_pass("gizmo").unwrap().priority(), 7);
    }

    #[test]
    fn duplicate_add_is_refused() {
        let mut frame = RenderFrame::new();
        assert!(frame.add_render_pass(&desc("x", 1)));
        assert!(!frame.add_render_pass(&desc("x", 2)));
        assert_eq!(frame.render_passes().len(), 1);
    }
}
