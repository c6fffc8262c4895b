//! Overlay pass routing
//!
//! A mesh's declared name alone decides which overlay pass draws it. The
//! same table is consulted when meshes are added at flush time, removed at
//! flush time and removed during teardown, so a mesh always leaves the pass
//! it entered.

use crate::graph::{ClearOptions, RenderFrame, RenderPassDescriptor};
use crate::resources::MeshHandle;
use crate::settings::GizmoSettings;

/// Target class of an overlay mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassClass {
    /// Drawn over the scene with the scene's depth: floor grid, bounding boxes.
    Front,
    /// Drawn after a depth clear so handles are never occluded.
    Behind,
    /// Everything else.
    EditorDefault,
}

impl PassClass {
    pub const ALL: [Self; 3] = [Self::Front, Self::Behind, Self::EditorDefault];
}

/// Maps a mesh name to its pass class. Total: unknown names go to
/// [`PassClass::EditorDefault`].
#[must_use]
pub fn route(mesh_name: &str) -> PassClass {
    match mesh_name {
        "FloorGrid" | "Box" => PassClass::Front,
        "translation" | "scale" | "rotation" => PassClass::Behind,
        _ => PassClass::EditorDefault,
    }
}

/// Names and priorities of the three overlay passes of a plugin instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayPasses {
    front: String,
    behind: String,
    editor: String,
    postprocess_priority: i32,
}

impl OverlayPasses {
    #[must_use]
    pub fn from_settings(settings: &GizmoSettings) -> Self {
        Self {
            front: settings.front_pass_name.clone(),
            behind: settings.behind_pass_name.clone(),
            editor: settings.editor_pass_name.clone(),
            postprocess_priority: settings.postprocess_priority,
        }
    }

    #[must_use]
    pub fn name(&self, class: PassClass) -> &str {
        match class {
            PassClass::Front => &self.front,
            PassClass::Behind => &self.behind,
            PassClass::EditorDefault => &self.editor,
        }
    }

    /// Descriptor used to find or create the pass of `class`.
    #[must_use]
    pub fn descriptor(&self, class: PassClass) -> RenderPassDescriptor<'_> {
        let pp = self.postprocess_priority;
        let (priority, clear) = match class {
            PassClass::Front | PassClass::EditorDefault => (pp + 2, ClearOptions::LOAD),
            PassClass::Behind => (pp * 2, ClearOptions::DEPTH_ONLY),
        };
        RenderPassDescriptor {
            name: self.name(class),
            priority,
            clear,
        }
    }

    /// Descriptor of the pass a mesh named `mesh_name` belongs to.
    #[must_use]
    pub fn descriptor_for(&self, mesh_name: &str) -> RenderPassDescriptor<'_> {
        self.descriptor(route(mesh_name))
    }

    /// Removes `mesh` from the pass its name routes to, or from every overlay
    /// pass when the name is unknown. Passes that do not exist are not created.
    ///
    /// Returns whether any pass held the mesh.
    pub fn remove_mesh(
        &self,
        frame: &mut RenderFrame,
        mesh: MeshHandle,
        mesh_name: Option<&str>,
    ) -> bool {
        match mesh_name {
            Some(name) => frame
                .find_pass_mut(self.name(route(name)))
                .is_some_and(|pass| pass.remove_mesh(mesh)),
            None => PassClass::ALL.iter().fold(false, |removed, class| {
                frame
                    .find_pass_mut(self.name(*class))
                    .is_some_and(|pass| pass.remove_mesh(mesh))
                    || removed
            }),
        }
    }
}

impl Default for OverlayPasses {
    fn default() -> Self {
        Self::from_settings(&GizmoSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ClearFlags, RENDER_PASS_PRIORITY_POSTPROCESS};

    #[test]
    fn literal_table() {
        assert_eq!(route("FloorGrid"), PassClass::Front);
        assert_eq!(route("Box"), PassClass::Front);
        assert_eq!(route("translation"), PassClass::Behind);
        assert_eq!(route("scale"), PassClass::Behind);
        assert_eq!(route("rotation"), PassClass::Behind);
        assert_eq!(route("box"), PassClass::EditorDefault);
        assert_eq!(route("camera"), PassClass::EditorDefault);
        assert_eq!(route(""), PassClass::EditorDefault);
    }

    #[test]
    fn descriptors_follow_postprocess_priority() {
        let passes = OverlayPasses::default();
        let pp = RENDER_PASS_PRIORITY_POSTPROCESS;

        let front = passes.descriptor(PassClass::Front);
        assert_eq!((front.name, front.priority), ("front-gizmo", pp + 2));

        let editor = passes.descriptor(PassClass::EditorDefault);
        assert_eq!((editor.name, editor.priority), ("editor-gizmo", pp + 2));

        let behind = passes.descriptor(PassClass::Behind);
        assert_eq!((behind.name, behind.priority), ("behind-gizmo", pp * 2));
        assert_eq!(behind.clear.flags, ClearFlags::DEPTH);
    }

    #[test]
    fn remove_does_not_create_passes() {
        let passes = OverlayPasses::default();
        let mut frame = RenderFrame::new();
        let mut keys: slotmap::SlotMap<MeshHandle, ()> = slotmap::SlotMap::with_key();
        let mesh = keys.insert(());

        assert!(!passes.remove_mesh(&mut frame, mesh, None));
        assert!(!passes.remove_mesh(&mut frame, mesh, Some("Box")));
        assert!(frame.render_passes().is_empty());
    }
}
