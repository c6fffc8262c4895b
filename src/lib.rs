#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod composition;
pub mod errors;
pub mod gizmo;
pub mod graph;
pub mod plugin;
pub mod resources;
pub mod settings;

pub use composition::{
    Composition, CompositionId, EmitterShape, ItemId, ItemKind, SceneItem, SourceMesh,
};
pub use errors::{GizmoError, Result};
pub use gizmo::{GizmoData, GizmoPlugin, GizmoSubType, PassClass, route};
pub use graph::{
    RENDER_PASS_PRIORITY_NORMAL, RENDER_PASS_PRIORITY_POSTPROCESS, RENDER_PASS_PRIORITY_PREPARE,
    RenderFrame, RenderPass,
};
pub use plugin::{Plugin, PluginSystem};
pub use resources::{Geometry, Material, Mesh, MeshHandle, ResourcePool, Texture};
pub use settings::{FloorGridSettings, GizmoSettings};
