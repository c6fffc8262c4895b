//! Editor gizmo overlays
//!
//! Provides:
//! - GizmoPlugin: lifecycle dispatcher driving everything below
//! - MeshTracker / GizmoRecord: ownership of each gizmo's meshes
//! - MutationQueue: pass insertions and removals deferred to the prepare stage
//! - route / OverlayPasses: mesh name to overlay pass mapping
//! - ContentStrategy: particle, wireframe and shape content builders

pub mod content;
pub mod context;
pub mod data;
pub mod icons;
pub mod plugin;
pub mod queue;
pub mod record;
pub mod routing;

pub use content::{
    ContentContext, ContentStrategy, ParticleContent, ShapeContent, WireframeContent, build_record,
};
pub use context::GizmoContext;
pub use data::{ContentFamily, GizmoData, GizmoSubType};
pub use icons::IconCache;
pub use plugin::GizmoPlugin;
pub use queue::{FlushReport, MutationQueue};
pub use record::{GizmoRecord, HandleKey, MeshTracker, TrackedMesh};
pub use routing::{OverlayPasses, PassClass, route};
