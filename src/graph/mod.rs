//! Render graph pass registry
//!
//! Provides:
//! - RenderFrame: the priority-ordered pass list of one composition
//! - RenderPass: a named bucket of meshes with clear options
//! - Priority constants of the host pipeline stages

pub mod frame;
pub mod pass;

pub use frame::{
    RENDER_PASS_PRIORITY_NORMAL, RENDER_PASS_PRIORITY_POSTPROCESS, RENDER_PASS_PRIORITY_PREPARE,
    RenderFrame,
};
pub use pass::{ClearFlags, ClearOptions, RenderPass, RenderPassDescriptor};
