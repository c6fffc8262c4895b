//! Error Types
//!
//! This module defines the error types used throughout the gizmo crate.
//!
//! # Overview
//!
//! Almost every irregular situation the orchestrator meets is resolved locally
//! (missing associations, double disposal, unknown mesh names). The main error
//! type [`GizmoError`] covers the few conditions that are surfaced:
//! - Content construction failures (missing icon textures, malformed source meshes)
//! - Lookups of compositions that have no gizmo state
//! - Invalid settings
//!
//! # Usage
//!
//! Fallible APIs return [`Result<T>`] which is an alias for `std::result::Result<T, GizmoError>`.
//!
//! ```rust,ignore
//! use myth_gizmo::errors::{GizmoError, Result};
//!
//! fn build_content() -> Result<()> {
//!     Err(GizmoError::MissingIcon("camera".into()))
//! }
//! ```

use thiserror::Error;

use crate::composition::CompositionId;

/// The main error type for the gizmo crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GizmoError {
    // ========================================================================
    // Content Construction Errors
    // ========================================================================
    /// An icon texture required by a gizmo shape has not been materialized
    /// for the composition.
    #[error("Icon texture not available: {0}")]
    MissingIcon(String),

    /// Source mesh data used to derive a wireframe references a vertex that
    /// does not exist.
    #[error("Invalid source mesh '{mesh}': index {index} out of bounds (vertex count: {vertex_count})")]
    InvalidSourceMesh {
        /// Name of the offending source mesh
        mesh: String,
        /// The invalid index
        index: u32,
        /// Number of vertices in the source mesh
        vertex_count: usize,
    },

    // ========================================================================
    // Lookup Errors
    // ========================================================================
    /// No gizmo state exists for the composition.
    #[error("Unknown composition: {0:?}")]
    UnknownComposition(CompositionId),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Settings failed validation.
    #[error("Invalid gizmo settings: {0}")]
    Settings(String),
}

/// Alias for `Result<T, GizmoError>`.
pub type Result<T> = std::result::Result<T, GizmoError>;
