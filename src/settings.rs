//! Gizmo Settings
//!
//! This module defines the configuration consumed by [`GizmoPlugin`](crate::gizmo::GizmoPlugin).
//!
//! The settings decide where overlay passes sit in the frame's render graph,
//! the plugin's position among other plugins, and the handful of parameters
//! the built-in shape builders need.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use myth_gizmo::{GizmoPlugin, GizmoSettings};
//!
//! // Default: passes placed relative to the post-process priority
//! let plugin = GizmoPlugin::new(GizmoSettings::default())?;
//!
//! // Host-provided configuration
//! let settings: GizmoSettings = serde_json::from_str(r#"{ "order": 20 }"#)?;
//! let plugin = GizmoPlugin::new(settings)?;
//! ```

use serde::Deserialize;

use crate::errors::{GizmoError, Result};
use crate::graph::RENDER_PASS_PRIORITY_POSTPROCESS;

// ---------------------------------------------------------------------------
// FloorGridSettings
// ---------------------------------------------------------------------------

/// Parameters of the `floorGrid` gizmo shape.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FloorGridSettings {
    /// Edge length of the (square) grid in world units.
    pub size: f32,
    /// Number of cells along each edge.
    pub divisions: u32,
}

impl Default for FloorGridSettings {
    fn default() -> Self {
        Self {
            size: 20.0,
            divisions: 20,
        }
    }
}

// ---------------------------------------------------------------------------
// GizmoSettings
// ---------------------------------------------------------------------------

/// Configuration of the gizmo plugin.
///
/// # Fields
///
/// | Field                  | Description                                   | Default          |
/// |------------------------|-----------------------------------------------|------------------|
/// | `order`                | Plugin sequencing value within a frame stage  | `1001`           |
/// | `postprocess_priority` | Base priority the overlay passes derive from  | `3000`           |
/// | `front_pass_name`      | Name of the *front* overlay pass              | `"front-gizmo"`  |
/// | `behind_pass_name`     | Name of the *behind* overlay pass             | `"behind-gizmo"` |
/// | `editor_pass_name`     | Name of the default overlay pass              | `"editor-gizmo"` |
/// | `wireframe_color`      | RGBA color of derived wireframes              | White            |
/// | `floor_grid`           | Floor grid size and subdivisions              | `20.0` / `20`    |
/// | `handle_length`        | Axis length of transform handles              | `1.0`            |
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GizmoSettings {
    // === Plugin Configuration ===
    /// Ordering value used by the host to sequence plugins that react to the
    /// same lifecycle event. Lower values run first.
    pub order: i32,

    // === Render Pass Layout ===
    /// Priority of the host's post-process stage.
    ///
    /// The *front* and default passes are created at `postprocess_priority + 2`,
    /// the *behind* pass at `2 * postprocess_priority`.
    pub postprocess_priority: i32,

    /// Pass receiving the floor grid and bounding boxes.
    pub front_pass_name: String,

    /// Pass receiving the transform handles. Clears depth before drawing.
    pub behind_pass_name: String,

    /// Pass receiving every other overlay mesh.
    pub editor_pass_name: String,

    // === Shape Parameters ===
    /// Color of wireframes derived from model meshes.
    pub wireframe_color: [f32; 4],

    /// Floor grid layout.
    pub floor_grid: FloorGridSettings,

    /// Length of translation / scale handle axes and radius of rotation rings.
    pub handle_length: f32,
}

impl Default for GizmoSettings {
    fn default() -> Self {
        Self {
            order: 1001,
            postprocess_priority: RENDER_PASS_PRIORITY_POSTPROCESS,
            front_pass_name: "front-gizmo".to_string(),
            behind_pass_name: "behind-gizmo".to_string(),
            editor_pass_name: "editor-gizmo".to_string(),
            wireframe_color: [1.0, 1.0, 1.0, 1.0],
            floor_grid: FloorGridSettings::default(),
            handle_length: 1.0,
        }
    }
}

impl GizmoSettings {
    /// Checks that the three overlay pass names are non-empty and distinct.
    pub fn validate(&self) -> Result<()> {
        let names = [
            &self.front_pass_name,
            &self.behind_pass_name,
            &self.editor_pass_name,
        ];

        if names.iter().any(|name| name.is_empty()) {
            return Err(GizmoError::Settings("overlay pass names must not be empty".into()));
        }
        if names[0] == names[1] || names[0] == names[2] || names[1] == names[2] {
            return Err(GizmoError::Settings(format!(
                "overlay pass names must be distinct (front: {}, behind: {}, editor: {})",
                names[0], names[1], names[2]
            )));
        }
        if self.floor_grid.divisions == 0 {
            return Err(GizmoError::Settings("floor grid needs at least one division".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        assert!(GizmoSettings::default().validate().is_ok());
    }

    #[test]
    fn duplicate_pass_names_are_rejected() {
        let settings = GizmoSettings {
            behind_pass_name: "front-gizmo".into(),
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(GizmoError::Settings(_))));
    }

    #[test]
    fn empty_pass_name_is_rejected() {
        let settings = GizmoSettings {
            editor_pass_name: String::new(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
