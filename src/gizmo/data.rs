use serde::Deserialize;

use crate::composition::ItemId;

/// Declared sub-kind of a gizmo item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GizmoSubType {
    ParticleEmitter,
    ModelWireframe,
    Box,
    Sphere,
    Cylinder,
    Cone,
    Torus,
    Sprite,
    Frustum,
    DirectionLight,
    PointLight,
    SpotLight,
    FloorGrid,
    Camera,
    Light,
    Rotation,
    Scale,
    Translation,
    ViewHelper,
    BoundingBox,
}

/// The three content-creation families a sub-kind maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentFamily {
    /// Outline of a particle system's emitter volume.
    Particle,
    /// Edges re-derived from a model's triangle meshes.
    Wireframe,
    /// Procedural shapes: basic outlines, icon shapes, transform handles and
    /// bounding boxes.
    Shape,
}

impl GizmoSubType {
    /// Every sub-kind, in declaration order.
    pub const ALL: [Self; 20] = [
        Self::ParticleEmitter,
        Self::ModelWireframe,
        Self::Box,
        Self::Sphere,
        Self::Cylinder,
        Self::Cone,
        Self::Torus,
        Self::Sprite,
        Self::Frustum,
        Self::DirectionLight,
        Self::PointLight,
        Self::SpotLight,
        Self::FloorGrid,
        Self::Camera,
        Self::Light,
        Self::Rotation,
        Self::Scale,
        Self::Translation,
        Self::ViewHelper,
        Self::BoundingBox,
    ];

    /// Serialized name of the sub-kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ParticleEmitter => "particleEmitter",
            Self::ModelWireframe => "modelWireframe",
            Self::Box => "box",
            Self::Sphere => "sphere",
            Self::Cylinder => "cylinder",
            Self::Cone => "cone",
            Self::Torus => "torus",
            Self::Sprite => "sprite",
            Self::Frustum => "frustum",
            Self::DirectionLight => "directionLight",
            Self::PointLight => "pointLight",
            Self::SpotLight => "spotLight",
            Self::FloorGrid => "floorGrid",
            Self::Camera => "camera",
            Self::Light => "light",
            Self::Rotation => "rotation",
            Self::Scale => "scale",
            Self::Translation => "translation",
            Self::ViewHelper => "viewHelper",
            Self::BoundingBox => "boundingBox",
        }
    }

    /// Declared name given to the meshes built for this sub-kind.
    ///
    /// This is the identity the routing table matches on.
    #[must_use]
    pub const fn mesh_name(self) -> &'static str {
        match self {
            Self::FloorGrid => "FloorGrid",
            Self::BoundingBox => "Box",
            other => other.as_str(),
        }
    }

    #[must_use]
    pub const fn family(self) -> ContentFamily {
        match self {
            Self::ParticleEmitter => ContentFamily::Particle,
            Self::ModelWireframe => ContentFamily::Wireframe,
            _ => ContentFamily::Shape,
        }
    }

    /// Icon textures the shape needs from the composition's icon cache.
    #[must_use]
    pub const fn required_icons(self) -> &'static [&'static str] {
        match self {
            Self::Camera => &["camera"],
            Self::Light => &["light"],
            Self::ViewHelper => &["x", "y", "z"],
            _ => &[],
        }
    }
}

fn default_color() -> [f32; 4] {
    [1.0, 1.0, 1.0, 1.0]
}

fn default_size() -> f32 {
    1.0
}

/// Payload of a gizmo item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GizmoData {
    /// Item the gizmo decorates.
    pub target: ItemId,
    #[serde(rename = "subType")]
    pub sub_type: GizmoSubType,
    #[serde(default = "default_color")]
    pub color: [f32; 4],
    /// Uniform scale applied to the generated shape.
    #[serde(default = "default_size")]
    pub size: f32,
}

impl GizmoData {
    #[must_use]
    pub fn new(target: ItemId, sub_type: GizmoSubType) -> Self {
        Self {
            target,
            sub_type,
            color: default_color(),
            size: default_size(),
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn families() {
        assert_eq!(GizmoSubType::ParticleEmitter.family(), ContentFamily::Particle);
        assert_eq!(GizmoSubType::ModelWireframe.family(), ContentFamily::Wireframe);
        for sub_type in GizmoSubType::ALL {
            if !matches!(
                sub_type,
                GizmoSubType::ParticleEmitter | GizmoSubType::ModelWireframe
            ) {
                assert_eq!(sub_type.family(), ContentFamily::Shape, "{sub_type:?}");
            }
        }
    }

    #[test]
    fn mesh_names() {
        assert_eq!(GizmoSubType::FloorGrid.mesh_name(), "FloorGrid");
        assert_eq!(GizmoSubType::BoundingBox.mesh_name(), "Box");
        assert_eq!(GizmoSubType::Box.mesh_name(), "box");
        assert_eq!(GizmoSubType::Rotation.mesh_name(), "rotation");
    }
}
