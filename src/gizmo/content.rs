//! Gizmo content strategies
//!
//! Builds the meshes of a gizmo once its target is born. Every sub-kind
//! belongs to one [`ContentFamily`], and each family has a
//! [`ContentStrategy`] that fills a fresh [`GizmoRecord`]:
//!
//! | Family      | Meshes                                                           |
//! |-------------|------------------------------------------------------------------|
//! | `Particle`  | Primary outline of the target's emitter volume                   |
//! | `Wireframe` | One edge mesh per source mesh of the target, sharing a material  |
//! | `Shape`     | Primary shape, per-axis handles and icon sprites                 |
//!
//! [`build_record`] runs the strategy and, if it fails, releases whatever was
//! already created so a failed build leaves nothing behind.

use std::f32::consts::FRAC_PI_4;

use glam::{Vec3, Vec4};
use rustc_hash::FxHashSet;

use crate::composition::{EmitterShape, ItemKind, SceneItem, SourceMesh};
use crate::errors::{GizmoError, Result};
use crate::gizmo::data::{ContentFamily, GizmoData, GizmoSubType};
use crate::gizmo::icons::IconCache;
use crate::gizmo::record::{GizmoRecord, HandleKey, TrackedMesh};
use crate::resources::primitives::{
    create_arrow, create_bounding_box, create_box, create_circle, create_cone, create_cylinder,
    create_frustum, create_grid, create_quad, create_scale_handle, create_sphere, create_torus,
};
use crate::resources::{Geometry, Material, Mesh, MeshDisposeOptions, ResourcePool};
use crate::settings::GizmoSettings;

const AXIS_COLORS: [Vec4; 3] = [
    Vec4::new(1.0, 0.2, 0.2, 1.0),
    Vec4::new(0.2, 1.0, 0.2, 1.0),
    Vec4::new(0.2, 0.4, 1.0, 1.0),
];

/// Everything a strategy reads while building one gizmo's content.
pub struct ContentContext<'a> {
    pub pool: &'a mut ResourcePool,
    /// The born item the gizmo decorates.
    pub target: &'a SceneItem,
    pub data: &'a GizmoData,
    pub settings: &'a GizmoSettings,
    pub icons: &'a IconCache,
}

impl ContentContext<'_> {
    /// Name every mesh of this gizmo is created with.
    fn mesh_name(&self) -> &'static str {
        self.data.sub_type.mesh_name()
    }

    fn color(&self) -> Vec4 {
        Vec4::from_array(self.data.color)
    }

    /// Creates a mesh owning its own material.
    fn owned_mesh(&mut self, geometry: Geometry, color: Vec4) -> TrackedMesh {
        let name = self.mesh_name();
        TrackedMesh::owned(self.pool.create_mesh(name, geometry, Material::new(name, color)))
    }

    /// Creates a sprite sampling a borrowed icon texture.
    fn icon_sprite(&mut self, icon: &str) -> Result<TrackedMesh> {
        let texture = self.icons.require(icon)?;
        let name = self.mesh_name();
        let handle = self.pool.create_mesh(
            name,
            create_quad(self.data.size * 0.5),
            Material::textured(icon, texture),
        );
        Ok(TrackedMesh::new(handle, MeshDisposeOptions::KEEP_TEXTURES))
    }
}

/// Builds the meshes of one content family.
pub trait ContentStrategy {
    fn family(&self) -> ContentFamily;

    /// Creates the content and stores it in `record`.
    ///
    /// On error, meshes already stored in `record` are released by the caller.
    fn build(&self, ctx: &mut ContentContext<'_>, record: &mut GizmoRecord) -> Result<()>;
}

impl ContentFamily {
    #[must_use]
    pub fn strategy(self) -> &'static dyn ContentStrategy {
        match self {
            Self::Particle => &ParticleContent,
            Self::Wireframe => &WireframeContent,
            Self::Shape => &ShapeContent,
        }
    }
}

/// Runs the strategy of the gizmo's family and returns the filled record.
///
/// A failed build releases everything it created before the error surfaced.
pub fn build_record(ctx: &mut ContentContext<'_>) -> Result<GizmoRecord> {
    let strategy = ctx.data.sub_type.family().strategy();
    let mut record = GizmoRecord::new(ctx.target.id);

    match strategy.build(ctx, &mut record) {
        Ok(()) => Ok(record),
        Err(err) => {
            let released = record.release(ctx.pool);
            if released > 0 {
                log::debug!("Released {released} partially built gizmo meshes");
            }
            Err(err)
        }
    }
}

// ============================================================================
// Particle
// ============================================================================

/// Outline of a particle system's emitter volume.
pub struct ParticleContent;

impl ContentStrategy for ParticleContent {
    fn family(&self) -> ContentFamily {
        ContentFamily::Particle
    }

    fn build(&self, ctx: &mut ContentContext<'_>, record: &mut GizmoRecord) -> Result<()> {
        let target = ctx.target;
        let ItemKind::ParticleSystem(shape) = &target.kind else {
            log::debug!("Target '{}' is not a particle system", target.name);
            return Ok(());
        };

        let geometry = match *shape {
            EmitterShape::Sphere { radius } | EmitterShape::Hemisphere { radius } => {
                create_sphere(radius)
            }
            EmitterShape::Cone { radius, height } => create_cone(radius, height),
            EmitterShape::Box { size } => create_box(size.x, size.y, size.z),
            EmitterShape::Circle { radius } => create_circle(radius, Vec3::Y),
            EmitterShape::Edge { width } => {
                let half = Vec3::X * (width / 2.0);
                Geometry::lines("Edge", vec![-half, half], vec![0, 1])
            }
        };
        let color = ctx.color();
        record.set_primary(ctx.owned_mesh(geometry, color));
        Ok(())
    }
}

// ============================================================================
// Wireframe
// ============================================================================

/// Edge meshes re-derived from a model's triangle meshes.
pub struct WireframeContent;

impl WireframeContent {
    /// Unique edges of a triangle list.
    fn edges(source: &SourceMesh) -> Result<Vec<u32>> {
        let vertex_count = source.positions.len();
        if let Some(&index) = source
            .indices
            .iter()
            .find(|&&index| index as usize >= vertex_count)
        {
            return Err(GizmoError::InvalidSourceMesh {
                mesh: source.name.clone(),
                index,
                vertex_count,
            });
        }

        let triangles = source.indices.chunks_exact(3);
        if !triangles.remainder().is_empty() {
            log::warn!(
                "Source mesh '{}' has {} trailing indices outside a triangle; ignored",
                source.name,
                triangles.remainder().len()
            );
        }

        let mut seen = FxHashSet::default();
        let mut indices = Vec::with_capacity(source.indices.len() * 2);
        for triangle in triangles {
            for (a, b) in [
                (triangle[0], triangle[1]),
                (triangle[1], triangle[2]),
                (triangle[2], triangle[0]),
            ] {
                if seen.insert((a.min(b), a.max(b))) {
                    indices.extend([a, b]);
                }
            }
        }
        Ok(indices)
    }
}

impl ContentStrategy for WireframeContent {
    fn family(&self) -> ContentFamily {
        ContentFamily::Wireframe
    }

    fn build(&self, ctx: &mut ContentContext<'_>, record: &mut GizmoRecord) -> Result<()> {
        let target = ctx.target;
        let ItemKind::Model(sources) = &target.kind else {
            log::debug!("Target '{}' has no source meshes", target.name);
            return Ok(());
        };

        let name = ctx.mesh_name();
        let mut material = None;
        for source in sources {
            let indices = Self::edges(source)?;
            let material = *material.get_or_insert_with(|| {
                let color = Vec4::from_array(ctx.settings.wireframe_color);
                let handle = ctx.pool.add_material(Material::new(name, color));
                record.add_shared_material(handle);
                handle
            });

            let geometry = ctx.pool.add_geometry(Geometry::lines(
                source.name.as_str(),
                source.positions.clone(),
                indices,
            ));
            let mesh = ctx.pool.add_mesh(Mesh::new(name, geometry, material));
            record.push_wireframe(TrackedMesh::new(mesh, MeshDisposeOptions::KEEP_MATERIAL));
        }
        Ok(())
    }
}

// ============================================================================
// Shape
// ============================================================================

/// Procedural shapes: basic outlines, icon shapes, transform handles and
/// bounding boxes.
pub struct ShapeContent;

impl ShapeContent {
    fn basic_geometry(ctx: &ContentContext<'_>) -> Geometry {
        let size = ctx.data.size;
        match ctx.data.sub_type {
            GizmoSubType::Sphere => create_sphere(size / 2.0),
            GizmoSubType::Cylinder => create_cylinder(size / 2.0, size),
            GizmoSubType::Cone | GizmoSubType::SpotLight => create_cone(size / 2.0, size),
            GizmoSubType::Torus => create_torus(size / 2.0, size / 8.0),
            GizmoSubType::Sprite => create_quad(size),
            GizmoSubType::Frustum | GizmoSubType::Camera => {
                create_frustum(FRAC_PI_4, 1.0, size * 0.1, size)
            }
            GizmoSubType::DirectionLight => create_arrow(Vec3::NEG_Y, size),
            GizmoSubType::PointLight | GizmoSubType::Light => create_sphere(size / 4.0),
            GizmoSubType::FloorGrid => {
                let grid = ctx.settings.floor_grid;
                create_grid(grid.size, grid.divisions)
            }
            GizmoSubType::BoundingBox => create_bounding_box(&ctx.target.local_bounds()),
            _ => create_box(size, size, size),
        }
    }

    /// One handle per axis, keyed `X`, `Y` and `Z`.
    fn build_handles(ctx: &mut ContentContext<'_>, record: &mut GizmoRecord) {
        let length = ctx.settings.handle_length * ctx.data.size;
        for ((key, axis), color) in HandleKey::AXES
            .into_iter()
            .zip([Vec3::X, Vec3::Y, Vec3::Z])
            .zip(AXIS_COLORS)
        {
            let geometry = match ctx.data.sub_type {
                GizmoSubType::Rotation => create_circle(length, axis),
                GizmoSubType::Scale => create_scale_handle(axis, length),
                _ => create_arrow(axis, length),
            };
            // Handles stay visible through the scene.
            let name = ctx.mesh_name();
            let material = Material::new(name, color).with_depth_test(false);
            let mesh = ctx.pool.create_mesh(name, geometry, material);
            record.insert_named(key, TrackedMesh::owned(mesh));
        }
    }
}

impl ContentStrategy for ShapeContent {
    fn family(&self) -> ContentFamily {
        ContentFamily::Shape
    }

    fn build(&self, ctx: &mut ContentContext<'_>, record: &mut GizmoRecord) -> Result<()> {
        // Fail before creating anything when an icon is missing.
        let sub_type = ctx.data.sub_type;
        for icon in sub_type.required_icons() {
            ctx.icons.require(icon)?;
        }

        match sub_type {
            GizmoSubType::Rotation | GizmoSubType::Scale | GizmoSubType::Translation => {
                Self::build_handles(ctx, record);
            }
            GizmoSubType::ViewHelper => {
                for (key, icon) in HandleKey::AXES.into_iter().zip(sub_type.required_icons()) {
                    let sprite = ctx.icon_sprite(icon)?;
                    record.insert_named(key, sprite);
                }
            }
            GizmoSubType::Camera | GizmoSubType::Light => {
                let geometry = Self::basic_geometry(ctx);
                let color = ctx.color();
                record.set_primary(ctx.owned_mesh(geometry, color));
                let sprite = ctx.icon_sprite(sub_type.as_str())?;
                record.insert_named(HandleKey::Icon, sprite);
            }
            _ => {
                let geometry = Self::basic_geometry(ctx);
                let color = ctx.color();
                record.set_primary(ctx.owned_mesh(geometry, color));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use image::RgbaImage;
    use rustc_hash::FxHashMap;

    use super::*;
    use crate::composition::ItemId;

    struct Fixture {
        pool: ResourcePool,
        settings: GizmoSettings,
        icons: IconCache,
    }

    impl Fixture {
        fn new(icons: &[&str]) -> Self {
            let mut pool = ResourcePool::new();
            let mut cache = IconCache::new();
            let images: FxHashMap<String, RgbaImage> = icons
                .iter()
                .map(|name| ((*name).to_string(), RgbaImage::new(2, 2)))
                .collect();
            cache.materialize(&mut pool, &images);
            Self {
                pool,
                settings: GizmoSettings::default(),
                icons: cache,
            }
        }

        fn build(&mut self, target: &SceneItem, sub_type: GizmoSubType) -> Result<GizmoRecord> {
            let data = GizmoData::new(target.id, sub_type);
            build_record(&mut ContentContext {
                pool: &mut self.pool,
                target,
                data: &data,
                settings: &self.settings,
                icons: &self.icons,
            })
        }
    }

    fn names(pool: &ResourcePool, record: &GizmoRecord) -> Vec<String> {
        record
            .meshes()
            .map(|h| pool.mesh(h).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn rotation_builds_three_axis_meshes() {
        let mut fx = Fixture::new(&[]);
        let target = SceneItem::new(ItemId(1), "t", ItemKind::Null);
        let record = fx.build(&target, GizmoSubType::Rotation).unwrap();

        assert!(record.primary().is_none());
        for key in HandleKey::AXES {
            assert!(record.named(key).is_some());
        }
        assert_eq!(names(&fx.pool, &record), vec!["rotation"; 3]);
        let x = fx.pool.mesh(record.named(HandleKey::X).unwrap().handle).unwrap();
        assert!(!fx.pool.material(x.material).unwrap().depth_test);
    }

    #[test]
    fn particle_outline_follows_emitter() {
        let mut fx = Fixture::new(&[]);
        let target = SceneItem::new(
            ItemId(1),
            "p",
            ItemKind::ParticleSystem(EmitterShape::Cone {
                radius: 1.0,
                height: 2.0,
            }),
        );
        let record = fx.build(&target, GizmoSubType::ParticleEmitter).unwrap();
        assert_eq!(names(&fx.pool, &record), vec!["particleEmitter"]);
    }

    #[test]
    fn camera_without_icon_leaves_nothing() {
        let mut fx = Fixture::new(&[]);
        let target = SceneItem::new(ItemId(1), "cam", ItemKind::Camera);
        let err = fx.build(&target, GizmoSubType::Camera).unwrap_err();

        assert_eq!(err, GizmoError::MissingIcon("camera".into()));
        let stats = fx.pool.stats();
        assert_eq!(stats.live_meshes, 0);
        assert_eq!(stats.geometries, 0);
        assert_eq!(stats.materials, 0);
    }

    #[test]
    fn camera_icon_sprite_borrows_texture() {
        let mut fx = Fixture::new(&["camera"]);
        let target = SceneItem::new(ItemId(1), "cam", ItemKind::Camera);
        let record = fx.build(&target, GizmoSubType::Camera).unwrap();

        let icon = record.named(HandleKey::Icon).unwrap();
        assert_eq!(icon.dispose, MeshDisposeOptions::KEEP_TEXTURES);
        assert_eq!(names(&fx.pool, &record), vec!["camera", "camera"]);
    }

    #[test]
    fn wireframes_share_one_material() {
        let mut fx = Fixture::new(&[]);
        let tri = || SourceMesh::new("tri", vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 2]);
        let target = SceneItem::new(ItemId(1), "model", ItemKind::Model(vec![tri(), tri()]));
        let record = fx.build(&target, GizmoSubType::ModelWireframe).unwrap();

        assert_eq!(record.wireframes().len(), 2);
        assert_eq!(record.shared_materials().len(), 1);
        let geometry = fx
            .pool
            .mesh(record.wireframes()[0].handle)
            .and_then(|m| fx.pool.geometry(m.geometry))
            .unwrap();
        assert_eq!(geometry.index_count(), 6);
    }

    #[test]
    fn trailing_indices_are_ignored() {
        let source = SourceMesh::new("tri", vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 2, 0, 1]);
        let edges = WireframeContent::edges(&source).unwrap();
        assert_eq!(edges, vec![0, 1, 1, 2, 2, 0]);
    }

    #[test]
    fn invalid_source_mesh_releases_partial_content() {
        let mut fx = Fixture::new(&[]);
        let good = SourceMesh::new("good", vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 2]);
        let bad = SourceMesh::new("bad", vec![Vec3::ZERO], vec![0, 0, 7]);
        let target = SceneItem::new(ItemId(1), "model", ItemKind::Model(vec![good, bad]));

        let err = fx.build(&target, GizmoSubType::ModelWireframe).unwrap_err();
        assert!(matches!(err, GizmoError::InvalidSourceMesh { index: 7, .. }));
        let stats = fx.pool.stats();
        assert_eq!(stats.live_meshes, 0);
        assert_eq!(stats.geometries, 0);
        assert_eq!(stats.materials, 0);
    }

    #[test]
    fn bounding_box_is_named_box() {
        let mut fx = Fixture::new(&[]);
        let target = SceneItem::new(ItemId(1), "t", ItemKind::Sprite);
        let record = fx.build(&target, GizmoSubType::BoundingBox).unwrap();
        assert_eq!(names(&fx.pool, &record), vec!["Box"]);
    }
}
