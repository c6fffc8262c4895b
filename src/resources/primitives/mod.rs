//! Procedural line shapes used by the gizmo content builders.
//!
//! Shapes are centered on the origin, Y-up, and sized in world units. They are
//! deliberately coarse: the overlay only has to be recognizable.

pub mod box_shape;
pub mod cone;
pub mod plane;
pub mod sphere;

pub use box_shape::{create_bounding_box, create_box};
pub use cone::{create_arrow, create_cone, create_cylinder, create_frustum, create_scale_handle};
pub use plane::{create_grid, create_quad};
pub use sphere::{create_circle, create_sphere, create_torus};

use glam::Vec3;

use crate::resources::geometry::Geometry;

/// Segment count used for circles unless a shape asks otherwise.
pub const CIRCLE_SEGMENTS: u32 = 32;

/// Accumulates line-list vertices and indices.
#[derive(Debug, Default)]
pub(crate) struct LineBuilder {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
}

impl LineBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push_vertex(&mut self, p: Vec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(p);
        index
    }

    pub(crate) fn segment(&mut self, a: Vec3, b: Vec3) -> &mut Self {
        let ia = self.push_vertex(a);
        let ib = self.push_vertex(b);
        self.indices.extend_from_slice(&[ia, ib]);
        self
    }

    /// Connects consecutive points and closes the loop.
    pub(crate) fn closed_loop(&mut self, points: &[Vec3]) -> &mut Self {
        if points.len() < 2 {
            return self;
        }
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(points);
        let n = points.len() as u32;
        for i in 0..n {
            self.indices.extend_from_slice(&[base + i, base + (i + 1) % n]);
        }
        self
    }

    pub(crate) fn build(self, label: &str) -> Geometry {
        Geometry::lines(label, self.positions, self.indices)
    }
}

/// Points of a circle of `radius` in the plane perpendicular to `axis`.
pub(crate) fn circle_points(radius: f32, segments: u32, axis: Vec3, center: Vec3) -> Vec<Vec3> {
    let segments = segments.max(3);
    let (u, v) = axis.normalize_or(Vec3::Y).any_orthonormal_pair();
    (0..segments)
        .map(|i| {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            center + (u * angle.cos() + v * angle.sin()) * radius
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_loop_wraps_around() {
        let mut builder = LineBuilder::new();
        builder.closed_loop(&[Vec3::ZERO, Vec3::X, Vec3::Y]);
        let geometry = builder.build("tri");
        assert_eq!(geometry.indices, vec![0, 1, 1, 2, 2, 0]);
    }

    #[test]
    fn circle_points_lie_on_radius() {
        for p in circle_points(2.0, 16, Vec3::Z, Vec3::ZERO) {
            assert!((p.length() - 2.0).abs() < 1e-5);
            assert!(p.z.abs() < 1e-5);
        }
    }
}
