use glam::Vec3;

use super::{CIRCLE_SEGMENTS, LineBuilder, circle_points};
use crate::resources::geometry::Geometry;

/// Single ring of `radius` around `axis`.
#[must_use]
pub fn create_circle(radius: f32, axis: Vec3) -> Geometry {
    let mut builder = LineBuilder::new();
    builder.closed_loop(&circle_points(radius, CIRCLE_SEGMENTS, axis, Vec3::ZERO));
    builder.build("Circle")
}

/// Three orthogonal great circles.
#[must_use]
pub fn create_sphere(radius: f32) -> Geometry {
    let mut builder = LineBuilder::new();
    for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
        builder.closed_loop(&circle_points(radius, CIRCLE_SEGMENTS, axis, Vec3::ZERO));
    }
    builder.build("Sphere")
}

/// Torus outline: the inner and outer rings on XZ plus four tube sections.
#[must_use]
pub fn create_torus(radius: f32, tube: f32) -> Geometry {
    let mut builder = LineBuilder::new();
    builder
        .closed_loop(&circle_points(radius + tube, CIRCLE_SEGMENTS, Vec3::Y, Vec3::ZERO))
        .closed_loop(&circle_points(radius - tube, CIRCLE_SEGMENTS, Vec3::Y, Vec3::ZERO));
    for (center, axis) in [
        (Vec3::X * radius, Vec3::Z),
        (Vec3::NEG_X * radius, Vec3::Z),
        (Vec3::Z * radius, Vec3::X),
        (Vec3::NEG_Z * radius, Vec3::X),
    ] {
        builder.closed_loop(&circle_points(tube, CIRCLE_SEGMENTS / 2, axis, center));
    }
    builder.build("Torus")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_is_three_rings() {
        let geometry = create_sphere(1.0);
        assert_eq!(geometry.vertex_count(), 3 * CIRCLE_SEGMENTS as usize);
    }
}
