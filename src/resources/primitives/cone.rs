use glam::Vec3;

use super::{CIRCLE_SEGMENTS, LineBuilder, circle_points};
use crate::resources::geometry::Geometry;

/// Cone with its apex at the origin opening along +Y.
#[must_use]
pub fn create_cone(radius: f32, height: f32) -> Geometry {
    let base_center = Vec3::Y * height;
    let base = circle_points(radius, CIRCLE_SEGMENTS, Vec3::Y, base_center);

    let mut builder = LineBuilder::new();
    builder.closed_loop(&base);
    for p in base.iter().step_by(base.len() / 4) {
        builder.segment(Vec3::ZERO, *p);
    }
    builder.build("Cone")
}

/// Cylinder of `height` centered on the origin along Y.
#[must_use]
pub fn create_cylinder(radius: f32, height: f32) -> Geometry {
    let half = Vec3::Y * (height / 2.0);
    let bottom = circle_points(radius, CIRCLE_SEGMENTS, Vec3::Y, -half);
    let top = circle_points(radius, CIRCLE_SEGMENTS, Vec3::Y, half);

    let mut builder = LineBuilder::new();
    builder.closed_loop(&bottom).closed_loop(&top);
    let stride = bottom.len() / 4;
    for (b, t) in bottom.iter().zip(top.iter()).step_by(stride) {
        builder.segment(*b, *t);
    }
    builder.build("Cylinder")
}

/// View frustum looking down -Z, from `near` to `far`.
#[must_use]
pub fn create_frustum(fov_y: f32, aspect: f32, near: f32, far: f32) -> Geometry {
    let rect = |distance: f32| {
        let h = (fov_y / 2.0).tan() * distance;
        let w = h * aspect;
        [
            Vec3::new(-w, -h, -distance),
            Vec3::new(w, -h, -distance),
            Vec3::new(w, h, -distance),
            Vec3::new(-w, h, -distance),
        ]
    };
    let near_rect = rect(near);
    let far_rect = rect(far);

    let mut builder = LineBuilder::new();
    builder.closed_loop(&near_rect).closed_loop(&far_rect);
    for (n, f) in near_rect.iter().zip(far_rect.iter()) {
        builder.segment(*n, *f);
    }
    builder.build("Frustum")
}

/// Translation handle: a shaft along `axis` capped by a small cone outline.
#[must_use]
pub fn create_arrow(axis: Vec3, length: f32) -> Geometry {
    let dir = axis.normalize_or(Vec3::Y);
    let tip = dir * length;
    let head_base = dir * (length * 0.8);
    let head = circle_points(length * 0.06, 8, dir, head_base);

    let mut builder = LineBuilder::new();
    builder.segment(Vec3::ZERO, tip).closed_loop(&head);
    for p in &head {
        builder.segment(*p, tip);
    }
    builder.build("Arrow")
}

/// Scale handle: a shaft along `axis` ending in a small cube.
#[must_use]
pub fn create_scale_handle(axis: Vec3, length: f32) -> Geometry {
    let dir = axis.normalize_or(Vec3::Y);
    let end = dir * length;
    let half = length * 0.05;

    let mut builder = LineBuilder::new();
    builder.segment(Vec3::ZERO, end);
    let cube = super::create_box(half * 2.0, half * 2.0, half * 2.0);
    for pair in cube.indices.chunks_exact(2) {
        builder.segment(
            cube.positions[pair[0] as usize] + end,
            cube.positions[pair[1] as usize] + end,
        );
    }
    builder.build("ScaleHandle")
}
