use glam::{Vec2, Vec3};

use super::LineBuilder;
use crate::resources::geometry::Geometry;

/// Square grid on the XZ plane with `divisions` cells per edge.
#[must_use]
pub fn create_grid(size: f32, divisions: u32) -> Geometry {
    let divisions = divisions.max(1);
    let half = size / 2.0;
    let step = size / divisions as f32;

    let mut builder = LineBuilder::new();
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        builder
            .segment(Vec3::new(-half, 0.0, k), Vec3::new(half, 0.0, k))
            .segment(Vec3::new(k, 0.0, -half), Vec3::new(k, 0.0, half));
    }
    builder.build("FloorGrid")
}

/// Textured quad on the XY plane, used for sprites and icons.
#[must_use]
pub fn create_quad(size: f32) -> Geometry {
    let h = size / 2.0;
    Geometry::triangles(
        "Quad",
        vec![
            Vec3::new(-h, -h, 0.0),
            Vec3::new(h, -h, 0.0),
            Vec3::new(h, h, 0.0),
            Vec3::new(-h, h, 0.0),
        ],
        vec![
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 0.0),
        ],
        vec![0, 1, 2, 0, 2, 3],
    )
}
