use glam::Vec3;

use super::LineBuilder;
use crate::resources::geometry::{BoundingBox, Geometry};

/// The 12 edges of a box of the given extents, centered on the origin.
#[must_use]
pub fn create_box(width: f32, height: f32, depth: f32) -> Geometry {
    let half = Vec3::new(width, height, depth) * 0.5;
    box_edges(-half, half, "Box")
}

/// The 12 edges of `bbox`, in the coordinates of the box itself.
#[must_use]
pub fn create_bounding_box(bbox: &BoundingBox) -> Geometry {
    box_edges(bbox.min, bbox.max, "BoundingBox")
}

fn box_edges(min: Vec3, max: Vec3, label: &str) -> Geometry {
    let corner = |x: bool, y: bool, z: bool| {
        Vec3::new(
            if x { max.x } else { min.x },
            if y { max.y } else { min.y },
            if z { max.z } else { min.z },
        )
    };

    let bottom = [
        corner(false, false, false),
        corner(true, false, false),
        corner(true, false, true),
        corner(false, false, true),
    ];
    let top = [
        corner(false, true, false),
        corner(true, true, false),
        corner(true, true, true),
        corner(false, true, true),
    ];

    let mut builder = LineBuilder::new();
    builder.closed_loop(&bottom).closed_loop(&top);
    for (b, t) in bottom.iter().zip(top.iter()) {
        builder.segment(*b, *t);
    }
    builder.build(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_has_twelve_edges() {
        let geometry = create_box(2.0, 2.0, 2.0);
        assert_eq!(geometry.index_count(), 24);
        let bbox = geometry.bounding_box().unwrap();
        assert_eq!(bbox.min, Vec3::splat(-1.0));
        assert_eq!(bbox.max, Vec3::splat(1.0));
    }
}
