use glam::{Vec2, Vec3};
use wgpu::PrimitiveTopology;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box enclosing all `points`. Returns `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self { min, max })
    }

    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[inline]
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// CPU-side geometry description.
///
/// Gizmo content is mostly drawn as line lists; sprites and icons use
/// textured triangle lists. Uploading the data is the render backend's job.
#[derive(Debug, Clone)]
pub struct Geometry {
    pub label: String,
    pub topology: PrimitiveTopology,
    pub positions: Vec<Vec3>,
    pub uvs: Option<Vec<Vec2>>,
    pub indices: Vec<u32>,
}

impl Geometry {
    /// Creates an indexed line-list geometry.
    #[must_use]
    pub fn lines(label: impl Into<String>, positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self {
            label: label.into(),
            topology: PrimitiveTopology::LineList,
            positions,
            uvs: None,
            indices,
        }
    }

    /// Creates an indexed, textured triangle-list geometry.
    #[must_use]
    pub fn triangles(
        label: impl Into<String>,
        positions: Vec<Vec3>,
        uvs: Vec<Vec2>,
        indices: Vec<u32>,
    ) -> Self {
        Self {
            label: label.into(),
            topology: PrimitiveTopology::TriangleList,
            positions,
            uvs: Some(uvs),
            indices,
        }
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of bytes the vertex and index buffers occupy once uploaded.
    #[must_use]
    pub fn byte_size(&self) -> usize {
        let positions: &[u8] = bytemuck::cast_slice(&self.positions);
        let uvs = self
            .uvs
            .as_deref()
            .map_or(0, |uvs| bytemuck::cast_slice::<Vec2, u8>(uvs).len());
        let indices: &[u8] = bytemuck::cast_slice(&self.indices);
        positions.len() + uvs + indices.len()
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_from_points() {
        let bbox = BoundingBox::from_points(&[
            Vec3::new(-1.0, 2.0, 0.0),
            Vec3::new(3.0, -4.0, 1.0),
            Vec3::ZERO,
        ])
        .unwrap();
        assert_eq!(bbox.min, Vec3::new(-1.0, -4.0, 0.0));
        assert_eq!(bbox.max, Vec3::new(3.0, 2.0, 1.0));
        assert_eq!(bbox.center(), Vec3::new(1.0, -1.0, 0.5));
    }

    #[test]
    fn bounding_box_of_nothing_is_none() {
        assert!(BoundingBox::from_points(&[]).is_none());
    }

    #[test]
    fn byte_size_counts_all_buffers() {
        let geometry = Geometry::lines("seg", vec![Vec3::ZERO, Vec3::X], vec![0, 1]);
        assert_eq!(geometry.byte_size(), 2 * 12 + 2 * 4);
    }
}
