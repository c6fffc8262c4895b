//! Host composition model
//!
//! The minimal slice of the host composition the gizmo plugin works against:
//! a flat list of scene items, the composition's render frame and its
//! resource pool. Items are addressed by [`ItemId`]; gizmo items carry a
//! [`GizmoData`] naming the item they decorate.

use std::sync::atomic::{AtomicU32, Ordering};

use glam::{Affine3A, Vec3};
use serde::Deserialize;

use crate::gizmo::GizmoData;
use crate::graph::RenderFrame;
use crate::resources::{BoundingBox, ResourcePool};

static NEXT_COMPOSITION_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of a composition, unique for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompositionId(u32);

/// Identity of a scene item inside its composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

/// Emitter volume of a particle system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EmitterShape {
    Sphere { radius: f32 },
    Hemisphere { radius: f32 },
    Cone { radius: f32, height: f32 },
    Box { size: Vec3 },
    Circle { radius: f32 },
    Edge { width: f32 },
}

/// Triangle mesh data of a model item, used to derive wireframes.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceMesh {
    pub name: String,
    pub positions: Vec<Vec3>,
    /// Triangle list indices.
    pub indices: Vec<u32>,
}

impl SourceMesh {
    #[must_use]
    pub fn new(name: impl Into<String>, positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            positions,
            indices,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Null,
    Sprite,
    ParticleSystem(EmitterShape),
    Model(Vec<SourceMesh>),
    Camera,
    Light,
    Gizmo(GizmoData),
}

#[derive(Debug, Clone)]
pub struct SceneItem {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    pub transform: Affine3A,
}

impl SceneItem {
    #[must_use]
    pub fn new(id: ItemId, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            transform: Affine3A::IDENTITY,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_gizmo(&self) -> bool {
        matches!(self.kind, ItemKind::Gizmo(_))
    }

    #[must_use]
    pub fn gizmo(&self) -> Option<&GizmoData> {
        match &self.kind {
            ItemKind::Gizmo(data) => Some(data),
            _ => None,
        }
    }

    /// Local-space bounds of the item's own geometry.
    ///
    /// Models use their source meshes; every other item falls back to a unit
    /// cube so a bounding box gizmo still has something to show.
    #[must_use]
    pub fn local_bounds(&self) -> BoundingBox {
        let unit = BoundingBox::new(Vec3::splat(-0.5), Vec3::splat(0.5));
        match &self.kind {
            ItemKind::Model(meshes) => meshes
                .iter()
                .filter_map(|m| BoundingBox::from_points(&m.positions))
                .reduce(|a, b| a.union(&b))
                .unwrap_or(unit),
            _ => unit,
        }
    }
}

/// A live composition: scene items, the render frame and GPU resources.
pub struct Composition {
    id: CompositionId,
    pub items: Vec<SceneItem>,
    pub render_frame: RenderFrame,
    pub resources: ResourcePool,
    next_item_id: u32,
}

impl Default for Composition {
    fn default() -> Self {
        Self::new()
    }
}

impl Composition {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: CompositionId(NEXT_COMPOSITION_ID.fetch_add(1, Ordering::Relaxed)),
            items: Vec::new(),
            render_frame: RenderFrame::new(),
            resources: ResourcePool::new(),
            next_item_id: 1,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> CompositionId {
        self.id
    }

    /// Adds a new item and returns its freshly assigned id.
    pub fn spawn(&mut self, name: impl Into<String>, kind: ItemKind) -> ItemId {
        let id = ItemId(self.next_item_id);
        self.next_item_id += 1;
        self.items.push(SceneItem::new(id, name, kind));
        id
    }

    /// Inserts an item with an externally assigned id, replacing any item
    /// with the same id.
    pub fn insert_item(&mut self, item: SceneItem) {
        self.next_item_id = self.next_item_id.max(item.id.0 + 1);
        match self.items.iter_mut().find(|i| i.id == item.id) {
            Some(slot) => *slot = item,
            None => self.items.push(item),
        }
    }

    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&SceneItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut SceneItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    /// Detaches an item from the composition and hands it back.
    pub fn remove_item(&mut self, id: ItemId) -> Option<SceneItem> {
        let index = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(index))
    }

    /// Gizmo items with their data.
    pub fn gizmo_items(&self) -> impl Iterator<Item = (ItemId, &GizmoData)> {
        self.items
            .iter()
            .filter_map(|item| item.gizmo().map(|data| (item.id, data)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_assigns_increasing_ids() {
        let mut composition = Composition::new();
        let a = composition.spawn("a", ItemKind::Null);
        let b = composition.spawn("b", ItemKind::Sprite);
        assert!(a < b);
        assert_eq!(composition.item(b).unwrap().name, "b");
    }

    #[test]
    fn insert_item_bumps_id_counter() {
        let mut composition = Composition::new();
        composition.insert_item(SceneItem::new(ItemId(40), "x", ItemKind::Null));
        let next = composition.spawn("y", ItemKind::Null);
        assert_eq!(next, ItemId(41));
    }

    #[test]
    fn remove_item_returns_it() {
        let mut composition = Composition::new();
        let id = composition.spawn("a", ItemKind::Camera);
        let removed = composition.remove_item(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(composition.item(id).is_none());
        assert!(composition.remove_item(id).is_none());
    }

    #[test]
    fn model_bounds_cover_all_meshes() {
        let item = SceneItem::new(
            ItemId(1),
            "model",
            ItemKind::Model(vec![
                SourceMesh::new("a", vec![Vec3::ZERO, Vec3::ONE], vec![]),
                SourceMesh::new("b", vec![Vec3::splat(-2.0)], vec![]),
            ]),
        );
        let bounds = item.local_bounds();
        assert_eq!(bounds.min, Vec3::splat(-2.0));
        assert_eq!(bounds.max, Vec3::ONE);
    }
}
