//! Per-composition gizmo state.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::composition::{Composition, ItemId};
use crate::gizmo::icons::IconCache;
use crate::gizmo::queue::MutationQueue;
use crate::gizmo::record::MeshTracker;

/// Everything the gizmo plugin tracks for one composition.
#[derive(Debug, Default)]
pub struct GizmoContext {
    pub(crate) queue: MutationQueue,
    pub(crate) tracker: MeshTracker,
    /// Target item -> gizmo items decorating it.
    pub(crate) targets: FxHashMap<ItemId, SmallVec<[ItemId; 2]>>,
    /// Gizmo items refreshed every frame, in birth order.
    pub(crate) live: Vec<ItemId>,
    pub(crate) icons: IconCache,
}

impl GizmoContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn queue(&self) -> &MutationQueue {
        &self.queue
    }

    #[inline]
    #[must_use]
    pub fn tracker(&self) -> &MeshTracker {
        &self.tracker
    }

    #[inline]
    #[must_use]
    pub fn icons(&self) -> &IconCache {
        &self.icons
    }

    #[inline]
    #[must_use]
    pub fn live_gizmos(&self) -> &[ItemId] {
        &self.live
    }

    /// Gizmos registered for `target`, in composition order.
    #[must_use]
    pub fn gizmos_targeting(&self, target: ItemId) -> &[ItemId] {
        self.targets.get(&target).map_or(&[], SmallVec::as_slice)
    }

    #[must_use]
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Rebuilds the target table from the composition's gizmo items.
    pub(crate) fn rebuild_targets(&mut self, composition: &Composition) {
        self.targets.clear();
        for (gizmo, data) in composition.gizmo_items() {
            self.register_target(data.target, gizmo);
        }
    }

    pub(crate) fn register_target(&mut self, target: ItemId, gizmo: ItemId) {
        let gizmos = self.targets.entry(target).or_default();
        if !gizmos.contains(&gizmo) {
            gizmos.push(gizmo);
        }
    }

    pub(crate) fn unregister_gizmo(&mut self, gizmo: ItemId) {
        self.targets.retain(|_, gizmos| {
            gizmos.retain(|g| *g != gizmo);
            !gizmos.is_empty()
        });
        self.live.retain(|g| *g != gizmo);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::ItemKind;
    use crate::gizmo::data::{GizmoData, GizmoSubType};

    #[test]
    fn rebuild_groups_gizmos_by_target() {
        let mut composition = Composition::new();
        let target = composition.spawn("cube", ItemKind::Null);
        let a = composition.spawn(
            "a",
            ItemKind::Gizmo(GizmoData::new(target, GizmoSubType::Box)),
        );
        let b = composition.spawn(
            "b",
            ItemKind::Gizmo(GizmoData::new(target, GizmoSubType::Translation)),
        );

        let mut context = GizmoContext::new();
        context.rebuild_targets(&composition);
        assert_eq!(context.gizmos_targeting(target), &[a, b]);

        context.unregister_gizmo(a);
        assert_eq!(context.gizmos_targeting(target), &[b]);
        context.unregister_gizmo(b);
        assert_eq!(context.target_count(), 0);
    }
}
