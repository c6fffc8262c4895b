//! Gizmo Plugin
//!
//! [`GizmoPlugin`] turns composition lifecycle events into overlay meshes:
//!
//! 1. **Reset** builds the table of which gizmo decorates which item.
//! 2. **Item born**: every gizmo registered for the born item builds its
//!    content, records it and queues its meshes for insertion.
//! 3. **Item removed**: the records of the item (or of the gizmos targeting
//!    it) are torn down; their meshes leave the passes immediately.
//! 4. **Prepare**: the queued insertions and removals are applied to the
//!    render frame, then live gizmos follow their targets.
//!
//! Overlay passes are created on first use:
//!
//! | Pass     | Meshes                         | Priority                   | Clear |
//! |----------|--------------------------------|----------------------------|-------|
//! | front    | `FloorGrid`, `Box`             | post-process + 2           | none  |
//! | behind   | transform handles              | 2 × post-process           | depth |
//! | editor   | everything else                | post-process + 2           | none  |

use image::RgbaImage;
use rustc_hash::FxHashMap;

use crate::composition::{Composition, CompositionId, ItemId, SceneItem};
use crate::errors::{GizmoError, Result};
use crate::gizmo::content::{ContentContext, build_record};
use crate::gizmo::context::GizmoContext;
use crate::gizmo::queue::FlushReport;
use crate::gizmo::routing::OverlayPasses;
use crate::plugin::Plugin;
use crate::settings::GizmoSettings;

pub struct GizmoPlugin {
    settings: GizmoSettings,
    passes: OverlayPasses,
    /// Decoded icon images, materialized per composition at construction.
    icon_images: FxHashMap<String, RgbaImage>,
    contexts: FxHashMap<CompositionId, GizmoContext>,
    last_flush: FlushReport,
}

impl GizmoPlugin {
    /// Creates the plugin after validating `settings`.
    pub fn new(settings: GizmoSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            passes: OverlayPasses::from_settings(&settings),
            settings,
            icon_images: FxHashMap::default(),
            contexts: FxHashMap::default(),
            last_flush: FlushReport::default(),
        })
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &GizmoSettings {
        &self.settings
    }

    #[inline]
    #[must_use]
    pub fn passes(&self) -> &OverlayPasses {
        &self.passes
    }

    /// Supplies the icon images compositions constructed from now on will
    /// turn into textures. Images with the same name are replaced.
    pub fn provide_icon_images(&mut self, images: impl IntoIterator<Item = (String, RgbaImage)>) {
        self.icon_images.extend(images);
    }

    #[must_use]
    pub fn icon_image_count(&self) -> usize {
        self.icon_images.len()
    }

    #[must_use]
    pub fn context(&self, composition: CompositionId) -> Option<&GizmoContext> {
        self.contexts.get(&composition)
    }

    /// Report of the most recent queue flush.
    #[must_use]
    pub fn last_flush(&self) -> FlushReport {
        self.last_flush
    }

    /// Hides or shows every mesh of `gizmo` without disposing anything.
    ///
    /// The meshes leave (or re-enter) their passes at the next prepare.
    /// Returns `Ok(false)` when the gizmo has no record or already is in the
    /// requested state.
    pub fn set_gizmo_visible(
        &mut self,
        composition: &mut Composition,
        gizmo: ItemId,
        visible: bool,
    ) -> Result<bool> {
        let context = self
            .contexts
            .get_mut(&composition.id())
            .ok_or(GizmoError::UnknownComposition(composition.id()))?;
        let Some(record) = context.tracker.get_record_mut(gizmo) else {
            return Ok(false);
        };
        if record.is_hidden() != visible {
            return Ok(false);
        }
        record.set_hidden(!visible);

        for handle in record.meshes() {
            if let Some(mesh) = composition.resources.mesh_mut(handle) {
                mesh.visible = visible;
            }
            // Only the latest toggle of this frame counts.
            context.queue.cancel(handle);
            if visible {
                context.queue.enqueue_add(handle);
            } else {
                context.queue.enqueue_remove(handle);
            }
        }
        log::debug!("Gizmo {gizmo:?} visible: {visible}");
        Ok(true)
    }

    /// Builds and records the content of `gizmo`, whose target just got born.
    fn build_gizmo(&mut self, composition: &mut Composition, gizmo: ItemId, target: ItemId) {
        let Some(context) = self.contexts.get_mut(&composition.id()) else {
            return;
        };
        let frame = &mut composition.render_frame;
        let pool = &mut composition.resources;

        if context.tracker.contains(gizmo) {
            context.tracker.destroy_record(gizmo, pool, frame, &self.passes);
        }

        let items = &composition.items;
        let Some(data) = items
            .iter()
            .find(|item| item.id == gizmo)
            .and_then(SceneItem::gizmo)
        else {
            log::debug!("Gizmo {gizmo:?} is no longer part of the composition");
            return;
        };
        let Some(target_item) = items.iter().find(|item| item.id == target) else {
            return;
        };

        let built = build_record(&mut ContentContext {
            pool,
            target: target_item,
            data,
            settings: &self.settings,
            icons: &context.icons,
        });

        match built {
            Ok(record) => {
                for handle in record.meshes() {
                    context.queue.enqueue_add(handle);
                }
                log::debug!(
                    "Gizmo {gizmo:?} ({}) built {} meshes for {target:?}",
                    data.sub_type.as_str(),
                    record.mesh_count()
                );
                context.tracker.insert_record(gizmo, record);
            }
            Err(err) => {
                log::error!(
                    "Failed to build {} gizmo {gizmo:?}: {err}",
                    data.sub_type.as_str()
                );
            }
        }
    }

    /// Disposes every record of `context` and releases its icon textures.
    fn teardown(&self, context: &mut GizmoContext, composition: &mut Composition) {
        let records = context.tracker.dispose_all(
            &mut composition.resources,
            &mut composition.render_frame,
            &self.passes,
        );
        let textures = context.icons.release(&mut composition.resources);
        context.queue.clear();
        log::debug!(
            "Gizmo state of {:?} torn down ({records} records, {textures} icon textures)",
            composition.id()
        );
    }
}

impl Plugin for GizmoPlugin {
    fn name(&self) -> &str {
        "editor-gizmo"
    }

    fn order(&self) -> i32 {
        self.settings.order
    }

    fn on_composition_constructed(&mut self, composition: &mut Composition) {
        let context = self.contexts.entry(composition.id()).or_default();
        let created = context
            .icons
            .materialize(&mut composition.resources, &self.icon_images);
        if created > 0 {
            log::debug!("{created} icon textures created for {:?}", composition.id());
        }
    }

    fn on_composition_reset(&mut self, composition: &mut Composition) {
        let context = self.contexts.entry(composition.id()).or_default();
        context.tracker.dispose_all(
            &mut composition.resources,
            &mut composition.render_frame,
            &self.passes,
        );
        context.queue.clear();
        context.rebuild_targets(composition);
        context.live.clear();
        log::debug!(
            "Gizmo state of {:?} reset ({} targets)",
            composition.id(),
            context.target_count()
        );
    }

    fn on_item_born(&mut self, composition: &mut Composition, item: ItemId) {
        let Some(context) = self.contexts.get_mut(&composition.id()) else {
            log::warn!("Item {item:?} born in unknown composition {:?}", composition.id());
            return;
        };

        let born_gizmo = composition
            .item(item)
            .and_then(SceneItem::gizmo)
            .map(|data| data.target);
        if let Some(target) = born_gizmo {
            context.register_target(target, item);
        }

        let gizmos = context.gizmos_targeting(item).to_vec();
        for gizmo in gizmos {
            self.build_gizmo(composition, gizmo, item);
        }

        if born_gizmo.is_some()
            && let Some(context) = self.contexts.get_mut(&composition.id())
            && !context.live.contains(&item)
        {
            context.live.push(item);
        }
    }

    fn on_item_removed(&mut self, composition: &mut Composition, item: &SceneItem) {
        let Some(context) = self.contexts.get_mut(&composition.id()) else {
            return;
        };
        let frame = &mut composition.render_frame;
        let pool = &mut composition.resources;

        if item.is_gizmo() {
            context.tracker.destroy_record(item.id, pool, frame, &self.passes);
            context.unregister_gizmo(item.id);
        } else {
            for gizmo in context.tracker.records_targeting(item.id) {
                context.tracker.destroy_record(gizmo, pool, frame, &self.passes);
            }
        }
    }

    fn prepare_render_frame(&mut self, composition: &mut Composition) {
        let Some(context) = self.contexts.get_mut(&composition.id()) else {
            return;
        };

        self.last_flush = context.queue.flush(
            &mut composition.render_frame,
            &composition.resources,
            &self.passes,
        );

        for gizmo in &context.live {
            let Some(record) = context.tracker.get_record(*gizmo) else {
                continue;
            };
            if record.is_hidden() {
                continue;
            }
            let transform = record
                .target()
                .and_then(|target| composition.items.iter().find(|i| i.id == target))
                .map(|target| target.transform);
            if let Some(transform) = transform {
                record.update_render_data(&mut composition.resources, transform);
            }
        }

        // Only meshes of torn-down records; host meshes are never touched.
        let disposed = context.tracker.take_disposed();
        if !disposed.is_empty() {
            let purged = composition.resources.purge_meshes(&disposed);
            let mut stale = 0;
            for mesh in &disposed {
                if self.passes.remove_mesh(&mut composition.render_frame, *mesh, None) {
                    stale += 1;
                }
            }
            log::trace!("Purged {purged} disposed gizmo meshes ({stale} stale pass entries)");
        }
    }

    fn on_composition_destroyed(&mut self, composition: &mut Composition) {
        if let Some(mut context) = self.contexts.remove(&composition.id()) {
            self.teardown(&mut context, composition);
        }
    }

    fn on_player_destroy(&mut self, compositions: &mut [Composition]) {
        for composition in compositions.iter_mut() {
            if let Some(mut context) = self.contexts.remove(&composition.id()) {
                self.teardown(&mut context, composition);
            }
        }
        if !self.contexts.is_empty() {
            log::warn!(
                "Dropping gizmo state of {} compositions not handed to player teardown",
                self.contexts.len()
            );
            self.contexts.clear();
        }
        self.icon_images.clear();
    }
}
