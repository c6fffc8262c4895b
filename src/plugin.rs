//! Plugin host contract
//!
//! A composition notifies its plugins of lifecycle events: construction,
//! reset, item birth and removal, the per-frame prepare stage and teardown.
//! [`PluginSystem`] fans every event out to the registered plugins in a
//! stable order.
//!
//! # Ordering
//!
//! Plugins run sorted by `(order(), registration index)`. Two plugins with the
//! same order value run in the order they were registered, so the sequence
//! never depends on anything but the calls to [`PluginSystem::register`].
//!
//! # Example
//!
//! ```rust,ignore
//! let mut plugins = PluginSystem::new();
//! plugins.register(Box::new(GizmoPlugin::new(GizmoSettings::default())?));
//!
//! let mut composition = Composition::new();
//! plugins.composition_constructed(&mut composition);
//! plugins.composition_reset(&mut composition);
//! plugins.item_born(&mut composition, target);
//! plugins.prepare_render_frame(&mut composition);
//! ```

use smallvec::SmallVec;

use crate::composition::{Composition, ItemId, SceneItem};

/// Receiver of composition lifecycle events.
///
/// Every hook has an empty default implementation.
pub trait Plugin {
    /// Returns the plugin name, used for logging.
    fn name(&self) -> &str;

    /// Sequencing value; lower values run first.
    fn order(&self) -> i32 {
        0
    }

    /// The composition finished loading and is about to play.
    #[allow(unused_variables)]
    fn on_composition_constructed(&mut self, composition: &mut Composition) {}

    /// The composition restarts from its first frame.
    #[allow(unused_variables)]
    fn on_composition_reset(&mut self, composition: &mut Composition) {}

    /// `item` entered its lifetime. It is part of `composition.items`.
    #[allow(unused_variables)]
    fn on_item_born(&mut self, composition: &mut Composition, item: ItemId) {}

    /// `item` was taken out of the composition.
    #[allow(unused_variables)]
    fn on_item_removed(&mut self, composition: &mut Composition, item: &SceneItem) {}

    /// Called once per frame before the render frame is drawn.
    #[allow(unused_variables)]
    fn prepare_render_frame(&mut self, composition: &mut Composition) {}

    /// The composition is being disposed.
    #[allow(unused_variables)]
    fn on_composition_destroyed(&mut self, composition: &mut Composition) {}

    /// The player owning `compositions` is shutting down.
    #[allow(unused_variables)]
    fn on_player_destroy(&mut self, compositions: &mut [Composition]) {}
}

struct PluginEntry {
    /// Registration index (stable tie-break)
    index: u32,
    plugin: Box<dyn Plugin>,
}

/// Registered plugins, kept sorted by `(order, registration index)`.
#[derive(Default)]
pub struct PluginSystem {
    plugins: SmallVec<[PluginEntry; 4]>,
    next_index: u32,
}

impl PluginSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, plugin: Box<dyn Plugin>) -> &mut Self {
        log::debug!(
            "Plugin '{}' registered (order {})",
            plugin.name(),
            plugin.order()
        );
        let entry = PluginEntry {
            index: self.next_index,
            plugin,
        };
        self.next_index += 1;
        self.plugins.push(entry);
        self.plugins
            .sort_by_key(|entry| (entry.plugin.order(), entry.index));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Plugin names in execution order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(|entry| entry.plugin.name())
    }

    fn each(&mut self, mut f: impl FnMut(&mut dyn Plugin)) {
        for entry in &mut self.plugins {
            f(entry.plugin.as_mut());
        }
    }

    // ========================================================================
    // Event fan-out
    // ========================================================================

    pub fn composition_constructed(&mut self, composition: &mut Composition) {
        self.each(|p| p.on_composition_constructed(composition));
    }

    pub fn composition_reset(&mut self, composition: &mut Composition) {
        self.each(|p| p.on_composition_reset(composition));
    }

    pub fn item_born(&mut self, composition: &mut Composition, item: ItemId) {
        self.each(|p| p.on_item_born(composition, item));
    }

    /// Detaches `item` from the composition and notifies every plugin.
    ///
    /// Returns the removed item, or `None` if it was not part of the composition.
    pub fn remove_item(&mut self, composition: &mut Composition, item: ItemId) -> Option<SceneItem> {
        let removed = composition.remove_item(item)?;
        self.each(|p| p.on_item_removed(composition, &removed));
        Some(removed)
    }

    pub fn prepare_render_frame(&mut self, composition: &mut Composition) {
        self.each(|p| p.prepare_render_frame(composition));
    }

    pub fn composition_destroyed(&mut self, composition: &mut Composition) {
        self.each(|p| p.on_composition_destroyed(composition));
    }

    pub fn player_destroy(&mut self, compositions: &mut [Composition]) {
        self.each(|p| p.on_player_destroy(compositions));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    struct Recorder {
        name: &'static str,
        order: i32,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Plugin for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        fn order(&self) -> i32 {
            self.order
        }

        fn on_composition_reset(&mut self, _composition: &mut Composition) {
            self.log.borrow_mut().push(self.name);
        }
    }

    #[test]
    fn plugins_run_by_order_then_registration() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut system = PluginSystem::new();
        for (name, order) in [("late", 10), ("a", 0), ("b", 0), ("early", -5)] {
            system.register(Box::new(Recorder {
                name,
                order,
                log: Rc::clone(&log),
            }));
        }

        system.composition_reset(&mut Composition::new());
        assert_eq!(*log.borrow(), vec!["early", "a", "b", "late"]);
        assert_eq!(system.names().collect::<Vec<_>>(), vec!["early", "a", "b", "late"]);
    }
}
