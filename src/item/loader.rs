//! Item definition loading and hot-reloading.
//!
//! Each `.ron` file under `data/items/` holds one `ItemDef`. All parseable
//! definitions are collected into the `ItemRegistry` resource; a directory
//! watcher flags edits so the registry reloads while the game runs. Changed
//! definitions take effect the next time an item is (re-)equipped or spawned.
use crate::item::{ItemDef, ItemRegistry};
use crate::ron_loader::{load_ron_files, setup_ron_watcher};
use bevy::prelude::{Res, ResMut, Resource};

pub const ITEMS_DIR: &str = "data/items";

#[derive(Resource)]
pub struct ItemWatcher(pub crate::ron::RonWatcher);

impl ItemWatcher {
    #[must_use]
    pub fn stub() -> Self {
        ItemWatcher(crate::ron::RonWatcher::stub())
    }
}

/// Load all item definitions from `path` (directory) into a registry.
/// Missing directory or zero parseable files yields an empty registry; the
/// game still runs, there is just nothing to pick up.
#[must_use]
pub fn load_items_from_dir(path: &str) -> ItemRegistry {
    let defs: Vec<ItemDef> = load_ron_files(path);
    let mut registry = ItemRegistry::default();
    for def in defs {
        registry.register(def);
    }
    if registry.is_empty() {
        eprintln!("warning: no item definitions found in {path}");
    }
    registry
}

/// Create a watcher for the items directory (hot-reload).
///
/// # Errors
/// Returns a `notify::Error` when the underlying watcher cannot be created.
pub fn setup_item_watcher(path: &str) -> Result<ItemWatcher, notify::Error> {
    setup_ron_watcher(path).map(ItemWatcher)
}

/// Reload the `ItemRegistry` resource when files under the items dir change.
#[allow(clippy::needless_pass_by_value)]
pub fn check_item_changes(watcher: Res<ItemWatcher>, mut registry: ResMut<ItemRegistry>) {
    if watcher.0.take_changed() {
        println!("Item definitions changed, reloading...");
        *registry = load_items_from_dir(ITEMS_DIR);
    }
}
