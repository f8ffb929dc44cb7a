//! Item definitions and the runtime item registry.
//!
//! Items are authored as RON files under `data/items/` (one definition per
//! file) and loaded into an `ItemRegistry` resource at startup, with a
//! filesystem watcher for hot reload during development. A definition is
//! immutable at runtime: it names the item and describes its in-world pickup
//! visual, its in-hand held visual, and the HUD icon color.

pub mod loader;
pub mod registry;

pub use registry::*;
