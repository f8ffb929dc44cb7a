//! `ItemDef` and `ItemRegistry` types.
//!
//! Example:
//! ```rust
//! use scavenger::item::registry::{ItemDef, ItemRegistry};
//!
//! let mut registry = ItemRegistry::default();
//! let mut def = ItemDef::default();
//! def.name = "wrench".to_string();
//! registry.register(def);
//!
//! assert!(registry.get("wrench").is_some());
//! assert_eq!(registry.len(), 1);
//! ```
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Primitive shape used by item visuals. The authoring format carries no
/// binary assets, so visuals are meshes built from these parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum Shape {
    Cube { size: (f32, f32, f32) },
    Sphere { radius: f32 },
    Cylinder { radius: f32, height: f32 },
}

impl Default for Shape {
    fn default() -> Self {
        Shape::Cube {
            size: (0.3, 0.3, 0.3),
        }
    }
}

/// One visual representation of an item: a shape plus a color.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisualDef {
    #[serde(default)]
    pub shape: Shape,
    #[serde(default = "VisualDef::default_color")]
    pub color: (f32, f32, f32), // sRGB components in [0,1]
}

impl VisualDef {
    fn default_color() -> (f32, f32, f32) {
        (0.8, 0.8, 0.8)
    }

    /// Build the mesh for this visual.
    #[must_use]
    pub fn mesh(&self) -> Mesh {
        match self.shape {
            Shape::Cube { size } => Cuboid::new(size.0, size.1, size.2).mesh().into(),
            Shape::Sphere { radius } => Sphere::new(radius).mesh().uv(16, 16),
            Shape::Cylinder { radius, height } => Cylinder::new(radius, height).mesh().into(),
        }
    }

    #[must_use]
    pub fn color(&self) -> Color {
        Color::srgb(self.color.0, self.color.1, self.color.2)
    }

    /// Half-extents of a box bounding this shape, used as the pickup's
    /// raycast target.
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        match self.shape {
            Shape::Cube { size } => Vec3::new(size.0, size.1, size.2) * 0.5,
            Shape::Sphere { radius } => Vec3::splat(radius),
            Shape::Cylinder { radius, height } => Vec3::new(radius, height * 0.5, radius),
        }
    }
}

impl Default for VisualDef {
    fn default() -> Self {
        Self {
            shape: Shape::default(),
            color: Self::default_color(),
        }
    }
}

/// Immutable item definition. `name` is the registry key; the HUD shows
/// `display_name` and paints the slot icon with `icon_color`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemDef {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub pickup_visual: VisualDef, // Shown lying in the world
    #[serde(default)]
    pub held_visual: VisualDef, // Shown in the player's hand
    #[serde(default = "ItemDef::default_icon_color")]
    pub icon_color: (f32, f32, f32), // HUD slot swatch color
}

impl ItemDef {
    fn default_icon_color() -> (f32, f32, f32) {
        (0.9, 0.9, 0.9)
    }

    #[must_use]
    pub fn icon_color(&self) -> Color {
        Color::srgb(self.icon_color.0, self.icon_color.1, self.icon_color.2)
    }

    /// Name shown to the player; falls back to the registry key.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
}

impl Default for ItemDef {
    fn default() -> Self {
        Self {
            name: "item".to_string(),
            display_name: String::new(),
            pickup_visual: VisualDef::default(),
            held_visual: VisualDef::default(),
            icon_color: Self::default_icon_color(),
        }
    }
}

#[derive(Resource, Default, Clone)]
pub struct ItemRegistry {
    items: HashMap<String, ItemDef>,
}

impl ItemRegistry {
    pub fn register(&mut self, def: ItemDef) {
        self.items.insert(def.name.clone(), def);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ItemDef> {
        self.items.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Registered item names in sorted order (stable for scene scattering
    /// and the debug dump).
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.items.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_lookup() {
        let mut reg = ItemRegistry::default();
        let def = ItemDef {
            name: "crowbar".to_string(),
            display_name: "Crowbar".to_string(),
            ..ItemDef::default()
        };
        reg.register(def);
        assert_eq!(reg.get("crowbar").map(ItemDef::label), Some("Crowbar"));
        assert!(reg.get("shovel").is_none());
    }

    #[test]
    fn label_falls_back_to_name() {
        let def = ItemDef {
            name: "tin_can".to_string(),
            ..ItemDef::default()
        };
        assert_eq!(def.label(), "tin_can");
    }

    #[test]
    fn names_are_sorted() {
        let mut reg = ItemRegistry::default();
        for n in ["wrench", "apple", "medkit"] {
            reg.register(ItemDef {
                name: n.to_string(),
                ..ItemDef::default()
            });
        }
        assert_eq!(reg.names(), vec!["apple", "medkit", "wrench"]);
    }

    #[test]
    fn item_def_parses_from_ron() {
        let src = r#"(
            name: "wrench",
            display_name: "Rusty Wrench",
            pickup_visual: (shape: Cylinder(radius: 0.05, height: 0.4), color: (0.6, 0.4, 0.2)),
            held_visual: (shape: Cylinder(radius: 0.04, height: 0.35), color: (0.6, 0.4, 0.2)),
            icon_color: (0.7, 0.5, 0.3),
        )"#;
        let def: ItemDef = ron::from_str(src).expect("item def parse");
        assert_eq!(def.name, "wrench");
        assert_eq!(
            def.pickup_visual.shape,
            Shape::Cylinder {
                radius: 0.05,
                height: 0.4
            }
        );
    }

    #[test]
    fn half_extents_bound_each_shape() {
        let cube = VisualDef {
            shape: Shape::Cube {
                size: (0.2, 0.4, 0.6),
            },
            ..VisualDef::default()
        };
        assert_eq!(cube.half_extents(), Vec3::new(0.1, 0.2, 0.3));

        let sphere = VisualDef {
            shape: Shape::Sphere { radius: 0.25 },
            ..VisualDef::default()
        };
        assert_eq!(sphere.half_extents(), Vec3::splat(0.25));
    }
}
