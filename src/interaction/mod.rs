//! Pickup interaction: raycast grab and drop.
//!
//! On the interact key a single ray is cast from the camera forward against
//! pickup entities, with the static world occluding. A hit resolves the
//! `Pickup` component to an item definition and hands it to the hotbar; the
//! world entity is removed only when the hotbar actually had room. The drop
//! key takes the selected item out of the hotbar and lays its pickup visual
//! back down in front of the player.

use crate::hotbar::Hotbar;
use crate::item::{ItemDef, ItemRegistry};
use crate::player::{Player, PlayerCamera};
use crate::settings::Settings;
use crate::world::{Aabb, World};
use bevy::prelude::*;

/// Marks an item lying in the world. `half_extents` bounds the visual for
/// the interaction raycast.
#[derive(Component)]
pub struct Pickup {
    pub item: String,
    pub half_extents: Vec3,
}

/// Nearest pickup the ray hits within `range`, ignoring pickups that level
/// geometry occludes. Pure so tests can drive it without an ECS world.
#[must_use]
pub fn nearest_pickup_hit(
    origin: Vec3,
    dir: Vec3,
    range: f32,
    targets: &[(Entity, Aabb)],
    world: &World,
) -> Option<(Entity, f32)> {
    let mut nearest: Option<(Entity, f32)> = None;
    for (entity, aabb) in targets {
        if let Some(t) = aabb.ray_intersect(origin, dir, range) {
            if nearest.is_none_or(|(_, n)| t < n) {
                nearest = Some((*entity, t));
            }
        }
    }

    let (entity, t) = nearest?;
    match world.raycast(origin, dir, range) {
        Some(wall) if wall < t => None,
        _ => Some((entity, t)),
    }
}

/// Spawn a world pickup for `def` at `pos`.
pub fn spawn_pickup(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    def: &ItemDef,
    pos: Vec3,
) -> Entity {
    let visual = &def.pickup_visual;
    commands
        .spawn((
            PbrBundle {
                mesh: meshes.add(visual.mesh()),
                material: materials.add(StandardMaterial {
                    base_color: visual.color(),
                    ..default()
                }),
                transform: Transform::from_translation(pos),
                ..default()
            },
            Pickup {
                item: def.name.clone(),
                half_extents: visual.half_extents(),
            },
        ))
        .id()
}

/// Interact-key raycast pickup.
#[allow(clippy::needless_pass_by_value)]
pub fn interact(
    mut commands: Commands,
    kb: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    world: Res<World>,
    registry: Res<ItemRegistry>,
    mut hotbar: ResMut<Hotbar>,
    camera_q: Query<&GlobalTransform, With<PlayerCamera>>,
    pickups: Query<(Entity, &GlobalTransform, &Pickup)>,
) {
    if !kb.just_pressed(settings.key("interact", KeyCode::KeyE)) {
        return;
    }
    let Ok(cam) = camera_q.get_single() else {
        warn!("no player camera; cannot interact");
        return;
    };

    let origin = cam.translation();
    let dir = *cam.forward();
    let targets: Vec<(Entity, Aabb)> = pickups
        .iter()
        .map(|(e, tf, p)| {
            (e, Aabb::from_center_half(tf.translation(), p.half_extents))
        })
        .collect();

    let Some((entity, _)) =
        nearest_pickup_hit(origin, dir, settings.interaction.interact_range, &targets, &world)
    else {
        return;
    };

    let Ok((_, _, pickup)) = pickups.get(entity) else {
        return;
    };
    let Some(def) = registry.get(&pickup.item) else {
        warn!("pickup references unknown item '{}'", pickup.item);
        return;
    };

    if hotbar.equip_first_empty(&def.name) {
        commands.entity(entity).despawn_recursive();
        info!("picked up {}", def.label());
    } else {
        info!("no space in hotbar for {}", def.label());
    }
}

/// Drop-key handling: clear the selected slot and lay the item back down in
/// front of the player, settled onto the surface below.
#[allow(clippy::needless_pass_by_value)]
pub fn drop_item(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    kb: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    world: Res<World>,
    registry: Res<ItemRegistry>,
    mut hotbar: ResMut<Hotbar>,
    body_q: Query<&Transform, With<Player>>,
) {
    if !kb.just_pressed(settings.key("drop", KeyCode::KeyQ)) {
        return;
    }
    let Ok(body) = body_q.get_single() else {
        return;
    };

    // empty selected slot: nothing to do
    let Some(name) = hotbar.selected_item().map(str::to_string) else {
        return;
    };
    let Some(def) = registry.get(&name).cloned() else {
        warn!("hotbar references unknown item '{name}'");
        hotbar.clear_current();
        return;
    };

    hotbar.clear_current();

    let forward = *body.forward();
    let flat = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
    let mut pos = body.translation + flat * settings.interaction.drop_distance + Vec3::Y;
    pos.y = world.surface_height_at(pos) + def.pickup_visual.half_extents().y;

    spawn_pickup(&mut commands, &mut meshes, &mut materials, &def, pos);
    info!("dropped {}", def.label());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(idx: u32, center: Vec3, half: Vec3) -> (Entity, Aabb) {
        (
            Entity::from_raw(idx),
            Aabb::from_center_half(center, half),
        )
    }

    #[test]
    fn ray_selects_nearest_pickup() {
        let world = World::new(-10.0);
        let targets = vec![
            target(1, Vec3::new(0.0, 0.0, 5.0), Vec3::splat(0.3)),
            target(2, Vec3::new(0.0, 0.0, 2.0), Vec3::splat(0.3)),
        ];
        let hit = nearest_pickup_hit(Vec3::ZERO, Vec3::Z, 10.0, &targets, &world);
        assert_eq!(hit.map(|(e, _)| e), Some(Entity::from_raw(2)));
    }

    #[test]
    fn pickup_beyond_range_is_ignored() {
        let world = World::new(-10.0);
        let targets = vec![target(1, Vec3::new(0.0, 0.0, 5.0), Vec3::splat(0.3))];
        assert!(nearest_pickup_hit(Vec3::ZERO, Vec3::Z, 3.0, &targets, &world).is_none());
    }

    #[test]
    fn wall_occludes_pickup_behind_it() {
        let mut world = World::new(-10.0);
        world.add_collider(Aabb::from_center_half(
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::new(2.0, 2.0, 0.2),
        ));
        let targets = vec![target(1, Vec3::new(0.0, 0.0, 5.0), Vec3::splat(0.3))];
        assert!(nearest_pickup_hit(Vec3::ZERO, Vec3::Z, 10.0, &targets, &world).is_none());
    }

    #[test]
    fn pickup_in_front_of_wall_still_hits() {
        let mut world = World::new(-10.0);
        world.add_collider(Aabb::from_center_half(
            Vec3::new(0.0, 0.0, 8.0),
            Vec3::new(2.0, 2.0, 0.2),
        ));
        let targets = vec![target(1, Vec3::new(0.0, 0.0, 5.0), Vec3::splat(0.3))];
        assert!(nearest_pickup_hit(Vec3::ZERO, Vec3::Z, 10.0, &targets, &world).is_some());
    }

    /// Minimal app with the interact system, a camera looking straight at
    /// one pickup in range, and the interact key held down.
    fn interact_fixture(hotbar: Hotbar) -> (App, Entity) {
        let mut app = App::new();
        let mut kb = ButtonInput::<KeyCode>::default();
        kb.press(KeyCode::KeyE);
        app.insert_resource(kb);
        app.insert_resource(Settings::default());
        app.insert_resource(World::new(-10.0));
        let mut registry = ItemRegistry::default();
        registry.register(ItemDef {
            name: "tin_can".to_string(),
            ..ItemDef::default()
        });
        app.insert_resource(registry);
        app.insert_resource(hotbar);
        app.add_systems(Update, interact);

        // default orientation looks down -Z; the pickup sits 2 m ahead
        app.world_mut()
            .spawn((GlobalTransform::from_xyz(0.0, 1.6, 0.0), PlayerCamera));
        let pickup = app
            .world_mut()
            .spawn((
                GlobalTransform::from_xyz(0.0, 1.6, -2.0),
                Pickup {
                    item: "tin_can".to_string(),
                    half_extents: Vec3::splat(0.3),
                },
            ))
            .id();
        (app, pickup)
    }

    #[test]
    fn full_hotbar_leaves_world_entity_alive() {
        let mut full = Hotbar::new(3);
        for i in 0..3 {
            full.equip_item(&format!("item_{i}"), i);
        }
        let (mut app, pickup) = interact_fixture(full);
        app.update();

        assert!(app.world().get_entity(pickup).is_some());
        let hotbar = app.world().resource::<Hotbar>();
        assert!(hotbar.is_full());
        assert_eq!(hotbar.item_at(0), Some("item_0"));
    }

    #[test]
    fn successful_pickup_despawns_world_entity() {
        let (mut app, pickup) = interact_fixture(Hotbar::new(3));
        app.update();

        assert!(app.world().get_entity(pickup).is_none());
        assert_eq!(
            app.world().resource::<Hotbar>().item_at(0),
            Some("tin_can")
        );
    }
}
