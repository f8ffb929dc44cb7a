//! Hotbar input and held-visual systems.

use crate::hotbar::Hotbar;
use crate::item::ItemRegistry;
use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;

/// Keys selecting slots 1..=9 directly.
const SLOT_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Marker for the hand anchor entity (child of the camera) under which the
/// held item visual is spawned.
#[derive(Component)]
pub struct HandAnchor;

/// Resolve scroll wheel and number keys into the selected slot. Scrolling
/// wraps modulo the hotbar size in both directions.
#[allow(clippy::needless_pass_by_value)]
pub fn hotbar_select_input(
    mut scroll: EventReader<MouseWheel>,
    kb: Res<ButtonInput<KeyCode>>,
    mut hotbar: ResMut<Hotbar>,
) {
    for ev in scroll.read() {
        if ev.y > 0.0 {
            hotbar.select_next();
        } else if ev.y < 0.0 {
            hotbar.select_prev();
        }
    }

    for (i, key) in SLOT_KEYS.iter().enumerate().take(hotbar.len()) {
        if kb.just_pressed(*key) {
            hotbar.select(i);
        }
    }
}

/// Keep the in-hand visual in sync with the selected slot.
///
/// Runs every frame and compares (selected index, item name) against what
/// was last spawned; on any change the old visual is despawned and, when the
/// slot holds an item, a fresh one is spawned under the hand anchor. This is
/// the single owner of `Hotbar::held_entity`, which keeps the one-visual
/// invariant trivially true.
#[allow(clippy::needless_pass_by_value, clippy::type_complexity)]
pub fn sync_held_item(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    registry: Res<ItemRegistry>,
    mut hotbar: ResMut<Hotbar>,
    anchor_q: Query<Entity, With<HandAnchor>>,
    mut last: Local<Option<(usize, Option<String>)>>,
    mut warned: Local<bool>,
) {
    let current = (
        hotbar.selected_index(),
        hotbar.selected_item().map(str::to_string),
    );
    if last.as_ref() == Some(&current) {
        return;
    }

    if let Some(held) = hotbar.held_entity.take() {
        commands.entity(held).despawn_recursive();
    }

    if let Some(name) = current.1.as_deref() {
        let Ok(anchor) = anchor_q.get_single() else {
            if !*warned {
                warn!("no hand anchor; cannot show held item");
                *warned = true;
            }
            *last = Some(current);
            return;
        };
        if let Some(def) = registry.get(name) {
            let visual = &def.held_visual;
            let held = commands
                .spawn(PbrBundle {
                    mesh: meshes.add(visual.mesh()),
                    material: materials.add(StandardMaterial {
                        base_color: visual.color(),
                        ..default()
                    }),
                    transform: Transform::IDENTITY,
                    ..default()
                })
                .id();
            commands.entity(anchor).add_child(held);
            hotbar.held_entity = Some(held);
        } else {
            warn!("hotbar references unknown item '{name}'");
        }
    }

    *last = Some(current);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemDef;

    #[test]
    fn missing_hand_anchor_degrades_without_spawning() {
        let mut app = App::new();
        app.insert_resource(Assets::<Mesh>::default());
        app.insert_resource(Assets::<StandardMaterial>::default());
        let mut registry = ItemRegistry::default();
        registry.register(ItemDef {
            name: "rope".to_string(),
            ..ItemDef::default()
        });
        app.insert_resource(registry);
        let mut hotbar = Hotbar::default();
        hotbar.equip_item("rope", 0);
        app.insert_resource(hotbar);
        app.add_systems(Update, sync_held_item);

        // repeated updates and selection churn must not spawn a held visual
        app.update();
        app.world_mut().resource_mut::<Hotbar>().select_next();
        app.update();
        app.world_mut().resource_mut::<Hotbar>().select_prev();
        app.update();

        assert!(app.world().resource::<Hotbar>().held_entity.is_none());
    }
}
