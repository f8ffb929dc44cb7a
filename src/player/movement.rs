//! Horizontal player movement with collision against the static world.
//!
//! WASD moves relative to the body's yaw; the sprint key switches between
//! walk and sprint speed. Each axis is checked separately against the
//! collider boxes so sliding along a crate face works.

use crate::player::{Player, PLAYER_HALF_EXTENTS};
use crate::settings::Settings;
use crate::world::World;
use bevy::prelude::*;

/// Direction the movement keys request this tick, in the body's local frame
/// flattened onto the ground plane. Zero when no key is held.
#[must_use]
pub fn wish_direction(tf: &Transform, forward: bool, back: bool, left: bool, right: bool) -> Vec3 {
    let fwd_raw = tf.forward();
    let fwd = Vec3::new(fwd_raw.x, 0.0, fwd_raw.z).normalize_or_zero();
    let right_raw = tf.right();
    let rgt = Vec3::new(right_raw.x, 0.0, right_raw.z).normalize_or_zero();

    let mut dir = Vec3::ZERO;
    if forward {
        dir += fwd;
    }
    if back {
        dir -= fwd;
    }
    if left {
        dir -= rgt;
    }
    if right {
        dir += rgt;
    }
    dir.normalize_or_zero()
}

/// Handle horizontal movement and crate collisions each tick.
#[allow(clippy::needless_pass_by_value)]
pub fn player_movement(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    world: Res<World>,
    time: Res<Time>,
    settings: Res<Settings>,
    mut query: Query<&mut Transform, With<Player>>,
) {
    let Ok(mut body) = query.get_single_mut() else {
        return;
    };
    let dt = time.delta_seconds();

    let dir = wish_direction(
        &body,
        keyboard_input.pressed(settings.key("forward", KeyCode::KeyW)),
        keyboard_input.pressed(settings.key("back", KeyCode::KeyS)),
        keyboard_input.pressed(settings.key("left", KeyCode::KeyA)),
        keyboard_input.pressed(settings.key("right", KeyCode::KeyD)),
    );
    if dir == Vec3::ZERO {
        return;
    }

    let sprinting = keyboard_input.pressed(settings.key("sprint", KeyCode::ShiftLeft));
    let speed = if sprinting {
        settings.movement.sprint_speed
    } else {
        settings.movement.walk_speed
    };

    let step = dir * speed * dt;
    let new_pos = body.translation + step;
    let torso_y = body.translation.y + PLAYER_HALF_EXTENTS.y + 0.1;

    // Per-axis check so blocked X still allows sliding along Z and vice versa.
    let try_x = Vec3::new(new_pos.x, torso_y, body.translation.z);
    if !world.body_overlaps(try_x, PLAYER_HALF_EXTENTS) {
        body.translation.x = new_pos.x;
    }
    let try_z = Vec3::new(body.translation.x, torso_y, new_pos.z);
    if !world.body_overlaps(try_z, PLAYER_HALF_EXTENTS) {
        body.translation.z = new_pos.z;
    }
}

/// Is the player trying to move this tick? Shared by the head-bob and
/// footstep systems, which only run while grounded and moving.
#[allow(clippy::needless_pass_by_value)]
#[must_use]
pub fn movement_input_active(keyboard_input: &ButtonInput<KeyCode>, settings: &Settings) -> bool {
    keyboard_input.pressed(settings.key("forward", KeyCode::KeyW))
        || keyboard_input.pressed(settings.key("back", KeyCode::KeyS))
        || keyboard_input.pressed(settings.key("left", KeyCode::KeyA))
        || keyboard_input.pressed(settings.key("right", KeyCode::KeyD))
}
