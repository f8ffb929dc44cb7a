//! Mouse look and cursor grabbing.
//!
//! `camera_look` accumulates mouse motion for the current update and applies
//! yaw to the player body; pitch is stored on `PlayerLook` and applied to the
//! camera child by the `head_bob` system (which also owns the jump kick).
//! `cursor_grab` toggles cursor lock/visibility in response to input.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

use crate::player::Player;
use crate::settings::{ControlsSettings, Settings};

/// Base radians-per-count applied before the user sensitivity multiplier.
const LOOK_SCALE: f32 = 0.002;

/// Stores the player's look orientation (yaw and pitch) in radians.
///
/// - `yaw`: horizontal rotation around the Y axis, applied to the body.
/// - `pitch`: vertical rotation around the X axis, clamped to [-90deg, +90deg]
///   and applied to the camera child.
#[derive(Component, Default)]
pub struct PlayerLook {
    /// Horizontal angle (radians).
    pub yaw: f32,
    /// Vertical angle (radians), positive looking up.
    pub pitch: f32,
}

impl PlayerLook {
    /// Apply a raw mouse delta (updates yaw/pitch, honors axis inversion and
    /// sensitivity, clamps pitch). Public so benchmarks and tests exercise
    /// the same logic as the live system.
    pub fn apply_delta(&mut self, delta: Vec2, controls: &ControlsSettings) {
        let mut d = delta;
        if controls.invert_x {
            d.x = -d.x;
        }
        if controls.invert_y {
            d.y = -d.y;
        }

        let scale = controls.mouse_sensitivity * LOOK_SCALE;
        self.yaw -= d.x * scale;
        self.pitch -= d.y * scale;
        self.pitch = self
            .pitch
            .clamp(-std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2);
    }
}

/// Apply mouse look to the player body's yaw. Skipped while the cursor is
/// visible (not grabbed).
#[allow(clippy::needless_pass_by_value)]
pub fn camera_look(
    windows: Query<&Window, With<PrimaryWindow>>,
    motion_events: Res<Events<MouseMotion>>,
    settings: Res<Settings>,
    mut query: Query<(&mut Transform, &mut PlayerLook), With<Player>>,
) {
    let mut delta = Vec2::ZERO;
    for ev in motion_events.iter_current_update_events() {
        delta += ev.delta;
    }

    if delta == Vec2::ZERO {
        return;
    }

    let Ok(window) = windows.get_single() else {
        return;
    };
    if window.cursor.visible {
        return;
    }

    for (mut transform, mut look) in &mut query {
        look.apply_delta(delta, &settings.controls);
        transform.rotation = Quat::from_rotation_y(look.yaw);
    }
}

/// Grab the cursor on left click, release it on the pause key.
#[allow(clippy::needless_pass_by_value)]
pub fn cursor_grab(
    mut wq: Query<&mut Window, With<PrimaryWindow>>,
    mb: Res<ButtonInput<MouseButton>>,
    kb: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
) {
    let Ok(mut w) = wq.get_single_mut() else {
        return;
    };

    if mb.just_pressed(MouseButton::Left) {
        w.cursor.grab_mode = CursorGrabMode::Locked;
        w.cursor.visible = false;
    }

    if kb.just_pressed(settings.key("pause", KeyCode::Escape)) {
        w.cursor.grab_mode = CursorGrabMode::None;
        w.cursor.visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn pitch_clamped_under_cumulative_input() {
        let controls = ControlsSettings::default();
        let mut look = PlayerLook::default();
        // drag the mouse down hard, many times over
        for _ in 0..10_000 {
            look.apply_delta(Vec2::new(0.0, 500.0), &controls);
            assert!(look.pitch >= -FRAC_PI_2 && look.pitch <= FRAC_PI_2);
        }
        assert_eq!(look.pitch, -FRAC_PI_2);
        // and back up
        for _ in 0..10_000 {
            look.apply_delta(Vec2::new(0.0, -500.0), &controls);
            assert!(look.pitch >= -FRAC_PI_2 && look.pitch <= FRAC_PI_2);
        }
        assert_eq!(look.pitch, FRAC_PI_2);
    }

    #[test]
    fn yaw_accumulates_without_clamp() {
        let controls = ControlsSettings::default();
        let mut look = PlayerLook::default();
        for _ in 0..1_000 {
            look.apply_delta(Vec2::new(100.0, 0.0), &controls);
        }
        assert!(look.yaw.abs() > std::f32::consts::TAU);
    }

    #[test]
    fn inverted_axes_flip_direction() {
        let mut controls = ControlsSettings::default();
        let mut normal = PlayerLook::default();
        normal.apply_delta(Vec2::new(10.0, 10.0), &controls);

        controls.invert_x = true;
        controls.invert_y = true;
        let mut inverted = PlayerLook::default();
        inverted.apply_delta(Vec2::new(10.0, 10.0), &controls);

        assert_eq!(normal.yaw, -inverted.yaw);
        assert_eq!(normal.pitch, -inverted.pitch);
    }

    #[test]
    fn sensitivity_scales_response() {
        let mut controls = ControlsSettings::default();
        controls.mouse_sensitivity = 2.0;
        let mut fast = PlayerLook::default();
        fast.apply_delta(Vec2::new(5.0, 0.0), &controls);

        controls.mouse_sensitivity = 1.0;
        let mut slow = PlayerLook::default();
        slow.apply_delta(Vec2::new(5.0, 0.0), &controls);

        assert!((fast.yaw - 2.0 * slow.yaw).abs() < 1e-6);
    }
}
