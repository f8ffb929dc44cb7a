//! Camera feel: head bob, landing dip, and the jump pitch kick.
//!
//! The camera child never moves horizontally on its own; this module only
//! drives its local height and pitch. While grounded and moving the height
//! follows a sine wave whose frequency scales with current speed; when idle
//! or airborne it eases back to the rest height. Landing pushes a transient
//! dip, jumping a transient downward pitch kick, and both decay to zero.

use crate::player::{
    movement_input_active, Jumped, Landed, Player, PlayerCamera, PlayerLook,
};
use crate::settings::{CameraSettings, Settings};
use bevy::prelude::*;

/// Seconds for the jump kick to smooth-damp back to level.
const KICK_SMOOTH_TIME: f32 = 0.2;

/// Per-camera bob state.
#[derive(Component)]
pub struct HeadBob {
    /// Camera rest height above the body origin.
    pub rest_height: f32,
    /// Phase accumulator for the walk cycle sine.
    pub timer: f32,
    /// Transient landing dip (negative = down), meters.
    pub landing_offset: f32,
    /// Transient jump pitch kick (negative = down), radians.
    pub kick_offset: f32,
    /// Smooth-damp velocity of the kick.
    pub kick_velocity: f32,
}

impl HeadBob {
    #[must_use]
    pub fn new(rest_height: f32) -> Self {
        Self {
            rest_height,
            timer: 0.0,
            landing_offset: 0.0,
            kick_offset: 0.0,
            kick_velocity: 0.0,
        }
    }

    /// Start the landing dip.
    pub fn on_landed(&mut self, cam: &CameraSettings) {
        self.landing_offset = -cam.landing_bob_amount;
    }

    /// Start the jump kick (a quick downward pitch that springs back).
    pub fn on_jumped(&mut self, cam: &CameraSettings) {
        let amount = cam.jump_kick_amount.to_radians();
        self.kick_offset = -amount;
        self.kick_velocity = amount * 8.0;
    }
}

/// Critically damped spring toward `target` (Unity-style SmoothDamp).
/// Returns the new value; `velocity` is carried between calls.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    let omega = 2.0 / smooth_time.max(1e-4);
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    target + (change + temp) * exp
}

/// Advance the bob state one tick and return the camera's new local height.
///
/// `speed_ratio` is current speed over walk speed (sprinting bobs faster).
/// Extracted so tests and benchmarks drive the same arithmetic as the system.
pub fn bob_step(
    bob: &mut HeadBob,
    current_height: f32,
    grounded: bool,
    moving: bool,
    speed_ratio: f32,
    cam: &CameraSettings,
    dt: f32,
) -> f32 {
    bob.kick_offset = smooth_damp(
        bob.kick_offset,
        0.0,
        &mut bob.kick_velocity,
        KICK_SMOOTH_TIME,
        dt,
    );
    // landing dip decays regardless of the walk cycle
    bob.landing_offset = bob.landing_offset * (1.0 - (dt * cam.landing_bob_speed).min(1.0));

    if grounded && moving {
        bob.timer += dt * cam.bob_speed * speed_ratio;
        bob.rest_height + bob.timer.sin() * cam.bob_amount + bob.landing_offset
    } else {
        // exponential ease back toward rest
        let target = bob.rest_height + bob.landing_offset;
        current_height + (target - current_height) * (dt * cam.bob_speed).min(1.0)
    }
}

/// Per-tick camera-feel system. Owns the camera child's local transform:
/// height from the bob state, rotation from look pitch plus the jump kick.
/// Degrades to a one-time warning when the player has no camera child.
#[allow(clippy::needless_pass_by_value)]
pub fn head_bob(
    time: Res<Time>,
    kb: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    mut jumped: EventReader<Jumped>,
    mut landed: EventReader<Landed>,
    body_q: Query<(&Player, &PlayerLook)>,
    mut cam_q: Query<(&mut Transform, &mut HeadBob), With<PlayerCamera>>,
    mut warned: Local<bool>,
) {
    let Ok((player, look)) = body_q.get_single() else {
        return;
    };
    let Ok((mut cam_tf, mut bob)) = cam_q.get_single_mut() else {
        if !*warned {
            warn!("player has no camera child; camera feel disabled");
            *warned = true;
        }
        jumped.clear();
        landed.clear();
        return;
    };

    let cam = &settings.camera;
    if jumped.read().next().is_some() {
        bob.on_jumped(cam);
    }
    if landed.read().next().is_some() {
        bob.on_landed(cam);
    }

    let moving = movement_input_active(&kb, &settings);
    let sprinting = kb.pressed(settings.key("sprint", KeyCode::ShiftLeft));
    let speed_ratio = if sprinting {
        settings.movement.sprint_speed / settings.movement.walk_speed.max(0.01)
    } else {
        1.0
    };

    let new_height = bob_step(
        &mut bob,
        cam_tf.translation.y,
        player.grounded,
        moving,
        speed_ratio,
        cam,
        time.delta_seconds(),
    );
    cam_tf.translation.y = new_height;
    cam_tf.rotation = Quat::from_rotation_x(look.pitch + bob.kick_offset);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cam() -> CameraSettings {
        CameraSettings::default()
    }

    #[test]
    fn bob_oscillates_within_amplitude_while_moving() {
        let cam = cam();
        let mut bob = HeadBob::new(1.6);
        let mut height = 1.6;
        for _ in 0..600 {
            height = bob_step(&mut bob, height, true, true, 1.0, &cam, 1.0 / 60.0);
            assert!(
                (height - 1.6).abs() <= cam.bob_amount + 1e-4,
                "height {height}"
            );
        }
    }

    #[test]
    fn idle_camera_returns_to_rest() {
        let cam = cam();
        let mut bob = HeadBob::new(1.6);
        let mut height = 1.6 + cam.bob_amount; // mid-bob when input stops
        for _ in 0..600 {
            height = bob_step(&mut bob, height, true, false, 1.0, &cam, 1.0 / 60.0);
        }
        assert!((height - 1.6).abs() < 1e-3);
    }

    #[test]
    fn landing_dip_decays_to_zero() {
        let cam = cam();
        let mut bob = HeadBob::new(1.6);
        bob.on_landed(&cam);
        assert_eq!(bob.landing_offset, -cam.landing_bob_amount);
        let mut height = 1.6;
        for _ in 0..600 {
            height = bob_step(&mut bob, height, true, false, 1.0, &cam, 1.0 / 60.0);
        }
        assert!(bob.landing_offset.abs() < 1e-4);
        assert!((height - 1.6).abs() < 1e-3);
    }

    #[test]
    fn jump_kick_springs_back_to_level() {
        let cam = cam();
        let mut bob = HeadBob::new(1.6);
        bob.on_jumped(&cam);
        assert!(bob.kick_offset < 0.0);
        for _ in 0..600 {
            let _ = bob_step(&mut bob, 1.6, false, false, 1.0, &cam, 1.0 / 60.0);
        }
        assert!(bob.kick_offset.abs() < 1e-4);
    }

    #[test]
    fn sprint_advances_walk_cycle_faster() {
        let cam = cam();
        let mut walk = HeadBob::new(1.6);
        let mut sprint = HeadBob::new(1.6);
        for _ in 0..60 {
            let _ = bob_step(&mut walk, 1.6, true, true, 1.0, &cam, 1.0 / 60.0);
            let _ = bob_step(&mut sprint, 1.6, true, true, 1.8, &cam, 1.0 / 60.0);
        }
        assert!(sprint.timer > walk.timer);
    }

    #[test]
    fn smooth_damp_converges_without_blowup() {
        let mut v = 0.0;
        let mut x = 1.0_f32;
        for _ in 0..600 {
            x = smooth_damp(x, 0.0, &mut v, 0.2, 1.0 / 60.0);
            assert!(x.is_finite());
        }
        assert!(x.abs() < 1e-4);
    }
}
