//! Player components and systems (camera, movement, physics, camera feel).
//!
//! The player is a two-entity rig: a body entity carrying `Player` and
//! `PlayerLook` (yaw, horizontal movement, vertical physics) with a child
//! camera entity carrying `PlayerCamera` and `HeadBob` (pitch, head bob,
//! jump kick). The body origin sits at the feet; the camera rests at eye
//! height above it.
//!
//! # Example:
//!
//! ```ignore
//! // spawn the rig
//! commands
//!     .spawn((SpatialBundle::default(), Player::default(), PlayerLook::default()))
//!     .with_children(|body| {
//!         body.spawn((
//!             Camera3dBundle {
//!                 transform: Transform::from_xyz(0.0, PLAYER_EYE_HEIGHT, 0.0),
//!                 ..default()
//!             },
//!             PlayerCamera,
//!             HeadBob::new(PLAYER_EYE_HEIGHT),
//!         ));
//!     });
//! // register systems
//! app.add_systems(Update, (camera_look, player_movement, player_physics, head_bob));
//! ```
pub mod bob;
pub mod camera;
pub mod effects;
pub mod movement;
pub mod physics;

use bevy::prelude::*;

pub use bob::*;
pub use camera::*;
pub use effects::*;
pub use movement::*;
pub use physics::*;

/// Height of the camera above the body origin (the feet).
pub const PLAYER_EYE_HEIGHT: f32 = 1.6;
/// Half extents of the body box used for horizontal collision.
pub const PLAYER_HALF_EXTENTS: Vec3 = Vec3::new(0.35, 0.85, 0.35);

/// Component tracking player state used by movement and physics systems.
#[derive(Component, Default)]
pub struct Player {
    /// Current vertical velocity in m/s (negative = falling).
    pub velocity_y: f32,
    /// Whether the ground check passed this tick.
    pub grounded: bool,
    /// Grounded state of the previous tick, for landing detection.
    pub was_grounded: bool,
}

/// Marker for the player's camera entity (child of the body).
#[derive(Component)]
pub struct PlayerCamera;

/// Fired on the tick the player leaves the ground via a jump.
#[derive(Event)]
pub struct Jumped;

/// Fired on the tick an airborne player touches down.
#[derive(Event)]
pub struct Landed;
