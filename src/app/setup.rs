//! Setup systems for initializing runtime resources.
//!
//! This module groups setup-related work into one `Startup` system: building
//! the static level (ground, obstacles) together with its collision data,
//! spawning the player rig with its camera and hand anchor, scattering the
//! initial pickups, and creating the HUD.
use bevy::prelude::*;
use bevy_atmosphere::prelude::AtmosphereCamera;
use scavenger::hotbar::{HandAnchor, Hotbar};
use scavenger::interaction::spawn_pickup;
use scavenger::item::ItemRegistry;
use scavenger::player::{
    Footsteps, FootstepClips, HeadBob, Player, PlayerCamera, PlayerLook, PLAYER_EYE_HEIGHT,
};
use scavenger::settings::Settings;
use scavenger::ui;
use scavenger::world::{Aabb, World};

/// Where the player starts.
const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, 0.0, 8.0);

/// Hand anchor offset in camera space: right, down and forward of the eye.
const HAND_OFFSET: Vec3 = Vec3::new(0.35, -0.3, -0.6);

/// Obstacle boxes: (center, half extents). These get both a mesh and a
/// collider so the visual and the collision world cannot drift apart.
const OBSTACLES: [(Vec3, Vec3); 4] = [
    (Vec3::new(3.0, 0.75, 2.0), Vec3::new(0.75, 0.75, 0.75)),
    (Vec3::new(-4.0, 0.5, -1.0), Vec3::new(1.5, 0.5, 0.5)),
    (Vec3::new(1.0, 1.25, -5.0), Vec3::new(1.25, 1.25, 1.25)),
    (Vec3::new(-2.0, 0.4, 5.0), Vec3::new(0.4, 0.4, 2.0)),
];

/// Spots the initial pickups are scattered over, paired with registry names
/// in sorted order. Extra registry entries beyond the table are skipped.
const PICKUP_SPOTS: [Vec3; 6] = [
    Vec3::new(2.0, 0.0, 4.0),
    Vec3::new(-3.0, 0.0, 1.5),
    Vec3::new(0.5, 0.0, -2.5),
    Vec3::new(4.5, 0.0, -1.0),
    Vec3::new(-1.5, 0.0, -4.0),
    Vec3::new(3.0, 1.5, 2.0),
];

/// Build the level, the player rig and the HUD.
///
/// # Arguments
/// - `commands`: Commands for spawning entities and inserting resources.
/// - `meshes`/`materials`: Asset storage for the level and pickup visuals.
/// - `asset_server`: Used to load footstep audio clips.
/// - `registry`: Item definitions used to scatter the initial pickups.
/// - `settings`: Read for the atmosphere toggle and hotbar HUD size.
#[allow(clippy::needless_pass_by_value)]
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    registry: Res<ItemRegistry>,
    hotbar: Res<Hotbar>,
    settings: Res<Settings>,
) {
    let mut world = World::new(0.0);

    // ground
    commands.spawn(PbrBundle {
        mesh: meshes.add(Plane3d::default().mesh().size(60.0, 60.0)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.35, 0.42, 0.3),
            perceptual_roughness: 0.9,
            ..default()
        }),
        ..default()
    });

    let obstacle_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.5, 0.4, 0.3),
        perceptual_roughness: 0.8,
        ..default()
    });
    for (center, half) in OBSTACLES {
        world.add_collider(Aabb::from_center_half(center, half));
        commands.spawn(PbrBundle {
            mesh: meshes.add(Cuboid::new(half.x * 2.0, half.y * 2.0, half.z * 2.0)),
            material: obstacle_material.clone(),
            transform: Transform::from_translation(center),
            ..default()
        });
    }

    // sun plus a dim opposing fill so shadowed faces are not pitch black
    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: settings.graphics.shadows,
            ..default()
        },
        transform: Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -0.9,
            0.6,
            0.0,
        )),
        ..default()
    });
    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 1_500.0,
            shadows_enabled: false,
            ..default()
        },
        transform: Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, 0.6, -2.2, 0.0)),
        ..default()
    });
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 120.0,
    });

    // player rig: body carries movement and physics, the camera child
    // carries pitch and bob, the hand anchor hangs off the camera
    let camera = {
        let mut cam = commands.spawn((
            Camera3dBundle {
                transform: Transform::from_xyz(0.0, PLAYER_EYE_HEIGHT, 0.0),
                ..default()
            },
            PlayerCamera,
            HeadBob::new(PLAYER_EYE_HEIGHT),
        ));
        if settings.atmosphere.enabled {
            cam.insert(AtmosphereCamera::default());
        }
        cam.with_children(|c| {
            c.spawn((SpatialBundle::from_transform(Transform::from_translation(HAND_OFFSET)), HandAnchor));
        });
        cam.id()
    };
    commands
        .spawn((
            SpatialBundle::from_transform(Transform::from_translation(PLAYER_SPAWN)),
            Player::default(),
            PlayerLook::default(),
            Footsteps::default(),
        ))
        .add_child(camera);

    // initial pickups, one per item definition in name order
    for (name, pos) in registry.names().iter().zip(PICKUP_SPOTS) {
        if let Some(def) = registry.get(name) {
            let mut at = pos;
            at.y = world.surface_height_at(pos + Vec3::Y) + def.pickup_visual.half_extents().y;
            spawn_pickup(&mut commands, &mut meshes, &mut materials, def, at);
        }
    }

    commands.insert_resource(FootstepClips(
        (1..=4)
            .map(|i| asset_server.load(format!("audio/footstep{i}.ogg")))
            .collect(),
    ));

    ui::spawn_crosshair(&mut commands);
    ui::spawn_hotbar_ui(&mut commands, hotbar.len());

    commands.insert_resource(world);
}
