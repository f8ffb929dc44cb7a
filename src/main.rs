use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};
use bevy_atmosphere::prelude::*;
use scavenger::debug::DebugDumpPlugin;
use scavenger::hotbar::{hotbar_select_input, sync_held_item, Hotbar};
use scavenger::interaction::{drop_item, interact};
use scavenger::item::loader as item_loader;
use scavenger::player::{
    camera_look, cursor_grab, despawn_landing_dust, footsteps, head_bob, player_movement,
    player_physics, spawn_landing_dust, Jumped, Landed,
};
use scavenger::settings::loader as settings_loader;
use scavenger::ui::{
    setup_debug_overlay, spawn_debug_overlay, toggle_debug_overlay, update_debug_overlay,
    update_hotbar_ui,
};

mod app;
use app::{setup, sync_atmosphere_settings, sync_shadow_settings, sync_vsync_settings};

fn main() {
    let settings = settings_loader::load_settings_from_dir("data/settings");
    let settings_watcher = settings_loader::setup_settings_watcher("data/settings")
        .unwrap_or_else(|_| settings_loader::SettingsWatcher::stub());

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            position: WindowPosition::Centered(MonitorSelection::Primary),
            present_mode: PresentMode::AutoNoVsync,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(FrameTimeDiagnosticsPlugin)
    .add_plugins(LogDiagnosticsPlugin::default())
    .add_plugins(DebugDumpPlugin);

    if settings.atmosphere.enabled {
        app.add_plugins(AtmospherePlugin)
            .insert_resource(AtmosphereModel::default())
            .insert_resource(AtmosphereSettings {
                resolution: settings.atmosphere.resolution,
                dithering: settings.atmosphere.dithering,
                ..Default::default()
            });
    }

    app.add_event::<Jumped>();
    app.add_event::<Landed>();

    app.insert_resource(Hotbar::default());
    app.insert_resource(item_loader::load_items_from_dir("data/items"));
    app.insert_resource(
        item_loader::setup_item_watcher("data/items")
            .unwrap_or_else(|_| item_loader::ItemWatcher::stub()),
    );

    app.insert_resource(settings.clone());
    app.insert_resource(settings_watcher);

    app.add_systems(Startup, setup_debug_overlay);
    app.add_systems(Startup, spawn_debug_overlay);
    app.add_systems(Startup, setup);

    // player rig updates run in a fixed order: look and horizontal movement
    // first, then vertical physics, then the camera-local bob that reads the
    // jump/land events physics emitted this frame
    app.add_systems(
        Update,
        (camera_look, player_movement, player_physics, head_bob).chain(),
    );
    app.add_systems(Update, cursor_grab);
    app.add_systems(Update, footsteps);
    app.add_systems(Update, spawn_landing_dust);
    app.add_systems(Update, despawn_landing_dust);

    app.add_systems(Update, hotbar_select_input);
    app.add_systems(Update, sync_held_item);
    app.add_systems(Update, update_hotbar_ui);
    app.add_systems(Update, interact);
    app.add_systems(Update, drop_item);

    app.add_systems(Update, toggle_debug_overlay);
    app.add_systems(Update, update_debug_overlay);

    if settings.atmosphere.enabled {
        app.add_systems(Update, sync_atmosphere_settings);
    }
    app.add_systems(Update, sync_vsync_settings);
    app.add_systems(Update, sync_shadow_settings);

    app.add_systems(Update, settings_loader::check_settings_changes);
    app.add_systems(Update, item_loader::check_item_changes);

    app.run();
}
