//! Display-related systems, such as syncing vsync and shadow
//! settings from the main `Settings` resource into the renderer.
use bevy::prelude::*;
use bevy::window::{PresentMode, PrimaryWindow};
use scavenger::settings::Settings;

/// Sync `Settings.graphics.vsync` into the present mode of the primary window.
/// Allows the user to toggle vsync at runtime without restarting.
///
/// # Arguments
/// - `settings`: The current settings resource, from which the vsync preference is read.
/// - `windows`: Query for the primary window to update its present mode.
/// - `last`: A local cache of the last applied vsync state to avoid redundant updates.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_vsync_settings(
    settings: Res<Settings>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut last: Local<Option<bool>>,
) {
    let desired = settings.graphics.vsync;
    if *last == Some(desired) {
        return;
    }

    for mut w in windows.iter_mut() {
        w.present_mode = if desired {
            PresentMode::Fifo
        } else {
            PresentMode::AutoNoVsync
        };
    }
    *last = Some(desired);
}

/// Sync `Settings.graphics.shadows` into every directional light.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_shadow_settings(
    settings: Res<Settings>,
    mut lights: Query<&mut DirectionalLight>,
    mut last: Local<Option<bool>>,
) {
    let desired = settings.graphics.shadows;
    if *last == Some(desired) {
        return;
    }

    for mut light in lights.iter_mut() {
        light.shadows_enabled = desired;
    }
    *last = Some(desired);
}
