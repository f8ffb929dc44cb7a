//! Debug utilities, including a system (F3 default) to dump diagnostics,
//! entity counts, asset counts, and gameplay state to a timestamped text file in './debug-dumps/'.
//!
//! This is a useful module for quickly capturing a snapshot of the game's internal state
//! and performance characteristics without needing to set up an external profiler or attach a debugger.
use crate::hotbar::Hotbar;
use crate::item::ItemRegistry;
use crate::player::Player;
use crate::settings::Settings;
use bevy::diagnostic::{Diagnostic, DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::pbr::StandardMaterial;
use bevy::prelude::*;
use bevy::render::mesh::Mesh;
use bevy::render::texture::Image;
use chrono::{DateTime, Utc};
use std::fmt::Write;
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};
use sysinfo::{Pid, ProcessExt, System, SystemExt};

pub struct DebugDumpPlugin;

impl Plugin for DebugDumpPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, debug_input_system);
    }
}

/// A internal helper function to convert kilobytes to megabytes.
fn kb_to_mb(kb: u64) -> String {
    format!("{:.2} MB", (kb as f64) / 1024.0)
}

fn bytes_to_mb(bytes: usize) -> String {
    format!("{:.2} MB", (bytes as f64) / 1024.0 / 1024.0)
}

/// A Bevy system that listens for the (dump_debug, default F3) key press
/// and generates a debug dump of diagnostics, entity counts, asset counts, and gameplay state.
///
/// # Arguments
/// * `keys` - Bevy resource for keyboard input, used to detect when the dump key is pressed.
/// * `settings` - Read for the dump keybind.
/// * `diagnostics` - Bevy resource that stores performance diagnostics like FPS and frame time.
/// * `query_entities` - A Bevy query that counts the total number of entities in the world.
/// * `meshes`, `materials`, `images` - Bevy asset resources that count the number of loaded assets.
/// * `player_query` - The player body, for position and physics state.
/// * `hotbar`, `registry` - Hotbar contents and the set of loaded item definitions.
#[allow(clippy::needless_pass_by_value, clippy::too_many_arguments)]
fn debug_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    diagnostics: Res<DiagnosticsStore>,
    query_entities: Query<Entity>,
    meshes: Res<Assets<Mesh>>,
    materials: Res<Assets<StandardMaterial>>,
    images: Res<Assets<Image>>,
    player_query: Query<(&Transform, &Player)>,
    hotbar: Option<Res<Hotbar>>,
    registry: Option<Res<ItemRegistry>>,
) {
    if !keys.just_pressed(settings.key("dump_debug", KeyCode::F3)) {
        return;
    }

    // timestamp & filename
    let now = SystemTime::now();
    let ts_secs = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let dt: DateTime<Utc> = DateTime::from(now);
    let human_ts = dt.format("%Y-%m-%d %H:%M:%S").to_string();
    let dir = "debug-dumps";
    let fname = format!("{}/debug-{}.txt", dir, ts_secs);

    // Bevy diagnostics (fps / frame_time)
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);
    let frame_time = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);

    // entity & asset counts
    let entity_count = query_entities.iter().count();
    let mesh_count = meshes.len();
    let material_count = materials.len();
    let image_count = images.len();
    let total_image_bytes: usize = images.iter().map(|(_, image)| image.data.len()).sum();

    // CPU / cores
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);

    // process / system memory (sysinfo)
    let mut sys = System::new_all();
    sys.refresh_all();
    let pid = std::process::id();
    let proc = sys.process(Pid::from(pid as usize));
    let proc_mem_kb = proc.map(|p| p.memory()).unwrap_or(0);
    let proc_virt_kb = proc.map(|p| p.virtual_memory()).unwrap_or(0);
    let total_mem_kb = sys.total_memory();
    let used_mem_kb = sys.used_memory();

    // build text
    let mut out = String::new();
    writeln!(out, "Debug dump: {}", ts_secs).ok();
    writeln!(out, "Timestamp: {} (epoch secs: {})", human_ts, ts_secs).ok();
    writeln!(out, "FPS: {:.1}, frame_time: {:.4} ms", fps, frame_time * 1000.0).ok();
    writeln!(out, "Entities: {}", entity_count).ok();
    writeln!(
        out,
        "Assets: meshes={} materials={} images={} (image mem total={})",
        mesh_count,
        material_count,
        image_count,
        bytes_to_mb(total_image_bytes)
    )
    .ok();
    writeln!(out, "CPU cores (available): {}", cores).ok();
    writeln!(
        out,
        "Process memory: {} (virtual {})",
        kb_to_mb(proc_mem_kb),
        kb_to_mb(proc_virt_kb)
    )
    .ok();
    writeln!(
        out,
        "System memory: total={} used={}",
        kb_to_mb(total_mem_kb),
        kb_to_mb(used_mem_kb)
    )
    .ok();

    writeln!(out, "\nPlayer:").ok();
    if let Ok((tf, player)) = player_query.get_single() {
        let p = tf.translation;
        writeln!(out, "  position: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z).ok();
        writeln!(
            out,
            "  grounded: {} velocity_y: {:.3}",
            player.grounded, player.velocity_y
        )
        .ok();
    } else {
        writeln!(out, "  (no player entity)").ok();
    }

    writeln!(out, "\nHotbar:").ok();
    if let Some(hotbar) = hotbar.as_ref() {
        for i in 0..hotbar.len() {
            let marker = if i == hotbar.selected_index() { ">" } else { " " };
            let item = hotbar.item_at(i).unwrap_or("(empty)");
            writeln!(out, "  {}{}: {}", marker, i + 1, item).ok();
        }
    } else {
        writeln!(out, "  (no hotbar resource present)").ok();
    }

    writeln!(out, "\nItem definitions:").ok();
    match registry.as_ref() {
        Some(reg) if !reg.is_empty() => {
            for name in reg.names() {
                writeln!(out, "  {}", name).ok();
            }
        }
        _ => {
            writeln!(out, "  (no item definitions loaded)").ok();
        }
    }

    // ensure directory & write
    if let Err(e) = fs::create_dir_all(dir) {
        error!("debug dump: failed to create dir '{}': {}", dir, e);
        return;
    }
    if let Err(e) = fs::write(&fname, out) {
        error!("debug dump: failed to write {}: {}", fname, e);
    } else {
        info!("wrote debug dump: {}", fname);
    }
}
