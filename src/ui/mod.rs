//! User interface: hotbar HUD, crosshair, and the debug overlay.
//!
//! The hotbar HUD is a row of slot nodes along the bottom of the screen that
//! mirrors the `Hotbar` resource every frame: the selected slot is
//! highlighted and occupied slots show the item's icon swatch. The debug
//! overlay (F1) shows FPS, frame timing, player position and hotbar state on
//! a half-second refresh timer.

use crate::hotbar::Hotbar;
use crate::item::ItemRegistry;
use crate::player::Player;
use crate::settings::Settings;
use bevy::diagnostic::{Diagnostic, DiagnosticsStore};
use bevy::prelude::*;

/// Slot background while selected.
const SLOT_SELECTED_COLOR: Color = Color::srgb(1.0, 0.85, 0.2);
/// Slot background while not selected.
const SLOT_DEFAULT_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.25);

/// State for the debug overlay visibility.
#[derive(Resource, Default)]
pub struct DebugOverlayState {
    /// Whether the overlay is currently visible.
    pub visible: bool,
}

#[derive(Resource, Default)]
pub struct DebugOverlayTimer(pub Timer);

#[derive(Component)]
pub struct DebugOverlayText;

/// Background node of one hotbar slot.
#[derive(Component)]
pub struct HotbarSlotNode(pub usize);

/// Icon swatch inside one hotbar slot.
#[derive(Component)]
pub struct HotbarSlotIcon(pub usize);

/// Insert debug overlay resources.
pub fn setup_debug_overlay(mut commands: Commands) {
    commands.insert_resource(DebugOverlayTimer(Timer::from_seconds(
        0.5,
        TimerMode::Repeating,
    )));
    commands.insert_resource(DebugOverlayState::default());
}

/// Toggle the debug overlay when the bound key (default F1) is pressed.
#[allow(clippy::needless_pass_by_value)]
pub fn toggle_debug_overlay(
    mut state: ResMut<DebugOverlayState>,
    input: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
) {
    if input.just_pressed(settings.key("toggle_debug", KeyCode::F1)) {
        state.visible = !state.visible;
    }
}

/// Spawn the overlay text node.
#[allow(clippy::needless_pass_by_value)]
pub fn spawn_debug_overlay(mut commands: Commands, asset_server: Res<AssetServer>) {
    let font_handle: Handle<Font> = asset_server.load("fonts/OpenSans.ttf");

    commands.spawn((
        TextBundle {
            text: Text::from_section(
                "",
                TextStyle {
                    font: font_handle,
                    font_size: 18.0,
                    color: Color::srgb(1.0, 1.0, 0.0),
                },
            ),
            style: Style {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                ..default()
            },
            ..default()
        },
        DebugOverlayText,
    ));
}

#[derive(bevy::ecs::system::SystemParam)]
pub struct DebugOverlayCtx<'w, 's> {
    pub diagnostics: Res<'w, DiagnosticsStore>,
    pub state: Res<'w, DebugOverlayState>,
    pub hotbar: Res<'w, Hotbar>,
    pub registry: Res<'w, ItemRegistry>,
    pub time: Res<'w, Time>,
    pub timer: ResMut<'w, DebugOverlayTimer>,
    pub query: Query<'w, 's, &'static mut Text, With<DebugOverlayText>>,
    pub player_query: Query<'w, 's, (&'static Transform, &'static Player)>,
}

/// Refresh the debug overlay text on a fixed interval. The interval keeps
/// the per-frame cost of formatting and diagnostics lookups off the hot
/// path.
pub fn update_debug_overlay(mut ctx: DebugOverlayCtx<'_, '_>) {
    if !ctx.timer.0.tick(ctx.time.delta()).just_finished() {
        return;
    }

    let Ok(mut text) = ctx.query.get_single_mut() else {
        return;
    };

    if !ctx.state.visible {
        text.sections[0].value = String::new();
        return;
    }

    let fps = ctx
        .diagnostics
        .get(&bevy::diagnostic::FrameTimeDiagnosticsPlugin::FPS)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);

    let frame_time = ctx
        .diagnostics
        .get(&bevy::diagnostic::FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);

    let (pos_str, grounded_str) = if let Ok((tf, player)) = ctx.player_query.get_single() {
        let p = tf.translation;
        (
            format!("Pos: ({:.1}, {:.1}, {:.1})", p.x, p.y, p.z),
            format!(
                "Grounded: {} | VelY: {:.2}",
                if player.grounded { "yes" } else { "no" },
                player.velocity_y
            ),
        )
    } else {
        ("Pos: N/A".to_string(), "Grounded: N/A".to_string())
    };

    let slot_str = match ctx.hotbar.selected_item() {
        Some(item) => format!(
            "Slot: {}/{} ({item})",
            ctx.hotbar.selected_index() + 1,
            ctx.hotbar.len()
        ),
        None => format!(
            "Slot: {}/{} (empty)",
            ctx.hotbar.selected_index() + 1,
            ctx.hotbar.len()
        ),
    };

    text.sections[0].value = format!(
        "FPS: {:.1}\nFrame Time: {:.2} ms\n{}\n{}\n{}\nItems defined: {}",
        fps,
        frame_time * 1000.0,
        pos_str,
        grounded_str,
        slot_str,
        ctx.registry.len()
    );
}

/// Spawn a crosshair UI element centered on the screen.
pub fn spawn_crosshair(commands: &mut Commands) {
    commands
        .spawn(NodeBundle {
            style: Style {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            ..default()
        })
        .with_children(|p| {
            p.spawn(NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    width: Val::Px(20.0),
                    height: Val::Px(2.0),
                    ..default()
                },
                background_color: Color::WHITE.into(),
                ..default()
            });
            p.spawn(NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    width: Val::Px(2.0),
                    height: Val::Px(20.0),
                    ..default()
                },
                background_color: Color::WHITE.into(),
                ..default()
            });
        });
}

/// Spawn the hotbar HUD: `slots` square nodes in a row along the bottom,
/// each with an icon swatch child.
pub fn spawn_hotbar_ui(commands: &mut Commands, slots: usize) {
    commands
        .spawn(NodeBundle {
            style: Style {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::FlexEnd,
                column_gap: Val::Px(6.0),
                padding: UiRect::bottom(Val::Px(16.0)),
                ..default()
            },
            ..default()
        })
        .with_children(|row| {
            for i in 0..slots {
                row.spawn((
                    NodeBundle {
                        style: Style {
                            width: Val::Px(56.0),
                            height: Val::Px(56.0),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        background_color: SLOT_DEFAULT_COLOR.into(),
                        border_color: Color::BLACK.into(),
                        ..default()
                    },
                    HotbarSlotNode(i),
                ))
                .with_children(|slot| {
                    slot.spawn((
                        NodeBundle {
                            style: Style {
                                width: Val::Px(36.0),
                                height: Val::Px(36.0),
                                ..default()
                            },
                            visibility: Visibility::Hidden,
                            ..default()
                        },
                        HotbarSlotIcon(i),
                    ));
                });
            }
        });
}

/// Mirror hotbar state into the HUD: highlight the selected slot, show the
/// icon swatch for occupied slots.
#[allow(clippy::needless_pass_by_value, clippy::type_complexity)]
pub fn update_hotbar_ui(
    hotbar: Res<Hotbar>,
    registry: Res<ItemRegistry>,
    mut slot_q: Query<(&HotbarSlotNode, &mut BackgroundColor), Without<HotbarSlotIcon>>,
    mut icon_q: Query<
        (&HotbarSlotIcon, &mut BackgroundColor, &mut Visibility),
        Without<HotbarSlotNode>,
    >,
) {
    for (slot, mut bg) in &mut slot_q {
        *bg = if slot.0 == hotbar.selected_index() {
            SLOT_SELECTED_COLOR.into()
        } else {
            SLOT_DEFAULT_COLOR.into()
        };
    }

    for (icon, mut bg, mut visibility) in &mut icon_q {
        match hotbar.item_at(icon.0).and_then(|name| registry.get(name)) {
            Some(def) => {
                *bg = def.icon_color().into();
                *visibility = Visibility::Inherited;
            }
            None => {
                *visibility = Visibility::Hidden;
            }
        }
    }
}
