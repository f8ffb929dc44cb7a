//! Settings types and defaults.
//!
//! Settings are stored as a RON file under `data/settings/` and are
//! hot-reloadable through the shared RON watcher utilities (see
//! `ron::setup_ron_watcher`). Every field carries a serde default so a
//! partially written file still parses, and a missing file falls back to
//! `Settings::default()`.
use bevy::prelude::{KeyCode, Resource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphicsSettings {
    #[serde(default = "GraphicsSettings::default_vsync")]
    pub vsync: bool, // Enable vertical sync to cap FPS to the display refresh rate.
    #[serde(default = "GraphicsSettings::default_shadows")]
    pub shadows: bool, // Enable/disable directional light shadows
}

impl GraphicsSettings {
    fn default_vsync() -> bool { true }
    fn default_shadows() -> bool { true }
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self {
            vsync: Self::default_vsync(),
            shadows: Self::default_shadows(),
        }
    }
}

/// Audio settings. Footsteps and landing effects scale by
/// `master_volume * effects_volume`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSettings {
    #[serde(default = "AudioSettings::default_master")]
    pub master_volume: f32, // Master output volume
    #[serde(default = "AudioSettings::default_music")]
    pub music_volume: f32, // Music volume multiplier
    #[serde(default = "AudioSettings::default_effects")]
    pub effects_volume: f32, // Sound effects volume multiplier
}

impl AudioSettings {
    fn default_master() -> f32 { 1.0 }
    fn default_music() -> f32 { 0.8 }
    fn default_effects() -> f32 { 0.8 }

    /// Effective volume for a one-shot sound effect.
    #[must_use]
    pub fn effect_volume(&self) -> f32 {
        (self.master_volume * self.effects_volume).clamp(0.0, 1.0)
    }
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: Self::default_master(),
            music_volume: Self::default_music(),
            effects_volume: Self::default_effects(),
        }
    }
}

/// Controls / input settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsSettings {
    #[serde(default)]
    pub invert_y: bool, // Invert mouse Y axis
    #[serde(default)]
    pub invert_x: bool, // Invert mouse X axis
    #[serde(default = "ControlsSettings::default_sensitivity")]
    pub mouse_sensitivity: f32, // Mouse sensitivity multiplier
    #[serde(default = "ControlsSettings::default_keybinds")]
    pub keybinds: HashMap<String, String>, // Map of action names to key identifiers (editable by user)
}

impl ControlsSettings {
    fn default_sensitivity() -> f32 { 1.0 }

    fn default_keybinds() -> HashMap<String, String> {
        let mut m = HashMap::new();
        m.insert("forward".to_string(), "W".to_string());
        m.insert("back".to_string(), "S".to_string());
        m.insert("left".to_string(), "A".to_string());
        m.insert("right".to_string(), "D".to_string());
        m.insert("jump".to_string(), "Space".to_string());
        m.insert("sprint".to_string(), "LShift".to_string());
        m.insert("interact".to_string(), "E".to_string());
        m.insert("drop".to_string(), "Q".to_string());
        m.insert("toggle_debug".to_string(), "F1".to_string());
        m.insert("dump_debug".to_string(), "F3".to_string());
        m.insert("pause".to_string(), "Escape".to_string());
        m
    }
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            invert_y: false,
            invert_x: false,
            mouse_sensitivity: Self::default_sensitivity(),
            keybinds: Self::default_keybinds(),
        }
    }
}

/// Locomotion tuning. These replace scene-authored fields: designers edit
/// the RON file and the running game picks the change up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementSettings {
    #[serde(default = "MovementSettings::default_walk_speed")]
    pub walk_speed: f32, // Walking speed in m/s
    #[serde(default = "MovementSettings::default_sprint_speed")]
    pub sprint_speed: f32, // Sprinting speed in m/s
    #[serde(default = "MovementSettings::default_jump_height")]
    pub jump_height: f32, // Apex height of a jump in meters
    #[serde(default = "MovementSettings::default_gravity")]
    pub gravity: f32, // Gravity acceleration (negative = down)
    #[serde(default = "MovementSettings::default_ground_distance")]
    pub ground_distance: f32, // Radius of the ground-check sphere at the feet
    #[serde(default = "MovementSettings::default_step_interval")]
    pub step_interval: f32, // Seconds between footstep sounds while walking
}

impl MovementSettings {
    fn default_walk_speed() -> f32 { 5.0 }
    fn default_sprint_speed() -> f32 { 9.0 }
    fn default_jump_height() -> f32 { 1.5 }
    fn default_gravity() -> f32 { -9.81 }
    fn default_ground_distance() -> f32 { 0.4 }
    fn default_step_interval() -> f32 { 0.5 }
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            walk_speed: Self::default_walk_speed(),
            sprint_speed: Self::default_sprint_speed(),
            jump_height: Self::default_jump_height(),
            gravity: Self::default_gravity(),
            ground_distance: Self::default_ground_distance(),
            step_interval: Self::default_step_interval(),
        }
    }
}

/// Camera feel: head bob, landing bob and the jump pitch kick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSettings {
    #[serde(default = "CameraSettings::default_bob_speed")]
    pub bob_speed: f32, // Head-bob frequency at walking speed (radians/sec into the sine)
    #[serde(default = "CameraSettings::default_bob_amount")]
    pub bob_amount: f32, // Head-bob amplitude in meters
    #[serde(default = "CameraSettings::default_landing_bob_amount")]
    pub landing_bob_amount: f32, // Camera dip applied on landing, in meters
    #[serde(default = "CameraSettings::default_landing_bob_speed")]
    pub landing_bob_speed: f32, // Decay rate of the landing dip
    #[serde(default = "CameraSettings::default_jump_kick_amount")]
    pub jump_kick_amount: f32, // Upward pitch kick on jump, in degrees
}

impl CameraSettings {
    fn default_bob_speed() -> f32 { 14.0 }
    fn default_bob_amount() -> f32 { 0.05 }
    fn default_landing_bob_amount() -> f32 { 0.1 }
    fn default_landing_bob_speed() -> f32 { 5.0 }
    fn default_jump_kick_amount() -> f32 { 4.0 }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            bob_speed: Self::default_bob_speed(),
            bob_amount: Self::default_bob_amount(),
            landing_bob_amount: Self::default_landing_bob_amount(),
            landing_bob_speed: Self::default_landing_bob_speed(),
            jump_kick_amount: Self::default_jump_kick_amount(),
        }
    }
}

/// Pickup interaction tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionSettings {
    #[serde(default = "InteractionSettings::default_interact_range")]
    pub interact_range: f32, // Max distance of the pickup raycast, in meters
    #[serde(default = "InteractionSettings::default_drop_distance")]
    pub drop_distance: f32, // How far in front of the player dropped items land
}

impl InteractionSettings {
    fn default_interact_range() -> f32 { 3.0 }
    fn default_drop_distance() -> f32 { 1.5 }
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            interact_range: Self::default_interact_range(),
            drop_distance: Self::default_drop_distance(),
        }
    }
}

/// Atmosphere settings to configure the bevy_atmosphere crate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtmosphereSettings {
    #[serde(default = "AtmosphereSettings::default_enabled")]
    pub enabled: bool, // Enable the atmosphere (sky) renderer (requires a restart of runtime)
    #[serde(default = "AtmosphereSettings::default_resolution")]
    pub resolution: u32, // Resolution of each skybox face (auto updates at runtime)
    #[serde(default = "AtmosphereSettings::default_dithering")]
    pub dithering: bool, // Enable dithering to reduce color banding in the sky (auto updates at runtime)
}

impl AtmosphereSettings {
    fn default_enabled() -> bool { true }
    fn default_resolution() -> u32 { 512 }
    fn default_dithering() -> bool { true }
}

impl Default for AtmosphereSettings {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            resolution: Self::default_resolution(),
            dithering: Self::default_dithering(),
        }
    }
}

/// Top-level Settings
#[derive(Resource, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub graphics: GraphicsSettings,
    #[serde(default)]
    pub audio: AudioSettings,
    #[serde(default)]
    pub controls: ControlsSettings,
    #[serde(default)]
    pub movement: MovementSettings,
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub interaction: InteractionSettings,
    #[serde(default)]
    pub atmosphere: AtmosphereSettings,
}

impl Settings {
    #[must_use]
    pub fn defaults() -> Self {
        Settings::default()
    }

    /// Resolve a named action from `controls.keybinds` to a `KeyCode`,
    /// falling back to `default` when the action is unbound or the key
    /// string does not parse.
    #[must_use]
    pub fn key(&self, action: &str, default: KeyCode) -> KeyCode {
        self.controls
            .keybinds
            .get(action)
            .and_then(|s| Self::keycode_from_str(s))
            .unwrap_or(default)
    }

    /// Convert a string key identifier (e.g. from `controls.keybinds`) into a
    /// `KeyCode` usable with Bevy's input system. Returns `None` for
    /// identifiers that do not match a known key.
    #[must_use]
    pub fn keycode_from_str(name: &str) -> Option<KeyCode> {
        let s = name.to_ascii_uppercase();
        if s.len() == 1 {
            let c = s.chars().next()?;
            if c.is_ascii_uppercase() {
                return Some(match c {
                    'A' => KeyCode::KeyA,
                    'B' => KeyCode::KeyB,
                    'C' => KeyCode::KeyC,
                    'D' => KeyCode::KeyD,
                    'E' => KeyCode::KeyE,
                    'F' => KeyCode::KeyF,
                    'G' => KeyCode::KeyG,
                    'H' => KeyCode::KeyH,
                    'I' => KeyCode::KeyI,
                    'J' => KeyCode::KeyJ,
                    'K' => KeyCode::KeyK,
                    'L' => KeyCode::KeyL,
                    'M' => KeyCode::KeyM,
                    'N' => KeyCode::KeyN,
                    'O' => KeyCode::KeyO,
                    'P' => KeyCode::KeyP,
                    'Q' => KeyCode::KeyQ,
                    'R' => KeyCode::KeyR,
                    'S' => KeyCode::KeyS,
                    'T' => KeyCode::KeyT,
                    'U' => KeyCode::KeyU,
                    'V' => KeyCode::KeyV,
                    'W' => KeyCode::KeyW,
                    'X' => KeyCode::KeyX,
                    'Y' => KeyCode::KeyY,
                    'Z' => KeyCode::KeyZ,
                    _ => return None,
                });
            }
            if c.is_ascii_digit() {
                return Some(match c {
                    '0' => KeyCode::Digit0,
                    '1' => KeyCode::Digit1,
                    '2' => KeyCode::Digit2,
                    '3' => KeyCode::Digit3,
                    '4' => KeyCode::Digit4,
                    '5' => KeyCode::Digit5,
                    '6' => KeyCode::Digit6,
                    '7' => KeyCode::Digit7,
                    '8' => KeyCode::Digit8,
                    '9' => KeyCode::Digit9,
                    _ => return None,
                });
            }
        }

        Some(match s.as_str() {
            // Function keys
            "F1" => KeyCode::F1,
            "F2" => KeyCode::F2,
            "F3" => KeyCode::F3,
            "F4" => KeyCode::F4,
            "F5" => KeyCode::F5,
            "F6" => KeyCode::F6,
            "F7" => KeyCode::F7,
            "F8" => KeyCode::F8,
            "F9" => KeyCode::F9,
            "F10" => KeyCode::F10,
            "F11" => KeyCode::F11,
            "F12" => KeyCode::F12,

            // Arrows / navigation
            "LEFT" | "ARROWLEFT" => KeyCode::ArrowLeft,
            "RIGHT" | "ARROWRIGHT" => KeyCode::ArrowRight,
            "UP" | "ARROWUP" => KeyCode::ArrowUp,
            "DOWN" | "ARROWDOWN" => KeyCode::ArrowDown,
            "HOME" => KeyCode::Home,
            "END" => KeyCode::End,
            "PAGEUP" => KeyCode::PageUp,
            "PAGEDOWN" => KeyCode::PageDown,
            "DELETE" | "DEL" => KeyCode::Delete,

            // Whitespace / control
            "ESC" | "ESCAPE" => KeyCode::Escape,
            "SPACE" => KeyCode::Space,
            "TAB" => KeyCode::Tab,
            "ENTER" | "RETURN" => KeyCode::Enter,
            "BACKSPACE" | "BACK" => KeyCode::Backspace,

            // Modifiers
            "LSHIFT" | "SHIFT" => KeyCode::ShiftLeft,
            "RSHIFT" => KeyCode::ShiftRight,
            "LCTRL" | "CTRL" | "CONTROL" => KeyCode::ControlLeft,
            "RCTRL" => KeyCode::ControlRight,
            "LALT" | "ALT" => KeyCode::AltLeft,
            "RALT" => KeyCode::AltRight,

            _ => return None,
        })
    }
}

pub mod loader;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ron_parses_to_defaults() {
        let s: Settings = ron::from_str("()").expect("empty settings parse");
        assert_eq!(s.movement.walk_speed, 5.0);
        assert_eq!(s.movement.gravity, -9.81);
        assert_eq!(s.camera.bob_amount, 0.05);
        assert_eq!(s.interaction.interact_range, 3.0);
        assert!(s.graphics.vsync);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let s: Settings =
            ron::from_str("(movement: (walk_speed: 7.5))").expect("partial settings parse");
        assert_eq!(s.movement.walk_speed, 7.5);
        assert_eq!(s.movement.sprint_speed, 9.0);
        assert_eq!(s.camera.bob_speed, 14.0);
    }

    #[test]
    fn keycode_parsing_covers_bound_defaults() {
        for (action, expected) in [
            ("forward", KeyCode::KeyW),
            ("jump", KeyCode::Space),
            ("sprint", KeyCode::ShiftLeft),
            ("interact", KeyCode::KeyE),
            ("drop", KeyCode::KeyQ),
            ("toggle_debug", KeyCode::F1),
            ("pause", KeyCode::Escape),
        ] {
            let s = Settings::default();
            assert_eq!(s.key(action, KeyCode::F24), expected, "action {action}");
        }
    }

    #[test]
    fn unknown_key_string_falls_back_to_default() {
        let mut s = Settings::default();
        s.controls
            .keybinds
            .insert("interact".to_string(), "NOSUCHKEY".to_string());
        assert_eq!(s.key("interact", KeyCode::KeyE), KeyCode::KeyE);
        assert_eq!(Settings::keycode_from_str("nosuchkey"), None);
    }

    #[test]
    fn keycode_parsing_is_case_insensitive() {
        assert_eq!(Settings::keycode_from_str("w"), Some(KeyCode::KeyW));
        assert_eq!(Settings::keycode_from_str("space"), Some(KeyCode::Space));
        assert_eq!(Settings::keycode_from_str("lshift"), Some(KeyCode::ShiftLeft));
    }
}
