//! Footstep audio and the landing dust effect.
//!
//! Footsteps play on a fixed interval while grounded and moving, with the
//! timer primed while idle so the first step lands immediately when movement
//! resumes. Landing spawns a short-lived dust puff at the feet that removes
//! itself after a fixed delay.

use crate::player::{movement_input_active, Landed, Player};
use crate::settings::Settings;
use bevy::audio::{PlaybackSettings, Volume};
use bevy::prelude::*;

/// How long a dust puff lives before despawning, seconds.
const DUST_LIFETIME: f32 = 2.0;

/// Footstep audio clips loaded at startup. May be empty (no footstep audio
/// shipped); the footstep system then does nothing.
#[derive(Resource, Default)]
pub struct FootstepClips(pub Vec<Handle<AudioSource>>);

/// Per-player footstep timer state.
#[derive(Component)]
pub struct Footsteps {
    pub timer: f32,
    rng_state: u32,
}

impl Default for Footsteps {
    fn default() -> Self {
        Self {
            timer: 0.0,
            rng_state: 0x12345678,
        }
    }
}

impl Footsteps {
    /// Next clip index in [0, len). Small LCG; footstep variety does not
    /// warrant a real RNG dependency.
    pub fn next_clip(&mut self, len: usize) -> usize {
        self.rng_state = self.rng_state.wrapping_mul(1664525).wrapping_add(1013904223);
        (self.rng_state >> 16) as usize % len.max(1)
    }
}

/// Marker + lifetime for a landing dust puff.
#[derive(Component)]
pub struct LandingDust(pub Timer);

/// Play a footstep clip on a fixed interval while grounded and moving.
#[allow(clippy::needless_pass_by_value)]
pub fn footsteps(
    mut commands: Commands,
    time: Res<Time>,
    kb: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    clips: Res<FootstepClips>,
    mut q: Query<(&Player, &mut Footsteps)>,
) {
    let Ok((player, mut steps)) = q.get_single_mut() else {
        return;
    };

    let interval = settings.movement.step_interval;
    let moving = movement_input_active(&kb, &settings);

    if player.grounded && moving {
        steps.timer += time.delta_seconds();
        if steps.timer >= interval {
            steps.timer = 0.0;
            if !clips.0.is_empty() {
                let idx = steps.next_clip(clips.0.len());
                commands.spawn(AudioBundle {
                    source: clips.0[idx].clone(),
                    settings: PlaybackSettings::DESPAWN
                        .with_volume(Volume::new(settings.audio.effect_volume())),
                });
            }
        }
    } else {
        // primed: the first step after movement resumes fires immediately
        steps.timer = interval;
    }
}

/// Spawn a dust puff at the feet when the player lands.
#[allow(clippy::needless_pass_by_value)]
pub fn spawn_landing_dust(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut landed: EventReader<Landed>,
    q: Query<&Transform, With<Player>>,
) {
    if landed.is_empty() {
        return;
    }
    landed.clear();

    let Ok(body) = q.get_single() else {
        return;
    };

    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Sphere::new(0.25).mesh().uv(8, 8)),
            material: materials.add(StandardMaterial {
                base_color: Color::srgba(0.75, 0.7, 0.6, 0.6),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            }),
            transform: Transform::from_translation(body.translation + Vec3::Y * 0.1)
                .with_scale(Vec3::new(1.0, 0.3, 1.0)),
            ..default()
        },
        LandingDust(Timer::from_seconds(DUST_LIFETIME, TimerMode::Once)),
    ));
}

/// Remove dust puffs once their lifetime elapses.
#[allow(clippy::needless_pass_by_value)]
pub fn despawn_landing_dust(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut LandingDust)>,
) {
    for (entity, mut dust) in &mut q {
        if dust.0.tick(time.delta()).finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_indices_stay_in_range() {
        let mut steps = Footsteps::default();
        for len in [1usize, 2, 3, 7] {
            for _ in 0..100 {
                assert!(steps.next_clip(len) < len);
            }
        }
    }

    #[test]
    fn clip_selection_varies() {
        let mut steps = Footsteps::default();
        let picks: Vec<usize> = (0..32).map(|_| steps.next_clip(4)).collect();
        assert!(picks.iter().any(|&p| p != picks[0]));
    }
}
