use bevy::{light::CascadeShadowConfigBuilder, prelude::*};

use crate::config::ConfigLoaded;
use crate::player::components::Player;

/// Shadow-casting directional light that follows the player.
#[derive(Component)]
pub struct Sun;

pub fn spawn_sun(mut commands: Commands, config: Res<ConfigLoaded>) {
  let lighting = &config.lighting;
  let offset = Vec3::from(lighting.sun_offset);

  commands.spawn((
    Sun,
    DirectionalLight {
      illuminance: lighting.sun_illuminance,
      shadows_enabled: true,
      ..default()
    },
    Transform::from_translation(offset).looking_at(Vec3::ZERO, Vec3::Y),
    // Tight single cascade around the player, the sun moves with it
    CascadeShadowConfigBuilder {
      num_cascades: 1,
      maximum_distance: lighting.shadow_distance,
      ..default()
    }
    .build(),
  ));
}

/// Keeps the sun at a fixed offset from the player, aimed at it.
pub fn track_sun(
  players: Query<&Transform, (With<Player>, Without<Sun>)>,
  mut suns: Query<&mut Transform, With<Sun>>,
  config: Res<ConfigLoaded>,
) {
  let Ok(player) = players.single() else {
    return;
  };
  let offset = Vec3::from(config.lighting.sun_offset);

  for mut sun in &mut suns {
    sun.translation = player.translation + offset;
    sun.look_at(player.translation, Vec3::Y);
  }
}
