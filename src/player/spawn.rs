use bevy::prelude::*;

use super::components::{HeldAxes, Player, PlayerState};
use crate::input::{PlayerInput, player_input_actions};

/// Spawns the empty player root at the origin. The model is attached once it
/// has loaded.
pub fn spawn_player(mut commands: Commands) {
  commands.spawn((
    Player,
    PlayerState::default(),
    HeldAxes::default(),
    Transform::default(),
    Visibility::default(),
    PlayerInput,
    player_input_actions(),
  ));
}
