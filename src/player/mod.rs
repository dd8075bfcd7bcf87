pub mod components;
mod intent;
pub mod movement;
mod spawn;

#[cfg(test)]
mod tests;

use bevy::prelude::*;
pub use components::{ControlOutcome, HeldAxes, MoveAxes, MovementIntent, Player, PlayerState};

use crate::core::FrameSet;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_systems(Startup, spawn::spawn_player)
      // Keys are tracked from the first frame, movement waits for the model
      .add_systems(
        Update,
        (movement::read_movement_input, movement::update_intent)
          .chain()
          .in_set(FrameSet::Input),
      )
      .add_systems(
        Update,
        movement::advance_player.in_set(FrameSet::Locomotion),
      );
  }
}
