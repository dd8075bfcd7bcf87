use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use super::actions::{Forward, Jump, PlayerInput, Turn};

pub fn player_input_actions() -> impl Bundle {
  actions!(PlayerInput[
      (
          Action::<Forward>::new(),
          bindings![KeyCode::KeyW, (KeyCode::KeyS, Negate::all())],
      ),
      (
          Action::<Turn>::new(),
          bindings![KeyCode::KeyA, (KeyCode::KeyD, Negate::all())],
      ),
      (
          Action::<Jump>::new(),
          bindings![KeyCode::Space],
      ),
  ])
}
