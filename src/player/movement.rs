use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use super::components::{ControlOutcome, HeldAxes, MoveAxes, Player, PlayerState};
use crate::config::ConfigLoaded;
use crate::input::{Forward, Jump, PlayerInput, Turn};

fn is_active(state: &ActionState) -> bool {
  matches!(state, ActionState::Fired | ActionState::Ongoing)
}

/// Snaps the bound actions to -1/0/1 axes.
pub fn read_movement_input(
  mut players: Query<(&Actions<PlayerInput>, &mut HeldAxes), With<Player>>,
  forward_actions: Query<(&Action<Forward>, &ActionState)>,
  turn_actions: Query<(&Action<Turn>, &ActionState)>,
  jump_actions: Query<(&Action<Jump>, &ActionState)>,
) {
  for (actions, mut held) in &mut players {
    let mut forward = 0.0;
    let mut turn = 0.0;
    let mut jump = false;

    for action_entity in actions.iter() {
      if let Ok((action, state)) = forward_actions.get(action_entity) {
        if is_active(state) {
          forward = **action;
        }
      }
      if let Ok((action, state)) = turn_actions.get(action_entity) {
        if is_active(state) {
          turn = **action;
        }
      }
      if let Ok((action, state)) = jump_actions.get(action_entity) {
        if is_active(state) {
          jump = **action;
        }
      }
    }

    held.set_if_neq(HeldAxes(MoveAxes::from_values(forward, turn, jump)));
  }
}

/// Feeds held axes to the player's intent.
pub fn update_intent(
  mut players: Query<(&HeldAxes, &mut PlayerState), With<Player>>,
  config: Res<ConfigLoaded>,
  time: Res<Time>,
) {
  for (held, mut state) in &mut players {
    match state.control(held.0, time.elapsed_secs(), config.player.initial_speed) {
      ControlOutcome::Created => debug!("Movement started: {:?}", held.0),
      ControlOutcome::Updated => trace!("Movement changed: {:?}", held.0),
      ControlOutcome::Stopped => debug!("Movement stopped"),
      ControlOutcome::Unchanged | ControlOutcome::Idle => {}
    }
  }
}

/// Ramps speed, then walks the player along its facing and turns it.
///
/// The model faces local +Z, as glTF characters do.
pub fn advance_player(
  mut players: Query<(&mut Transform, &mut PlayerState), With<Player>>,
  config: Res<ConfigLoaded>,
  time: Res<Time>,
) {
  let dt = time.delta_secs();

  for (mut transform, mut state) in &mut players {
    state.ramp_speed(config.player.speed_ramp, config.player.max_speed);
    let Some(intent) = state.intent() else {
      continue;
    };

    let step = intent.forward as f32 * dt * intent.speed;
    let facing = transform.local_z();
    transform.translation += facing * step;
    transform.rotate_local_y(intent.turn as f32 * dt);
  }
}
