use bevy::prelude::*;

use crate::animation::CurrentAction;
use crate::player::components::{Player, PlayerState};

/// Resource for frame-by-frame debug mode
#[derive(Resource, Default)]
pub struct FrameStepMode {
  pub enabled: bool,
  advance_requested: bool,
}

pub struct VisualDebugPlugin;

impl Plugin for VisualDebugPlugin {
  fn build(&self, app: &mut App) {
    app
      .init_resource::<FrameStepMode>()
      .add_systems(PreUpdate, frame_step_control)
      .add_systems(Update, (draw_player_vectors, log_action_changes));
  }
}

/// Controls frame-by-frame stepping mode
/// F5: Toggle frame-step mode
/// Right Arrow: Advance one frame (when in frame-step mode)
fn frame_step_control(
  keyboard: Res<ButtonInput<KeyCode>>,
  mut frame_step: ResMut<FrameStepMode>,
  mut time: ResMut<Time<Virtual>>,
) {
  if keyboard.just_pressed(KeyCode::F5) {
    frame_step.enabled = !frame_step.enabled;
    if frame_step.enabled {
      time.pause();
      info!("Frame-step mode ENABLED (press Right Arrow to advance, F5 to disable)");
    } else {
      time.unpause();
      info!("Frame-step mode DISABLED");
    }
  }

  if frame_step.enabled {
    if keyboard.just_pressed(KeyCode::ArrowRight) {
      // Request advance - unpause for this frame
      frame_step.advance_requested = true;
      time.unpause();
    } else if frame_step.advance_requested {
      frame_step.advance_requested = false;
      time.pause();
    }
  }
}

/// Facing (yellow, scaled by speed) and turn (green) at the player's feet
fn draw_player_vectors(mut gizmos: Gizmos, players: Query<(&Transform, &PlayerState), With<Player>>) {
  for (transform, state) in &players {
    let origin = transform.translation + Vec3::Y * 0.05;
    let facing = transform.local_z().as_vec3();
    let speed = state.intent().map_or(0.5, |intent| intent.speed.max(0.5));

    gizmos.arrow(origin, origin + facing * speed * 0.3, Color::srgb(1.0, 1.0, 0.0));

    if let Some(intent) = state.intent() {
      if intent.turn != 0 {
        let side = transform.local_x().as_vec3() * intent.turn as f32;
        gizmos.arrow(origin, origin + side, Color::srgb(0.0, 1.0, 0.0));
      }
    }
  }
}

fn log_action_changes(actions: Query<&CurrentAction, Changed<CurrentAction>>) {
  for action in &actions {
    trace!("Current action: {:?}", action.name());
  }
}
