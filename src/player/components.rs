use bevy::prelude::*;

/// Root entity of the character. The loaded model is attached as a child.
#[derive(Component)]
pub struct Player;

/// Quantized movement keys for one frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MoveAxes {
  /// +1 forward, -1 backward.
  pub forward: i8,
  /// +1 left, -1 right.
  pub turn: i8,
  pub jump: bool,
}

impl MoveAxes {
  pub const IDLE: Self = Self {
    forward: 0,
    turn: 0,
    jump: false,
  };

  pub fn new(forward: i8, turn: i8, jump: bool) -> Self {
    Self {
      forward: forward.signum(),
      turn: turn.signum(),
      jump,
    }
  }

  /// Snaps analog action values to -1/0/1.
  pub fn from_values(forward: f32, turn: f32, jump: bool) -> Self {
    Self::new(quantize(forward), quantize(turn), jump)
  }

  pub fn is_idle(&self) -> bool {
    self.forward == 0 && self.turn == 0 && !self.jump
  }
}

fn quantize(value: f32) -> i8 {
  if value > 0.5 {
    1
  } else if value < -0.5 {
    -1
  } else {
    0
  }
}

/// Axes held this frame, written by the input mapper.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HeldAxes(pub MoveAxes);

/// What the player is currently asking the character to do.
///
/// Only exists while at least one movement key is held; see
/// [`PlayerState::control`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementIntent {
  pub forward: i8,
  pub turn: i8,
  pub jump: bool,
  /// Locomotion speed multiplier, ramps up while moving forward.
  pub speed: f32,
  /// Elapsed app time when the intent was created, in seconds.
  pub time: f32,
}

/// Locomotion state owned by the player entity.
#[derive(Component, Debug, Default, Clone)]
pub struct PlayerState {
  pub(super) intent: Option<MovementIntent>,
}

/// Result of feeding one set of axes to [`PlayerState::control`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlOutcome {
  /// No intent existed, one was created.
  Created,
  /// Existing intent got new axes.
  Updated,
  /// Axes matched the existing intent.
  Unchanged,
  /// All keys released, intent dropped.
  Stopped,
  /// All keys released and there was nothing to drop.
  Idle,
}
