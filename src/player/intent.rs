use super::components::{ControlOutcome, MoveAxes, MovementIntent, PlayerState};

impl PlayerState {
  pub fn intent(&self) -> Option<&MovementIntent> {
    self.intent.as_ref()
  }

  pub fn is_moving(&self) -> bool {
    self.intent.is_some()
  }

  /// Applies the currently held keys.
  ///
  /// Releasing everything drops the intent regardless of what it held.
  /// Otherwise the axes are written in place, keeping `speed` and `time`,
  /// or a new intent starts at `initial_speed` stamped with `now`.
  pub fn control(&mut self, axes: MoveAxes, now: f32, initial_speed: f32) -> ControlOutcome {
    if axes.is_idle() {
      return match self.intent.take() {
        Some(_) => ControlOutcome::Stopped,
        None => ControlOutcome::Idle,
      };
    }

    match &mut self.intent {
      Some(intent) => {
        if intent.forward == axes.forward && intent.turn == axes.turn && intent.jump == axes.jump {
          return ControlOutcome::Unchanged;
        }
        intent.forward = axes.forward;
        intent.turn = axes.turn;
        intent.jump = axes.jump;
        ControlOutcome::Updated
      }
      None => {
        self.intent = Some(MovementIntent {
          forward: axes.forward,
          turn: axes.turn,
          jump: axes.jump,
          speed: initial_speed,
          time: now,
        });
        ControlOutcome::Created
      }
    }
  }

  /// Per-frame speed ramp. Only forward motion accelerates, and speed never
  /// goes past `max` nor drops.
  pub fn ramp_speed(&mut self, step: f32, max: f32) {
    let Some(intent) = &mut self.intent else {
      return;
    };
    if intent.forward > 0 && intent.speed < max {
      intent.speed = (intent.speed + step).min(max);
    }
  }
}
