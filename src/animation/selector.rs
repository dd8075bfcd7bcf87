use crate::player::components::MovementIntent;

/// Clip names the character is expected to ship with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clip {
  Breathing,
  Walk,
  SlowRun,
  BackPedal,
  TurnLeftInPlace,
  TurnRightInPlace,
  Fall,
  FallFlat,
  Jump,
}

impl Clip {
  pub const ALL: [Clip; 9] = [
    Clip::Breathing,
    Clip::Walk,
    Clip::SlowRun,
    Clip::BackPedal,
    Clip::TurnLeftInPlace,
    Clip::TurnRightInPlace,
    Clip::Fall,
    Clip::FallFlat,
    Clip::Jump,
  ];

  pub const fn name(self) -> &'static str {
    match self {
      Clip::Breathing => "breathing",
      Clip::Walk => "walk",
      Clip::SlowRun => "slow_run",
      Clip::BackPedal => "back_pedal",
      Clip::TurnLeftInPlace => "turn_left_in_place",
      Clip::TurnRightInPlace => "turn_right_in_place",
      Clip::Fall => "fall",
      Clip::FallFlat => "fall_flat",
      Clip::Jump => "jump",
    }
  }

  pub fn from_name(name: &str) -> Option<Clip> {
    Clip::ALL
      .into_iter()
      .find(|clip| clip.name().eq_ignore_ascii_case(name))
  }

  /// Plays once and holds the last pose instead of looping.
  pub fn is_one_shot(self) -> bool {
    matches!(self, Clip::Fall | Clip::FallFlat)
  }

  /// Leaving this clip cuts straight to the next one, no crossfade.
  pub fn cuts_on_exit(self) -> bool {
    matches!(self, Clip::Fall | Clip::FallFlat | Clip::Jump)
  }
}

/// Picks the clip for the current intent.
///
/// Never yields `Fall`, `FallFlat` or `Jump`; nothing in the input maps to
/// them yet, only the setter knows how to play them.
pub fn select_action(intent: Option<&MovementIntent>, run_threshold: f32) -> Clip {
  let Some(intent) = intent else {
    return Clip::Breathing;
  };

  if intent.forward < 0 {
    Clip::BackPedal
  } else if intent.forward == 0 {
    if intent.turn < 0 {
      Clip::TurnRightInPlace
    } else {
      Clip::TurnLeftInPlace
    }
  } else if intent.speed > run_threshold {
    Clip::SlowRun
  } else {
    Clip::Walk
  }
}
