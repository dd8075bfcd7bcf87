use std::{fmt, time::Duration};

use bevy::{animation::RepeatAnimation, prelude::*};

use super::registry::ClipRegistry;
use super::selector::Clip;

/// Requested clip name is not in the loaded model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownClip(pub String);

impl fmt::Display for UnknownClip {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "no animation clip named {:?}", self.0)
  }
}

impl std::error::Error for UnknownClip {}

/// How the outgoing action leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
  /// Weight ramps down over the duration while the new action plays.
  Crossfade(Duration),
  /// Stopped immediately.
  Cut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPlan {
  /// Lower-cased name of the incoming action.
  pub name: String,
  pub node: AnimationNodeIndex,
  pub one_shot: bool,
  pub previous: Option<AnimationNodeIndex>,
  pub blend: Blend,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionChange {
  /// Requested action was already playing; nothing was touched.
  Unchanged,
  Started(TransitionPlan),
}

/// Action playing on an animated model.
///
/// Lives next to the model's `AnimationPlayer` and `AnimationTransitions`.
#[derive(Component, Debug, Default, Clone)]
pub struct CurrentAction {
  name: Option<String>,
  node: Option<AnimationNodeIndex>,
}

impl CurrentAction {
  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  pub fn node(&self) -> Option<AnimationNodeIndex> {
    self.node
  }

  /// Works out what switching to `name` would do without touching the
  /// player. `Ok(None)` when `name` is already current.
  pub fn plan(
    &self,
    name: &str,
    registry: &ClipRegistry,
    crossfade: Duration,
  ) -> Result<Option<TransitionPlan>, UnknownClip> {
    let name = name.to_lowercase();
    if self.name.as_deref() == Some(name.as_str()) {
      return Ok(None);
    }

    let node = registry
      .get(&name)
      .ok_or_else(|| UnknownClip(name.clone()))?;

    let one_shot = Clip::from_name(&name).is_some_and(Clip::is_one_shot);
    let cut = self
      .name
      .as_deref()
      .and_then(Clip::from_name)
      .is_some_and(Clip::cuts_on_exit);

    Ok(Some(TransitionPlan {
      name,
      node,
      one_shot,
      previous: self.node,
      blend: if cut {
        Blend::Cut
      } else {
        Blend::Crossfade(crossfade)
      },
    }))
  }

  /// Switches the model to `name`.
  ///
  /// Same name as now is `Ok(Unchanged)`. An unknown name is an error and
  /// leaves the player exactly as it was.
  pub fn set(
    &mut self,
    name: &str,
    registry: &ClipRegistry,
    player: &mut AnimationPlayer,
    transitions: &mut AnimationTransitions,
    crossfade: Duration,
  ) -> Result<ActionChange, UnknownClip> {
    let Some(plan) = self.plan(name, registry, crossfade)? else {
      return Ok(ActionChange::Unchanged);
    };

    apply_plan(&plan, player, transitions);
    self.name = Some(plan.name.clone());
    self.node = Some(plan.node);
    Ok(ActionChange::Started(plan))
  }
}

fn apply_plan(
  plan: &TransitionPlan,
  player: &mut AnimationPlayer,
  transitions: &mut AnimationTransitions,
) {
  let fade = match plan.blend {
    Blend::Crossfade(duration) => duration,
    Blend::Cut => {
      // A stopped animation is skipped by the transition bookkeeping
      if let Some(previous) = plan.previous {
        player.stop(previous);
      }
      Duration::ZERO
    }
  };

  let active = transitions.play(player, plan.node, fade);
  active.replay();
  active.set_weight(1.0);
  if plan.one_shot {
    active.set_repeat(RepeatAnimation::Never);
  } else {
    active.repeat();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const FADE: Duration = Duration::from_millis(500);

  fn registry(names: &[&str]) -> ClipRegistry {
    let mut clips = Assets::<AnimationClip>::default();
    let mut graphs = Assets::<AnimationGraph>::default();
    let handles: Vec<_> = names
      .iter()
      .map(|name| (*name, clips.add(AnimationClip::default())))
      .collect();
    ClipRegistry::build(handles, &mut graphs)
  }

  struct Rig {
    current: CurrentAction,
    player: AnimationPlayer,
    transitions: AnimationTransitions,
  }

  impl Rig {
    fn new() -> Self {
      Self {
        current: CurrentAction::default(),
        player: AnimationPlayer::default(),
        transitions: AnimationTransitions::new(),
      }
    }

    fn set(&mut self, name: &str, registry: &ClipRegistry) -> Result<ActionChange, UnknownClip> {
      self.current.set(
        name,
        registry,
        &mut self.player,
        &mut self.transitions,
        FADE,
      )
    }
  }

  #[test]
  fn first_action_has_nothing_to_blend_from() {
    let registry = registry(&["breathing", "walk"]);
    let mut rig = Rig::new();

    let change = rig.set("breathing", &registry).expect("breathing exists");

    let ActionChange::Started(plan) = change else {
      panic!("expected a transition, got {change:?}");
    };
    assert_eq!(plan.previous, None);
    assert_eq!(rig.current.name(), Some("breathing"));
    assert!(rig.player.is_playing_animation(plan.node));
  }

  #[test]
  fn same_name_is_a_noop_regardless_of_case() {
    let registry = registry(&["breathing"]);
    let mut rig = Rig::new();
    rig.set("breathing", &registry).expect("breathing exists");

    assert_eq!(rig.set("BREATHING", &registry), Ok(ActionChange::Unchanged));
    assert_eq!(rig.current.name(), Some("breathing"));
  }

  #[test]
  fn unknown_name_leaves_everything_alone() {
    let registry = registry(&["breathing"]);
    let mut rig = Rig::new();
    rig.set("breathing", &registry).expect("breathing exists");
    let node = rig.current.node();

    let err = rig.set("moonwalk", &registry).expect_err("moonwalk is not registered");

    assert_eq!(err, UnknownClip("moonwalk".to_string()));
    assert_eq!(rig.current.name(), Some("breathing"));
    assert_eq!(rig.current.node(), node);
    assert!(rig.player.is_playing_animation(node.expect("node set")));
  }

  #[test]
  fn looping_actions_crossfade_for_half_a_second() {
    let registry = registry(&["walk", "slow_run"]);
    let mut rig = Rig::new();
    rig.set("walk", &registry).expect("walk exists");
    let walk = registry.get("walk").expect("walk node");

    let ActionChange::Started(plan) = rig.set("slow_run", &registry).expect("slow_run exists") else {
      panic!("expected a transition");
    };

    assert_eq!(plan.blend, Blend::Crossfade(Duration::from_secs_f32(0.5)));
    assert_eq!(plan.previous, Some(walk));
    // Outgoing clip keeps playing while it fades
    assert!(rig.player.is_playing_animation(walk));
    assert!(rig.player.is_playing_animation(plan.node));
  }

  #[test]
  fn leaving_a_one_shot_cuts() {
    let registry = registry(&["fall", "breathing"]);
    let mut rig = Rig::new();
    rig.set("fall", &registry).expect("fall exists");
    let fall = registry.get("fall").expect("fall node");

    let ActionChange::Started(plan) = rig.set("breathing", &registry).expect("breathing exists")
    else {
      panic!("expected a transition");
    };

    assert_eq!(plan.blend, Blend::Cut);
    assert!(!rig.player.is_playing_animation(fall));
    assert!(rig.player.is_playing_animation(plan.node));
  }

  #[test]
  fn leaving_jump_cuts_too() {
    let registry = registry(&["jump", "walk"]);
    let mut rig = Rig::new();
    rig.set("jump", &registry).expect("jump exists");

    let plan = rig
      .current
      .plan("walk", &registry, FADE)
      .expect("walk exists")
      .expect("walk differs from jump");

    assert_eq!(plan.blend, Blend::Cut);
    assert!(!plan.one_shot);
  }

  #[test]
  fn one_shots_play_once_everything_else_loops() {
    let registry = registry(&["fall_flat", "walk"]);
    let mut rig = Rig::new();

    rig.set("walk", &registry).expect("walk exists");
    let walk = registry.get("walk").expect("walk node");
    assert_eq!(
      rig.player.animation(walk).map(|a| a.repeat_mode()),
      Some(RepeatAnimation::Forever)
    );

    rig.set("fall_flat", &registry).expect("fall_flat exists");
    let fall_flat = registry.get("fall_flat").expect("fall_flat node");
    assert_eq!(
      rig.player.animation(fall_flat).map(|a| a.repeat_mode()),
      Some(RepeatAnimation::Never)
    );
  }

  #[test]
  fn registry_lookup_ignores_case() {
    let registry = registry(&["Walk", "breathing", "BREATHING"]);

    assert_eq!(registry.len(), 2);
    assert!(registry.get("walk").is_some());
    assert!(registry.get("WALK").is_some());
    assert!(registry.get("Breathing").is_some());
  }
}
