mod action;
mod registry;
mod selector;

use std::time::Duration;

pub use action::{ActionChange, Blend, CurrentAction, TransitionPlan, UnknownClip};
use bevy::prelude::*;
pub use registry::ClipRegistry;
pub use selector::{Clip, select_action};

use crate::config::ConfigLoaded;
use crate::core::FrameSet;
use crate::player::components::{Player, PlayerState};

pub struct ActionPlugin;

impl Plugin for ActionPlugin {
  fn build(&self, app: &mut App) {
    app.add_systems(
      Update,
      (
        attach_animator,
        drive_action.in_set(FrameSet::Animate),
      )
        .run_if(resource_exists::<ClipRegistry>),
    );
  }
}

fn crossfade(config: &ConfigLoaded) -> Duration {
  Duration::from_secs_f32(config.animation.crossfade_secs.max(0.0))
}

/// Hooks freshly spawned model skeletons up to the clip graph and starts
/// them breathing.
pub fn attach_animator(
  mut commands: Commands,
  registry: Res<ClipRegistry>,
  config: Res<ConfigLoaded>,
  mut players: Query<(Entity, &mut AnimationPlayer), Added<AnimationPlayer>>,
) {
  for (entity, mut player) in &mut players {
    let mut transitions = AnimationTransitions::new();
    let mut current = CurrentAction::default();

    if let Err(err) = current.set(
      Clip::Breathing.name(),
      &registry,
      &mut player,
      &mut transitions,
      crossfade(&config),
    ) {
      warn!("Model has no idle clip: {err}");
    }

    debug!(
      "Animator attached to {entity} with {} clips",
      registry.len()
    );
    commands.entity(entity).insert((
      AnimationGraphHandle(registry.graph()),
      transitions,
      current,
    ));
  }
}

/// Picks the clip for the player's intent and switches to it.
///
/// Unknown clips are skipped; whatever was playing keeps playing.
pub fn drive_action(
  players: Query<&PlayerState, With<Player>>,
  registry: Res<ClipRegistry>,
  config: Res<ConfigLoaded>,
  mut animators: Query<(
    &mut CurrentAction,
    &mut AnimationPlayer,
    &mut AnimationTransitions,
  )>,
) {
  let Ok(state) = players.single() else {
    return;
  };
  let clip = select_action(state.intent(), config.player.run_threshold);

  for (mut current, mut player, mut transitions) in &mut animators {
    // Skip the mutable path so change detection only fires on real switches
    if current.name() == Some(clip.name()) {
      continue;
    }
    match current.set(
      clip.name(),
      &registry,
      &mut player,
      &mut transitions,
      crossfade(&config),
    ) {
      Ok(ActionChange::Started(plan)) => {
        debug!("Action {} ({:?})", plan.name, plan.blend);
      }
      Ok(ActionChange::Unchanged) => {}
      Err(err) => trace!("{err}"),
    }
  }
}
