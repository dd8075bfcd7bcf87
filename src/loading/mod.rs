//! Character model loading.
//!
//! The model is fetched once at startup as a single [`ModelLoad`]. Each frame
//! it is polled: progress goes to [`LoadProgress`], success builds the clip
//! registry and attaches the scene to the player, failure is logged. The
//! [`LoadPhase`] state gates the per-frame gameplay update, so nothing moves
//! until the model is in and nothing ever moves if it fails.

mod model;

use bevy::{
  ecs::message::{MessageReader, MessageWriter},
  gltf::Gltf,
  input::common_conditions::input_just_pressed,
  prelude::*,
};
pub use model::{LoadStatus, ModelLoad, ModelLoadError, load_fraction, model_scene};

use crate::animation::ClipRegistry;
use crate::config::ConfigLoaded;
use crate::player::components::Player;

#[derive(States, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadPhase {
  #[default]
  Loading,
  Ready,
  Failed,
}

/// Fraction of the model loaded, in [0, 1].
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct LoadProgress(pub f32);

/// Why loading stopped, kept for inspection after `LoadPhase::Failed`.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct ModelLoadFailed(pub ModelLoadError);

/// Asks the in-flight model load to stop.
#[derive(Message, Debug, Default, Clone, Copy)]
pub struct CancelModelLoad;

/// Scene instance of the character, child of the [`Player`].
#[derive(Component)]
pub struct PlayerModel;

pub struct LoadingPlugin;

impl Plugin for LoadingPlugin {
  fn build(&self, app: &mut App) {
    app
      .init_state::<LoadPhase>()
      .init_resource::<LoadProgress>()
      .add_message::<CancelModelLoad>()
      .add_systems(Startup, start_model_load)
      .add_systems(
        Update,
        (
          request_cancel_on_escape.run_if(input_just_pressed(KeyCode::Escape)),
          cancel_model_load,
          poll_model_load,
        )
          .chain()
          .run_if(in_state(LoadPhase::Loading)),
      );
  }
}

pub fn start_model_load(
  mut commands: Commands,
  asset_server: Res<AssetServer>,
  config: Res<ConfigLoaded>,
) {
  info!("Loading model {}", config.model.path);
  commands.insert_resource(ModelLoad::start(&asset_server, config.model.path.clone()));
}

fn request_cancel_on_escape(mut cancel: MessageWriter<CancelModelLoad>) {
  cancel.write(CancelModelLoad);
}

fn fail(commands: &mut Commands, next: &mut NextState<LoadPhase>, err: ModelLoadError) {
  commands.remove_resource::<ModelLoad>();
  commands.insert_resource(ModelLoadFailed(err));
  next.set(LoadPhase::Failed);
}

pub fn cancel_model_load(
  mut commands: Commands,
  mut requests: MessageReader<CancelModelLoad>,
  model: Option<Res<ModelLoad>>,
  mut next: ResMut<NextState<LoadPhase>>,
) {
  if requests.read().count() == 0 {
    return;
  }
  let Some(model) = model else {
    return;
  };

  warn!("Cancelled loading {}", model.path());
  fail(&mut commands, &mut next, ModelLoadError::Cancelled);
}

/// Publishes progress while pending; on completion builds the registry and
/// attaches the model, on failure logs and gives up.
pub fn poll_model_load(
  mut commands: Commands,
  model: Option<Res<ModelLoad>>,
  asset_server: Res<AssetServer>,
  gltfs: Res<Assets<Gltf>>,
  mut graphs: ResMut<Assets<AnimationGraph>>,
  mut progress: ResMut<LoadProgress>,
  mut next: ResMut<NextState<LoadPhase>>,
  players: Query<Entity, With<Player>>,
) {
  // Already cancelled this frame
  let Some(model) = model else {
    return;
  };

  match model.poll(&asset_server, &gltfs) {
    LoadStatus::Pending { loaded, total } => {
      progress.set_if_neq(LoadProgress(load_fraction(loaded, total)));
    }
    LoadStatus::Failed(err) => {
      error!("Failed to load model {}: {err}", model.path());
      fail(&mut commands, &mut next, err);
    }
    LoadStatus::Ready => {
      let Ok(player) = players.single() else {
        warn!("Model ready but there is no player to attach it to yet");
        return;
      };

      let attached = gltfs
        .get(model.handle())
        .ok_or_else(|| ModelLoadError::Asset("glTF document missing after load".to_string()))
        .and_then(|gltf| Ok((gltf, model_scene(gltf)?)));

      let (gltf, scene) = match attached {
        Ok(found) => found,
        Err(err) => {
          error!("Failed to load model {}: {err}", model.path());
          fail(&mut commands, &mut next, err);
          return;
        }
      };

      let registry = ClipRegistry::build(
        gltf
          .named_animations
          .iter()
          .map(|(name, clip)| (&**name, clip.clone())),
        &mut graphs,
      );
      info!(
        "Loaded model {} with {} clips",
        model.path(),
        registry.len()
      );

      commands
        .entity(player)
        .with_child((PlayerModel, SceneRoot(scene)));
      commands.insert_resource(registry);

      progress.set_if_neq(LoadProgress(1.0));
      next.set(LoadPhase::Ready);
    }
  }
}
