//! Dino Stage - a skinned character scene on Bevy.
//!
//! Loads a glTF character, turns W/S/A/D/Space into a movement intent, moves
//! the character with it and picks the animation clip to play from that
//! intent. Rendering, shadows, skeletal blending and asset decoding all come
//! from Bevy; this crate wires them together.

use bevy::prelude::*;

pub mod animation;
pub mod config;
pub mod core;
pub mod hud;
pub mod input;
pub mod loading;
pub mod platform;
pub mod player;
#[cfg(feature = "visual_debug")]
pub mod visual_debug;
pub mod world;

pub use animation::{ActionChange, ActionPlugin, Clip, ClipRegistry, CurrentAction, UnknownClip};
pub use config::{ConfigLoaded, ConfigPlugin, GameConfig};
pub use loading::{LoadPhase, LoadProgress, LoadingPlugin, ModelLoad, ModelLoadError};
pub use player::components::{MoveAxes, MovementIntent, Player, PlayerState};

/// Every gameplay plugin, minus windowing and config.
///
/// The binary adds `DefaultPlugins` and [`ConfigPlugin`] first; tests can
/// pick the pieces they need instead.
pub struct StagePlugins;

impl Plugin for StagePlugins {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(core::CorePlugin)
      .add_plugins(input::InputPlugin)
      .add_plugins(loading::LoadingPlugin)
      .add_plugins(animation::ActionPlugin)
      .add_plugins(player::PlayerPlugin)
      .add_plugins(world::WorldPlugin)
      .add_plugins(hud::HudPlugin);

    #[cfg(feature = "visual_debug")]
    app.add_plugins(visual_debug::VisualDebugPlugin);
  }
}
