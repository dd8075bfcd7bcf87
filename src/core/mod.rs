pub mod camera;

use bevy::{ecs::message::MessageReader, prelude::*, window::WindowResized};
pub use camera::{CameraCycle, GameCamera, OrbitCamera};

use crate::loading::LoadPhase;

/// Per-frame ordering of the gameplay update.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
  /// Keys to movement intent.
  Input,
  /// Intent to player transform.
  Locomotion,
  /// Intent to animation clip.
  Animate,
  /// Things that follow the player (sun) and free-running decoration.
  Follow,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
  fn build(&self, app: &mut App) {
    configure_frame_sets(app);
    app
      .init_resource::<CameraCycle>()
      .add_systems(Startup, camera::setup_camera)
      .add_systems(
        Update,
        (camera::orbit_input, camera::apply_orbit)
          .chain()
          .in_set(FrameSet::Follow),
      )
      .add_systems(Update, log_window_resize);
  }
}

/// Orders the gameplay sets and holds everything but input until the model
/// is ready.
pub fn configure_frame_sets(app: &mut App) {
  app.configure_sets(
    Update,
    (
      FrameSet::Input,
      FrameSet::Locomotion.run_if(in_state(LoadPhase::Ready)),
      FrameSet::Animate.run_if(in_state(LoadPhase::Ready)),
      FrameSet::Follow.run_if(in_state(LoadPhase::Ready)),
    )
      .chain(),
  );
}

/// Bevy re-derives the camera aspect ratio and viewport from the window on
/// its own; this only reports it.
fn log_window_resize(mut messages: MessageReader<WindowResized>) {
  for event in messages.read() {
    debug!("Window resized to {}x{}", event.width, event.height);
  }
}
