pub mod lighting;
pub mod scenery;

use bevy::prelude::*;
pub use lighting::Sun;
pub use scenery::Decor;

use crate::core::FrameSet;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_systems(
        Startup,
        (
          scenery::spawn_ground,
          scenery::spawn_decor,
          lighting::spawn_sun,
        ),
      )
      .add_systems(Update, scenery::draw_grid)
      .add_systems(
        Update,
        (lighting::track_sun, scenery::spin_decor).in_set(FrameSet::Follow),
      );
  }
}
