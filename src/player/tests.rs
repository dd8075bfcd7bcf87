use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use super::components::*;
use super::movement;
use crate::config::{self, ConfigLoaded};

const FRAME: Duration = Duration::from_millis(16);

fn test_app() -> App {
  let config = config::parse(include_str!("../../assets/config/game.config.toml"))
    .expect("shipped config should parse");

  let mut app = App::new();
  app
    .add_plugins(MinimalPlugins)
    .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
    .insert_resource(ConfigLoaded::from(config))
    .add_systems(
      Update,
      (movement::update_intent, movement::advance_player).chain(),
    );
  app
}

fn spawn_player(app: &mut App, axes: MoveAxes) -> Entity {
  app
    .world_mut()
    .spawn((
      Player,
      PlayerState::default(),
      HeldAxes(axes),
      Transform::default(),
    ))
    .id()
}

fn hold(app: &mut App, player: Entity, axes: MoveAxes) {
  app
    .world_mut()
    .get_mut::<HeldAxes>(player)
    .expect("player has HeldAxes")
    .0 = axes;
}

#[test]
fn walking_forward_moves_along_facing_and_ramps_speed() {
  let mut app = test_app();
  let player = spawn_player(&mut app, MoveAxes::new(1, 0, false));

  for _ in 0..40 {
    app.update();
  }

  let transform = app.world().get::<Transform>(player).unwrap();
  let state = app.world().get::<PlayerState>(player).unwrap();
  let intent = state.intent().expect("holding W keeps an intent");

  assert!(
    transform.translation.z > 0.0,
    "player should move toward +Z, got {}",
    transform.translation
  );
  assert!(transform.translation.x.abs() < 1e-5);
  // One ramp step per frame, starting from 1.0
  assert!(
    (intent.speed - 3.0).abs() < 1e-3,
    "40 frames should ramp speed to 3.0, got {}",
    intent.speed
  );
}

#[test]
fn speed_saturates_at_max() {
  let mut app = test_app();
  let player = spawn_player(&mut app, MoveAxes::new(1, 0, false));

  for _ in 0..400 {
    app.update();
  }

  let state = app.world().get::<PlayerState>(player).unwrap();
  assert_eq!(state.intent().map(|i| i.speed), Some(10.0));
}

#[test]
fn turning_in_place_rotates_without_moving() {
  let mut app = test_app();
  let player = spawn_player(&mut app, MoveAxes::new(0, 1, false));

  for _ in 0..30 {
    app.update();
  }

  let transform = app.world().get::<Transform>(player).unwrap();
  assert_eq!(transform.translation, Vec3::ZERO);
  // Turning left swings the facing from +Z toward +X
  assert!(
    transform.local_z().x > 0.0,
    "facing should swing toward +X, got {:?}",
    transform.local_z()
  );
}

#[test]
fn releasing_keys_stops_the_player() {
  let mut app = test_app();
  let player = spawn_player(&mut app, MoveAxes::new(1, -1, false));

  for _ in 0..10 {
    app.update();
  }
  hold(&mut app, player, MoveAxes::IDLE);
  app.update();
  let stopped_at = app.world().get::<Transform>(player).unwrap().translation;

  for _ in 0..10 {
    app.update();
  }

  let state = app.world().get::<PlayerState>(player).unwrap();
  let transform = app.world().get::<Transform>(player).unwrap();
  assert!(state.intent().is_none());
  assert_eq!(transform.translation, stopped_at);
}

#[test]
fn backing_up_moves_toward_negative_z() {
  let mut app = test_app();
  let player = spawn_player(&mut app, MoveAxes::new(-1, 0, false));

  for _ in 0..20 {
    app.update();
  }

  let transform = app.world().get::<Transform>(player).unwrap();
  let state = app.world().get::<PlayerState>(player).unwrap();
  assert!(transform.translation.z < 0.0);
  assert_eq!(state.intent().map(|i| i.speed), Some(1.0));
}
