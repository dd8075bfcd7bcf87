//! E2E test for the per-frame update and its load gate.
//!
//! Wires the gameplay systems into their frame sets, holds keys by writing
//! `HeldAxes` directly, and flips `LoadPhase` by hand.
//!
//! Run: cargo test --test frame_update_e2e

use std::time::Duration;

use bevy::{prelude::*, state::app::StatesPlugin, time::TimeUpdateStrategy};
use dino_stage::config::{self, ConfigLoaded};
use dino_stage::core::{FrameSet, configure_frame_sets};
use dino_stage::loading::LoadPhase;
use dino_stage::player::{HeldAxes, MoveAxes, Player, PlayerState, movement};
use dino_stage::world::{
  lighting::{Sun, track_sun},
  scenery::{Decor, spin_decor},
};

fn test_app() -> (App, Entity) {
  let config = config::parse(include_str!("../assets/config/game.config.toml"))
    .expect("shipped config should parse");

  let mut app = App::new();
  app
    .add_plugins(MinimalPlugins)
    .add_plugins(StatesPlugin)
    .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(16)))
    .insert_resource(ConfigLoaded::from(config))
    .init_state::<LoadPhase>();
  configure_frame_sets(&mut app);
  app
    .add_systems(Update, movement::update_intent.in_set(FrameSet::Input))
    .add_systems(Update, movement::advance_player.in_set(FrameSet::Locomotion))
    .add_systems(Update, (track_sun, spin_decor).in_set(FrameSet::Follow));

  let player = app
    .world_mut()
    .spawn((
      Player,
      PlayerState::default(),
      HeldAxes::default(),
      Transform::default(),
    ))
    .id();
  app.world_mut().spawn((Sun, Transform::default()));
  app.world_mut().spawn((Decor::new(1.0), Transform::default()));

  // Let time start ticking
  app.update();
  (app, player)
}

fn hold(app: &mut App, player: Entity, axes: MoveAxes) {
  app.world_mut().get_mut::<HeldAxes>(player).unwrap().0 = axes;
}

fn set_phase(app: &mut App, phase: LoadPhase) {
  app
    .world_mut()
    .resource_mut::<NextState<LoadPhase>>()
    .set(phase);
  // Transition applies at the start of the next frame
  app.update();
}

fn translation(app: &App, player: Entity) -> Vec3 {
  app.world().get::<Transform>(player).unwrap().translation
}

#[test]
fn nothing_moves_while_loading_but_intent_is_tracked() {
  let (mut app, player) = test_app();
  hold(&mut app, player, MoveAxes::new(1, 0, false));

  for _ in 0..20 {
    app.update();
  }

  assert_eq!(translation(&app, player), Vec3::ZERO);
  let state = app.world().get::<PlayerState>(player).unwrap();
  let intent = state.intent().expect("held key should create intent");
  assert_eq!(intent.forward, 1);
  // No ramping until the model is in
  assert_eq!(intent.speed, 1.0);
}

#[test]
fn player_moves_once_ready() {
  let (mut app, player) = test_app();
  hold(&mut app, player, MoveAxes::new(1, 0, false));
  set_phase(&mut app, LoadPhase::Ready);

  for _ in 0..20 {
    app.update();
  }

  let pos = translation(&app, player);
  assert!(pos.z > 0.1, "player should walk along +Z, at {pos}");
  let speed = app
    .world()
    .get::<PlayerState>(player)
    .and_then(|state| state.intent().map(|intent| intent.speed))
    .unwrap();
  assert!(speed > 1.0, "speed should ramp, got {speed}");
}

#[test]
fn failed_load_freezes_the_scene() {
  let (mut app, player) = test_app();
  hold(&mut app, player, MoveAxes::new(1, 1, false));
  set_phase(&mut app, LoadPhase::Failed);

  for _ in 0..20 {
    app.update();
  }

  assert_eq!(translation(&app, player), Vec3::ZERO);
  let decor = app
    .world_mut()
    .query::<(&Decor, &Transform)>()
    .single(app.world())
    .map(|(_, transform)| transform.rotation)
    .unwrap();
  assert_eq!(decor, Quat::IDENTITY);
}

#[test]
fn sun_follows_the_player() {
  let (mut app, player) = test_app();
  set_phase(&mut app, LoadPhase::Ready);
  app.world_mut().get_mut::<Transform>(player).unwrap().translation = Vec3::new(5.0, 0.0, -2.0);

  app.update();

  let sun = app
    .world_mut()
    .query_filtered::<&Transform, With<Sun>>()
    .single(app.world())
    .copied()
    .unwrap();
  let offset = Vec3::new(0.0, 10.0, -10.0);
  assert!(sun.translation.distance(Vec3::new(5.0, 0.0, -2.0) + offset) < 1e-4);
  let aim = (Vec3::new(5.0, 0.0, -2.0) - sun.translation).normalize();
  assert!(sun.forward().as_vec3().dot(aim) > 0.999);
}

#[test]
fn decor_spins_once_ready() {
  let (mut app, _) = test_app();
  set_phase(&mut app, LoadPhase::Ready);

  for _ in 0..10 {
    app.update();
  }

  let rotation = app
    .world_mut()
    .query_filtered::<&Transform, With<Decor>>()
    .single(app.world())
    .map(|t| t.rotation)
    .unwrap();
  assert_ne!(rotation, Quat::IDENTITY, "decor should have rotated");
}
