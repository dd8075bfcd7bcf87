use std::f32::consts::FRAC_PI_2;

use bevy::{
  input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit},
  prelude::*,
};

use crate::config::{ConfigLoaded, to_color};

/// Marker component for the game camera
#[derive(Component)]
pub struct GameCamera;

/// Keeps the orbit away from the poles so `looking_at` stays well defined.
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.05;

/// Pixels per scroll line when the platform reports pixel deltas.
const PIXELS_PER_LINE: f32 = 16.0;

/// Camera orbiting a fixed target on a sphere.
///
/// Input moves the `goal_*` angles; [`OrbitCamera::step`] eases the current
/// angles toward them every frame, which is the damping.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
  pub target: Vec3,
  pub yaw: f32,
  pub pitch: f32,
  pub radius: f32,
  pub goal_yaw: f32,
  pub goal_pitch: f32,
  pub goal_radius: f32,
}

impl OrbitCamera {
  pub fn from_eye(eye: Vec3, target: Vec3) -> Self {
    let offset = eye - target;
    let radius = offset.length().max(f32::EPSILON);
    let yaw = offset.x.atan2(offset.z);
    let pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();
    Self {
      target,
      yaw,
      pitch,
      radius,
      goal_yaw: yaw,
      goal_pitch: pitch,
      goal_radius: radius,
    }
  }

  pub fn eye(&self) -> Vec3 {
    let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
    let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
    self.target
      + Vec3::new(
        cos_pitch * sin_yaw,
        sin_pitch,
        cos_pitch * cos_yaw,
      ) * self.radius
  }

  /// Drag right spins the camera left around the target, drag down raises
  /// it.
  pub fn rotate(&mut self, drag: Vec2, speed: f32) {
    self.goal_yaw -= drag.x * speed;
    self.goal_pitch = (self.goal_pitch + drag.y * speed).clamp(-PITCH_LIMIT, PITCH_LIMIT);
  }

  /// Positive lines zoom in.
  pub fn zoom(&mut self, lines: f32, speed: f32, min_radius: f32, max_radius: f32) {
    let factor = (1.0 - lines * speed).max(0.1);
    self.goal_radius = (self.goal_radius * factor).clamp(min_radius, max_radius);
  }

  /// Eases toward the goal. `damping` is the exponential rate per second.
  pub fn step(&mut self, dt: f32, damping: f32) {
    let t = 1.0 - (-damping * dt).exp();
    self.yaw += (self.goal_yaw - self.yaw) * t;
    self.pitch += (self.goal_pitch - self.pitch) * t;
    self.radius += (self.goal_radius - self.radius) * t;
  }

  pub fn transform(&self) -> Transform {
    Transform::from_translation(self.eye()).looking_at(self.target, Vec3::Y)
  }
}

/// Counter over the alternate camera views (follow, front, overhead).
///
/// Cycled by the HUD button. Nothing reads it for rendering; the active view
/// is always the orbit camera.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CameraCycle {
  index: usize,
}

impl CameraCycle {
  pub const VIEWS: [&'static str; 3] = ["follow", "front", "overhead"];

  pub fn index(&self) -> usize {
    self.index
  }

  pub fn view(&self) -> &'static str {
    Self::VIEWS[self.index]
  }

  pub fn advance(&mut self) -> usize {
    self.index = (self.index + 1) % Self::VIEWS.len();
    self.index
  }
}

pub fn setup_camera(mut commands: Commands, config: Res<ConfigLoaded>) {
  let camera = &config.camera;
  let scene = &config.scene;
  let lighting = &config.lighting;
  let orbit = OrbitCamera::from_eye(Vec3::from(camera.position), Vec3::from(camera.target));

  commands.spawn((
    GameCamera,
    Camera3d::default(),
    Camera {
      clear_color: ClearColorConfig::Custom(to_color(scene.fog_color)),
      ..default()
    },
    Projection::Perspective(PerspectiveProjection {
      fov: camera.fov_degrees.to_radians(),
      near: camera.near,
      far: camera.far,
      ..default()
    }),
    orbit.transform(),
    orbit,
    DistanceFog {
      color: to_color(scene.fog_color),
      falloff: FogFalloff::Linear {
        start: scene.fog_start,
        end: scene.fog_end,
      },
      ..default()
    },
    AmbientLight {
      color: to_color(lighting.ambient_color),
      brightness: lighting.ambient_brightness,
      ..default()
    },
  ));
}

pub fn orbit_input(
  mouse_buttons: Res<ButtonInput<MouseButton>>,
  motion: Res<AccumulatedMouseMotion>,
  scroll: Res<AccumulatedMouseScroll>,
  config: Res<ConfigLoaded>,
  mut cameras: Query<&mut OrbitCamera, With<GameCamera>>,
) {
  let Ok(mut orbit) = cameras.single_mut() else {
    return;
  };
  let camera = &config.camera;

  if mouse_buttons.pressed(MouseButton::Left) && motion.delta != Vec2::ZERO {
    orbit.rotate(motion.delta, camera.rotate_speed);
  }

  if scroll.delta.y != 0.0 {
    let lines = match scroll.unit {
      MouseScrollUnit::Line => scroll.delta.y,
      MouseScrollUnit::Pixel => scroll.delta.y / PIXELS_PER_LINE,
    };
    orbit.zoom(
      lines,
      camera.zoom_speed,
      camera.min_radius,
      camera.max_radius,
    );
  }
}

/// Damping step, runs every frame whether or not there was input.
pub fn apply_orbit(
  time: Res<Time>,
  config: Res<ConfigLoaded>,
  mut cameras: Query<(&mut OrbitCamera, &mut Transform), With<GameCamera>>,
) {
  for (mut orbit, mut transform) in &mut cameras {
    orbit.step(time.delta_secs(), config.camera.damping);
    *transform = orbit.transform();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn assert_close(a: Vec3, b: Vec3) {
    assert!(a.abs_diff_eq(b, 1e-4), "expected {b}, got {a}");
  }

  #[test]
  fn eye_round_trips_through_angles() {
    let eye = Vec3::new(0.0, 3.0, 7.0);
    let orbit = OrbitCamera::from_eye(eye, Vec3::ZERO);

    assert_close(orbit.eye(), eye);
    assert!((orbit.radius - 58f32.sqrt()).abs() < 1e-5);
    assert!(orbit.yaw.abs() < 1e-6);
  }

  #[test]
  fn step_converges_to_goal() {
    let mut orbit = OrbitCamera::from_eye(Vec3::new(0.0, 3.0, 7.0), Vec3::ZERO);
    orbit.rotate(Vec2::new(200.0, 0.0), 0.005);

    orbit.step(1.0 / 60.0, 10.0);
    assert!(orbit.yaw < 0.0 && orbit.yaw > orbit.goal_yaw, "yaw={}", orbit.yaw);

    for _ in 0..600 {
      orbit.step(1.0 / 60.0, 10.0);
    }
    assert!((orbit.yaw - orbit.goal_yaw).abs() < 1e-4);
  }

  #[test]
  fn pitch_and_radius_stay_in_bounds() {
    let mut orbit = OrbitCamera::from_eye(Vec3::new(0.0, 3.0, 7.0), Vec3::ZERO);

    orbit.rotate(Vec2::new(0.0, 10_000.0), 0.005);
    assert!(orbit.goal_pitch <= PITCH_LIMIT);

    for _ in 0..100 {
      orbit.zoom(5.0, 0.1, 2.0, 60.0);
    }
    assert_eq!(orbit.goal_radius, 2.0);

    for _ in 0..100 {
      orbit.zoom(-5.0, 0.1, 2.0, 60.0);
    }
    assert_eq!(orbit.goal_radius, 60.0);
  }

  #[test]
  fn camera_cycle_wraps() {
    let mut cycle = CameraCycle::default();
    assert_eq!(cycle.view(), "follow");
    assert_eq!(cycle.advance(), 1);
    assert_eq!(cycle.view(), "front");
    assert_eq!(cycle.advance(), 2);
    assert_eq!(cycle.advance(), 0);
  }
}
