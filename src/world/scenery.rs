use std::f32::consts::FRAC_PI_2;

use bevy::{light::NotShadowCaster, prelude::*};

use crate::config::{ConfigLoaded, to_color};

/// Decorative primitive spinning about X and Y.
#[derive(Component, Debug, Clone, Copy)]
pub struct Decor {
  /// Current X/Y euler angles.
  pub angles: Vec2,
  /// +1 spins forward, -1 backward.
  pub direction: f32,
}

impl Decor {
  pub fn new(direction: f32) -> Self {
    Self {
      angles: Vec2::ZERO,
      direction,
    }
  }

  pub fn advance(&mut self, step: f32) -> Quat {
    self.angles += Vec2::splat(step * self.direction);
    Quat::from_euler(EulerRot::XYZ, self.angles.x, self.angles.y, 0.0)
  }
}

pub fn spawn_ground(
  mut commands: Commands,
  mut meshes: ResMut<Assets<Mesh>>,
  mut materials: ResMut<Assets<StandardMaterial>>,
  config: Res<ConfigLoaded>,
) {
  let scene = &config.scene;

  // Receives the character's shadow but never casts one
  commands.spawn((
    Mesh3d(meshes.add(Plane3d::default().mesh().size(scene.ground_size, scene.ground_size))),
    MeshMaterial3d(materials.add(StandardMaterial {
      base_color: to_color(scene.ground_color),
      perceptual_roughness: 0.9,
      ..default()
    })),
    Transform::default(),
    NotShadowCaster,
  ));
}

pub fn spawn_decor(
  mut commands: Commands,
  mut meshes: ResMut<Assets<Mesh>>,
  mut materials: ResMut<Assets<StandardMaterial>>,
) {
  commands.spawn((
    Decor::new(1.0),
    Mesh3d(meshes.add(Cuboid::new(2.0, 2.0, 2.0))),
    MeshMaterial3d(materials.add(StandardMaterial::default())),
    Transform::from_xyz(3.0, 3.0, 0.0),
  ));

  commands.spawn((
    Decor::new(-1.0),
    Mesh3d(meshes.add(Torus {
      minor_radius: 0.3,
      major_radius: 1.0,
    })),
    MeshMaterial3d(materials.add(StandardMaterial {
      base_color: Color::srgb(0.55, 0.45, 0.95),
      ..default()
    })),
    Transform::from_xyz(-3.0, 3.0, 0.0),
  ));
}

pub fn spin_decor(mut decor: Query<(&mut Decor, &mut Transform)>, config: Res<ConfigLoaded>) {
  for (mut spin, mut transform) in &mut decor {
    transform.rotation = spin.advance(config.scene.decor_spin);
  }
}

/// Grid lines over the ground, redrawn every frame.
pub fn draw_grid(mut gizmos: Gizmos, config: Res<ConfigLoaded>) {
  let scene = &config.scene;
  let divisions = scene.grid_divisions.max(1);
  let spacing = scene.ground_size / divisions as f32;

  gizmos.grid(
    Isometry3d::new(
      Vec3::Y * 0.01,
      Quat::from_rotation_x(FRAC_PI_2),
    ),
    UVec2::splat(divisions),
    Vec2::splat(spacing),
    to_color(scene.grid_color),
  );
}
