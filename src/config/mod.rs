mod plugin;

use std::{fmt, io};

use bevy::{asset::Asset, prelude::*, reflect::TypePath};
pub use plugin::ConfigPlugin;
use serde::{Deserialize, Deserializer, de};

/// Path of the config file, relative to the asset root.
pub const CONFIG_ASSET_PATH: &str = "config/game.config.toml";

/// Path of the config file, relative to the working directory.
pub const CONFIG_FILE_PATH: &str = "assets/config/game.config.toml";

#[derive(Asset, TypePath, Deserialize, Debug, Clone)]
pub struct GameConfig {
  pub window: WindowConfig,
  pub camera: CameraConfig,
  pub model: ModelConfig,
  pub player: PlayerConfig,
  pub animation: AnimationConfig,
  pub scene: SceneConfig,
  pub lighting: LightingConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct WindowConfig {
  pub width: u32,
  pub height: u32,
  pub title: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CameraConfig {
  pub fov_degrees: f32,
  pub near: f32,
  pub far: f32,
  pub position: [f32; 3],
  pub target: [f32; 3],
  /// Fraction of the remaining orbit offset covered per second.
  pub damping: f32,
  /// Radians per pixel of mouse drag.
  pub rotate_speed: f32,
  /// Fraction of the radius per scroll line.
  pub zoom_speed: f32,
  pub min_radius: f32,
  pub max_radius: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ModelConfig {
  /// glTF binary, relative to the asset root.
  pub path: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PlayerConfig {
  /// Speed a fresh movement intent starts with.
  pub initial_speed: f32,
  pub max_speed: f32,
  /// Added to speed every frame while moving forward.
  pub speed_ramp: f32,
  /// Above this speed forward motion plays the run clip.
  pub run_threshold: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AnimationConfig {
  pub crossfade_secs: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SceneConfig {
  pub ground_size: f32,
  pub grid_divisions: u32,
  #[serde(deserialize_with = "deserialize_hex_color")]
  pub ground_color: [f32; 3],
  #[serde(deserialize_with = "deserialize_hex_color")]
  pub grid_color: [f32; 3],
  #[serde(deserialize_with = "deserialize_hex_color")]
  pub fog_color: [f32; 3],
  pub fog_start: f32,
  pub fog_end: f32,
  /// Radians added to the decorations' X and Y rotation every frame.
  pub decor_spin: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LightingConfig {
  /// Sun position relative to the player.
  pub sun_offset: [f32; 3],
  pub sun_illuminance: f32,
  #[serde(deserialize_with = "deserialize_hex_color")]
  pub ambient_color: [f32; 3],
  pub ambient_brightness: f32,
  pub shadow_distance: f32,
}

fn deserialize_hex_color<'de, D>(deserializer: D) -> Result<[f32; 3], D::Error>
where
  D: Deserializer<'de>,
{
  let s: String = Deserialize::deserialize(deserializer)?;
  let s = s.trim_start_matches('#');
  if s.len() != 6 {
    return Err(de::Error::custom("hex color must be 6 characters"));
  }
  let r = u8::from_str_radix(&s[0..2], 16).map_err(de::Error::custom)?;
  let g = u8::from_str_radix(&s[2..4], 16).map_err(de::Error::custom)?;
  let b = u8::from_str_radix(&s[4..6], 16).map_err(de::Error::custom)?;
  Ok([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
}

/// Error reading the config before the app starts.
#[derive(Debug)]
pub enum ConfigError {
  Io(io::Error),
  Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Io(e) => write!(f, "failed to read {CONFIG_FILE_PATH}: {e}"),
      Self::Parse(e) => write!(f, "failed to parse config: {e}"),
    }
  }
}

impl std::error::Error for ConfigError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io(e) => Some(e),
      Self::Parse(e) => Some(e),
    }
  }
}

impl From<io::Error> for ConfigError {
  fn from(err: io::Error) -> Self {
    Self::Io(err)
  }
}

impl From<toml::de::Error> for ConfigError {
  fn from(err: toml::de::Error) -> Self {
    Self::Parse(err)
  }
}

pub fn parse(source: &str) -> Result<GameConfig, ConfigError> {
  Ok(toml::from_str(source)?)
}

pub fn read_from_disk() -> Result<GameConfig, ConfigError> {
  let source = std::fs::read_to_string(CONFIG_FILE_PATH)?;
  parse(&source)
}

pub fn to_color(rgb: [f32; 3]) -> Color {
  Color::srgb(rgb[0], rgb[1], rgb[2])
}

#[derive(Resource)]
pub struct ConfigHandle(pub Handle<GameConfig>);

#[derive(Resource, Debug, Clone)]
pub struct ConfigLoaded {
  pub window: WindowConfig,
  pub camera: CameraConfig,
  pub model: ModelConfig,
  pub player: PlayerConfig,
  pub animation: AnimationConfig,
  pub scene: SceneConfig,
  pub lighting: LightingConfig,
}

impl From<GameConfig> for ConfigLoaded {
  fn from(config: GameConfig) -> Self {
    Self {
      window: config.window,
      camera: config.camera,
      model: config.model,
      player: config.player,
      animation: config.animation,
      scene: config.scene,
      lighting: config.lighting,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const SHIPPED: &str = include_str!("../../assets/config/game.config.toml");

  #[test]
  fn shipped_config_parses() {
    let config = parse(SHIPPED).expect("shipped config should parse");

    assert_eq!(config.player.max_speed, 10.0);
    assert_eq!(config.player.initial_speed, 1.0);
    assert!((config.player.speed_ramp - 0.05).abs() < f32::EPSILON);
    assert_eq!(config.player.run_threshold, 5.0);
    assert!((config.animation.crossfade_secs - 0.5).abs() < f32::EPSILON);
    assert!(config.model.path.ends_with(".glb"));
  }

  #[test]
  fn hex_colors_become_unit_floats() {
    let source = SHIPPED.replace("ground_color = \"#999999\"", "ground_color = \"#ff0080\"");
    let config = parse(&source).expect("patched config should parse");

    assert_eq!(config.scene.ground_color[0], 1.0);
    assert_eq!(config.scene.ground_color[1], 0.0);
    assert!((config.scene.ground_color[2] - 128.0 / 255.0).abs() < 1e-6);
  }

  #[test]
  fn short_hex_color_is_rejected() {
    let source = SHIPPED.replace("ground_color = \"#999999\"", "ground_color = \"#999\"");
    let err = parse(&source).expect_err("3-digit hex should be rejected");

    assert!(
      err.to_string().contains("6 characters"),
      "unexpected error: {err}"
    );
  }
}
