#[cfg(not(target_family = "wasm"))]
use bevy::{asset::AssetEvent, ecs::message::MessageReader};
use bevy::{prelude::*, window::PrimaryWindow};
#[cfg(not(target_family = "wasm"))]
use bevy_common_assets::toml::TomlAssetPlugin;

#[cfg(not(target_family = "wasm"))]
use super::{CONFIG_ASSET_PATH, ConfigHandle, GameConfig};
use super::{ConfigLoaded, parse, read_from_disk};
use crate::core::camera::GameCamera;
use crate::platform::{EmbeddedAssets, PlatformConfig};

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
  fn build(&self, app: &mut App) {
    // Native: asset-based config with hot-reload
    #[cfg(not(target_family = "wasm"))]
    app
      .add_plugins(TomlAssetPlugin::<GameConfig>::new(&["config.toml"]))
      .add_systems(Update, watch_config_changes.run_if(hot_reload_enabled));

    app.add_systems(PreStartup, load_config_sync).add_systems(
      Update,
      (
        update_window_on_config_change,
        update_camera_on_config_change,
      ),
    );
  }
}

fn hot_reload_enabled(platform: Option<Res<PlatformConfig>>) -> bool {
  platform.is_some_and(|p| p.hot_reload)
}

fn load_config_sync(
  mut commands: Commands,
  embedded: Option<Res<EmbeddedAssets>>,
  #[cfg(not(target_family = "wasm"))] asset_server: Res<AssetServer>,
) {
  // Native: set up asset handle for hot-reload
  #[cfg(not(target_family = "wasm"))]
  {
    let handle: Handle<GameConfig> = asset_server.load(CONFIG_ASSET_PATH);
    commands.insert_resource(ConfigHandle(handle));
  }

  // WASM: config is embedded at compile time (no filesystem access)
  let config = match embedded {
    Some(assets) => parse(assets.game_config),
    None => read_from_disk(),
  }
  .expect("Failed to load config file");

  commands.insert_resource(ConfigLoaded::from(config));
}

#[cfg(not(target_family = "wasm"))]
fn watch_config_changes(
  mut commands: Commands,
  config_handle: Res<ConfigHandle>,
  mut messages: MessageReader<AssetEvent<GameConfig>>,
  configs: Res<Assets<GameConfig>>,
) {
  for event in messages.read() {
    if let AssetEvent::Modified { id } = event {
      if config_handle.0.id() == *id {
        if let Some(config) = configs.get(&config_handle.0) {
          info!("Config reloaded!");
          commands.insert_resource(ConfigLoaded::from(config.clone()));
        }
      }
    }
  }
}

fn update_window_on_config_change(
  config: Res<ConfigLoaded>,
  mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
  if config.is_changed() {
    if let Ok(mut window) = windows.single_mut() {
      window
        .resolution
        .set(config.window.width as f32, config.window.height as f32);
      window.title.clone_from(&config.window.title);
    }
  }
}

fn update_camera_on_config_change(
  config: Res<ConfigLoaded>,
  mut camera_query: Query<&mut Projection, With<GameCamera>>,
) {
  if config.is_changed() {
    for mut projection in camera_query.iter_mut() {
      if let Projection::Perspective(ref mut perspective) = *projection {
        perspective.fov = config.camera.fov_degrees.to_radians();
        perspective.near = config.camera.near;
        perspective.far = config.camera.far;
      }
    }
  }
}
