use bevy::{prelude::*, window::WindowResolution};
use dino_stage::{ConfigPlugin, StagePlugins, config, platform};

fn main() {
  let (platform, embedded) = platform::init();

  // The window is built before any plugin runs, so read the config eagerly
  // here; ConfigPlugin loads it again as a resource.
  let config = match &embedded {
    Some(assets) => config::parse(assets.game_config),
    None => config::read_from_disk(),
  }
  .expect("Failed to load config");

  let mut app = App::new();

  app.add_plugins(DefaultPlugins.set(WindowPlugin {
    primary_window: Some(Window {
      resolution: WindowResolution::new(config.window.width, config.window.height),
      title: config.window.title.clone(),
      present_mode: platform.present_mode,
      mode: platform.window_mode,
      canvas: platform.canvas.clone(),
      fit_canvas_to_parent: platform.fit_canvas_to_parent,
      prevent_default_event_handling: platform.prevent_default_event_handling,
      ..default()
    }),
    ..default()
  }));

  if let Some(assets) = embedded {
    app.insert_resource(assets);
  }

  app
    .insert_resource(platform)
    .add_plugins(ConfigPlugin)
    .add_plugins(StagePlugins);

  app.run();
}
