//! Platform-specific initialization and configuration.
//!
//! This module centralizes all platform differences so game logic can remain
//! platform-agnostic. The `init()` function returns platform-appropriate
//! configuration that `main` feeds into the window setup.

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowMode};

/// Platform-specific configuration used by window setup.
#[derive(Resource, Debug, Clone)]
pub struct PlatformConfig {
  /// Window mode: always windowed, the demo lives in a browser canvas or a
  /// desktop window.
  pub window_mode: WindowMode,
  /// Present mode: Fifo (vsync) on WASM, AutoVsync on native.
  pub present_mode: PresentMode,
  /// Canvas selector for WASM, None on native.
  pub canvas: Option<String>,
  /// Whether to fit canvas to parent element (WASM only).
  pub fit_canvas_to_parent: bool,
  /// Whether to prevent default browser event handling (context menu, etc).
  pub prevent_default_event_handling: bool,
  /// Whether config hot-reload is enabled (native only).
  pub hot_reload: bool,
}

/// Embedded asset strings for WASM builds where filesystem access is
/// unavailable.
#[derive(Resource, Debug, Clone)]
pub struct EmbeddedAssets {
  /// Contents of game.config.toml
  pub game_config: &'static str,
}

/// Initialize platform-specific configuration.
///
/// Returns `PlatformConfig` for all platforms, and `EmbeddedAssets` only on
/// WASM.
pub fn init() -> (PlatformConfig, Option<EmbeddedAssets>) {
  #[cfg(target_family = "wasm")]
  console_error_panic_hook::set_once();

  let config = PlatformConfig {
    window_mode: WindowMode::Windowed,

    #[cfg(target_family = "wasm")]
    present_mode: PresentMode::Fifo,
    #[cfg(not(target_family = "wasm"))]
    present_mode: PresentMode::AutoVsync,

    #[cfg(target_family = "wasm")]
    canvas: Some("#bevy".to_string()),
    #[cfg(not(target_family = "wasm"))]
    canvas: None,

    #[cfg(target_family = "wasm")]
    fit_canvas_to_parent: true,
    #[cfg(not(target_family = "wasm"))]
    fit_canvas_to_parent: false,

    // Orbit drag uses the mouse; keep the browser menu out of the way
    #[cfg(target_family = "wasm")]
    prevent_default_event_handling: true,
    #[cfg(not(target_family = "wasm"))]
    prevent_default_event_handling: false,

    #[cfg(target_family = "wasm")]
    hot_reload: false,
    #[cfg(not(target_family = "wasm"))]
    hot_reload: true,
  };

  #[cfg(target_family = "wasm")]
  let embedded = Some(EmbeddedAssets {
    game_config: include_str!("../assets/config/game.config.toml"),
  });
  #[cfg(not(target_family = "wasm"))]
  let embedded = None;

  (config, embedded)
}
