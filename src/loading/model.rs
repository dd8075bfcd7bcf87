use std::fmt;

use bevy::{
  asset::{LoadState, RecursiveDependencyLoadState, UntypedAssetId},
  gltf::Gltf,
  prelude::*,
};

/// Why the character model never made it into the scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelLoadError {
  /// Reading or decoding the file (or one of its dependencies) failed.
  Asset(String),
  /// The document loaded but has no scene to attach.
  NoScene,
  Cancelled,
}

impl fmt::Display for ModelLoadError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Asset(e) => write!(f, "{e}"),
      Self::NoScene => write!(f, "glTF document has no scene"),
      Self::Cancelled => write!(f, "load cancelled"),
    }
  }
}

impl std::error::Error for ModelLoadError {}

/// Where an in-flight load stands this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
  /// `loaded` of `total` sub-assets are in. Both are zero until the
  /// document itself has been parsed.
  Pending { loaded: usize, total: usize },
  Ready,
  Failed(ModelLoadError),
}

/// The one in-flight load of the character model.
///
/// Holds the only strong handle; dropping it (see
/// [`super::CancelModelLoad`]) lets the asset server abandon the load.
#[derive(Resource, Debug)]
pub struct ModelLoad {
  path: String,
  handle: Handle<Gltf>,
}

impl ModelLoad {
  pub fn start(asset_server: &AssetServer, path: impl Into<String>) -> Self {
    let path = path.into();
    let handle = asset_server.load(path.clone());
    Self { path, handle }
  }

  pub fn path(&self) -> &str {
    &self.path
  }

  pub fn handle(&self) -> &Handle<Gltf> {
    &self.handle
  }

  pub fn poll(&self, asset_server: &AssetServer, gltfs: &Assets<Gltf>) -> LoadStatus {
    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(&self.handle) {
      return LoadStatus::Failed(ModelLoadError::Asset(err.to_string()));
    }

    match asset_server.get_recursive_dependency_load_state(&self.handle) {
      Some(RecursiveDependencyLoadState::Loaded) => LoadStatus::Ready,
      Some(RecursiveDependencyLoadState::Failed(err)) => {
        LoadStatus::Failed(ModelLoadError::Asset(err.to_string()))
      }
      _ => {
        let (loaded, total) = gltfs
          .get(&self.handle)
          .map(|gltf| count_loaded(asset_server, gltf))
          .unwrap_or_default();
        LoadStatus::Pending { loaded, total }
      }
    }
  }
}

fn count_loaded(asset_server: &AssetServer, gltf: &Gltf) -> (usize, usize) {
  let ids = gltf
    .scenes
    .iter()
    .map(|h| h.id().untyped())
    .chain(gltf.meshes.iter().map(|h| h.id().untyped()))
    .chain(gltf.materials.iter().map(|h| h.id().untyped()))
    .chain(gltf.animations.iter().map(|h| h.id().untyped()));

  ids.fold((0, 0), |(loaded, total), id: UntypedAssetId| {
    let done = asset_server.is_loaded_with_dependencies(id);
    (loaded + usize::from(done), total + 1)
  })
}

/// `loaded / total`, clamped to [0, 1]. Nothing known yet reads as 0.
pub fn load_fraction(loaded: usize, total: usize) -> f32 {
  if total == 0 {
    return 0.0;
  }
  (loaded as f32 / total as f32).clamp(0.0, 1.0)
}

/// Scene to attach: the document's default, else its first.
pub fn model_scene(gltf: &Gltf) -> Result<Handle<Scene>, ModelLoadError> {
  gltf
    .default_scene
    .clone()
    .or_else(|| gltf.scenes.first().cloned())
    .ok_or(ModelLoadError::NoScene)
}
