use std::collections::HashMap;

use bevy::prelude::*;

/// Clips found in the loaded model, keyed by lower-cased name.
///
/// Built once when the model finishes loading and never changed afterwards.
#[derive(Resource, Debug, Clone)]
pub struct ClipRegistry {
  graph: Handle<AnimationGraph>,
  nodes: HashMap<String, AnimationNodeIndex>,
}

impl ClipRegistry {
  /// Adds every clip as a blendable node under one graph root.
  ///
  /// Names differing only by case collapse to one entry; a name that is
  /// already lower case wins over its mixed-case twin.
  pub fn build<'a>(
    clips: impl IntoIterator<Item = (&'a str, Handle<AnimationClip>)>,
    graphs: &mut Assets<AnimationGraph>,
  ) -> Self {
    let mut graph = AnimationGraph::new();
    let mut nodes = HashMap::new();

    for (name, clip) in clips {
      let key = name.to_lowercase();
      if nodes.contains_key(&key) && name != key {
        warn!("Ignoring clip {name:?}, {key:?} is already registered");
        continue;
      }
      let node = graph.add_clip(clip, 1.0, graph.root);
      nodes.insert(key, node);
    }

    Self {
      graph: graphs.add(graph),
      nodes,
    }
  }

  pub fn get(&self, name: &str) -> Option<AnimationNodeIndex> {
    self.nodes.get(&name.to_lowercase()).copied()
  }

  pub fn graph(&self) -> Handle<AnimationGraph> {
    self.graph.clone()
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.nodes.keys().map(String::as_str)
  }
}
