use crate::engine::assets::viewer_config::ViewerConfig;
use bevy::gltf::Gltf;
use bevy::prelude::*;

/// Handles for every asset the viewer waits on. `None` until the load starts.
#[derive(Resource, Default)]
pub struct ViewerAssets {
    pub config: Option<Handle<ViewerConfig>>,
    pub environment_map: Option<Handle<Image>>,
    pub model: Option<Handle<Gltf>>,
}
