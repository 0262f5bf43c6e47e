use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::assets::viewer_assets::ViewerAssets;
use crate::engine::assets::viewer_config::ViewerConfig;
use crate::engine::camera::viewer_camera::{spawn_viewer_camera, sync_camera_aspect};
use crate::engine::core::app_state::AppState;
use crate::engine::core::window_config::create_window_config;
use crate::engine::input::pointer_rotation::{
    advance_rotation_tween, retarget_rotation_on_pointer_move,
};
use crate::engine::loading::config_loader::{
    apply_config_when_ready, start_asset_loads, start_loading,
};
use crate::engine::loading::environment_loader::attach_environment_when_ready;
use crate::engine::loading::model_loader::{LoadedModel, spawn_model_when_ready};
use crate::engine::loading::progress::{LoadingProgress, report_loading_progress};
use crate::engine::render::rgb_shift_post_processing::RgbShiftPostProcessPlugin;
use crate::engine::systems::status_overlay::update_status_overlay;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::status_overlay::create_native_overlay;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers ViewerConfig as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<ViewerConfig>::new(&["json"]))
        .add_plugins(RgbShiftPostProcessPlugin);

    // Initialise resources early
    app.init_resource::<ViewerAssets>()
        .init_resource::<LoadingProgress>()
        .init_resource::<LoadedModel>();

    app.add_systems(Startup, (spawn_viewer_camera, start_loading).chain())
        .add_systems(
            Update,
            apply_config_when_ready.run_if(in_state(AppState::Configuring)),
        )
        .add_systems(OnEnter(AppState::Viewing), start_asset_loads)
        .add_systems(
            Update,
            (
                attach_environment_when_ready,
                spawn_model_when_ready,
                report_loading_progress,
                update_status_overlay,
            )
                .chain()
                .run_if(in_state(AppState::Viewing)),
        )
        .add_systems(
            Update,
            (retarget_rotation_on_pointer_move, advance_rotation_tween)
                .chain()
                .run_if(in_state(AppState::Viewing)),
        )
        .add_systems(Update, sync_camera_aspect);

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Startup, create_native_overlay);
    }

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
