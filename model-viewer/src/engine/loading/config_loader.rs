use crate::constants::path::VIEWER_CONFIG_PATH;
use crate::engine::assets::viewer_assets::ViewerAssets;
use crate::engine::assets::viewer_config::ViewerConfig;
use crate::engine::camera::viewer_camera::{ViewerCamera, apply_camera_config};
use crate::engine::core::app_state::AppState;
use crate::engine::render::rgb_shift_post_processing::RgbShiftSettings;
use bevy::asset::LoadState;
use bevy::prelude::*;

// Start the loading process
pub fn start_loading(mut viewer_assets: ResMut<ViewerAssets>, asset_server: Res<AssetServer>) {
    viewer_assets.config = Some(asset_server.load(VIEWER_CONFIG_PATH));
}

/// Resolve the config once its load settles. A missing or malformed file is
/// not fatal: the viewer carries on with the compiled defaults.
pub fn apply_config_when_ready(
    mut commands: Commands,
    viewer_assets: Res<ViewerAssets>,
    asset_server: Res<AssetServer>,
    configs: Res<Assets<ViewerConfig>>,
    mut camera_query: Query<
        (&mut Projection, &mut Transform, &mut RgbShiftSettings),
        With<ViewerCamera>,
    >,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(handle) = &viewer_assets.config else {
        return;
    };

    let config = match asset_server.load_state(handle) {
        LoadState::Loaded => {
            let Some(config) = configs.get(handle) else {
                return;
            };
            info!("✓ Viewer config loaded from {}", VIEWER_CONFIG_PATH);
            config.clone()
        }
        LoadState::Failed(error) => {
            warn!("Viewer config unavailable, using defaults: {}", error);
            ViewerConfig::default()
        }
        _ => return,
    };

    apply_camera_config(&config, &mut camera_query);
    commands.insert_resource(config);

    info!("→ Transitioning to Viewing state");
    next_state.set(AppState::Viewing);
}

/// Kick off both asset loads; they resolve independently.
pub fn start_asset_loads(
    mut viewer_assets: ResMut<ViewerAssets>,
    asset_server: Res<AssetServer>,
    config: Res<ViewerConfig>,
) {
    viewer_assets.environment_map = Some(asset_server.load(config.environment_map.clone()));
    viewer_assets.model = Some(asset_server.load(config.model.clone()));
    info!(
        "Loading environment {} and model {}",
        config.environment_map, config.model
    );
}
