use crate::engine::assets::viewer_assets::ViewerAssets;
use crate::engine::assets::viewer_config::ViewerConfig;
use crate::engine::camera::viewer_camera::ViewerCamera;
use crate::engine::environment::build_environment_maps;
use crate::engine::loading::progress::{AssetStatus, LoadingProgress};
use bevy::asset::LoadState;
use bevy::prelude::*;

/// Once the HDRI is in memory, convert it into cubemaps and light the scene
/// with them. Load and conversion failures are logged and leave the scene unlit.
pub fn attach_environment_when_ready(
    mut commands: Commands,
    mut progress: ResMut<LoadingProgress>,
    mut images: ResMut<Assets<Image>>,
    viewer_assets: Res<ViewerAssets>,
    asset_server: Res<AssetServer>,
    config: Res<ViewerConfig>,
    camera_query: Query<Entity, With<ViewerCamera>>,
) {
    if progress.environment.is_settled() {
        return;
    }

    let Some(handle) = &viewer_assets.environment_map else {
        return;
    };

    match asset_server.load_state(handle) {
        LoadState::Loaded => {}
        LoadState::Failed(error) => {
            error!(
                "Failed to load environment map {}: {}",
                config.environment_map, error
            );
            progress.environment = AssetStatus::Failed(error.to_string());
            return;
        }
        _ => return,
    }

    let face_size = config.face_size();
    let maps = {
        let Some(panorama) = images.get(handle) else {
            return;
        };
        build_environment_maps(panorama, face_size)
    };

    let maps = match maps {
        Ok(maps) => maps,
        Err(error) => {
            error!(
                "Failed to convert environment map {}: {}",
                config.environment_map, error
            );
            progress.environment = AssetStatus::Failed(error.to_string());
            return;
        }
    };

    let diffuse_map = images.add(maps.diffuse);
    let specular_map = images.add(maps.specular);

    for camera in &camera_query {
        commands.entity(camera).insert(EnvironmentMapLight {
            diffuse_map: diffuse_map.clone(),
            specular_map: specular_map.clone(),
            intensity: config.environment_intensity,
            ..default()
        });
    }

    // The panorama is only needed for conversion.
    images.remove(handle);

    info!("✓ Environment map ready ({}px cubemap faces)", face_size);
    progress.environment = AssetStatus::Loaded;
}
