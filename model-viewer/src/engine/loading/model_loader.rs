use crate::engine::assets::viewer_assets::ViewerAssets;
use crate::engine::assets::viewer_config::ViewerConfig;
use crate::engine::input::pointer_rotation::RotationTween;
use crate::engine::loading::progress::{AssetStatus, LoadingProgress};
use bevy::asset::RecursiveDependencyLoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;

/// Root entity of the spawned glTF scene.
#[derive(Component)]
pub struct ViewerModel;

/// The model reference. Absent until the glTF and every dependency it pulls in
/// have loaded, and stays absent if loading fails.
#[derive(Resource, Default, Debug)]
pub struct LoadedModel(pub Option<Entity>);

impl LoadedModel {
    pub fn entity(&self) -> Option<Entity> {
        self.0
    }
}

pub fn spawn_model_when_ready(
    mut commands: Commands,
    mut progress: ResMut<LoadingProgress>,
    mut loaded_model: ResMut<LoadedModel>,
    viewer_assets: Res<ViewerAssets>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    config: Res<ViewerConfig>,
) {
    if progress.model.is_settled() {
        return;
    }

    let Some(handle) = &viewer_assets.model else {
        return;
    };

    match asset_server.recursive_dependency_load_state(handle) {
        RecursiveDependencyLoadState::Loaded => {}
        RecursiveDependencyLoadState::Failed(error) => {
            error!("An error happened loading {}: {}", config.model, error);
            progress.model = AssetStatus::Failed(error.to_string());
            return;
        }
        _ => return,
    }

    let Some(gltf) = gltfs.get(handle) else {
        return;
    };

    let Some(scene) = gltf
        .default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())
    else {
        error!("An error happened loading {}: no scenes in file", config.model);
        progress.model = AssetStatus::Failed("no scenes in file".to_string());
        return;
    };

    let entity = commands
        .spawn((
            SceneRoot(scene),
            Transform::IDENTITY,
            RotationTween::default(),
            ViewerModel,
        ))
        .id();
    loaded_model.0 = Some(entity);

    info!("✓ Model ready: {}", config.model);
    progress.model = AssetStatus::Loaded;
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::asset::AssetMetaCheck;
    use std::time::Duration;

    fn model_app(path: &str) -> App {
        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            AssetPlugin {
                meta_check: AssetMetaCheck::Never,
                ..default()
            },
        ))
        .init_asset::<Gltf>()
        .init_resource::<LoadingProgress>()
        .init_resource::<LoadedModel>()
        .insert_resource(ViewerConfig {
            model: path.to_string(),
            ..default()
        })
        .add_systems(Update, spawn_model_when_ready);

        let handle = app.world().resource::<AssetServer>().load(path.to_string());
        app.world_mut().insert_resource(ViewerAssets {
            model: Some(handle),
            ..default()
        });
        app
    }

    #[test]
    fn failed_model_load_leaves_reference_absent() {
        let mut app = model_app("models/missing.gltf");

        for _ in 0..1000 {
            app.update();
            if app.world().resource::<LoadingProgress>().model.is_settled() {
                break;
            }
            std::thread::sleep(Duration::from_millis(2));
        }

        assert!(matches!(
            app.world().resource::<LoadingProgress>().model,
            AssetStatus::Failed(_)
        ));
        assert_eq!(app.world().resource::<LoadedModel>().entity(), None);

        let mut models = app.world_mut().query_filtered::<Entity, With<ViewerModel>>();
        assert_eq!(models.iter(app.world()).count(), 0);
    }

    // DamagedHelmet references its textures as external JPEG files.
    #[test]
    fn model_texture_formats_have_decoders() {
        let extensions = bevy::image::ImageLoader::SUPPORTED_FILE_EXTENSIONS;

        for extension in ["jpg", "jpeg", "png"] {
            assert!(
                extensions.contains(&extension),
                "no image decoder for .{}",
                extension
            );
        }
    }

    #[test]
    fn nothing_spawns_before_a_load_is_requested() {
        let mut app = model_app("models/missing.gltf");
        app.world_mut().resource_mut::<ViewerAssets>().model = None;

        for _ in 0..5 {
            app.update();
        }

        assert_eq!(
            app.world().resource::<LoadingProgress>().model,
            AssetStatus::Pending
        );
        assert_eq!(app.world().resource::<LoadedModel>().entity(), None);
    }
}
