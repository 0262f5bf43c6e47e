use crate::constants::render_settings::{CLEAR_COLOUR, RGB_SHIFT_SETTINGS};
use crate::engine::assets::viewer_config::ViewerConfig;
use crate::engine::render::rgb_shift_post_processing::RgbShiftSettings;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy::window::WindowResized;

#[derive(Component)]
pub struct ViewerCamera;

/// Width over height, or `None` while the window is collapsed.
pub fn aspect_ratio(width: f32, height: f32) -> Option<f32> {
    (width > 0.0 && height > 0.0).then(|| width / height)
}

pub fn spawn_viewer_camera(mut commands: Commands) {
    let config = ViewerConfig::default();

    commands.spawn((
        Camera3d::default(),
        Camera {
            clear_color: ClearColorConfig::Custom(CLEAR_COLOUR),
            ..default()
        },
        Projection::Perspective(config.perspective()),
        Transform::from_xyz(0.0, 0.0, config.camera_distance).looking_at(Vec3::ZERO, Vec3::Y),
        Tonemapping::AcesFitted,
        Msaa::Sample4,
        RGB_SHIFT_SETTINGS,
        ViewerCamera,
    ));
}

/// Re-apply projection, distance and post-processing from a loaded config.
pub fn apply_camera_config(
    config: &ViewerConfig,
    camera_query: &mut Query<
        (&mut Projection, &mut Transform, &mut RgbShiftSettings),
        With<ViewerCamera>,
    >,
) {
    for (mut projection, mut transform, mut rgb_shift) in camera_query.iter_mut() {
        let aspect = match projection.as_ref() {
            Projection::Perspective(current) => current.aspect_ratio,
            _ => 1.0,
        };
        *projection = Projection::Perspective(PerspectiveProjection {
            aspect_ratio: aspect,
            ..config.perspective()
        });
        *transform = Transform::from_xyz(0.0, 0.0, config.camera_distance)
            .looking_at(Vec3::ZERO, Vec3::Y);
        *rgb_shift = config.rgb_shift_settings();
    }
}

/// Keep the camera aspect equal to the window's width over height.
pub fn sync_camera_aspect(
    mut resize_events: EventReader<WindowResized>,
    mut camera_query: Query<&mut Projection, With<ViewerCamera>>,
) {
    let Some(resized) = resize_events.read().last() else {
        return;
    };
    let Some(aspect) = aspect_ratio(resized.width, resized.height) else {
        return;
    };

    for mut projection in &mut camera_query {
        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.aspect_ratio = aspect;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn resize_app() -> App {
        let mut app = App::new();
        app.add_event::<WindowResized>()
            .add_systems(Update, sync_camera_aspect);
        app
    }

    fn camera_aspect(app: &mut App) -> f32 {
        let mut query = app
            .world_mut()
            .query_filtered::<&Projection, With<ViewerCamera>>();
        match query.single(app.world()) {
            Ok(Projection::Perspective(perspective)) => perspective.aspect_ratio,
            _ => panic!("expected one perspective viewer camera"),
        }
    }

    #[test]
    fn aspect_ratio_rejects_collapsed_windows() {
        assert_eq!(aspect_ratio(800.0, 0.0), None);
        assert_eq!(aspect_ratio(0.0, 600.0), None);
        assert_eq!(aspect_ratio(800.0, 400.0), Some(2.0));
    }

    #[test]
    fn resize_keeps_aspect_equal_to_window() {
        let mut app = resize_app();
        let window = app.world_mut().spawn_empty().id();
        app.world_mut().spawn((
            Projection::Perspective(PerspectiveProjection::default()),
            ViewerCamera,
        ));

        for (width, height) in [(1920.0, 1080.0), (600.0, 900.0), (1024.0, 1024.0)] {
            app.world_mut().send_event(WindowResized {
                window,
                width,
                height,
            });
            app.update();
            assert_relative_eq!(camera_aspect(&mut app), width / height);
        }
    }

    #[test]
    fn zero_height_resize_leaves_aspect_untouched() {
        let mut app = resize_app();
        let window = app.world_mut().spawn_empty().id();
        app.world_mut().spawn((
            Projection::Perspective(PerspectiveProjection {
                aspect_ratio: 1.5,
                ..default()
            }),
            ViewerCamera,
        ));

        app.world_mut().send_event(WindowResized {
            window,
            width: 800.0,
            height: 0.0,
        });
        app.update();

        assert_relative_eq!(camera_aspect(&mut app), 1.5);
    }
}
