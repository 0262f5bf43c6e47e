use crate::engine::assets::viewer_config::ViewerConfig;
use crate::engine::loading::model_loader::{LoadedModel, ViewerModel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Target angles for a cursor position: `x` is the rotation about the X axis
/// (from vertical position), `y` about the Y axis (from horizontal position).
/// The viewport centre maps to zero and the edges to `±max_rotation / 2`.
pub fn rotation_target(cursor: Vec2, window_size: Vec2, max_rotation: f32) -> Option<Vec2> {
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return None;
    }
    let normalised = cursor / window_size - Vec2::splat(0.5);
    Some(Vec2::new(normalised.y, normalised.x) * max_rotation)
}

/// Quadratic ease-out: fast start, gentle settle.
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Eased interpolation of the model's X/Y rotation towards the latest target.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationTween {
    pub from: Vec2,
    pub to: Vec2,
    pub elapsed: f32,
    pub duration: f32,
}

impl RotationTween {
    pub fn current(&self) -> Vec2 {
        if self.duration <= 0.0 {
            return self.to;
        }
        self.from.lerp(self.to, ease_out_quad(self.elapsed / self.duration))
    }

    /// Restart from wherever the model is now, so a new target mid-flight
    /// never makes the model jump.
    pub fn retarget(&mut self, to: Vec2, duration: f32) {
        self.from = self.current();
        self.to = to;
        self.elapsed = 0.0;
        self.duration = duration.max(0.0);
    }

    pub fn advance(&mut self, delta_secs: f32) {
        self.elapsed = (self.elapsed + delta_secs).min(self.duration);
    }

    pub fn is_settled(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Point the model's tween at the angles for the latest cursor position.
/// Does nothing until the model has loaded.
pub fn retarget_rotation_on_pointer_move(
    mut cursor_moved: EventReader<CursorMoved>,
    windows: Query<&Window, With<PrimaryWindow>>,
    loaded_model: Res<LoadedModel>,
    config: Res<ViewerConfig>,
    mut tweens: Query<&mut RotationTween, With<ViewerModel>>,
) {
    let Some(cursor) = cursor_moved.read().last() else {
        return;
    };
    let Some(model) = loaded_model.entity() else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(target) = rotation_target(
        cursor.position,
        Vec2::new(window.width(), window.height()),
        config.max_rotation,
    ) else {
        return;
    };
    let Ok(mut tween) = tweens.get_mut(model) else {
        return;
    };

    tween.retarget(target, config.rotation_duration());
}

pub fn advance_rotation_tween(
    time: Res<Time>,
    mut query: Query<(&mut RotationTween, &mut Transform), With<ViewerModel>>,
) {
    for (mut tween, mut transform) in &mut query {
        if tween.is_settled() {
            continue;
        }
        tween.advance(time.delta_secs());
        let angles = tween.current();
        transform.rotation = Quat::from_euler(EulerRot::XYZ, angles.x, angles.y, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bevy::window::WindowResolution;
    use std::f32::consts::PI;
    use std::time::Duration;

    const MAX: f32 = PI * 0.3;
    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    fn pointer_app() -> (App, Entity) {
        let mut app = App::new();
        app.add_event::<CursorMoved>()
            .init_resource::<Time>()
            .init_resource::<LoadedModel>()
            .insert_resource(ViewerConfig::default())
            .add_systems(
                Update,
                (retarget_rotation_on_pointer_move, advance_rotation_tween).chain(),
            );
        let window = app
            .world_mut()
            .spawn((
                Window {
                    resolution: WindowResolution::new(VIEWPORT.x, VIEWPORT.y),
                    ..default()
                },
                PrimaryWindow,
            ))
            .id();
        (app, window)
    }

    fn spawn_loaded_model(app: &mut App) -> Entity {
        let model = app
            .world_mut()
            .spawn((Transform::IDENTITY, RotationTween::default(), ViewerModel))
            .id();
        app.world_mut().resource_mut::<LoadedModel>().0 = Some(model);
        model
    }

    fn move_cursor(app: &mut App, window: Entity, position: Vec2) {
        app.world_mut().send_event(CursorMoved {
            window,
            position,
            delta: None,
        });
    }

    fn tick(app: &mut App, millis: u64) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(millis));
        app.update();
    }

    #[test]
    fn centre_of_viewport_is_zero_rotation() {
        let target = rotation_target(VIEWPORT * 0.5, VIEWPORT, MAX).unwrap();
        assert_relative_eq!(target.x, 0.0);
        assert_relative_eq!(target.y, 0.0);
    }

    #[test]
    fn bottom_right_corner_is_maximum_rotation() {
        let target = rotation_target(VIEWPORT, VIEWPORT, MAX).unwrap();
        assert_relative_eq!(target.x, 0.15 * PI);
        assert_relative_eq!(target.y, 0.15 * PI);
    }

    #[test]
    fn top_left_corner_is_negative_maximum() {
        let target = rotation_target(Vec2::ZERO, VIEWPORT, MAX).unwrap();
        assert_relative_eq!(target.x, -0.15 * PI);
        assert_relative_eq!(target.y, -0.15 * PI);
    }

    #[test]
    fn horizontal_position_drives_y_rotation_only() {
        let target = rotation_target(Vec2::new(800.0, 300.0), VIEWPORT, MAX).unwrap();
        assert_relative_eq!(target.x, 0.0);
        assert_relative_eq!(target.y, 0.15 * PI);
    }

    #[test]
    fn collapsed_viewport_has_no_target() {
        assert_eq!(rotation_target(Vec2::ZERO, Vec2::new(0.0, 600.0), MAX), None);
    }

    #[test]
    fn ease_out_quad_endpoints() {
        assert_relative_eq!(ease_out_quad(0.0), 0.0);
        assert_relative_eq!(ease_out_quad(0.5), 0.75);
        assert_relative_eq!(ease_out_quad(1.0), 1.0);
        assert_relative_eq!(ease_out_quad(2.0), 1.0);
    }

    #[test]
    fn retarget_mid_flight_starts_from_current_angles() {
        let mut tween = RotationTween::default();
        tween.retarget(Vec2::new(1.0, 0.0), 1.0);
        tween.advance(0.5);
        let midway = tween.current();

        tween.retarget(Vec2::new(-1.0, 0.0), 1.0);
        assert_eq!(tween.from, midway);
        assert_relative_eq!(tween.current().x, 0.75);
    }

    #[test]
    fn pointer_move_before_model_loads_is_ignored() {
        let (mut app, window) = pointer_app();
        // A model entity exists, but the reference has not been recorded.
        let orphan = app
            .world_mut()
            .spawn((Transform::IDENTITY, RotationTween::default(), ViewerModel))
            .id();

        move_cursor(&mut app, window, VIEWPORT);
        tick(&mut app, 100);

        let tween = app.world().get::<RotationTween>(orphan).copied();
        assert_eq!(tween, Some(RotationTween::default()));
    }

    #[test]
    fn pointer_move_with_no_model_at_all_does_not_panic() {
        let (mut app, window) = pointer_app();
        move_cursor(&mut app, window, Vec2::new(10.0, 20.0));
        tick(&mut app, 16);
        assert_eq!(app.world().resource::<LoadedModel>().entity(), None);
    }

    #[test]
    fn pointer_move_retargets_loaded_model() {
        let (mut app, window) = pointer_app();
        let model = spawn_loaded_model(&mut app);

        move_cursor(&mut app, window, VIEWPORT);
        tick(&mut app, 0);

        let tween = app.world().get::<RotationTween>(model).copied().unwrap();
        assert_relative_eq!(tween.to.x, 0.15 * PI);
        assert_relative_eq!(tween.to.y, 0.15 * PI);
        assert_relative_eq!(tween.duration, 0.5);
    }

    #[test]
    fn tween_advances_once_per_frame() {
        let (mut app, window) = pointer_app();
        let model = spawn_loaded_model(&mut app);

        move_cursor(&mut app, window, VIEWPORT);
        tick(&mut app, 100);
        let tween = app.world().get::<RotationTween>(model).copied().unwrap();
        assert_relative_eq!(tween.elapsed, 0.1, epsilon = 1e-6);

        tick(&mut app, 100);
        let tween = app.world().get::<RotationTween>(model).copied().unwrap();
        assert_relative_eq!(tween.elapsed, 0.2, epsilon = 1e-6);
    }

    #[test]
    fn model_settles_on_target_after_duration() {
        let (mut app, window) = pointer_app();
        let model = spawn_loaded_model(&mut app);

        move_cursor(&mut app, window, Vec2::new(800.0, 300.0));
        tick(&mut app, 0);
        tick(&mut app, 600);

        let rotation = app.world().get::<Transform>(model).unwrap().rotation;
        let expected = Quat::from_euler(EulerRot::XYZ, 0.0, 0.15 * PI, 0.0);
        assert!(rotation.angle_between(expected) < 1e-5);
    }
}
