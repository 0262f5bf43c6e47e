use crate::constants::interaction::{MAX_ROTATION, ROTATION_DURATION};
use crate::constants::path::{ENVIRONMENT_MAP_PATH, MODEL_PATH};
use crate::constants::render_settings::{
    CAMERA_DISTANCE, CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, ENVIRONMENT_FACE_SIZE,
    ENVIRONMENT_INTENSITY, MAX_ENVIRONMENT_FACE_SIZE, MIN_ENVIRONMENT_FACE_SIZE,
    RGB_SHIFT_SETTINGS,
};
use crate::engine::render::rgb_shift_post_processing::RgbShiftSettings;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Viewer configuration as a Bevy asset. Every field is optional in JSON and
/// falls back to the compiled defaults in `constants`.
#[derive(Asset, Resource, TypePath, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub environment_map: String,
    pub model: String,
    pub environment_intensity: f32,
    pub environment_face_size: u32,
    pub rgb_shift_amount: f32,
    pub rgb_shift_angle: f32,
    pub max_rotation: f32,
    pub rotation_duration: f32,
    pub camera_fov_degrees: f32,
    pub camera_near: f32,
    pub camera_far: f32,
    pub camera_distance: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            environment_map: ENVIRONMENT_MAP_PATH.to_string(),
            model: MODEL_PATH.to_string(),
            environment_intensity: ENVIRONMENT_INTENSITY,
            environment_face_size: ENVIRONMENT_FACE_SIZE,
            rgb_shift_amount: RGB_SHIFT_SETTINGS.amount,
            rgb_shift_angle: RGB_SHIFT_SETTINGS.angle,
            max_rotation: MAX_ROTATION,
            rotation_duration: ROTATION_DURATION,
            camera_fov_degrees: CAMERA_FOV_DEGREES,
            camera_near: CAMERA_NEAR,
            camera_far: CAMERA_FAR,
            camera_distance: CAMERA_DISTANCE,
        }
    }
}

impl ViewerConfig {
    /// Specular cubemap face size rounded up to a power of two and kept
    /// within the supported range, so every mip halves cleanly down to 1x1.
    pub fn face_size(&self) -> u32 {
        self.environment_face_size
            .clamp(MIN_ENVIRONMENT_FACE_SIZE, MAX_ENVIRONMENT_FACE_SIZE)
            .next_power_of_two()
    }

    pub fn rgb_shift_settings(&self) -> RgbShiftSettings {
        RgbShiftSettings {
            amount: self.rgb_shift_amount,
            angle: self.rgb_shift_angle,
        }
    }

    pub fn perspective(&self) -> PerspectiveProjection {
        PerspectiveProjection {
            fov: self.camera_fov_degrees.to_radians(),
            near: self.camera_near,
            far: self.camera_far,
            ..default()
        }
    }

    /// Tween duration, never negative.
    pub fn rotation_duration(&self) -> f32 {
        self.rotation_duration.max(0.0)
    }
}
