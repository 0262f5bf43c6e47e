use crate::engine::render::rgb_shift_post_processing::RgbShiftSettings;
use bevy::prelude::*;

pub const RGB_SHIFT_SETTINGS: RgbShiftSettings = RgbShiftSettings {
    amount: 0.0035,
    angle: 0.0,
};

pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_DISTANCE: f32 = 2.0;

/// Transparent so the page background shows through the canvas.
pub const CLEAR_COLOUR: Color = Color::NONE;

/// Scales the unitless radiance of the HDRI into the camera's default exposure.
pub const ENVIRONMENT_INTENSITY: f32 = 1500.0;

/// Specular cubemap face size; the diffuse map is derived from its mips.
pub const ENVIRONMENT_FACE_SIZE: u32 = 256;
pub const MIN_ENVIRONMENT_FACE_SIZE: u32 = 16;
pub const MAX_ENVIRONMENT_FACE_SIZE: u32 = 1024;

pub const DIFFUSE_FACE_SIZE: u32 = 16;

/// Face size of the mip used as the source for irradiance integration.
pub const IRRADIANCE_SOURCE_SIZE: u32 = 8;
