use std::f32::consts::PI;

/// Full rotation range across the viewport, giving ±0.15π at the edges.
pub const MAX_ROTATION: f32 = PI * 0.3;

/// Seconds for the model to settle on a new pointer target.
pub const ROTATION_DURATION: f32 = 0.5;
