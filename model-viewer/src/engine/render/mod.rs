//! Post-processing for the viewer camera.

/// RGB shift fullscreen pass inserted after tonemapping.
///
/// Offsets red and blue samples in opposite directions and keeps green and alpha in place.
pub mod rgb_shift_post_processing;
