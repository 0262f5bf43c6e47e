//! Viewer camera setup and projection maintenance.
//!
//! Spawns the perspective camera with tonemapping, MSAA and the RGB shift
//! pass, and keeps its aspect ratio in step with the window.

/// Viewer camera spawning, config application and resize handling.
pub mod viewer_camera;
