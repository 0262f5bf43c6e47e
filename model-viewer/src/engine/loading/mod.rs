//! Asset loading for the viewer.
//!
//! Loads `viewer.json` first, then streams the environment map and the glTF
//! model in parallel while the scene renders, reporting progress as each
//! asset resolves.

/// Viewer config loading and the transition into the viewing state.
pub mod config_loader;

/// Equirectangular HDRI loading and conversion into image-based lighting.
pub mod environment_loader;

/// glTF model loading, scene spawning and the optional model reference.
pub mod model_loader;

/// Per-asset load status and progress reporting.
pub mod progress;
