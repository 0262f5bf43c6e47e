//! Asset types for the viewer.
//!
//! Holds the runtime configuration loaded from `viewer.json` and the
//! handles of every asset the viewer tracks while loading.

/// Runtime configuration asset with defaults for every field.
pub mod viewer_config;

/// Handles for configuration, environment map and model assets.
pub mod viewer_assets;
