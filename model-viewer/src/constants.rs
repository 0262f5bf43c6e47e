/// Default paths for assets served from `assets/`.
pub mod path;

/// Camera, tonemapping and post-processing defaults.
pub mod render_settings;

/// Pointer-driven rotation defaults.
pub mod interaction;
