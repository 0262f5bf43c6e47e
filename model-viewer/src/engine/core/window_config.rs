use bevy::prelude::*;
use bevy::window::PresentMode;

#[cfg(not(target_arch = "wasm32"))]
const WINDOW_TITLE: &str = "Model Viewer";

/// Wasm renders into the page's `#canvas`, sized to its parent.
#[cfg(target_arch = "wasm32")]
pub fn create_window_config() -> Window {
    Window {
        canvas: Some("#canvas".into()),
        fit_canvas_to_parent: true,
        prevent_default_event_handling: false,
        transparent: true,
        present_mode: PresentMode::AutoVsync,
        ..default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn create_window_config() -> Window {
    Window {
        title: WINDOW_TITLE.into(),
        resolution: (1280.0, 720.0).into(),
        present_mode: PresentMode::AutoVsync,
        ..default()
    }
}
