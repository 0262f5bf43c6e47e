use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Waiting on `viewer.json`.
    #[default]
    Configuring,
    /// Config applied; environment and model stream in while the scene renders.
    Viewing,
}
