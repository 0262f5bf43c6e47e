pub mod assets;
pub mod camera;
pub mod core;
pub mod environment;
pub mod input;
pub mod loading;
pub mod render;
pub mod systems;
