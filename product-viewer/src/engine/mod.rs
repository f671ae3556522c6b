pub mod animation;
pub mod assets;
pub mod camera;
pub mod core;
pub mod error;
pub mod loading;
pub mod scene;
pub mod systems;
