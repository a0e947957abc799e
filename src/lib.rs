pub mod animation;
pub mod app;
pub mod error;
pub mod model;
pub mod renderer;
pub mod settings;
pub mod surface;

pub const CONFY_APP_NAME: &str = "lhm3d-preview";
