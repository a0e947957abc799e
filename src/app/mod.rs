// Desktop preview window: winit event handling around the surface host
pub mod app;
pub mod controls;
pub mod gl_window;
pub mod handler;
pub mod options;

pub use app::{App, EventResponse};
pub use handler::AppHandler;
pub use options::LaunchOptions;
