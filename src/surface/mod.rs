// Surface lifecycle: created / changed / draw-frame callbacks driving the renderer
mod host;

pub use host::{RenderMode, SurfaceHost};
