//! Renderer core: shader program, mesh buffers and the per-frame draw.

pub mod device;
pub mod glow_device;
pub mod renderer;
pub mod shaders;
pub mod transform;

#[cfg(test)]
pub(crate) mod testing;

pub use device::{GraphicsDevice, ShaderDialect, ShaderStage};
pub use glow_device::GlowDevice;
pub use renderer::{DrawOutcome, Renderer};
pub use transform::TransformState;
