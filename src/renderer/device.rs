use std::fmt;

use crate::error::RendererError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// GLSL flavour accepted by the current context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderDialect {
    /// OpenGL ES 2.0, `#version 100`.
    Gles100,
    /// Desktop OpenGL 2.1 compatibility, `#version 120`.
    Glsl120,
}

/// The GL calls the renderer core issues.
///
/// Methods take `&self` like `glow::HasContext`; implementations must only be
/// used from the thread that owns the current context.
pub trait GraphicsDevice {
    type Program: Copy + fmt::Debug;
    type Buffer: Copy + fmt::Debug;
    type Uniform: fmt::Debug;

    fn shader_dialect(&self) -> ShaderDialect;

    fn set_clear_color(&self, rgba: [f32; 4]);
    fn enable_depth_test(&self);
    fn enable_back_face_culling(&self);
    fn set_viewport(&self, width: u32, height: u32);
    /// Clear color and depth.
    fn clear(&self);

    /// Compile both stages and link them. Intermediate shader objects are
    /// released whether or not this succeeds.
    fn build_program(
        &self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self::Program, RendererError>;
    fn delete_program(&self, program: Self::Program);
    fn attribute_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::Uniform>;

    fn create_vertex_buffer(&self, data: &[f32]) -> Result<Self::Buffer, RendererError>;
    fn create_index_buffer(&self, data: &[u16]) -> Result<Self::Buffer, RendererError>;
    fn delete_buffer(&self, buffer: Self::Buffer);

    fn use_program(&self, program: Option<Self::Program>);
    fn uniform_mat4(&self, location: &Self::Uniform, column_major: &[f32]);
    fn uniform_vec3(&self, location: &Self::Uniform, value: [f32; 3]);
    fn uniform_vec4(&self, location: &Self::Uniform, value: [f32; 4]);

    /// Enable `location` and point it at tightly packed floats in `buffer`.
    fn enable_attribute(&self, location: u32, buffer: Self::Buffer, components: i32);
    fn disable_attribute(&self, location: u32);
    /// One `TRIANGLES` draw of `count` unsigned-short indices from `indices`.
    fn draw_indexed_triangles(&self, indices: Self::Buffer, count: i32);
}
