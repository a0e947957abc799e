use glow::HasContext;

use super::device::{GraphicsDevice, ShaderDialect, ShaderStage};
use crate::error::RendererError;

/// [`GraphicsDevice`] backed by a glow context made current by the host.
pub struct GlowDevice {
    gl: glow::Context,
    dialect: ShaderDialect,
}

impl GlowDevice {
    pub fn new(gl: glow::Context, dialect: ShaderDialect) -> Self {
        unsafe {
            log::info!(
                "GL context: {} / {} / GLSL {}",
                gl.get_parameter_string(glow::VENDOR),
                gl.get_parameter_string(glow::RENDERER),
                gl.get_parameter_string(glow::SHADING_LANGUAGE_VERSION),
            );
        }
        Self { gl, dialect }
    }

    fn compile_shader(
        &self,
        stage: ShaderStage,
        source: &str,
    ) -> Result<glow::Shader, RendererError> {
        let kind = match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        };
        unsafe {
            let shader = self.gl.create_shader(kind).map_err(RendererError::Gpu)?;
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);
            if !self.gl.get_shader_compile_status(shader) {
                let log = self.gl.get_shader_info_log(shader);
                self.gl.delete_shader(shader);
                return Err(RendererError::ShaderCompile { stage, log });
            }
            Ok(shader)
        }
    }

    fn upload(&self, target: u32, bytes: &[u8]) -> Result<glow::Buffer, RendererError> {
        unsafe {
            let buffer = self.gl.create_buffer().map_err(RendererError::Gpu)?;
            self.gl.bind_buffer(target, Some(buffer));
            self.gl.buffer_data_u8_slice(target, bytes, glow::STATIC_DRAW);
            self.gl.bind_buffer(target, None);
            Ok(buffer)
        }
    }
}

impl GraphicsDevice for GlowDevice {
    type Program = glow::Program;
    type Buffer = glow::Buffer;
    type Uniform = glow::UniformLocation;

    fn shader_dialect(&self) -> ShaderDialect {
        self.dialect
    }

    fn set_clear_color(&self, rgba: [f32; 4]) {
        unsafe { self.gl.clear_color(rgba[0], rgba[1], rgba[2], rgba[3]) }
    }

    fn enable_depth_test(&self) {
        unsafe { self.gl.enable(glow::DEPTH_TEST) }
    }

    fn enable_back_face_culling(&self) {
        unsafe {
            self.gl.enable(glow::CULL_FACE);
            self.gl.cull_face(glow::BACK);
        }
    }

    fn set_viewport(&self, width: u32, height: u32) {
        unsafe { self.gl.viewport(0, 0, width as i32, height as i32) }
    }

    fn clear(&self) {
        unsafe { self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT) }
    }

    fn build_program(
        &self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self::Program, RendererError> {
        let vertex = self.compile_shader(ShaderStage::Vertex, vertex_source)?;
        let fragment = match self.compile_shader(ShaderStage::Fragment, fragment_source) {
            Ok(shader) => shader,
            Err(e) => {
                unsafe { self.gl.delete_shader(vertex) };
                return Err(e);
            }
        };

        unsafe {
            let program = match self.gl.create_program() {
                Ok(program) => program,
                Err(e) => {
                    self.gl.delete_shader(vertex);
                    self.gl.delete_shader(fragment);
                    return Err(RendererError::Gpu(e));
                }
            };
            self.gl.attach_shader(program, vertex);
            self.gl.attach_shader(program, fragment);
            self.gl.link_program(program);
            let linked = self.gl.get_program_link_status(program);

            self.gl.detach_shader(program, vertex);
            self.gl.detach_shader(program, fragment);
            self.gl.delete_shader(vertex);
            self.gl.delete_shader(fragment);

            if !linked {
                let log = self.gl.get_program_info_log(program);
                self.gl.delete_program(program);
                return Err(RendererError::ShaderLink { log });
            }
            Ok(program)
        }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn attribute_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(program, name) }
    }

    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::Uniform> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn create_vertex_buffer(&self, data: &[f32]) -> Result<Self::Buffer, RendererError> {
        self.upload(glow::ARRAY_BUFFER, bytemuck::cast_slice(data))
    }

    fn create_index_buffer(&self, data: &[u16]) -> Result<Self::Buffer, RendererError> {
        self.upload(glow::ELEMENT_ARRAY_BUFFER, bytemuck::cast_slice(data))
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { self.gl.delete_buffer(buffer) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { self.gl.use_program(program) }
    }

    fn uniform_mat4(&self, location: &Self::Uniform, column_major: &[f32]) {
        unsafe {
            self.gl
                .uniform_matrix_4_f32_slice(Some(location), false, column_major)
        }
    }

    fn uniform_vec3(&self, location: &Self::Uniform, value: [f32; 3]) {
        unsafe {
            self.gl
                .uniform_3_f32(Some(location), value[0], value[1], value[2])
        }
    }

    fn uniform_vec4(&self, location: &Self::Uniform, value: [f32; 4]) {
        unsafe {
            self.gl
                .uniform_4_f32(Some(location), value[0], value[1], value[2], value[3])
        }
    }

    fn enable_attribute(&self, location: u32, buffer: Self::Buffer, components: i32) {
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            self.gl.enable_vertex_attrib_array(location);
            self.gl
                .vertex_attrib_pointer_f32(location, components, glow::FLOAT, false, 0, 0);
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
    }

    fn disable_attribute(&self, location: u32) {
        unsafe { self.gl.disable_vertex_attrib_array(location) }
    }

    fn draw_indexed_triangles(&self, indices: Self::Buffer, count: i32) {
        unsafe {
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(indices));
            self.gl
                .draw_elements(glow::TRIANGLES, count, glow::UNSIGNED_SHORT, 0);
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);
        }
    }
}
