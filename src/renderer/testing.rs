// Recording GraphicsDevice used by unit tests in place of a GL context.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::device::{GraphicsDevice, ShaderDialect, ShaderStage};
use super::shaders;
use crate::error::RendererError;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ClearColor([f32; 4]),
    EnableDepthTest,
    EnableCulling,
    Viewport(u32, u32),
    Clear,
    BuildProgram(u32),
    DeleteProgram(u32),
    CreateVertexBuffer(u32, usize),
    CreateIndexBuffer(u32, usize),
    DeleteBuffer(u32),
    UseProgram(Option<u32>),
    UniformMat4(String),
    UniformVec3(String, [f32; 3]),
    UniformVec4(String, [f32; 4]),
    EnableAttribute(u32, u32, i32),
    DisableAttribute(u32),
    DrawIndexed(u32, i32),
}

#[derive(Default)]
pub struct RecordingDevice {
    /// Shared so a test can keep reading after the device is dropped.
    pub calls: Rc<RefCell<Vec<Call>>>,
    pub fail_stage: Option<ShaderStage>,
    pub fail_link: bool,
    /// Attribute names the "compiler" optimized out.
    pub inactive_attributes: Vec<&'static str>,
    /// Fail every buffer creation after this many successes.
    pub buffer_budget: Option<usize>,
    pub next_handle: Cell<u32>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn handle(&self) -> u32 {
        let next = self.next_handle.get() + 1;
        self.next_handle.set(next);
        next
    }

    fn buffer(&self) -> Result<u32, RendererError> {
        if let Some(budget) = self.buffer_budget {
            let created = self
                .calls
                .borrow()
                .iter()
                .filter(|c| matches!(c, Call::CreateVertexBuffer(..) | Call::CreateIndexBuffer(..)))
                .count();
            if created >= budget {
                return Err(RendererError::Gpu("out of memory".into()));
            }
        }
        Ok(self.handle())
    }

    pub fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn draw_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::DrawIndexed(..)))
    }
}

impl GraphicsDevice for RecordingDevice {
    type Program = u32;
    type Buffer = u32;
    type Uniform = String;

    fn shader_dialect(&self) -> ShaderDialect {
        ShaderDialect::Gles100
    }

    fn set_clear_color(&self, rgba: [f32; 4]) {
        self.record(Call::ClearColor(rgba));
    }

    fn enable_depth_test(&self) {
        self.record(Call::EnableDepthTest);
    }

    fn enable_back_face_culling(&self) {
        self.record(Call::EnableCulling);
    }

    fn set_viewport(&self, width: u32, height: u32) {
        self.record(Call::Viewport(width, height));
    }

    fn clear(&self) {
        self.record(Call::Clear);
    }

    fn build_program(&self, _vertex: &str, _fragment: &str) -> Result<u32, RendererError> {
        if let Some(stage) = self.fail_stage {
            return Err(RendererError::ShaderCompile {
                stage,
                log: "0:1: syntax error".into(),
            });
        }
        if self.fail_link {
            return Err(RendererError::ShaderLink {
                log: "varying vNormal not written".into(),
            });
        }
        let program = self.handle();
        self.record(Call::BuildProgram(program));
        Ok(program)
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
    }

    fn attribute_location(&self, _program: u32, name: &str) -> Option<u32> {
        if self.inactive_attributes.contains(&name) {
            return None;
        }
        match name {
            shaders::ATTR_POSITION => Some(0),
            shaders::ATTR_NORMAL => Some(1),
            shaders::ATTR_TEX_COORD => Some(2),
            _ => None,
        }
    }

    fn uniform_location(&self, _program: u32, name: &str) -> Option<String> {
        Some(name.to_string())
    }

    fn create_vertex_buffer(&self, data: &[f32]) -> Result<u32, RendererError> {
        let buffer = self.buffer()?;
        self.record(Call::CreateVertexBuffer(buffer, data.len()));
        Ok(buffer)
    }

    fn create_index_buffer(&self, data: &[u16]) -> Result<u32, RendererError> {
        let buffer = self.buffer()?;
        self.record(Call::CreateIndexBuffer(buffer, data.len()));
        Ok(buffer)
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn uniform_mat4(&self, location: &String, column_major: &[f32]) {
        assert_eq!(column_major.len(), 16);
        self.record(Call::UniformMat4(location.clone()));
    }

    fn uniform_vec3(&self, location: &String, value: [f32; 3]) {
        self.record(Call::UniformVec3(location.clone(), value));
    }

    fn uniform_vec4(&self, location: &String, value: [f32; 4]) {
        self.record(Call::UniformVec4(location.clone(), value));
    }

    fn enable_attribute(&self, location: u32, buffer: u32, components: i32) {
        self.record(Call::EnableAttribute(location, buffer, components));
    }

    fn disable_attribute(&self, location: u32) {
        self.record(Call::DisableAttribute(location));
    }

    fn draw_indexed_triangles(&self, indices: u32, count: i32) {
        self.record(Call::DrawIndexed(indices, count));
    }
}
