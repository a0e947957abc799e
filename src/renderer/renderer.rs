use crate::error::RendererError;
use crate::model::Mesh;
use crate::renderer::device::GraphicsDevice;
use crate::renderer::shaders;
use crate::renderer::transform::TransformState;
use crate::settings::RenderSettings;

/// What a call to [`Renderer::draw`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The mesh was drawn.
    Drawn,
    /// Buffers were cleared; nothing is bound yet.
    NoMesh,
    /// Buffers were cleared; the shader program never built.
    Disabled,
}

struct ShaderProgram<D: GraphicsDevice> {
    program: D::Program,
    position: Option<u32>,
    normal: Option<u32>,
    tex_coord: Option<u32>,
    mvp: Option<D::Uniform>,
    light_pos: Option<D::Uniform>,
    color: Option<D::Uniform>,
}

struct GpuMesh<D: GraphicsDevice> {
    mesh: Mesh,
    positions: D::Buffer,
    normals: D::Buffer,
    tex_coords: D::Buffer,
    indices: D::Buffer,
}

/// Draws one mesh with a spinning model transform and a diffuse term.
///
/// All methods must be called on the thread that owns the device's context.
pub struct Renderer<D: GraphicsDevice> {
    device: D,
    settings: RenderSettings,
    program: Result<ShaderProgram<D>, RendererError>,
    mesh: Option<GpuMesh<D>>,
    transform: TransformState,
}

impl<D: GraphicsDevice> Renderer<D> {
    /// Build the shader program. A compile or link failure does not fail
    /// construction: it is logged, kept in [`Renderer::shader_error`], and
    /// every later draw reports [`DrawOutcome::Disabled`].
    pub fn new(device: D, settings: RenderSettings) -> Self {
        let program = Self::build_program(&device);
        if let Err(e) = &program {
            log::error!("Renderer disabled: {e}");
        }
        let transform = TransformState::new(&settings);
        Self {
            device,
            settings,
            program,
            mesh: None,
            transform,
        }
    }

    fn build_program(device: &D) -> Result<ShaderProgram<D>, RendererError> {
        let dialect = device.shader_dialect();
        let program = device.build_program(
            &shaders::vertex_source(dialect),
            &shaders::fragment_source(dialect),
        )?;

        let position = device.attribute_location(program, shaders::ATTR_POSITION);
        if position.is_none() {
            device.delete_program(program);
            return Err(RendererError::ShaderLink {
                log: format!("attribute {} is not active", shaders::ATTR_POSITION),
            });
        }

        Ok(ShaderProgram {
            program,
            position,
            normal: device.attribute_location(program, shaders::ATTR_NORMAL),
            tex_coord: device.attribute_location(program, shaders::ATTR_TEX_COORD),
            mvp: device.uniform_location(program, shaders::UNIFORM_MVP),
            light_pos: device.uniform_location(program, shaders::UNIFORM_LIGHT_POS),
            color: device.uniform_location(program, shaders::UNIFORM_COLOR),
        })
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn shader_error(&self) -> Option<&RendererError> {
        self.program.as_ref().err()
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref().map(|m| &m.mesh)
    }

    /// Replace the bound mesh with the given flat arrays. Invalid data is
    /// rejected and the previous mesh stays bound.
    pub fn set_mesh_data(
        &mut self,
        vertices: &[f32],
        normals: &[f32],
        indices: &[u16],
        tex_coords: &[f32],
    ) -> Result<(), RendererError> {
        let mesh = Mesh::from_flat(vertices, normals, indices, tex_coords)?;
        self.set_mesh(mesh)
    }

    pub fn set_mesh(&mut self, mesh: Mesh) -> Result<(), RendererError> {
        let uploaded = self.upload(mesh)?;
        log::debug!(
            "Bound mesh: {} vertices, {} indices",
            uploaded.mesh.vertex_count(),
            uploaded.mesh.index_count()
        );
        if let Some(old) = self.mesh.replace(uploaded) {
            self.release(&old);
        }
        Ok(())
    }

    fn upload(&self, mesh: Mesh) -> Result<GpuMesh<D>, RendererError> {
        let mut created = Vec::with_capacity(4);
        let result = (|| -> Result<_, RendererError> {
            let positions = self.device.create_vertex_buffer(mesh.flat_positions())?;
            created.push(positions);
            let normals = self.device.create_vertex_buffer(mesh.flat_normals())?;
            created.push(normals);
            let tex_coords = self.device.create_vertex_buffer(mesh.flat_tex_coords())?;
            created.push(tex_coords);
            let indices = self.device.create_index_buffer(mesh.flat_indices())?;
            Ok((positions, normals, tex_coords, indices))
        })();

        match result {
            Ok((positions, normals, tex_coords, indices)) => Ok(GpuMesh {
                mesh,
                positions,
                normals,
                tex_coords,
                indices,
            }),
            Err(e) => {
                for buffer in created {
                    self.device.delete_buffer(buffer);
                }
                Err(e)
            }
        }
    }

    fn release(&self, mesh: &GpuMesh<D>) {
        for buffer in [mesh.positions, mesh.normals, mesh.tex_coords, mesh.indices] {
            self.device.delete_buffer(buffer);
        }
    }

    /// Clear, then draw the bound mesh for a viewport of the given size.
    /// The spin only advances on frames that actually draw.
    pub fn draw(
        &mut self,
        viewport_width: u32,
        viewport_height: u32,
        delta_seconds: f32,
    ) -> DrawOutcome {
        self.device.clear();

        let Some(mesh) = &self.mesh else {
            return DrawOutcome::NoMesh;
        };
        let Ok(program) = &self.program else {
            return DrawOutcome::Disabled;
        };

        self.transform
            .update(viewport_width, viewport_height, delta_seconds);

        let device = &self.device;
        device.use_program(Some(program.program));

        if let Some(loc) = &program.mvp {
            device.uniform_mat4(loc, self.transform.mvp().as_slice());
        }
        if let Some(loc) = &program.light_pos {
            device.uniform_vec3(loc, self.settings.light_position);
        }
        if let Some(loc) = &program.color {
            device.uniform_vec4(loc, self.settings.base_color);
        }

        let attributes = [
            (program.position, mesh.positions, 3),
            (program.normal, mesh.normals, 3),
            (program.tex_coord, mesh.tex_coords, 2),
        ];
        for (location, buffer, components) in attributes {
            if let Some(location) = location {
                device.enable_attribute(location, buffer, components);
            }
        }

        device.draw_indexed_triangles(mesh.indices, mesh.mesh.index_count() as i32);

        for (location, _, _) in attributes {
            if let Some(location) = location {
                device.disable_attribute(location);
            }
        }
        device.use_program(None);

        DrawOutcome::Drawn
    }
}

impl<D: GraphicsDevice> Drop for Renderer<D> {
    fn drop(&mut self) {
        if let Some(mesh) = self.mesh.take() {
            self.release(&mesh);
        }
        if let Ok(program) = &self.program {
            self.device.delete_program(program.program);
        }
    }
}
