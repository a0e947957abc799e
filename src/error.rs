use std::{collections::BTreeMap, fmt, io, sync::Arc};

use crate::renderer::ShaderStage;

/// Failures of the renderer core and of mesh validation.
///
/// Shader errors are fatal to the renderer instance that produced them;
/// mesh errors leave the previously bound mesh in place.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RendererError {
    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("shader program failed to link: {log}")]
    ShaderLink { log: String },

    #[error(
        "mesh attribute lengths disagree: {positions} position floats, {normals} normal floats, {tex_coords} texcoord floats"
    )]
    MeshDataMismatch {
        positions: usize,
        normals: usize,
        tex_coords: usize,
    },

    #[error("index {index} at position {position} is out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds {
        index: u16,
        position: usize,
        vertex_count: usize,
    },

    #[error("index count {count} is not a multiple of three")]
    IncompleteTriangle { count: usize },

    #[error("gpu resource error: {0}")]
    Gpu(String),
}

/// Host-level error: a stable key, free-form arguments and a cause chain.
#[derive(Debug, Clone)]
pub struct PreviewError {
    pub key: &'static str,
    pub args: BTreeMap<&'static str, String>,
    pub causes: Vec<Arc<dyn std::error::Error + Send + Sync>>,
}

impl PreviewError {
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            args: BTreeMap::new(),
            causes: Vec::new(),
        }
    }

    pub fn with_arg(mut self, k: &'static str, v: impl ToString) -> Self {
        self.args.insert(k, v.to_string());
        self
    }

    pub fn push_std(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.causes.push(Arc::new(cause));
        self
    }
}

impl fmt::Display for PreviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.key)?;
        let mut first = true;
        for (k, v) in &self.args {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{k}={v}")?;
        }
        write!(f, ")")
    }
}

impl std::error::Error for PreviewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.causes
            .first()
            .map(|c| c.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<RendererError> for PreviewError {
    fn from(err: RendererError) -> Self {
        PreviewError::new("renderer-error").push_std(err)
    }
}

impl From<io::Error> for PreviewError {
    fn from(err: io::Error) -> Self {
        PreviewError::new("io-error").push_std(err)
    }
}

impl From<serde_json::Error> for PreviewError {
    fn from(err: serde_json::Error) -> Self {
        PreviewError::new("serde_json::Error").push_std(err)
    }
}

impl From<confy::ConfyError> for PreviewError {
    fn from(err: confy::ConfyError) -> Self {
        PreviewError::new("confy::ConfyError").push_std(err)
    }
}

impl From<glutin::error::Error> for PreviewError {
    fn from(err: glutin::error::Error) -> Self {
        PreviewError::new("glutin::error::Error").push_std(err)
    }
}

impl From<raw_window_handle::HandleError> for PreviewError {
    fn from(err: raw_window_handle::HandleError) -> Self {
        PreviewError::new("raw_window_handle::HandleError").push_std(err)
    }
}

impl From<winit::error::EventLoopError> for PreviewError {
    fn from(err: winit::error::EventLoopError) -> Self {
        PreviewError::new("winit::error::EventLoopError").push_std(err)
    }
}
