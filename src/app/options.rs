use crate::error::PreviewError;
use crate::surface::RenderMode;

/// Command line: `lhm3d-preview [MODEL_PATH] [--static] [--catalog FILE]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaunchOptions {
    pub model_path: Option<String>,
    pub render_mode: RenderMode,
    /// JSON array of animations replacing the built-in list.
    pub catalog_path: Option<String>,
}

impl LaunchOptions {
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self, PreviewError> {
        let mut options = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if arg == "--static" {
                options.render_mode = RenderMode::OnDemand;
            } else if arg == "--catalog" {
                let path = args
                    .next()
                    .ok_or_else(|| PreviewError::new("missing_arg_value").with_arg("flag", &arg))?;
                options.catalog_path = Some(path);
            } else if arg.starts_with("--") {
                return Err(PreviewError::new("unknown_flag").with_arg("flag", arg));
            } else if options.model_path.is_none() {
                options.model_path = Some(arg);
            } else {
                return Err(PreviewError::new("unexpected_arg").with_arg("arg", arg));
            }
        }
        Ok(options)
    }
}
