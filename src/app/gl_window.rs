use std::num::NonZeroU32;

use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext, Version,
};
use glutin::display::{Display, DisplayApiPreference, GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::GlWindow as _;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use crate::error::PreviewError;
use crate::renderer::ShaderDialect;

/// A winit window with a current GL context and its window surface.
// Field order is drop order: surface and context go before the window.
pub struct GlWindow {
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    pub window: Window,
}

impl GlWindow {
    /// Create the window and make a context current on it. GLES 2.0 is tried
    /// first; desktop OpenGL 2.1 is the fallback. The returned dialect tells
    /// the renderer which shader headers the context accepts.
    pub fn new(
        event_loop: &ActiveEventLoop,
        attributes: WindowAttributes,
    ) -> Result<(Self, glow::Context, ShaderDialect), PreviewError> {
        let template = ConfigTemplateBuilder::new().with_depth_size(16);
        let (window, config) = open_display(event_loop, attributes, template)?;

        let raw_handle = window.window_handle()?.as_raw();
        let display = config.display();

        let gles = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(Some(Version::new(2, 0))))
            .build(Some(raw_handle));
        let legacy = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(2, 1))))
            .build(Some(raw_handle));

        let (not_current, dialect) = match unsafe { display.create_context(&config, &gles) } {
            Ok(context) => (context, ShaderDialect::Gles100),
            Err(e) => {
                log::info!("GLES 2.0 unavailable ({e}); falling back to OpenGL 2.1");
                let context = unsafe { display.create_context(&config, &legacy) }
                    .map_err(|e| PreviewError::from(e).with_arg("api", "OpenGL 2.1"))?;
                (context, ShaderDialect::Glsl120)
            }
        };

        let surface_attributes = window.build_surface_attributes(Default::default())?;
        let surface = unsafe { display.create_window_surface(&config, &surface_attributes)? };
        let context = not_current.make_current(&surface)?;

        if let Err(e) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN)) {
            log::warn!("Could not enable vsync: {e}");
        }

        let gl = unsafe { glow::Context::from_loader_function_cstr(|s| display.get_proc_address(s)) };

        Ok((
            Self {
                surface,
                context,
                window,
            },
            gl,
            dialect,
        ))
    }

    /// Resize the surface. Zero-sized (minimized) windows are skipped.
    pub fn resize(&self, width: u32, height: u32) {
        if let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
            self.surface.resize(&self.context, w, h);
        }
    }

    pub fn swap_buffers(&self) -> Result<(), PreviewError> {
        self.surface.swap_buffers(&self.context)?;
        Ok(())
    }
}

// WGL needs the native window before the display can be created.
#[cfg(windows)]
fn open_display(
    event_loop: &ActiveEventLoop,
    attributes: WindowAttributes,
    template: ConfigTemplateBuilder,
) -> Result<(Window, Config), PreviewError> {
    let window = event_loop
        .create_window(attributes)
        .map_err(|e| PreviewError::new("window_create").with_arg("error", e))?;
    let raw_handle = window.window_handle()?.as_raw();
    let display = unsafe {
        Display::new(
            event_loop.display_handle()?.as_raw(),
            DisplayApiPreference::Wgl(Some(raw_handle)),
        )?
    };
    let config = pick_config(&display, template.compatible_with_native_window(raw_handle))?;
    Ok((window, config))
}

#[cfg(not(windows))]
fn open_display(
    event_loop: &ActiveEventLoop,
    attributes: WindowAttributes,
    template: ConfigTemplateBuilder,
) -> Result<(Window, Config), PreviewError> {
    #[cfg(target_os = "macos")]
    let preference = DisplayApiPreference::Cgl;
    #[cfg(not(target_os = "macos"))]
    let preference = DisplayApiPreference::Egl;

    let display = unsafe { Display::new(event_loop.display_handle()?.as_raw(), preference)? };
    let config = pick_config(&display, template)?;
    let window = glutin_winit::finalize_window(event_loop, attributes, &config)
        .map_err(|e| PreviewError::new("window_create").with_arg("error", e))?;
    Ok((window, config))
}

fn pick_config(display: &Display, template: ConfigTemplateBuilder) -> Result<Config, PreviewError> {
    let configs = unsafe { display.find_configs(template.build())? };
    deepest(configs, |c| c.depth_size())
}

/// The candidate with the largest depth buffer; the first one wins a tie.
fn deepest<C>(candidates: impl Iterator<Item = C>, depth_size: impl Fn(&C) -> u8) -> Result<C, PreviewError> {
    candidates
        .reduce(|best, c| if depth_size(&c) > depth_size(&best) { c } else { best })
        .ok_or_else(|| PreviewError::new("no_gl_config"))
}
