use std::time::{Duration, Instant};

use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::animation::channel;
use crate::app::controls::{PreviewControls, action_for_key};
use crate::app::gl_window::GlWindow;
use crate::app::options::LaunchOptions;
use crate::error::PreviewError;
use crate::model::AnimationCatalog;
use crate::renderer::GlowDevice;
use crate::settings::Settings;
use crate::surface::SurfaceHost;

const TITLE: &str = "LHM3D Preview";
const TITLE_REFRESH: Duration = Duration::from_millis(250);

pub struct EventResponse {
    pub repaint: bool,
    pub exit: bool,
}

// Field order is drop order: GL objects owned by the host go first.
pub struct App {
    host: SurfaceHost<GlowDevice>,
    controls: PreviewControls,
    catalog: AnimationCatalog,
    settings: Settings,
    title: String,
    title_updated: Option<Instant>,
    gl_window: GlWindow,
}

impl App {
    pub fn new(
        event_loop: &ActiveEventLoop,
        options: &LaunchOptions,
        settings: Settings,
        catalog: AnimationCatalog,
    ) -> Result<Self, PreviewError> {
        let attributes = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(LogicalSize::new(800.0, 600.0));
        let (gl_window, gl, dialect) = GlWindow::new(event_loop, attributes)?;

        let (controller, inbox) = channel();
        let mut host = SurfaceHost::new(settings.clone(), inbox, options.render_mode);
        if let Err(e) = host.on_surface_created(GlowDevice::new(gl, dialect)) {
            log::error!("Preview will only clear the window: {e}");
        }

        let size = gl_window.window.inner_size();
        gl_window.resize(size.width, size.height);
        host.on_surface_changed(size.width, size.height);

        if let Some(path) = &options.model_path {
            host.set_model_path(path.as_str());
        }

        let mut controls = PreviewControls::new(controller, &settings.playback);
        if let Some(name) = &settings.playback.initial_animation {
            controls.select(&catalog, name);
        }

        Ok(Self {
            host,
            controls,
            catalog,
            settings,
            title: TITLE.to_string(),
            title_updated: None,
            gl_window,
        })
    }

    pub fn window(&self) -> &Window {
        &self.gl_window.window
    }

    pub fn handle_event(&mut self, event: &WindowEvent) -> EventResponse {
        match event {
            WindowEvent::CloseRequested => {
                return EventResponse {
                    repaint: false,
                    exit: true,
                };
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return EventResponse {
                        repaint: false,
                        exit: false,
                    };
                }
                if let Some(action) = action_for_key(&event.logical_key) {
                    let exit = self.controls.apply(action, &self.catalog);
                    self.title_updated = None;
                    return EventResponse {
                        repaint: !exit,
                        exit,
                    };
                }
            }
            WindowEvent::Resized(size) => {
                self.gl_window.resize(size.width, size.height);
                self.host.on_surface_changed(size.width, size.height);
                return EventResponse {
                    repaint: true,
                    exit: false,
                };
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    log::error!("Render error: {e}");
                }
            }
            _ => {}
        }

        EventResponse {
            repaint: false,
            exit: false,
        }
    }

    pub fn render(&mut self) -> Result<(), PreviewError> {
        let now = Instant::now();
        let outcome = self.host.on_draw_frame(now);
        log::trace!("Frame: {outcome:?}");
        self.gl_window.swap_buffers()?;
        self.refresh_title(now);
        Ok(())
    }

    pub fn needs_redraw(&mut self) -> bool {
        self.host.needs_redraw()
    }

    /// Persist the playback choices made in this session.
    pub fn save_settings(&self) {
        let mut settings = self.settings.clone();
        settings.playback = self.controls.playback_settings(&self.settings.playback);
        settings.save();
    }

    fn refresh_title(&mut self, now: Instant) {
        if self
            .title_updated
            .is_some_and(|last| now.saturating_duration_since(last) < TITLE_REFRESH)
        {
            return;
        }
        self.title_updated = Some(now);

        let mut title = format!("{TITLE} | {}", self.host.playback_status(&self.catalog));
        if let Some(path) = self.host.model_path() {
            title.push_str(&format!(" | {path}"));
        }
        if title != self.title {
            self.gl_window.window.set_title(&title);
            self.title = title;
        }
    }
}
