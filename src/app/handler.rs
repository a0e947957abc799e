use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use crate::app::app::App;
use crate::app::options::LaunchOptions;
use crate::error::PreviewError;
use crate::model::AnimationCatalog;
use crate::settings::Settings;

pub struct AppHandler {
    app: Option<App>,
    options: LaunchOptions,
    settings: Settings,
    catalog: AnimationCatalog,
    error: Option<PreviewError>,
}

impl AppHandler {
    pub fn new(options: LaunchOptions, settings: Settings, catalog: AnimationCatalog) -> Self {
        Self {
            app: None,
            options,
            settings,
            catalog,
            error: None,
        }
    }

    /// Startup failure that ended the event loop, if any.
    pub fn take_error(&mut self) -> Option<PreviewError> {
        self.error.take()
    }
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }
        match App::new(
            event_loop,
            &self.options,
            self.settings.clone(),
            self.catalog.clone(),
        ) {
            Ok(app) => {
                app.window().request_redraw();
                self.app = Some(app);
            }
            Err(e) => {
                log::error!("Failed to open preview window: {e}");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(app) = &mut self.app {
            let response = app.handle_event(&event);
            if response.repaint {
                app.window().request_redraw();
            }
            if response.exit {
                app.save_settings();
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(app) = &mut self.app
            && app.needs_redraw()
        {
            app.window().request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Drop GL resources while the context is still current.
        self.app = None;
    }
}
