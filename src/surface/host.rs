use std::time::Instant;

use crate::animation::{AnimationClock, PlaybackCommand, PlaybackInbox};
use crate::error::RendererError;
use crate::model::{AnimationCatalog, cube_arrays};
use crate::renderer::{DrawOutcome, GraphicsDevice, Renderer};
use crate::settings::Settings;

/// When the host asks the platform for another frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Every vsync; used while an animation is on screen.
    #[default]
    Continuous,
    /// Only after [`SurfaceHost::request_render`]; used for static previews.
    OnDemand,
}

/// Glue between the platform's surface callbacks and the renderer core.
///
/// Owns the renderer and the animation clock; both are only touched from the
/// thread delivering the callbacks. UI controls arrive through the
/// [`PlaybackInbox`] and are applied before each frame.
pub struct SurfaceHost<D: GraphicsDevice> {
    settings: Settings,
    renderer: Option<Renderer<D>>,
    clock: AnimationClock,
    inbox: PlaybackInbox,
    render_mode: RenderMode,
    render_requested: bool,
    viewport: (u32, u32),
    last_frame: Option<Instant>,
    model_path: Option<String>,
}

impl<D: GraphicsDevice> SurfaceHost<D> {
    pub fn new(settings: Settings, inbox: PlaybackInbox, render_mode: RenderMode) -> Self {
        let clock = AnimationClock::from_settings(&settings.playback.animation);
        Self {
            settings,
            renderer: None,
            clock,
            inbox,
            render_mode,
            render_requested: true,
            viewport: (0, 0),
            last_frame: None,
            model_path: None,
        }
    }

    /// Configure fixed GL state, build the renderer and bind the placeholder
    /// cube. A shader failure is returned for reporting, but the renderer is
    /// still installed and keeps clearing the surface.
    pub fn on_surface_created(&mut self, device: D) -> Result<(), RendererError> {
        device.set_clear_color(self.settings.render.clear_color);
        device.enable_depth_test();
        device.enable_back_face_culling();

        // Drop the old renderer first so its buffers go before new ones exist.
        self.renderer = None;
        let mut renderer = Renderer::new(device, self.settings.render.clone());
        let shader_error = renderer.shader_error().cloned();

        let (vertices, normals, indices, tex_coords) = cube_arrays();
        if let Err(e) = renderer.set_mesh_data(&vertices, &normals, &indices, &tex_coords) {
            log::error!("Error creating placeholder cube: {e}");
        }

        self.renderer = Some(renderer);
        self.last_frame = None;
        self.render_requested = true;

        match shader_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn on_surface_changed(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        if let Some(renderer) = &self.renderer {
            renderer.device().set_viewport(width, height);
        }
        self.render_requested = true;
    }

    /// One platform frame: apply queued controls, advance the clock by the
    /// wall-clock time since the previous frame, then draw.
    pub fn on_draw_frame(&mut self, now: Instant) -> DrawOutcome {
        let delta = self
            .last_frame
            .map(|last| now.saturating_duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_frame = Some(now);

        self.pump_commands();
        self.clock.advance(delta);
        self.render_requested = false;

        let (width, height) = self.viewport;
        match &mut self.renderer {
            Some(renderer) => renderer.draw(width, height, delta),
            None => DrawOutcome::NoMesh,
        }
    }

    /// Apply every queued playback command to the clock.
    pub fn pump_commands(&mut self) {
        for command in self.inbox.drain() {
            log::trace!("Playback command: {command:?}");
            match command {
                PlaybackCommand::SetAnimation(id) => self.clock.set_animation(id),
                PlaybackCommand::Play => self.clock.play(),
                PlaybackCommand::Pause => self.clock.pause(),
                PlaybackCommand::Reset => self.clock.reset(),
                PlaybackCommand::SetSpeed(speed) => self.clock.set_speed(speed),
                PlaybackCommand::SetLooping(looping) => self.clock.set_looping(looping),
                PlaybackCommand::RequestRender => self.render_requested = true,
            }
        }
    }

    pub fn request_render(&mut self) {
        self.render_requested = true;
    }

    /// Whether the platform should schedule another frame now.
    pub fn needs_redraw(&mut self) -> bool {
        self.pump_commands();
        match self.render_mode {
            RenderMode::Continuous => true,
            RenderMode::OnDemand => self.render_requested,
        }
    }

    /// Record which model the preview belongs to. The reconstructed mesh is
    /// not loaded; the placeholder cube stays bound.
    pub fn set_model_path(&mut self, path: impl Into<String>) {
        let path = path.into();
        log::info!("Model path set to {path}; showing placeholder geometry");
        self.model_path = Some(path);
        self.render_requested = true;
    }

    pub fn model_path(&self) -> Option<&str> {
        self.model_path.as_deref()
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn renderer(&self) -> Option<&Renderer<D>> {
        self.renderer.as_ref()
    }

    /// One-line playback summary, e.g. `Walk 0.50s/2.00s x1.0 playing loop`.
    pub fn playback_status(&self, catalog: &AnimationCatalog) -> String {
        let clock = &self.clock;
        let state = if clock.is_playing() { "playing" } else { "paused" };
        let mode = if clock.is_looping() { "loop" } else { "once" };
        match clock.animation_id() {
            Some(id) => match catalog.find_by_id(id) {
                Some(animation) => format!(
                    "{} {:.2}s/{:.2}s x{:.1} {state} {mode}",
                    animation.name,
                    clock.clip_time(animation.duration),
                    animation.duration,
                    clock.speed(),
                ),
                None => format!("{id} {:.2}s x{:.1} {state} {mode}", clock.elapsed(), clock.speed()),
            },
            None => format!("no animation x{:.1} {state} {mode}", clock.speed()),
        }
    }
}
