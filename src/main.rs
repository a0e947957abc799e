use anyhow::Context;
use winit::event_loop::{ControlFlow, EventLoop};

use lhm3d_preview::app::{AppHandler, LaunchOptions};
use lhm3d_preview::model::AnimationCatalog;
use lhm3d_preview::settings::Settings;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = LaunchOptions::from_args(std::env::args().skip(1))?;
    let settings = Settings::load();
    let catalog = match &options.catalog_path {
        Some(path) => AnimationCatalog::load(path)
            .with_context(|| format!("loading animation catalog from {path}"))?,
        None => AnimationCatalog::default(),
    };
    log::info!(
        "{} animations, render mode {:?}",
        catalog.animations().len(),
        options.render_mode
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut handler = AppHandler::new(options, settings, catalog);
    event_loop.run_app(&mut handler)?;

    if let Some(e) = handler.take_error() {
        return Err(e.into());
    }
    Ok(())
}
