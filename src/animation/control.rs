// Playback controls crossing from the UI thread to the render thread.
// The UI holds a `PlaybackController`; the render loop owns the matching
// `PlaybackInbox` and drains it once at the top of every frame.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::model::{Animation, AnimationCatalog};

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackCommand {
    SetAnimation(String),
    Play,
    Pause,
    Reset,
    SetSpeed(f32),
    SetLooping(bool),
    /// Ask an on-demand surface for one more frame.
    RequestRender,
}

pub fn channel() -> (PlaybackController, PlaybackInbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    (PlaybackController { tx }, PlaybackInbox { rx })
}

/// Cloneable, `Send` handle the UI uses to steer playback.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    tx: UnboundedSender<PlaybackCommand>,
}

impl PlaybackController {
    /// Queue a command. Returns `false` once the render loop has gone away.
    pub fn send(&self, command: PlaybackCommand) -> bool {
        match self.tx.send(command) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("Render loop closed; dropped {:?}", e.0);
                false
            }
        }
    }

    /// Select the first catalog clip whose display name is `name`.
    /// An unknown name sends nothing, so the current clip keeps playing.
    pub fn select_by_name<'a>(
        &self,
        catalog: &'a AnimationCatalog,
        name: &str,
    ) -> Option<&'a Animation> {
        let Some(animation) = catalog.find_by_name(name) else {
            log::debug!("No animation named {name:?}; selection unchanged");
            return None;
        };
        self.set_animation(&animation.id);
        Some(animation)
    }

    pub fn set_animation(&self, id: &str) -> bool {
        self.send(PlaybackCommand::SetAnimation(id.to_string()))
    }

    pub fn play(&self) -> bool {
        self.send(PlaybackCommand::Play)
    }

    pub fn pause(&self) -> bool {
        self.send(PlaybackCommand::Pause)
    }

    pub fn reset(&self) -> bool {
        self.send(PlaybackCommand::Reset)
    }

    pub fn set_speed(&self, multiplier: f32) -> bool {
        self.send(PlaybackCommand::SetSpeed(multiplier))
    }

    pub fn set_looping(&self, looping: bool) -> bool {
        self.send(PlaybackCommand::SetLooping(looping))
    }

    pub fn request_render(&self) -> bool {
        self.send(PlaybackCommand::RequestRender)
    }
}

/// Render-thread end of the control channel.
#[derive(Debug)]
pub struct PlaybackInbox {
    rx: UnboundedReceiver<PlaybackCommand>,
}

impl PlaybackInbox {
    /// Everything queued so far, oldest first. Never blocks.
    pub fn drain(&mut self) -> impl Iterator<Item = PlaybackCommand> + '_ {
        std::iter::from_fn(|| self.rx.try_recv().ok())
    }
}
