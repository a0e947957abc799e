// Keyboard controls for the preview window. The UI side only mirrors the
// toggles it needs to flip; the clock itself lives on the render side.

use winit::keyboard::{Key, NamedKey};

use crate::animation::PlaybackController;
use crate::model::{AnimationCatalog, progress_from_speed, speed_from_progress};
use crate::settings::PlaybackSettings;

const SLIDER_STEP: u32 = 10;
const SLIDER_MAX: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    TogglePlay,
    Reset,
    ToggleLoop,
    SpeedUp,
    SpeedDown,
    /// Zero-based position in the catalog.
    Select(usize),
    Quit,
}

pub fn action_for_key(key: &Key) -> Option<KeyAction> {
    match key {
        Key::Named(NamedKey::Space) => Some(KeyAction::TogglePlay),
        Key::Named(NamedKey::ArrowUp) => Some(KeyAction::SpeedUp),
        Key::Named(NamedKey::ArrowDown) => Some(KeyAction::SpeedDown),
        Key::Named(NamedKey::Escape) => Some(KeyAction::Quit),
        Key::Character(c) => match c.as_str() {
            "r" | "R" => Some(KeyAction::Reset),
            "l" | "L" => Some(KeyAction::ToggleLoop),
            digit => match digit.parse::<usize>() {
                Ok(n @ 1..=9) => Some(KeyAction::Select(n - 1)),
                _ => None,
            },
        },
        _ => None,
    }
}

pub struct PreviewControls {
    controller: PlaybackController,
    playing: bool,
    looping: bool,
    progress: u32,
}

impl PreviewControls {
    /// Mirrors the initial clock state and pushes it so both sides agree.
    pub fn new(controller: PlaybackController, settings: &PlaybackSettings) -> Self {
        let controls = Self {
            controller,
            playing: false,
            looping: settings.animation.looping,
            progress: progress_from_speed(settings.animation.speed),
        };
        controls.controller.set_looping(controls.looping);
        controls
    }

    /// Apply one action. Returns `true` when the window should exit.
    pub fn apply(&mut self, action: KeyAction, catalog: &AnimationCatalog) -> bool {
        match action {
            KeyAction::TogglePlay => {
                self.playing = !self.playing;
                if self.playing {
                    self.controller.play();
                } else {
                    self.controller.pause();
                }
            }
            KeyAction::Reset => {
                self.controller.reset();
            }
            KeyAction::ToggleLoop => {
                self.looping = !self.looping;
                self.controller.set_looping(self.looping);
            }
            KeyAction::SpeedUp => self.set_progress((self.progress + SLIDER_STEP).min(SLIDER_MAX)),
            KeyAction::SpeedDown => self.set_progress(self.progress.saturating_sub(SLIDER_STEP)),
            KeyAction::Select(index) => {
                let Some(name) = catalog.get(index).map(|a| a.name.clone()) else {
                    return false;
                };
                self.select(catalog, &name);
            }
            KeyAction::Quit => return true,
        }
        self.controller.request_render();
        false
    }

    /// Select by display name; a miss keeps the current clip.
    pub fn select(&mut self, catalog: &AnimationCatalog, name: &str) {
        if let Some(animation) = self.controller.select_by_name(catalog, name) {
            log::info!("Selected animation {} ({}s)", animation.name, animation.duration);
            self.playing = true;
        }
    }

    fn set_progress(&mut self, progress: u32) {
        self.progress = progress;
        self.controller.set_speed(speed_from_progress(progress));
    }

    pub fn speed(&self) -> f32 {
        speed_from_progress(self.progress)
    }

    /// Snapshot to persist when the window closes.
    pub fn playback_settings(&self, base: &PlaybackSettings) -> PlaybackSettings {
        let mut settings = base.clone();
        settings.animation.speed = self.speed();
        settings.animation.looping = self.looping;
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{PlaybackCommand, PlaybackInbox, channel};

    fn controls() -> (PreviewControls, PlaybackInbox) {
        let (controller, mut inbox) = channel();
        let controls = PreviewControls::new(controller, &PlaybackSettings::default());
        inbox.drain().for_each(drop);
        (controls, inbox)
    }

    fn commands(inbox: &mut PlaybackInbox) -> Vec<PlaybackCommand> {
        inbox
            .drain()
            .filter(|c| *c != PlaybackCommand::RequestRender)
            .collect()
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(action_for_key(&Key::Named(NamedKey::Space)), Some(KeyAction::TogglePlay));
        assert_eq!(action_for_key(&Key::Named(NamedKey::Escape)), Some(KeyAction::Quit));
        assert_eq!(action_for_key(&Key::Character("r".into())), Some(KeyAction::Reset));
        assert_eq!(action_for_key(&Key::Character("L".into())), Some(KeyAction::ToggleLoop));
        assert_eq!(action_for_key(&Key::Character("1".into())), Some(KeyAction::Select(0)));
        assert_eq!(action_for_key(&Key::Character("8".into())), Some(KeyAction::Select(7)));
        assert_eq!(action_for_key(&Key::Character("0".into())), None);
        assert_eq!(action_for_key(&Key::Character("x".into())), None);
    }

    #[test]
    fn digit_selects_by_display_name() {
        let (mut controls, mut inbox) = controls();
        let catalog = AnimationCatalog::default();

        assert!(!controls.apply(KeyAction::Select(7), &catalog));
        // Selection starts playback, so the next toggle pauses.
        controls.apply(KeyAction::TogglePlay, &catalog);
        assert_eq!(
            commands(&mut inbox),
            vec![
                PlaybackCommand::SetAnimation("salsa".into()),
                PlaybackCommand::Pause
            ]
        );
    }

    #[test]
    fn select_past_catalog_end_is_ignored() {
        let (mut controls, mut inbox) = controls();
        let catalog = AnimationCatalog::default();
        controls.apply(KeyAction::Select(8), &catalog);
        assert_eq!(inbox.drain().count(), 0);
    }

    #[test]
    fn space_toggles_play_and_pause() {
        let (mut controls, mut inbox) = controls();
        let catalog = AnimationCatalog::default();
        controls.apply(KeyAction::TogglePlay, &catalog);
        controls.apply(KeyAction::TogglePlay, &catalog);
        assert_eq!(
            commands(&mut inbox),
            vec![PlaybackCommand::Play, PlaybackCommand::Pause]
        );
    }

    #[test]
    fn slider_steps_and_clamps() {
        let (mut controls, mut inbox) = controls();
        let catalog = AnimationCatalog::default();
        assert!((controls.speed() - 1.0).abs() < 1e-6);

        controls.apply(KeyAction::SpeedUp, &catalog);
        assert!((controls.speed() - 1.2).abs() < 1e-6);
        for _ in 0..20 {
            controls.apply(KeyAction::SpeedDown, &catalog);
        }
        assert!((controls.speed() - 0.5).abs() < 1e-6);

        let speeds: Vec<_> = commands(&mut inbox)
            .into_iter()
            .filter_map(|c| match c {
                PlaybackCommand::SetSpeed(s) => Some(s),
                _ => None,
            })
            .collect();
        assert_eq!(speeds.len(), 21);
        assert!((speeds[0] - 1.2).abs() < 1e-6);
        assert!((speeds[20] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn loop_toggle_and_quit() {
        let (mut controls, mut inbox) = controls();
        let catalog = AnimationCatalog::default();
        controls.apply(KeyAction::ToggleLoop, &catalog);
        assert_eq!(commands(&mut inbox), vec![PlaybackCommand::SetLooping(false)]);
        assert!(controls.apply(KeyAction::Quit, &catalog));
    }

    #[test]
    fn settings_snapshot_keeps_initial_clip() {
        let (mut controls, _inbox) = controls();
        let catalog = AnimationCatalog::default();
        let base = PlaybackSettings {
            initial_animation: Some("Walk".into()),
            ..Default::default()
        };
        controls.apply(KeyAction::SpeedUp, &catalog);
        controls.apply(KeyAction::ToggleLoop, &catalog);

        let saved = controls.playback_settings(&base);
        assert_eq!(saved.initial_animation.as_deref(), Some("Walk"));
        assert!((saved.animation.speed - 1.2).abs() < 1e-6);
        assert!(!saved.animation.looping);
    }
}
