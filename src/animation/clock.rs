// Playback clock for the selected animation clip.
// Only the time cursor is tracked; poses are produced by the external
// animation service and are not interpolated here.

use crate::model::AnimationSettings;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClock {
    state: PlaybackState,
    animation_id: Option<String>,
    elapsed: f32,
    speed: f32,
    looping: bool,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::from_settings(&AnimationSettings::default())
    }

    pub fn from_settings(settings: &AnimationSettings) -> Self {
        let mut clock = Self {
            state: PlaybackState::Stopped,
            animation_id: None,
            elapsed: 0.0,
            speed: 1.0,
            looping: settings.looping,
        };
        clock.set_speed(settings.speed);
        clock
    }

    /// Select a clip: rewinds to zero and starts playing.
    pub fn set_animation(&mut self, id: impl Into<String>) {
        self.animation_id = Some(id.into());
        self.elapsed = 0.0;
        self.state = PlaybackState::Playing;
    }

    pub fn play(&mut self) {
        self.state = PlaybackState::Playing;
    }

    pub fn pause(&mut self) {
        self.state = PlaybackState::Stopped;
    }

    /// Rewind to zero without touching the play state.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Non-finite or non-positive multipliers are ignored.
    pub fn set_speed(&mut self, multiplier: f32) {
        if multiplier.is_finite() && multiplier > 0.0 {
            self.speed = multiplier;
        } else {
            log::warn!("Ignoring playback speed {multiplier}; keeping {}", self.speed);
        }
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn advance(&mut self, delta_seconds: f32) {
        if self.state == PlaybackState::Playing {
            self.elapsed += delta_seconds * self.speed;
        }
    }

    /// Cursor position inside a clip of `duration` seconds: wrapped when
    /// looping, clamped to the end otherwise. The raw cursor is unbounded.
    pub fn clip_time(&self, duration: f32) -> f32 {
        if duration.is_nan() || duration <= 0.0 {
            return 0.0;
        }
        if self.looping {
            self.elapsed.rem_euclid(duration)
        } else {
            self.elapsed.min(duration)
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn animation_id(&self) -> Option<&str> {
        self.animation_id.as_deref()
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}
