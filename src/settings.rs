use crate::CONFY_APP_NAME;
use crate::model::AnimationSettings;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub clear_color: [f32; 4],
    pub base_color: [f32; 4],
    /// Direction towards the light; normalized in the fragment shader.
    pub light_position: [f32; 3],
    /// Model spin in degrees per second.
    pub angular_velocity: f32,
    pub fov_y_degrees: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    pub camera_distance: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear_color: [0.95, 0.95, 0.95, 1.0],
            base_color: [0.7, 0.7, 0.7, 1.0],
            light_position: [0.0, 1.0, 1.0],
            angular_velocity: 20.0,
            fov_y_degrees: 45.0,
            near_plane: 0.1,
            far_plane: 100.0,
            camera_distance: 5.0,
        }
    }
}

impl RenderSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "render").unwrap_or_else(|e| {
            log::warn!("Falling back to default render settings: {e}");
            Self::default()
        })
    }

    pub fn save(&self) {
        if let Err(e) = confy::store(CONFY_APP_NAME, "render", self) {
            log::warn!("Failed to store render settings: {e}");
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    pub animation: AnimationSettings,
    /// Display name of the clip selected when the preview opens.
    pub initial_animation: Option<String>,
}

impl PlaybackSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "playback").unwrap_or_else(|e| {
            log::warn!("Falling back to default playback settings: {e}");
            Self::default()
        })
    }

    pub fn save(&self) {
        if let Err(e) = confy::store(CONFY_APP_NAME, "playback", self) {
            log::warn!("Failed to store playback settings: {e}");
        }
    }
}

// Aggregate struct for convenience
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub render: RenderSettings,
    pub playback: PlaybackSettings,
}

impl Settings {
    pub fn load() -> Self {
        Self {
            render: RenderSettings::load(),
            playback: PlaybackSettings::load(),
        }
    }

    pub fn save(&self) {
        self.render.save();
        self.playback.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_defaults_match_the_preview_screen() {
        let settings = RenderSettings::default();
        assert_eq!(settings.clear_color, [0.95, 0.95, 0.95, 1.0]);
        assert_eq!(settings.angular_velocity, 20.0);
        assert_eq!(settings.camera_distance, 5.0);
    }

    #[test]
    fn partial_documents_fill_in_defaults() {
        let settings: RenderSettings =
            serde_json::from_str(r#"{"angular_velocity": 45.0}"#).unwrap();
        assert_eq!(settings.angular_velocity, 45.0);
        assert_eq!(settings.far_plane, 100.0);

        let playback: PlaybackSettings =
            serde_json::from_str(r#"{"initial_animation": "Walk"}"#).unwrap();
        assert_eq!(playback.initial_animation.as_deref(), Some("Walk"));
        assert!(playback.animation.looping);
    }
}
