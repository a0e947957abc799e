use serde::{Deserialize, Serialize};

use crate::error::PreviewError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnimationCategory {
    #[default]
    Basic,
    Walking,
    Dancing,
    Sports,
    Poses,
    Custom,
}

/// An animation clip that can be applied to a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Animation {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: AnimationCategory,
    /// Clip length in seconds.
    pub duration: f32,
    pub is_premium: bool,
    pub preview_url: Option<String>,
    pub motion_data_path: String,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            category: AnimationCategory::Basic,
            duration: 0.0,
            is_premium: false,
            preview_url: None,
            motion_data_path: String::new(),
        }
    }
}

/// Per-model playback settings chosen by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub speed: f32,
    pub looping: bool,
    pub start_frame: u32,
    /// `None` plays to the end of the clip.
    pub end_frame: Option<u32>,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            speed: 1.0,
            looping: true,
            start_frame: 0,
            end_frame: None,
        }
    }
}

/// Slider progress (0..=100) to playback speed in 0.5..=2.5.
pub fn speed_from_progress(progress: u32) -> f32 {
    progress.min(100) as f32 / 50.0 + 0.5
}

/// Inverse of [`speed_from_progress`], rounded to the nearest step.
pub fn progress_from_speed(speed: f32) -> u32 {
    ((speed - 0.5) * 50.0).round().clamp(0.0, 100.0) as u32
}

fn clip(
    id: &str,
    name: &str,
    description: &str,
    category: AnimationCategory,
    duration: f32,
    is_premium: bool,
) -> Animation {
    Animation {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category,
        duration,
        is_premium,
        ..Default::default()
    }
}

pub fn basic_animations() -> Vec<Animation> {
    use AnimationCategory::*;
    vec![
        clip("walk", "Walk", "Basic walking animation", Walking, 2.0, false),
        clip("run", "Run", "Fast running animation", Walking, 1.5, false),
        clip("jump", "Jump", "Simple jumping animation", Basic, 1.0, false),
        clip("dance", "Dance", "Fun dancing animation", Dancing, 3.0, false),
        clip("wave", "Wave", "Hand waving animation", Basic, 1.2, false),
        clip(
            "idle",
            "Idle",
            "Idle standing animation with subtle movements",
            Basic,
            4.0,
            false,
        ),
        clip("backflip", "Backflip", "Advanced backflip animation", Sports, 2.0, true),
        clip("salsa", "Salsa Dance", "Salsa dancing animation", Dancing, 5.0, true),
    ]
}

/// The list of clips offered to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationCatalog {
    animations: Vec<Animation>,
}

impl AnimationCatalog {
    pub fn new(animations: Vec<Animation>) -> Self {
        Self { animations }
    }

    /// Parse a catalog delivered as a JSON array of animations.
    pub fn from_json(json: &str) -> Result<Self, PreviewError> {
        let animations: Vec<Animation> = serde_json::from_str(json)?;
        Ok(Self::new(animations))
    }

    pub fn load(path: &str) -> Result<Self, PreviewError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| PreviewError::from(e).with_arg("path", path))?;
        Self::from_json(&json)
    }

    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    pub fn get(&self, index: usize) -> Option<&Animation> {
        self.animations.get(index)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Animation> {
        self.animations.iter().find(|a| a.id == id)
    }

    /// Lookup by display name, the key the selection chips use.
    /// Two clips sharing a name resolve to the first one.
    pub fn find_by_name(&self, name: &str) -> Option<&Animation> {
        self.animations.iter().find(|a| a.name == name)
    }
}

impl Default for AnimationCatalog {
    fn default() -> Self {
        Self::new(basic_animations())
    }
}
