use std::path::PathBuf;

use macroquad::window::Conf;
use serde::{Deserialize, Serialize};

use ledgehop_core::time::DEFAULT_FPS;
use ledgehop_platformer::config::FieldConfig;

use crate::audio::AudioSettings;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Ledgehop".to_string(),
        }
    }
}

impl WindowSettings {
    /// Fixed-size window matching the play field.
    pub fn conf(&self, field: &FieldConfig) -> Conf {
        Conf {
            window_title: self.title.clone(),
            window_width: field.width.round() as i32,
            window_height: field.height.round() as i32,
            window_resizable: false,
            ..Default::default()
        }
    }
}

/// Image and sound files loaded at startup. A missing required file is fatal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub player_standing: String,
    pub player_jumping: String,
    pub jump_sound: String,
    pub hit_sound: String,
    pub goal_sound: String,
    pub coin_sound: Option<String>,
    /// Looped from startup when set.
    pub music: Option<String>,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            player_standing: "assets/player_stand.png".to_string(),
            player_jumping: "assets/player_jump.png".to_string(),
            jump_sound: "assets/jump.wav".to_string(),
            hit_sound: "assets/hit.wav".to_string(),
            goal_sound: "assets/goal.wav".to_string(),
            coin_sound: None,
            music: Some("assets/background_music.ogg".to_string()),
        }
    }
}

/// Host-side settings, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub window: WindowSettings,
    pub fps: f32,
    pub assets: AssetPaths,
    pub audio: AudioSettings,
    pub score_file: PathBuf,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            fps: DEFAULT_FPS,
            assets: AssetPaths::default(),
            audio: AudioSettings::default(),
            score_file: PathBuf::from("highscores.txt"),
        }
    }
}

impl ClientSettings {
    /// Load from `$LEDGEHOP_CLIENT_CONFIG` (default `config/client.toml`), then
    /// apply environment overrides. Missing or unparseable files give defaults.
    pub fn load() -> Self {
        let path = std::env::var("LEDGEHOP_CLIENT_CONFIG")
            .unwrap_or_else(|_| "config/client.toml".to_string());
        let mut settings = Self::load_from(&path);

        if let Ok(score_file) = std::env::var("LEDGEHOP_SCORE_FILE")
            && !score_file.is_empty()
        {
            settings.score_file = PathBuf::from(score_file);
        }
        if std::env::var("LEDGEHOP_MUTE").is_ok_and(|v| v == "1" || v == "true") {
            settings.audio.muted = true;
        }
        settings
    }

    pub fn load_from(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<ClientSettings>(&content) {
                Ok(settings) => {
                    tracing::info!("Loaded client settings from {path}");
                    settings
                },
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    ClientSettings::default()
                },
            },
            Err(_) => {
                tracing::info!("No {path} found, using defaults");
                ClientSettings::default()
            },
        }
    }
}
