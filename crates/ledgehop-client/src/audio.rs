use macroquad::audio::{PlaySoundParams, Sound, load_sound, play_sound};
use serde::{Deserialize, Serialize};

use ledgehop_core::game_trait::SoundCue;
use ledgehop_core::host::SoundBoard;

use crate::assets::AssetError;
use crate::settings::AssetPaths;

/// Below this, playback is skipped entirely.
const AUDIBLE_THRESHOLD: f32 = 0.001;

/// Audio settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub master_volume: f32,
    pub effects_volume: f32,
    pub music_volume: f32,
    pub muted: bool,
    pub music_enabled: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.5,
            effects_volume: 0.7,
            music_volume: 0.3,
            muted: false,
            music_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCategory {
    Effect,
    Music,
}

impl AudioSettings {
    /// Final playback volume for a category, or `None` when inaudible.
    pub fn volume(&self, category: SoundCategory) -> Option<f32> {
        if self.muted {
            return None;
        }
        let category_vol = match category {
            SoundCategory::Effect => self.effects_volume,
            SoundCategory::Music => {
                if !self.music_enabled {
                    return None;
                }
                self.music_volume
            },
        };
        let final_vol = (self.master_volume * category_vol).clamp(0.0, 1.0);
        (final_vol > AUDIBLE_THRESHOLD).then_some(final_vol)
    }
}

async fn load(path: &str) -> Result<Sound, AssetError> {
    load_sound(path).await.map_err(|e| AssetError::Sound {
        path: path.to_string(),
        message: e.to_string(),
    })
}

async fn load_optional(path: Option<&str>) -> Result<Option<Sound>, AssetError> {
    match path {
        Some(path) => Ok(Some(load(path).await?)),
        None => Ok(None),
    }
}

/// Loaded sound effects and music, played through macroquad's mixer.
pub struct SoundBank {
    jump: Sound,
    hit: Sound,
    goal: Sound,
    coin: Option<Sound>,
    music: Option<Sound>,
    settings: AudioSettings,
}

impl SoundBank {
    pub async fn load(paths: &AssetPaths, settings: AudioSettings) -> Result<Self, AssetError> {
        let bank = Self {
            jump: load(&paths.jump_sound).await?,
            hit: load(&paths.hit_sound).await?,
            goal: load(&paths.goal_sound).await?,
            coin: load_optional(paths.coin_sound.as_deref()).await?,
            music: load_optional(paths.music.as_deref()).await?,
            settings,
        };
        tracing::debug!("Sound bank loaded");
        Ok(bank)
    }

    fn sound_for(&self, cue: SoundCue) -> Option<&Sound> {
        match cue {
            SoundCue::Jump => Some(&self.jump),
            SoundCue::Hit => Some(&self.hit),
            SoundCue::Goal => Some(&self.goal),
            SoundCue::Coin => self.coin.as_ref(),
        }
    }
}

impl SoundBoard for SoundBank {
    fn play(&mut self, cue: SoundCue) {
        let Some(volume) = self.settings.volume(SoundCategory::Effect) else {
            return;
        };
        if let Some(sound) = self.sound_for(cue) {
            play_sound(
                sound,
                PlaySoundParams {
                    looped: false,
                    volume,
                },
            );
        }
    }

    fn start_music(&mut self) {
        let Some(volume) = self.settings.volume(SoundCategory::Music) else {
            return;
        };
        if let Some(music) = &self.music {
            play_sound(
                music,
                PlaySoundParams {
                    looped: true,
                    volume,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_multiplies_master_and_category() {
        let settings = AudioSettings::default();
        assert_eq!(settings.volume(SoundCategory::Effect), Some(0.5 * 0.7));
        assert_eq!(settings.volume(SoundCategory::Music), Some(0.5 * 0.3));
    }

    #[test]
    fn muted_is_silent() {
        let settings = AudioSettings {
            muted: true,
            ..Default::default()
        };
        assert_eq!(settings.volume(SoundCategory::Effect), None);
        assert_eq!(settings.volume(SoundCategory::Music), None);
    }

    #[test]
    fn music_can_be_disabled_alone() {
        let settings = AudioSettings {
            music_enabled: false,
            ..Default::default()
        };
        assert_eq!(settings.volume(SoundCategory::Music), None);
        assert!(settings.volume(SoundCategory::Effect).is_some());
    }

    #[test]
    fn near_zero_is_inaudible() {
        let settings = AudioSettings {
            master_volume: 0.001,
            ..Default::default()
        };
        assert_eq!(settings.volume(SoundCategory::Effect), None);
    }
}
