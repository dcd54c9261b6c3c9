use serde::{Deserialize, Serialize};

use crate::physics::PhysicsConfig;

/// Play-field width in pixels.
pub const FIELD_WIDTH: f32 = 800.0;
/// Play-field height in pixels.
pub const FIELD_HEIGHT: f32 = 600.0;
/// Frames the victory/defeat banner stays up before the after-session policy applies.
pub const RESULTS_FRAMES: u32 = 120;

/// Which of the three prototypes to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// A single platform and a player. No menu, no entities.
    Sandbox,
    /// Entities and difficulties; touching an enemy ends the run and the
    /// process exits after the session.
    Arcade,
    /// Entities and difficulties; enemies send the player back to the start
    /// and the game returns to the menu after each session.
    #[default]
    Gauntlet,
}

impl Variant {
    /// Sandbox drops straight into play; the others open on the difficulty menu.
    pub fn starts_in_menu(self) -> bool {
        !matches!(self, Variant::Sandbox)
    }
}

/// What touching an enemy does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyContact {
    Respawn,
    GameOver,
}

/// What happens once a session reaches victory or defeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AfterSession {
    Exit,
    ReturnToMenu,
}

/// Behavioral switches that differ between variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub enemy_contact: EnemyContact,
    pub after_session: AfterSession,
    /// Keep the player's rectangle inside the play field horizontally.
    pub clamp_to_field: bool,
    /// Only snap onto a platform while moving downward.
    pub land_only_when_falling: bool,
    /// Send the player back to the start after dropping out of the field.
    pub respawn_below_field: bool,
}

impl Rules {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Sandbox => Self {
                enemy_contact: EnemyContact::GameOver,
                after_session: AfterSession::Exit,
                clamp_to_field: false,
                land_only_when_falling: false,
                respawn_below_field: false,
            },
            Variant::Arcade => Self {
                enemy_contact: EnemyContact::GameOver,
                after_session: AfterSession::Exit,
                clamp_to_field: true,
                land_only_when_falling: true,
                respawn_below_field: true,
            },
            Variant::Gauntlet => Self {
                enemy_contact: EnemyContact::Respawn,
                after_session: AfterSession::ReturnToMenu,
                clamp_to_field: true,
                land_only_when_falling: true,
                respawn_below_field: true,
            },
        }
    }
}

/// Per-rule overrides layered on top of the variant's preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleOverrides {
    pub enemy_contact: Option<EnemyContact>,
    pub after_session: Option<AfterSession>,
    pub clamp_to_field: Option<bool>,
    pub land_only_when_falling: Option<bool>,
    pub respawn_below_field: Option<bool>,
}

/// Play-field dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

/// Top-level game configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformerConfig {
    pub variant: Variant,
    pub physics: PhysicsConfig,
    pub field: FieldConfig,
    pub rules: RuleOverrides,
    pub results_frames: Option<u32>,
}

impl PlatformerConfig {
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            ..Default::default()
        }
    }

    /// Load config from a TOML file. Falls back to defaults if the file is missing
    /// or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("LEDGEHOP_CONFIG")
            .unwrap_or_else(|_| "config/ledgehop.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    PlatformerConfig::default()
                },
            },
            Err(_) => PlatformerConfig::default(),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// The variant's rule preset with any configured overrides applied.
    pub fn rules(&self) -> Rules {
        let mut rules = Rules::for_variant(self.variant);
        let o = &self.rules;
        if let Some(v) = o.enemy_contact {
            rules.enemy_contact = v;
        }
        if let Some(v) = o.after_session {
            rules.after_session = v;
        }
        if let Some(v) = o.clamp_to_field {
            rules.clamp_to_field = v;
        }
        if let Some(v) = o.land_only_when_falling {
            rules.land_only_when_falling = v;
        }
        if let Some(v) = o.respawn_below_field {
            rules.respawn_below_field = v;
        }
        rules
    }

    pub fn results_frames(&self) -> u32 {
        self.results_frames.unwrap_or(RESULTS_FRAMES)
    }
}
