use serde::{Deserialize, Serialize};

use ledgehop_core::geometry::Rect;

use crate::entities::{
    Coin, Enemy, Entity, FallingPlatform, Goal, Hazard, HazardKind, PATROL_MAX_X, PATROL_MIN_X,
};

/// Difficulty selectable from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Menu key: 1 = Easy, 2 = Medium, 3 = Hard.
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn digit(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    fn file_stem(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Where the player appears at level start and after every respawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spawn {
    pub x: f32,
    pub y: f32,
}

fn default_patrol_min() -> f32 {
    PATROL_MIN_X
}

fn default_patrol_max() -> f32 {
    PATROL_MAX_X
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpec {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    #[serde(default = "default_patrol_min")]
    pub patrol_min_x: f32,
    #[serde(default = "default_patrol_max")]
    pub patrol_max_x: f32,
}

impl EnemySpec {
    fn new(x: f32, y: f32, speed: f32) -> Self {
        Self {
            x,
            y,
            speed,
            patrol_min_x: PATROL_MIN_X,
            patrol_max_x: PATROL_MAX_X,
        }
    }
}

/// Immutable level definition. Sessions call [`LevelTemplate::instantiate`]
/// to get their own mutable copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTemplate {
    pub name: String,
    pub start: Spawn,
    pub platforms: Vec<Rect>,
    #[serde(default)]
    pub goal: Option<Rect>,
    #[serde(default)]
    pub enemies: Vec<EnemySpec>,
    #[serde(default)]
    pub spikes: Vec<Rect>,
    #[serde(default)]
    pub lava: Vec<Rect>,
    #[serde(default)]
    pub falling_platforms: Vec<Spawn>,
    #[serde(default)]
    pub coins: Vec<Spawn>,
}

/// Reasons a level definition is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelError {
    NoPlatforms,
    InvalidRect { what: &'static str, index: usize },
    NonFiniteStart,
    /// Patrol bounds must be finite with `patrol_min_x < patrol_max_x`.
    InvalidPatrol { index: usize },
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPlatforms => write!(f, "level has no platforms"),
            Self::InvalidRect { what, index } => {
                write!(f, "{what} #{index} needs finite coordinates and a positive size")
            },
            Self::NonFiniteStart => write!(f, "start position must be finite"),
            Self::InvalidPatrol { index } => {
                write!(f, "enemy #{index} patrol_min_x must be below patrol_max_x")
            },
        }
    }
}

impl std::error::Error for LevelError {}

impl LevelTemplate {
    /// The single-platform playground of the sandbox variant.
    pub fn sandbox() -> Self {
        Self {
            name: "Sandbox".to_string(),
            start: Spawn { x: 300.0, y: 400.0 },
            platforms: vec![Rect::new(200.0, 500.0, 400.0, 20.0)],
            goal: None,
            enemies: Vec::new(),
            spikes: Vec::new(),
            lava: Vec::new(),
            falling_platforms: Vec::new(),
            coins: Vec::new(),
        }
    }

    /// Built-in layout for a difficulty.
    pub fn builtin(difficulty: Difficulty) -> Self {
        let start = Spawn { x: 100.0, y: 400.0 };
        let coin = |x, y| Spawn { x, y };
        match difficulty {
            Difficulty::Easy => Self {
                name: "Easy".to_string(),
                start,
                platforms: vec![
                    Rect::new(0.0, 580.0, 800.0, 20.0),
                    Rect::new(200.0, 500.0, 400.0, 20.0),
                ],
                goal: Some(Rect::new(700.0, 450.0, 40.0, 40.0)),
                enemies: vec![EnemySpec::new(400.0, 460.0, 2.0)],
                spikes: vec![Rect::new(300.0, 550.0, 50.0, 20.0)],
                lava: Vec::new(),
                falling_platforms: Vec::new(),
                coins: vec![coin(250.0, 460.0), coin(450.0, 420.0), coin(650.0, 540.0)],
            },
            Difficulty::Medium => Self {
                name: "Medium".to_string(),
                start,
                platforms: vec![
                    Rect::new(0.0, 580.0, 800.0, 20.0),
                    Rect::new(100.0, 500.0, 200.0, 20.0),
                    Rect::new(400.0, 400.0, 200.0, 20.0),
                ],
                goal: Some(Rect::new(700.0, 350.0, 40.0, 40.0)),
                enemies: vec![EnemySpec::new(450.0, 360.0, 3.0)],
                spikes: vec![Rect::new(250.0, 550.0, 50.0, 20.0)],
                lava: Vec::new(),
                falling_platforms: vec![Spawn { x: 500.0, y: 350.0 }],
                coins: vec![coin(150.0, 460.0), coin(520.0, 320.0), coin(760.0, 540.0)],
            },
            Difficulty::Hard => Self {
                name: "Hard".to_string(),
                start,
                platforms: vec![
                    // Ground with a lava pit between x=200 and x=600.
                    Rect::new(0.0, 580.0, 200.0, 20.0),
                    Rect::new(600.0, 580.0, 200.0, 20.0),
                    Rect::new(50.0, 500.0, 150.0, 20.0),
                    Rect::new(250.0, 400.0, 150.0, 20.0),
                    Rect::new(450.0, 300.0, 150.0, 20.0),
                ],
                goal: Some(Rect::new(700.0, 250.0, 40.0, 40.0)),
                enemies: vec![EnemySpec::new(500.0, 260.0, 4.0)],
                spikes: vec![Rect::new(350.0, 550.0, 50.0, 20.0)],
                lava: vec![Rect::new(200.0, 580.0, 400.0, 20.0)],
                falling_platforms: vec![Spawn { x: 300.0, y: 450.0 }],
                coins: vec![coin(100.0, 460.0), coin(300.0, 360.0), coin(760.0, 540.0)],
            },
        }
    }

    pub fn validate(&self) -> Result<(), LevelError> {
        if self.platforms.is_empty() {
            return Err(LevelError::NoPlatforms);
        }
        if !(self.start.x.is_finite() && self.start.y.is_finite()) {
            return Err(LevelError::NonFiniteStart);
        }
        let groups: [(&'static str, &[Rect]); 3] = [
            ("platform", &self.platforms),
            ("spike", &self.spikes),
            ("lava", &self.lava),
        ];
        for (what, rects) in groups {
            if let Some(index) = rects.iter().position(|r| !r.is_valid()) {
                return Err(LevelError::InvalidRect { what, index });
            }
        }
        if let Some(goal) = self.goal
            && !goal.is_valid()
        {
            return Err(LevelError::InvalidRect {
                what: "goal",
                index: 0,
            });
        }
        if let Some(index) = self
            .enemies
            .iter()
            .position(|e| {
                !(e.patrol_min_x.is_finite() && e.patrol_max_x.is_finite())
                    || e.patrol_min_x >= e.patrol_max_x
            })
        {
            return Err(LevelError::InvalidPatrol { index });
        }
        Ok(())
    }

    /// Fresh, independently mutable entities for one session.
    pub fn instantiate(&self) -> Level {
        let mut entities = Vec::new();
        for def in &self.enemies {
            let mut enemy = Enemy::new(def.x, def.y, def.speed);
            enemy.patrol_min_x = def.patrol_min_x;
            enemy.patrol_max_x = def.patrol_max_x;
            entities.push(Entity::Enemy(enemy));
        }
        for at in &self.falling_platforms {
            entities.push(Entity::FallingPlatform(FallingPlatform::new(at.x, at.y)));
        }
        for rect in &self.spikes {
            entities.push(Entity::Hazard(Hazard {
                rect: *rect,
                kind: HazardKind::Spike,
            }));
        }
        for rect in &self.lava {
            entities.push(Entity::Hazard(Hazard {
                rect: *rect,
                kind: HazardKind::Lava,
            }));
        }
        for at in &self.coins {
            entities.push(Entity::Coin(Coin::new(at.x, at.y)));
        }
        if let Some(rect) = self.goal {
            entities.push(Entity::Goal(Goal { rect }));
        }

        Level {
            name: self.name.clone(),
            start: self.start,
            platforms: self.platforms.clone(),
            entities,
        }
    }
}

/// A level being played: static platforms plus live entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub start: Spawn,
    pub platforms: Vec<Rect>,
    pub entities: Vec<Entity>,
}

impl Level {
    pub fn coins_left(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| matches!(e, Entity::Coin(_)))
            .count()
    }
}

/// Load a level from a JSON file, returning `None` if the file is missing or invalid.
pub fn load_level_from_file(path: &str) -> Option<LevelTemplate> {
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<LevelTemplate>(&content) {
            Ok(level) => match level.validate() {
                Ok(()) => Some(level),
                Err(e) => {
                    tracing::warn!("Rejected level {path}: {e}");
                    None
                },
            },
            Err(e) => {
                tracing::warn!("Failed to parse {path}: {e}");
                None
            },
        },
        Err(_) => None,
    }
}

/// Templates for every difficulty, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelCatalog {
    easy: LevelTemplate,
    medium: LevelTemplate,
    hard: LevelTemplate,
}

impl LevelCatalog {
    pub fn builtin() -> Self {
        Self {
            easy: LevelTemplate::builtin(Difficulty::Easy),
            medium: LevelTemplate::builtin(Difficulty::Medium),
            hard: LevelTemplate::builtin(Difficulty::Hard),
        }
    }

    /// Load templates, preferring JSON files from the levels directory.
    ///
    /// Checks env var `LEDGEHOP_LEVELS_DIR` (default `config/levels`) for a file
    /// named `{difficulty}.json` (e.g. `easy.json`, `medium.json`, `hard.json`).
    /// Falls back to the built-in layout if the file is missing or invalid.
    pub fn load() -> Self {
        let dir =
            std::env::var("LEDGEHOP_LEVELS_DIR").unwrap_or_else(|_| "config/levels".to_string());
        Self::load_from_dir(&dir)
    }

    pub fn load_from_dir(dir: &str) -> Self {
        let resolve = |difficulty: Difficulty| {
            let path = format!("{dir}/{}.json", difficulty.file_stem());
            load_level_from_file(&path).unwrap_or_else(|| LevelTemplate::builtin(difficulty))
        };
        Self {
            easy: resolve(Difficulty::Easy),
            medium: resolve(Difficulty::Medium),
            hard: resolve(Difficulty::Hard),
        }
    }

    pub fn template(&self, difficulty: Difficulty) -> &LevelTemplate {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    /// Replace the template for one difficulty.
    pub fn with_template(mut self, difficulty: Difficulty, template: LevelTemplate) -> Self {
        match difficulty {
            Difficulty::Easy => self.easy = template,
            Difficulty::Medium => self.medium = template,
            Difficulty::Hard => self.hard = template,
        }
        self
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_map_to_difficulties() {
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_digit(d.digit()), Some(d));
        }
        assert_eq!(Difficulty::from_digit(0), None);
        assert_eq!(Difficulty::from_digit(4), None);
    }

    #[test]
    fn builtin_levels_are_valid() {
        for d in Difficulty::ALL {
            let level = LevelTemplate::builtin(d);
            assert_eq!(level.validate(), Ok(()), "{} should validate", d.name());
            assert!(level.goal.is_some(), "{} needs a goal", d.name());
            assert_eq!(level.start, Spawn { x: 100.0, y: 400.0 });
        }
        assert_eq!(LevelTemplate::sandbox().validate(), Ok(()));
    }

    #[test]
    fn ground_spans_the_field_except_lava_pits() {
        for d in Difficulty::ALL {
            let level = LevelTemplate::builtin(d);
            let covered: f32 = level
                .platforms
                .iter()
                .chain(level.lava.iter())
                .filter(|r| r.top() == 580.0)
                .map(|r| r.width)
                .sum();
            assert_eq!(covered, 800.0, "{} ground has a gap", d.name());
        }
    }

    #[test]
    fn instantiation_copies_entities() {
        let template = LevelTemplate::builtin(Difficulty::Hard);
        let mut first = template.instantiate();
        let second = template.instantiate();

        for entity in &mut first.entities {
            entity.update(&Rect::new(0.0, 0.0, 1.0, 1.0), true, 3.0);
        }
        assert_ne!(first.entities, second.entities);
        assert_eq!(second, template.instantiate(), "template must be unchanged");
    }

    #[test]
    fn instantiated_entity_counts() {
        let level = LevelTemplate::builtin(Difficulty::Hard).instantiate();
        let count = |pred: fn(&Entity) -> bool| level.entities.iter().filter(|e| pred(e)).count();
        assert_eq!(count(|e| matches!(e, Entity::Enemy(_))), 1);
        assert_eq!(count(|e| matches!(e, Entity::FallingPlatform(_))), 1);
        assert_eq!(count(|e| matches!(e, Entity::Hazard(_))), 2);
        assert_eq!(count(|e| matches!(e, Entity::Goal(_))), 1);
        assert_eq!(level.coins_left(), 3);
    }

    #[test]
    fn sandbox_has_no_entities() {
        let level = LevelTemplate::sandbox().instantiate();
        assert!(level.entities.is_empty());
        assert_eq!(level.platforms.len(), 1);
    }

    #[test]
    fn validation_rejects_degenerate_rects() {
        let mut level = LevelTemplate::builtin(Difficulty::Easy);
        level.spikes.push(Rect::new(0.0, 0.0, 0.0, 10.0));
        assert_eq!(
            level.validate(),
            Err(LevelError::InvalidRect {
                what: "spike",
                index: 1
            })
        );

        let mut level = LevelTemplate::sandbox();
        level.platforms.clear();
        assert_eq!(level.validate(), Err(LevelError::NoPlatforms));
    }

    #[test]
    fn validation_rejects_inverted_patrol_band() {
        let mut level = LevelTemplate::builtin(Difficulty::Medium);
        level.enemies[0].patrol_min_x = 600.0;
        level.enemies[0].patrol_max_x = 200.0;
        assert_eq!(level.validate(), Err(LevelError::InvalidPatrol { index: 0 }));

        level.enemies[0].patrol_max_x = 600.0;
        assert_eq!(level.validate(), Err(LevelError::InvalidPatrol { index: 0 }));
        level.enemies[0].patrol_max_x = 601.0;
        assert_eq!(level.validate(), Ok(()));
    }

    #[test]
    fn json_enemy_with_inverted_band_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let custom = r#"{
            "name": "Stuck",
            "start": { "x": 50.0, "y": 300.0 },
            "platforms": [ { "x": 0.0, "y": 580.0, "width": 800.0, "height": 20.0 } ],
            "enemies": [
                { "x": 300.0, "y": 540.0, "speed": 2.0, "patrol_min_x": 500.0, "patrol_max_x": 100.0 }
            ]
        }"#;
        std::fs::write(dir.path().join("easy.json"), custom).unwrap();
        let catalog = LevelCatalog::load_from_dir(dir.path().to_str().unwrap());
        assert_eq!(
            catalog.template(Difficulty::Easy),
            &LevelTemplate::builtin(Difficulty::Easy)
        );
    }

    #[test]
    fn load_reads_levels_dir_from_env() {
        let dir = tempfile::tempdir().unwrap();
        let mut custom = LevelTemplate::builtin(Difficulty::Hard);
        custom.name = "Env Hard".to_string();
        custom.coins.clear();
        std::fs::write(
            dir.path().join("hard.json"),
            serde_json::to_string(&custom).unwrap(),
        )
        .unwrap();

        // SAFETY: this is the only test in the crate touching LEDGEHOP_LEVELS_DIR.
        unsafe { std::env::set_var("LEDGEHOP_LEVELS_DIR", dir.path()) };
        let catalog = LevelCatalog::load();
        unsafe { std::env::remove_var("LEDGEHOP_LEVELS_DIR") };

        assert_eq!(catalog.template(Difficulty::Hard), &custom);
        assert_eq!(
            catalog.template(Difficulty::Easy),
            &LevelTemplate::builtin(Difficulty::Easy)
        );
    }

    #[test]
    fn json_level_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let custom = r#"{
            "name": "Custom Easy",
            "start": { "x": 50.0, "y": 300.0 },
            "platforms": [ { "x": 0.0, "y": 580.0, "width": 800.0, "height": 20.0 } ],
            "goal": { "x": 760.0, "y": 540.0, "width": 40.0, "height": 40.0 },
            "enemies": [ { "x": 300.0, "y": 540.0, "speed": 1.5 } ]
        }"#;
        std::fs::write(dir.path().join("easy.json"), custom).unwrap();
        std::fs::write(dir.path().join("medium.json"), "{ not json").unwrap();

        let catalog = LevelCatalog::load_from_dir(dir.path().to_str().unwrap());
        let easy = catalog.template(Difficulty::Easy);
        assert_eq!(easy.name, "Custom Easy");
        assert_eq!(easy.enemies[0].patrol_min_x, PATROL_MIN_X);
        assert!(easy.coins.is_empty());
        assert_eq!(
            catalog.template(Difficulty::Medium),
            &LevelTemplate::builtin(Difficulty::Medium),
            "unparseable file falls back"
        );
        assert_eq!(
            catalog.template(Difficulty::Hard),
            &LevelTemplate::builtin(Difficulty::Hard),
            "missing file falls back"
        );
    }

    #[test]
    fn invalid_json_level_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let custom = r#"{
            "name": "Broken",
            "start": { "x": 50.0, "y": 300.0 },
            "platforms": [ { "x": 0.0, "y": 580.0, "width": -800.0, "height": 20.0 } ]
        }"#;
        std::fs::write(dir.path().join("hard.json"), custom).unwrap();
        let catalog = LevelCatalog::load_from_dir(dir.path().to_str().unwrap());
        assert_eq!(
            catalog.template(Difficulty::Hard),
            &LevelTemplate::builtin(Difficulty::Hard)
        );
    }
}
