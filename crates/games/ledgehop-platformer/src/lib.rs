pub mod config;
pub mod entities;
pub mod level;
pub mod physics;
pub mod render;

use serde::{Deserialize, Serialize};

use ledgehop_core::game_trait::{
    FrameGame, FrameInput, GameEvent, GameMetadata, Outcome, Score, SoundCue,
};
use ledgehop_core::geometry::Rect;
use ledgehop_core::host::Canvas;

use config::{AfterSession, EnemyContact, PlatformerConfig, Rules, Variant};
use entities::{Contact, Entity};
use level::{Difficulty, Level, LevelCatalog, LevelTemplate};
use physics::{PlayerState, tick_player};

/// Where the session is in its MENU → PLAYING → VICTORY/DEFEAT cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Menu,
    Playing,
    Victory,
    Defeat,
}

/// Everything a run of the game owns: configuration, the active level's
/// entities, the player and the phase.
pub struct PlatformerSession {
    config: PlatformerConfig,
    rules: Rules,
    catalog: LevelCatalog,
    phase: Phase,
    difficulty: Option<Difficulty>,
    level: Option<Level>,
    player: PlayerState,
    /// Frames left on the results banner.
    results_timer: u32,
    exit_requested: bool,
}

impl PlatformerSession {
    pub fn new(config: PlatformerConfig, catalog: LevelCatalog) -> Self {
        let rules = config.rules();
        let mut session = Self {
            player: PlayerState::new(0.0, 0.0, &config.physics),
            config,
            rules,
            catalog,
            phase: Phase::Menu,
            difficulty: None,
            level: None,
            results_timer: 0,
            exit_requested: false,
        };
        if !session.config.variant.starts_in_menu() {
            session.enter_level(&LevelTemplate::sandbox());
        }
        session
    }

    /// Session with built-in levels for `variant`.
    pub fn for_variant(variant: Variant) -> Self {
        Self::new(PlatformerConfig::for_variant(variant), LevelCatalog::builtin())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn score(&self) -> Score {
        self.player.score
    }

    pub fn config(&self) -> &PlatformerConfig {
        &self.config
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    fn enter_level(&mut self, template: &LevelTemplate) {
        let level = template.instantiate();
        self.player = PlayerState::new(level.start.x, level.start.y, &self.config.physics);
        self.level = Some(level);
        self.phase = Phase::Playing;
    }

    fn start(&mut self, difficulty: Difficulty, events: &mut Vec<GameEvent>) {
        let template = self.catalog.template(difficulty).clone();
        self.enter_level(&template);
        self.difficulty = Some(difficulty);
        tracing::info!(level = %template.name, "Session started");
        events.push(GameEvent::SessionStarted {
            level: template.name,
        });
    }

    fn finish(&mut self, outcome: Outcome, events: &mut Vec<GameEvent>) {
        self.phase = match outcome {
            Outcome::Victory => Phase::Victory,
            Outcome::Defeat => Phase::Defeat,
        };
        self.results_timer = self.config.results_frames();
        let score = self.player.score;
        tracing::info!(?outcome, score, "Session ended");
        events.push(GameEvent::SessionEnded { outcome, score });
        if self.rules.after_session == AfterSession::Exit {
            self.exit_requested = true;
        }
    }

    fn respawn(&mut self, events: &mut Vec<GameEvent>) {
        let Some(level) = &self.level else {
            return;
        };
        tracing::debug!(
            x = self.player.rect.x,
            y = self.player.rect.y,
            "Player respawned"
        );
        self.player.respawn_at(level.start.x, level.start.y);
        events.push(GameEvent::Sound(SoundCue::Hit));
    }

    fn return_to_menu(&mut self) {
        tracing::debug!("Returning to menu");
        self.phase = Phase::Menu;
        self.level = None;
        self.difficulty = None;
    }

    /// One PLAYING frame: player physics, entity updates, then contacts.
    fn step_playing(&mut self, input: &FrameInput, events: &mut Vec<GameEvent>) {
        let physics = &self.config.physics;
        let Some(level) = self.level.as_mut() else {
            return;
        };

        // Static platforms first, then solid entities; `owners` maps the
        // trailing solids back to their entity index.
        let mut solids: Vec<Rect> = level.platforms.clone();
        let mut owners = Vec::new();
        for (idx, entity) in level.entities.iter().enumerate() {
            if entity.is_solid() {
                solids.push(entity.rect());
                owners.push(idx);
            }
        }

        let report = tick_player(
            &mut self.player,
            input,
            &solids,
            physics,
            &self.rules,
            &self.config.field,
        );
        if report.jumped {
            events.push(GameEvent::Sound(SoundCue::Jump));
        }

        let landed_entity = report
            .landed_on
            .and_then(|i| i.checked_sub(level.platforms.len()))
            .and_then(|i| owners.get(i).copied());
        for (idx, entity) in level.entities.iter_mut().enumerate() {
            entity.update(
                &self.player.rect,
                landed_entity == Some(idx),
                physics.falling_platform_speed,
            );
        }
        // A rider descends with the platform it landed on this frame.
        if let Some(idx) = landed_entity
            && let Some(Entity::FallingPlatform(platform)) = level.entities.get(idx)
        {
            self.player.rect.set_bottom(platform.rect.top());
            self.player.on_ground = true;
        }

        let player_rect = self.player.rect;
        let mut coins = 0;
        let mut hazard = None;
        let mut enemy = false;
        let mut goal = false;
        level.entities.retain(|entity| match entity.contact(&player_rect) {
            Some(Contact::Coin) => {
                coins += 1;
                false
            },
            Some(Contact::Hazard(kind)) => {
                hazard = Some(kind);
                true
            },
            Some(Contact::Enemy) => {
                enemy = true;
                true
            },
            Some(Contact::Goal) => {
                goal = true;
                true
            },
            None => true,
        });

        if coins > 0 {
            self.player.score += coins;
            events.push(GameEvent::Sound(SoundCue::Coin));
            events.push(GameEvent::ScoreUpdate {
                score: self.player.score,
            });
        }

        if enemy && self.rules.enemy_contact == EnemyContact::GameOver {
            tracing::debug!("Enemy contact ends the session");
            events.push(GameEvent::Sound(SoundCue::Hit));
            self.finish(Outcome::Defeat, events);
            return;
        }
        if let Some(kind) = hazard {
            tracing::debug!(?kind, "Hazard contact");
            self.respawn(events);
            return;
        }
        if enemy {
            tracing::debug!("Enemy contact");
            self.respawn(events);
            return;
        }
        if goal {
            events.push(GameEvent::Sound(SoundCue::Goal));
            self.finish(Outcome::Victory, events);
            return;
        }

        if self.rules.respawn_below_field && self.player.rect.top() > self.config.field.height {
            self.respawn(events);
        }
    }
}

impl FrameGame for PlatformerSession {
    fn metadata(&self) -> GameMetadata {
        let description = match self.config.variant {
            Variant::Sandbox => "Run and jump around a single platform.",
            Variant::Arcade => "Reach the goal. One touch from an enemy ends the run.",
            Variant::Gauntlet => "Reach the goal past spikes, lava and patrolling enemies.",
        };
        GameMetadata {
            name: "Ledgehop".to_string(),
            description: description.to_string(),
        }
    }

    fn update(&mut self, input: &FrameInput) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if input.quit {
            if !self.exit_requested {
                tracing::debug!(phase = ?self.phase, "Quit requested");
            }
            self.exit_requested = true;
            return events;
        }

        match self.phase {
            Phase::Menu => {
                if let Some(difficulty) = input.select.and_then(Difficulty::from_digit) {
                    self.start(difficulty, &mut events);
                }
            },
            Phase::Playing => self.step_playing(input, &mut events),
            Phase::Victory | Phase::Defeat => {
                self.results_timer = self.results_timer.saturating_sub(1);
                if self.results_timer == 0 && self.rules.after_session == AfterSession::ReturnToMenu
                {
                    self.return_to_menu();
                }
            },
        }

        events
    }

    fn draw(&self, canvas: &mut dyn Canvas, high_scores: &[Score]) {
        render::draw_session(self, canvas, high_scores);
    }

    fn should_exit(&self) -> bool {
        self.exit_requested
    }
}
