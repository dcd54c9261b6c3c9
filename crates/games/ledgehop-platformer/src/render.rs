//! Scene composition onto the host canvas. Pure reads of the session.

use ledgehop_core::color::Color;
use ledgehop_core::game_trait::Score;
use ledgehop_core::host::{Canvas, Sprite};

use crate::entities::{Entity, HazardKind};
use crate::level::{Difficulty, Level};
use crate::physics::{PlayerState, Pose};
use crate::{Phase, PlatformerSession};

const TITLE: &str = "Ledgehop";
const LINE_HEIGHT: f32 = 40.0;

pub fn draw_session(session: &PlatformerSession, canvas: &mut dyn Canvas, high_scores: &[Score]) {
    match session.phase() {
        Phase::Menu => draw_menu(session, canvas, high_scores),
        Phase::Playing => draw_field(session, canvas),
        Phase::Victory | Phase::Defeat => {
            draw_field(session, canvas);
            draw_results(session, canvas);
        },
    }
}

fn draw_menu(session: &PlatformerSession, canvas: &mut dyn Canvas, high_scores: &[Score]) {
    let field = session.config().field;
    let x = field.width / 2.0 - 120.0;
    let mut y = field.height / 4.0;

    canvas.clear(Color::BLACK);
    canvas.draw_text(TITLE, x, y, Color::WHITE);
    y += LINE_HEIGHT * 1.5;

    for difficulty in Difficulty::ALL {
        let line = format!("{} - {}", difficulty.digit(), difficulty.name());
        canvas.draw_text(&line, x, y, Color::WHITE);
        y += LINE_HEIGHT;
    }

    y += LINE_HEIGHT / 2.0;
    canvas.draw_text("High Scores", x, y, Color::GOLD);
    y += LINE_HEIGHT;
    if high_scores.is_empty() {
        canvas.draw_text("No scores yet", x, y, Color::WHITE);
    }
    for (rank, score) in high_scores.iter().enumerate() {
        canvas.draw_text(&format!("{}. {score}", rank + 1), x, y, Color::WHITE);
        y += LINE_HEIGHT;
    }
}

fn draw_field(session: &PlatformerSession, canvas: &mut dyn Canvas) {
    canvas.clear(Color::WHITE);
    if let Some(level) = session.level() {
        draw_level(level, canvas);
    }
    draw_player(session.player(), canvas);
    canvas.draw_text(
        &format!("Score: {}", session.score()),
        10.0,
        10.0,
        Color::BLACK,
    );
}

fn draw_level(level: &Level, canvas: &mut dyn Canvas) {
    for platform in &level.platforms {
        canvas.fill_rect(*platform, Color::GREEN);
    }
    for entity in &level.entities {
        canvas.fill_rect(entity.rect(), entity_color(entity));
    }
}

fn entity_color(entity: &Entity) -> Color {
    match entity {
        Entity::Enemy(_) => Color::RED,
        Entity::FallingPlatform(_) => Color::CRUMBLE,
        Entity::Coin(_) => Color::GOLD,
        Entity::Hazard(h) => match h.kind {
            HazardKind::Spike => Color::SPIKE,
            HazardKind::Lava => Color::LAVA,
        },
        Entity::Goal(_) => Color::GOAL,
    }
}

fn draw_player(player: &PlayerState, canvas: &mut dyn Canvas) {
    let sprite = match player.pose {
        Pose::Standing => Sprite::PlayerStanding,
        Pose::Jumping => Sprite::PlayerJumping,
    };
    canvas.draw_sprite(sprite, player.rect);
}

fn draw_results(session: &PlatformerSession, canvas: &mut dyn Canvas) {
    let (banner, tint) = match session.phase() {
        Phase::Victory => ("You Win!", Color::GREEN),
        _ => ("Game Over", Color::RED),
    };
    let field = session.config().field;
    let x = field.width / 2.0 - 100.0;
    let y = field.height / 2.0 - LINE_HEIGHT;
    canvas.draw_text(banner, x, y, tint);
    canvas.draw_text(
        &format!("Final score: {}", session.score()),
        x,
        y + LINE_HEIGHT,
        Color::BLACK,
    );
}
