//! Seams to the host framework: drawing surface and audio output.

use crate::color::Color;
use crate::game_trait::SoundCue;
use crate::geometry::Rect;

/// Prerendered images the host loads at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    PlayerStanding,
    PlayerJumping,
}

/// Fixed-size drawing surface. The game never reads pixels back.
pub trait Canvas {
    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Blit a sprite with its top-left corner at `at`'s origin. `at` also
    /// carries the footprint to fill when the host has no image loaded.
    fn draw_sprite(&mut self, sprite: Sprite, at: Rect);

    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Color);
}

/// Audio output. Playback failures are swallowed by implementors.
pub trait SoundBoard {
    fn play(&mut self, cue: SoundCue);

    /// Begin looping background music, if the host has any.
    fn start_music(&mut self) {}
}

