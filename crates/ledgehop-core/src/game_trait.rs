use serde::{Deserialize, Serialize};

use crate::host::Canvas;

/// Score type shared by sessions and the high-score table.
pub type Score = u32;

/// Core trait the host loop drives once per frame.
///
/// The host owns the window, input polling, audio and the score file;
/// the game only handles its own state and scene composition.
pub trait FrameGame {
    /// Name and description for the window title and logs.
    fn metadata(&self) -> GameMetadata;

    /// Advance one fixed time slice. Returns the events the host must act on
    /// (sound cues, score persistence).
    fn update(&mut self, input: &FrameInput) -> Vec<GameEvent>;

    /// Compose the current scene onto the host canvas.
    fn draw(&self, canvas: &mut dyn Canvas, high_scores: &[Score]);

    /// Whether the host should leave its loop after presenting this frame.
    fn should_exit(&self) -> bool;
}

/// Descriptive metadata for a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMetadata {
    pub name: String,
    pub description: String,
}

/// Logical key state sampled by the host for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Quit key held or window close requested this frame.
    pub quit: bool,
    /// Numeric selector pressed this frame (`1`, `2`, `3`, ...).
    pub select: Option<u8>,
}

impl FrameInput {
    /// -1 (left), 0, +1 (right). Both keys held cancel out.
    pub fn move_dir(&self) -> f32 {
        let mut dir = 0.0;
        if self.left {
            dir -= 1.0;
        }
        if self.right {
            dir += 1.0;
        }
        dir
    }
}

/// One-shot sound triggers fired by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    Jump,
    Hit,
    Coin,
    Goal,
}

/// How a play session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Victory,
    Defeat,
}

/// Events emitted by a game during update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundCue),
    ScoreUpdate { score: Score },
    SessionStarted { level: String },
    /// Terminal transition; the host records `score` in the high-score list.
    SessionEnded { outcome: Outcome, score: Score },
}
