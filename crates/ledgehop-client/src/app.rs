use ledgehop_core::game_trait::{FrameGame, FrameInput, GameEvent, Score};
use ledgehop_core::highscore::{HighScoreTable, ScoreFile};
use ledgehop_core::host::{Canvas, SoundBoard};

/// Host-side wrapper around a game: routes its events to audio and the
/// high-score file and hands it the current table when drawing.
pub struct App<G: FrameGame> {
    game: G,
    scores: HighScoreTable,
    score_file: ScoreFile,
}

impl<G: FrameGame> App<G> {
    /// A missing score file is an empty table; an unreadable one is logged
    /// and treated the same way.
    pub fn new(game: G, score_file: ScoreFile) -> Self {
        let scores = match score_file.load() {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!("{e}, starting with no high scores");
                HighScoreTable::new()
            },
        };
        Self {
            game,
            scores,
            score_file,
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn high_scores(&self) -> &[Score] {
        self.scores.scores()
    }

    /// Advance the game one frame and act on what it reports.
    pub fn step(&mut self, input: &FrameInput, sounds: &mut dyn SoundBoard) {
        for event in self.game.update(input) {
            match event {
                GameEvent::Sound(cue) => sounds.play(cue),
                GameEvent::ScoreUpdate { score } => {
                    tracing::trace!(score, "Score changed");
                },
                GameEvent::SessionStarted { level } => {
                    tracing::debug!(%level, "Level loaded");
                },
                GameEvent::SessionEnded { outcome, score } => {
                    tracing::debug!(?outcome, score, "Recording score");
                    self.record(score);
                },
            }
        }
    }

    fn record(&mut self, score: Score) {
        match self.score_file.record(score) {
            Ok(table) => self.scores = table,
            Err(e) => {
                tracing::warn!("{e}, keeping score in memory only");
                self.scores.record(score);
            },
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.game.draw(canvas, self.scores.scores());
    }

    pub fn should_exit(&self) -> bool {
        self.game.should_exit()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use ledgehop_core::game_trait::{GameMetadata, Outcome, SoundCue};
    use ledgehop_core::test_helpers::{RecordingCanvas, RecordingSoundBoard, idle, quitting};
    use ledgehop_platformer::PlatformerSession;
    use ledgehop_platformer::config::Variant;

    /// Game that replays a fixed list of per-frame events.
    #[derive(Default)]
    struct ScriptedGame {
        frames: VecDeque<Vec<GameEvent>>,
        exit: bool,
    }

    impl ScriptedGame {
        fn new(frames: Vec<Vec<GameEvent>>) -> Self {
            Self {
                frames: frames.into(),
                exit: false,
            }
        }
    }

    impl FrameGame for ScriptedGame {
        fn metadata(&self) -> GameMetadata {
            GameMetadata {
                name: "Scripted".to_string(),
                description: String::new(),
            }
        }

        fn update(&mut self, input: &FrameInput) -> Vec<GameEvent> {
            self.exit |= input.quit;
            self.frames.pop_front().unwrap_or_default()
        }

        fn draw(&self, canvas: &mut dyn Canvas, high_scores: &[Score]) {
            for score in high_scores {
                canvas.draw_text(&score.to_string(), 0.0, 0.0, Default::default());
            }
        }

        fn should_exit(&self) -> bool {
            self.exit
        }
    }

    fn ended(score: Score) -> GameEvent {
        GameEvent::SessionEnded {
            outcome: Outcome::Victory,
            score,
        }
    }

    #[test]
    fn sounds_are_forwarded_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let game = ScriptedGame::new(vec![vec![
            GameEvent::Sound(SoundCue::Jump),
            GameEvent::Sound(SoundCue::Coin),
            GameEvent::ScoreUpdate { score: 1 },
        ]]);
        let mut app = App::new(game, ScoreFile::new(dir.path().join("scores.txt")));
        let mut sounds = RecordingSoundBoard::default();
        app.step(&idle(), &mut sounds);
        assert_eq!(sounds.played, vec![SoundCue::Jump, SoundCue::Coin]);
    }

    #[test]
    fn session_end_persists_score() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.txt");
        std::fs::write(&path, "9\n4\n").unwrap();

        let game = ScriptedGame::new(vec![vec![ended(6)], vec![ended(0)]]);
        let mut app = App::new(game, ScoreFile::new(&path));
        assert_eq!(app.high_scores(), &[9, 4]);

        let mut sounds = RecordingSoundBoard::default();
        app.step(&idle(), &mut sounds);
        assert_eq!(app.high_scores(), &[9, 6, 4]);
        app.step(&idle(), &mut sounds);
        assert_eq!(app.high_scores(), &[9, 6, 4, 0]);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "9\n6\n4\n0\n");
    }

    #[test]
    fn unwritable_score_file_keeps_running() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in place of the file makes both read and write fail.
        let path = dir.path().join("scores.txt");
        std::fs::create_dir(&path).unwrap();

        let game = ScriptedGame::new(vec![vec![ended(3)]]);
        let mut app = App::new(game, ScoreFile::new(&path));
        assert!(app.high_scores().is_empty());
        app.step(&idle(), &mut RecordingSoundBoard::default());
        assert_eq!(app.high_scores(), &[3]);
    }

    #[test]
    fn draw_passes_current_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.txt");
        std::fs::write(&path, "12\n").unwrap();
        let app = App::new(ScriptedGame::default(), ScoreFile::new(&path));
        let mut canvas = RecordingCanvas::new();
        app.draw(&mut canvas);
        assert_eq!(canvas.texts(), vec!["12".to_string()]);
    }

    #[test]
    fn quitting_a_real_session_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.txt");
        let session = PlatformerSession::for_variant(Variant::Sandbox);
        let mut app = App::new(session, ScoreFile::new(&path));
        let mut sounds = RecordingSoundBoard::default();
        for _ in 0..10 {
            app.step(&idle(), &mut sounds);
        }
        assert!(!app.should_exit());
        app.step(&quitting(), &mut sounds);
        assert!(app.should_exit());
        assert!(!path.exists());
        assert!(app.game().player().rect.y > 400.0);
    }
}
