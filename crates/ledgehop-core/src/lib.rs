pub mod color;
pub mod game_trait;
pub mod geometry;
pub mod highscore;
pub mod host;
pub mod time;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::color::Color;
    use crate::game_trait::{FrameGame, FrameInput, GameEvent, SoundCue};
    use crate::geometry::Rect;
    use crate::host::{Canvas, SoundBoard, Sprite};

    /// One recorded canvas call.
    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Clear(Color),
        FillRect(Rect, Color),
        Sprite(Sprite, Rect),
        Text(String, Color),
    }

    /// Canvas that records every call for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingCanvas {
        pub calls: Vec<DrawCall>,
    }

    impl RecordingCanvas {
        pub fn new() -> Self {
            Self::default()
        }

        /// All rectangles filled with `color`.
        pub fn rects_with(&self, color: Color) -> Vec<Rect> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    DrawCall::FillRect(r, col) if *col == color => Some(*r),
                    _ => None,
                })
                .collect()
        }

        pub fn sprites(&self) -> Vec<(Sprite, Rect)> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    DrawCall::Sprite(s, r) => Some((*s, *r)),
                    _ => None,
                })
                .collect()
        }

        pub fn texts(&self) -> Vec<String> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    DrawCall::Text(t, _) => Some(t.clone()),
                    _ => None,
                })
                .collect()
        }

        pub fn has_text(&self, needle: &str) -> bool {
            self.texts().iter().any(|t| t.contains(needle))
        }
    }

    impl Canvas for RecordingCanvas {
        fn clear(&mut self, color: Color) {
            self.calls.push(DrawCall::Clear(color));
        }

        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.calls.push(DrawCall::FillRect(rect, color));
        }

        fn draw_sprite(&mut self, sprite: Sprite, at: Rect) {
            self.calls.push(DrawCall::Sprite(sprite, at));
        }

        fn draw_text(&mut self, text: &str, _x: f32, _y: f32, color: Color) {
            self.calls.push(DrawCall::Text(text.to_string(), color));
        }
    }

    /// Sound board that records cues instead of playing them.
    #[derive(Debug, Default)]
    pub struct RecordingSoundBoard {
        pub played: Vec<SoundCue>,
        pub music_started: bool,
    }

    impl SoundBoard for RecordingSoundBoard {
        fn play(&mut self, cue: SoundCue) {
            self.played.push(cue);
        }

        fn start_music(&mut self) {
            self.music_started = true;
        }
    }

    /// No keys held.
    pub fn idle() -> FrameInput {
        FrameInput::default()
    }

    pub fn holding_left() -> FrameInput {
        FrameInput {
            left: true,
            ..Default::default()
        }
    }

    pub fn holding_right() -> FrameInput {
        FrameInput {
            right: true,
            ..Default::default()
        }
    }

    pub fn holding_jump() -> FrameInput {
        FrameInput {
            jump: true,
            ..Default::default()
        }
    }

    /// A numeric selector pressed this frame.
    pub fn selecting(digit: u8) -> FrameInput {
        FrameInput {
            select: Some(digit),
            ..Default::default()
        }
    }

    pub fn quitting() -> FrameInput {
        FrameInput {
            quit: true,
            ..Default::default()
        }
    }

    /// Run `n` frames with the same input, returning all accumulated events.
    pub fn run_frames(game: &mut dyn FrameGame, input: FrameInput, n: usize) -> Vec<GameEvent> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(game.update(&input));
        }
        all_events
    }

    /// Count sound cues of one kind in an event list.
    pub fn count_sounds(events: &[GameEvent], cue: SoundCue) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::Sound(c) if *c == cue))
            .count()
    }
}
