use std::collections::HashSet;

use macroquad::input::{KeyCode, get_keys_down, get_keys_pressed, is_quit_requested};

use ledgehop_core::game_trait::FrameInput;

const LEFT_KEYS: [KeyCode; 2] = [KeyCode::Left, KeyCode::A];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::Right, KeyCode::D];
const JUMP_KEYS: [KeyCode; 3] = [KeyCode::Space, KeyCode::Up, KeyCode::W];

/// Keyboard state, sampled once per frame from macroquad.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    pub keys_down: HashSet<KeyCode>,
    /// Keys pressed this frame.
    pub keys_just_pressed: HashSet<KeyCode>,
    /// Window close requested this frame.
    pub close_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot with the current frame's state.
    pub fn poll(&mut self) {
        self.keys_down = get_keys_down();
        self.keys_just_pressed = get_keys_pressed();
        self.close_requested = is_quit_requested();
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    fn any_down(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.is_key_down(*k))
    }

    /// First difficulty digit pressed this frame, top row or keypad.
    fn selected_digit(&self) -> Option<u8> {
        [
            (1, KeyCode::Key1, KeyCode::Kp1),
            (2, KeyCode::Key2, KeyCode::Kp2),
            (3, KeyCode::Key3, KeyCode::Kp3),
        ]
        .into_iter()
        .find(|(_, row, pad)| self.is_key_just_pressed(*row) || self.is_key_just_pressed(*pad))
        .map(|(digit, _, _)| digit)
    }

    /// Logical input for the game: arrows/WASD to move, Space/Up/W to jump,
    /// Escape or window close to quit, 1/2/3 to pick a difficulty.
    pub fn frame_input(&self) -> FrameInput {
        FrameInput {
            left: self.any_down(&LEFT_KEYS),
            right: self.any_down(&RIGHT_KEYS),
            jump: self.any_down(&JUMP_KEYS),
            quit: self.close_requested || self.is_key_down(KeyCode::Escape),
            select: self.selected_digit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(keys: &[KeyCode]) -> InputState {
        InputState {
            keys_down: keys.iter().copied().collect(),
            ..Default::default()
        }
    }

    #[test]
    fn nothing_held_is_idle() {
        assert_eq!(InputState::new().frame_input(), FrameInput::default());
    }

    #[test]
    fn arrows_and_wasd_move() {
        assert!(holding(&[KeyCode::Left]).frame_input().left);
        assert!(holding(&[KeyCode::A]).frame_input().left);
        assert!(holding(&[KeyCode::Right]).frame_input().right);
        assert!(holding(&[KeyCode::D]).frame_input().right);
    }

    #[test]
    fn jump_keys() {
        for key in JUMP_KEYS {
            assert!(holding(&[key]).frame_input().jump, "{key:?} should jump");
        }
    }

    #[test]
    fn escape_or_close_quits() {
        assert!(holding(&[KeyCode::Escape]).frame_input().quit);
        let closing = InputState {
            close_requested: true,
            ..Default::default()
        };
        assert!(closing.frame_input().quit);
    }

    #[test]
    fn digits_select_only_when_just_pressed() {
        let mut input = holding(&[KeyCode::Key2]);
        assert_eq!(input.frame_input().select, None);

        input.keys_just_pressed.insert(KeyCode::Key2);
        assert_eq!(input.frame_input().select, Some(2));

        let keypad = InputState {
            keys_just_pressed: [KeyCode::Kp3].into_iter().collect(),
            ..Default::default()
        };
        assert_eq!(keypad.frame_input().select, Some(3));
    }
}
