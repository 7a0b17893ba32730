//! Keypad and button dispatch tables.
//!
//! Key ids are matrix positions (see the layout in [`crate::config`]),
//! not printed labels, so the digits are scattered across the ids.

use crate::config::PLAY_BUTTON_ID;
use crate::feedback::Note;
use crate::input::{ButtonId, KeyId};

/// What a short press does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyAction {
    /// Append a digit (0-9) to the track-id prompt.
    Digit(u8),
    PrevTrack,
    NextTrack,
    /// Next id from the no-repeat shuffle.
    RandomTrack,
    VolumeDown,
    VolumeUp,
    ToggleRepeat,
    TogglePause,
}

impl KeyAction {
    /// Beep accompanying the action, if it has one.
    pub fn tone(self) -> Option<Note> {
        match self {
            KeyAction::Digit(d) => Some(digit_tone(d)),
            KeyAction::PrevTrack => Some(Note::A4),
            KeyAction::NextTrack => Some(Note::B4),
            _ => None,
        }
    }
}

/// What a long press does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LongPressAction {
    CycleEqualizer,
}

/// What a stand-alone button press does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction {
    /// Play the current track.
    Play,
}

/// Beep for every long press, mapped or not.
pub const LONG_PRESS_TONE: Note = Note::C3;

pub fn short_press_action(key: KeyId) -> Option<KeyAction> {
    let action = match key.0 {
        0 => KeyAction::Digit(1),
        1 => KeyAction::Digit(2),
        2 => KeyAction::Digit(3),
        4 => KeyAction::Digit(4),
        5 => KeyAction::Digit(5),
        6 => KeyAction::Digit(6),
        8 => KeyAction::Digit(7),
        9 => KeyAction::Digit(8),
        10 => KeyAction::Digit(9),
        13 => KeyAction::Digit(0),
        // `*` and `#`
        12 => KeyAction::PrevTrack,
        14 => KeyAction::NextTrack,
        3 => KeyAction::RandomTrack,
        16 => KeyAction::VolumeDown,
        11 => KeyAction::VolumeUp,
        7 => KeyAction::ToggleRepeat,
        15 => KeyAction::TogglePause,
        _ => return None,
    };
    Some(action)
}

pub fn long_press_action(key: KeyId) -> Option<LongPressAction> {
    match key.0 {
        // The `0` key.
        13 => Some(LongPressAction::CycleEqualizer),
        _ => None,
    }
}

pub fn button_action(button: ButtonId) -> Option<ButtonAction> {
    match button.0 {
        PLAY_BUTTON_ID => Some(ButtonAction::Play),
        _ => None,
    }
}

/// Chromatic scale from C4 for digits 1-9; `0` sits at A♯4.
fn digit_tone(digit: u8) -> Note {
    match digit {
        1 => Note::C4,
        2 => Note::CS4,
        3 => Note::D4,
        4 => Note::DS4,
        5 => Note::E4,
        6 => Note::F4,
        7 => Note::FS4,
        8 => Note::G4,
        9 => Note::GS4,
        _ => Note::AS4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_digit_has_exactly_one_key() {
        for digit in 0..=9u8 {
            let keys = (0..=u8::MAX)
                .filter(|&k| short_press_action(KeyId(k)) == Some(KeyAction::Digit(digit)))
                .count();
            assert_eq!(keys, 1, "digit {}", digit);
        }
    }

    #[test]
    fn control_keys() {
        assert_eq!(short_press_action(KeyId(12)), Some(KeyAction::PrevTrack));
        assert_eq!(short_press_action(KeyId(14)), Some(KeyAction::NextTrack));
        assert_eq!(short_press_action(KeyId(3)), Some(KeyAction::RandomTrack));
        assert_eq!(short_press_action(KeyId(16)), Some(KeyAction::VolumeDown));
        assert_eq!(short_press_action(KeyId(11)), Some(KeyAction::VolumeUp));
        assert_eq!(short_press_action(KeyId(7)), Some(KeyAction::ToggleRepeat));
        assert_eq!(short_press_action(KeyId(15)), Some(KeyAction::TogglePause));
    }

    #[test]
    fn unmapped_keys() {
        for k in [17u8, 18, 19, 200] {
            assert_eq!(short_press_action(KeyId(k)), None);
        }
    }

    #[test]
    fn only_zero_key_has_a_long_press() {
        let mapped: heapless::Vec<u8, 4> = (0..=u8::MAX)
            .filter(|&k| long_press_action(KeyId(k)).is_some())
            .collect();
        assert_eq!(mapped.as_slice(), &[13]);
    }

    #[test]
    fn play_button_mapping() {
        assert_eq!(button_action(ButtonId(PLAY_BUTTON_ID)), Some(ButtonAction::Play));
        assert_eq!(button_action(ButtonId(2)), None);
    }

    #[test]
    fn tones() {
        assert_eq!(KeyAction::Digit(1).tone(), Some(Note::C4));
        assert_eq!(KeyAction::Digit(0).tone(), Some(Note::AS4));
        assert_eq!(KeyAction::Digit(9).tone(), Some(Note::GS4));
        assert_eq!(KeyAction::PrevTrack.tone(), Some(Note::A4));
        assert_eq!(KeyAction::NextTrack.tone(), Some(Note::B4));
        assert_eq!(KeyAction::RandomTrack.tone(), None);
        assert_eq!(KeyAction::ToggleRepeat.tone(), None);
    }
}
