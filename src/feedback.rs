//! Audible and visual feedback - the LED indicator and the piezo buzzer.
//!
//! The control core only describes *what* to signal; drivers behind the
//! [`Feedback`] trait decide how. All calls are fire-and-forget.

use crate::config::MELODY_TEMPO_BPM;

/// A buzzer pitch in Hz. `REST` (0 Hz) is silence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Note(pub u16);

impl Note {
    pub const REST: Note = Note(0);
    pub const C3: Note = Note(131);
    pub const C4: Note = Note(262);
    pub const CS4: Note = Note(277);
    pub const D4: Note = Note(294);
    pub const DS4: Note = Note(311);
    pub const E4: Note = Note(330);
    pub const F4: Note = Note(349);
    pub const FS4: Note = Note(370);
    pub const G4: Note = Note(392);
    pub const GS4: Note = Note(415);
    pub const A4: Note = Note(440);
    pub const AS4: Note = Note(466);
    pub const B4: Note = Note(494);
    pub const C5: Note = Note(523);
    pub const D5: Note = Note(587);

    /// Frequency in Hz (0 for a rest).
    pub const fn hz(self) -> u16 {
        self.0
    }

    pub const fn is_rest(self) -> bool {
        self.0 == 0
    }
}

/// One step of a melody: a pitch and its note division (4 = quarter,
/// 8 = eighth, 16 = sixteenth).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    pub note: Note,
    pub division: u8,
}

impl Step {
    const fn new(note: Note, division: u8) -> Self {
        Self { note, division }
    }

    /// Step length in milliseconds at `tempo_bpm` quarter notes per minute.
    pub fn duration_ms(&self, tempo_bpm: u32) -> u32 {
        if self.division == 0 || tempo_bpm == 0 {
            return 0;
        }
        let whole_note_ms = 4 * 60_000 / tempo_bpm;
        whole_note_ms / u32::from(self.division)
    }
}

const POSITIVE: &[Step] = &[
    Step::new(Note::C4, 16),
    Step::new(Note::AS4, 16),
    Step::new(Note::C5, 16),
    Step::new(Note::REST, 8),
];

const NEGATIVE: &[Step] = &[
    Step::new(Note::C5, 16),
    Step::new(Note::AS4, 16),
    Step::new(Note::C4, 16),
    Step::new(Note::REST, 8),
];

const VICTORY: &[Step] = &[
    Step::new(Note::G4, 8),
    Step::new(Note::G4, 16),
    Step::new(Note::G4, 16),
    Step::new(Note::D5, 4),
    Step::new(Note::REST, 8),
];

/// Short melodies played on mode changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Melody {
    /// Rising three-note figure - a mode was switched on.
    Positive,
    /// Falling three-note figure - a mode was switched off.
    Negative,
    /// Fanfare for the hidden track number.
    Victory,
}

impl Melody {
    pub fn score(self) -> &'static [Step] {
        match self {
            Melody::Positive => POSITIVE,
            Melody::Negative => NEGATIVE,
            Melody::Victory => VICTORY,
        }
    }

    /// Total playing time at the default tempo.
    pub fn duration_ms(self) -> u32 {
        self.score()
            .iter()
            .map(|s| s.duration_ms(MELODY_TEMPO_BPM))
            .sum()
    }
}

/// Sink for feedback signals. Implementations must not block.
pub trait Feedback {
    /// Light the indicator for `duration_ms`; a newer pulse replaces a
    /// running one.
    fn pulse_indicator(&mut self, duration_ms: u32);

    /// Sound a single buzzer tone.
    fn play_tone(&mut self, note: Note, duration_ms: u32);

    /// Play a melody on the buzzer.
    fn play_melody(&mut self, melody: Melody);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_duration_scales_with_division() {
        // 120 bpm: whole note = 2000 ms.
        assert_eq!(Step::new(Note::C4, 4).duration_ms(120), 500);
        assert_eq!(Step::new(Note::C4, 16).duration_ms(120), 125);
        assert_eq!(Step::new(Note::C4, 0).duration_ms(120), 0);
    }

    #[test]
    fn toggle_melodies_mirror_each_other() {
        let up: heapless::Vec<Note, 8> = Melody::Positive.score().iter().map(|s| s.note).collect();
        let down: heapless::Vec<Note, 8> =
            Melody::Negative.score().iter().map(|s| s.note).collect();
        assert_eq!(up[..3], [Note::C4, Note::AS4, Note::C5]);
        assert_eq!(down[..3], [Note::C5, Note::AS4, Note::C4]);
    }

    #[test]
    fn every_melody_ends_with_a_rest() {
        for melody in [Melody::Positive, Melody::Negative, Melody::Victory] {
            let last = melody.score().last().map(|s| s.note);
            assert_eq!(last, Some(Note::REST));
            assert!(melody.duration_ms() > 0);
        }
    }
}
