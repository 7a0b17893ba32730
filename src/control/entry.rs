//! Numeric track-id entry.
//!
//! Digits accumulate as `prompt * 10 + digit`. The buffer only does the
//! arithmetic and range classification; the timers that reset it and
//! commit the selection live in the [`super::Jukebox`].

/// Classification of the prompt after a digit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitOutcome {
    /// The prompt is a valid track id.
    Track(u16),
    /// The prompt is still zero (only zeros typed).
    Empty,
    /// The prompt exceeds the track range and will never play.
    OutOfRange,
}

/// Accumulating digit prompt.
#[derive(Clone, Copy, Debug, Default)]
pub struct EntryBuffer {
    prompt: u32,
}

impl EntryBuffer {
    pub const fn new() -> Self {
        Self { prompt: 0 }
    }

    /// Append `digit` (0-9; larger values are clamped to 9).
    pub fn push(&mut self, digit: u8, max_track: u16) -> DigitOutcome {
        let digit = u32::from(digit.min(9));
        self.prompt = self.prompt.saturating_mul(10).saturating_add(digit);

        match self.prompt {
            0 => DigitOutcome::Empty,
            p if p <= u32::from(max_track) => DigitOutcome::Track(p as u16),
            _ => DigitOutcome::OutOfRange,
        }
    }

    pub fn prompt(&self) -> u32 {
        self.prompt
    }

    pub fn reset(&mut self) {
        self.prompt = 0;
    }
}
