//! Application-wide constants and compile-time configuration.
//!
//! All timing parameters, keypad geometry, and track-range limits live
//! here so they can be tuned in one place. [`Tunables`] is the runtime
//! copy handed to the control core; its defaults come from these
//! constants.

use crate::error::Error;

// Tracks

/// Highest track number on the SD card (tracks are `0001.mp3` .. `0999.mp3`).
pub const NUM_TRACKS: u16 = 999;

/// Storage reserved for the shuffle permutation. `Tunables::max_track`
/// may not exceed it.
pub const TRACK_CAPACITY: usize = NUM_TRACKS as usize;

/// Number of equalizer presets on the player (Normal, Pop, Rock, Jazz,
/// Classic, Bass).
pub const EQ_PRESET_COUNT: u8 = 6;

// Timers and delays

/// Minimum spacing between two accepted keypad presses (ms).
pub const KEYPAD_DEBOUNCE_MS: u64 = 250;

/// Unsubmitted digit input is discarded after this interval (ms). The
/// same delay separates the last valid digit from the scheduled play.
pub const INPUT_TIMEOUT_MS: u64 = 1000;

/// Player poll period (ms). Must stay above the player's own status
/// latency or every read returns the previous state.
pub const PLAYER_POLL_MS: u64 = 350;

/// Status latency floor of the serial MP3 module (ms).
pub const PLAYER_STATUS_LATENCY_MS: u64 = 200;

/// Indicator LED pulse length for key feedback (ms).
pub const BLINK_DURATION_MS: u32 = 100;

/// Buzzer beep length for key feedback (ms).
pub const BEEP_DURATION_MS: u32 = 50;

/// Tempo used when rendering a [`crate::feedback::Melody`] score.
pub const MELODY_TEMPO_BPM: u32 = 144;

// Keypad
//
// Telephone keypad matrix, 4 rows × 5 columns. Key ids are
// `row * KEYPAD_COLS + col`:
//
//   col:   0    1    2    3    4
//   row 0: 1    2    3    RND  4
//   row 1: 5    6    RPT  7    8
//   row 2: 9    VOL+ PREV 0    NEXT
//   row 3: PAUS VOL- -    -    -

/// Keypad matrix rows.
pub const KEYPAD_ROWS: usize = 4;

/// Keypad matrix columns.
pub const KEYPAD_COLS: usize = 5;

/// Total number of key positions in the matrix.
pub const KEYPAD_KEYS: usize = KEYPAD_ROWS * KEYPAD_COLS;

/// Hold time after which a pressed key also reports a long press (ms).
pub const LONG_PRESS_MS: u64 = 1000;

/// Matrix scan period (ms).
pub const KEYPAD_SCAN_INTERVAL_MS: u64 = 10;

/// Settling time after driving a column low, before reading rows (µs).
pub const KEYPAD_SETTLE_US: u64 = 10;

// Extra button
//
// On the donor telephone the mute key is wired to its own GPIO rather
// than to the matrix; it acts as the play button.

/// Button id of the stand-alone play button (its GPIO number).
pub const PLAY_BUTTON_ID: u8 = 9;

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

// Easter egg

/// Typing this number plays the victory melody.
pub const EASTER_EGG_PROMPT: u32 = 7777;

// Embedded channel depths

/// Input events buffered between the scanners and the control task.
pub const INPUT_QUEUE_DEPTH: usize = 8;

/// Player requests buffered for the serial transport.
pub const PLAYER_QUEUE_DEPTH: usize = 4;

/// Tone/melody requests buffered for the buzzer driver.
pub const TONE_QUEUE_DEPTH: usize = 4;

/// Runtime-tunable parameters of the control core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tunables {
    /// Highest valid track id; valid ids are `1..=max_track`.
    pub max_track: u16,
    /// Minimum spacing between accepted short presses (ms).
    pub debounce_ms: u64,
    /// Inactivity and commit timeout for digit entry (ms).
    pub input_timeout_ms: u64,
    /// Fixed poll period (ms).
    pub poll_interval_ms: u64,
    /// Number of equalizer presets; presets are `0..eq_preset_count`.
    pub eq_preset_count: u8,
    /// Indicator pulse length (ms).
    pub blink_ms: u32,
    /// Key beep length (ms).
    pub beep_ms: u32,
}

impl Tunables {
    /// Check the parameters against the limits the core relies on.
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_track == 0 || usize::from(self.max_track) > TRACK_CAPACITY {
            return Err(Error::InvalidTrackRange);
        }
        if self.eq_preset_count == 0 {
            return Err(Error::NoEqualizerPresets);
        }
        if self.poll_interval_ms <= PLAYER_STATUS_LATENCY_MS {
            return Err(Error::PollIntervalTooShort);
        }
        Ok(())
    }
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            max_track: NUM_TRACKS,
            debounce_ms: KEYPAD_DEBOUNCE_MS,
            input_timeout_ms: INPUT_TIMEOUT_MS,
            poll_interval_ms: PLAYER_POLL_MS,
            eq_preset_count: EQ_PRESET_COUNT,
            blink_ms: BLINK_DURATION_MS,
            beep_ms: BEEP_DURATION_MS,
        }
    }
}
