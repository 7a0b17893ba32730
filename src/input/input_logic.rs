//! Per-key press / long-press edge detection.
//!
//! The scanner samples every key each scan period and feeds the raw
//! level here. A key reports `Pressed` on its down edge and, if still
//! held after `long_press_ms`, a single `LongPressed`.

use crate::config::{KEYPAD_KEYS, LONG_PRESS_MS};

/// Edge produced by [`HoldTracker::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyEdge {
    Pressed,
    LongPressed,
}

#[derive(Clone, Copy, Default)]
struct KeyState {
    /// Time the key went down, while it is held.
    down_since: Option<u64>,
    long_reported: bool,
}

/// Press/long-press tracker for every key in the matrix.
pub struct HoldTracker {
    keys: [KeyState; KEYPAD_KEYS],
    long_press_ms: u64,
}

impl HoldTracker {
    pub const fn new() -> Self {
        Self::with_threshold(LONG_PRESS_MS)
    }

    pub const fn with_threshold(long_press_ms: u64) -> Self {
        Self {
            keys: [KeyState {
                down_since: None,
                long_reported: false,
            }; KEYPAD_KEYS],
            long_press_ms,
        }
    }

    /// Feed one raw sample for `key`. Out-of-range keys are ignored.
    pub fn update(&mut self, key: usize, pressed: bool, now_ms: u64) -> Option<KeyEdge> {
        let state = self.keys.get_mut(key)?;

        match (state.down_since, pressed) {
            (None, true) => {
                state.down_since = Some(now_ms);
                state.long_reported = false;
                Some(KeyEdge::Pressed)
            }
            (Some(since), true) => {
                if !state.long_reported && now_ms.saturating_sub(since) >= self.long_press_ms {
                    state.long_reported = true;
                    Some(KeyEdge::LongPressed)
                } else {
                    None
                }
            }
            (Some(_), false) => {
                *state = KeyState::default();
                None
            }
            (None, false) => None,
        }
    }
}

impl Default for HoldTracker {
    fn default() -> Self {
        Self::new()
    }
}
