//! Keypad press gate.
//!
//! Rejects a short press that arrives sooner than `interval_ms` after the
//! previously *accepted* one. Rejected presses leave no trace: the
//! timestamp is not touched and the caller must skip all feedback.

/// Minimum-spacing gate over accepted press timestamps.
#[derive(Clone, Copy, Debug)]
pub struct DebounceGate {
    interval_ms: u64,
    last_accepted: Option<u64>,
}

impl DebounceGate {
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_accepted: None,
        }
    }

    /// Returns `true` and records `now_ms` iff the press is far enough
    /// from the last accepted one. The first press is always accepted.
    pub fn accept(&mut self, now_ms: u64) -> bool {
        if let Some(last) = self.last_accepted {
            if now_ms.saturating_sub(last) < self.interval_ms {
                return false;
            }
        }
        self.last_accepted = Some(now_ms);
        true
    }

    pub fn last_accepted(&self) -> Option<u64> {
        self.last_accepted
    }
}
