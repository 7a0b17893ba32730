//! One-shot timers with at-most-one pending instance per kind.
//!
//! Arming a kind replaces its previous deadline and bumps its
//! generation, so a token handed out earlier can no longer fire.
//! Cancelling an idle or already-fired timer is a no-op.

/// Timers owned by the control core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerKind {
    /// Discards partial digit input.
    Inactivity,
    /// Plays the last valid digit entry.
    Commit,
}

impl TimerKind {
    const COUNT: usize = 2;
    const ALL: [TimerKind; Self::COUNT] = [TimerKind::Inactivity, TimerKind::Commit];

    const fn index(self) -> usize {
        match self {
            TimerKind::Inactivity => 0,
            TimerKind::Commit => 1,
        }
    }
}

/// Handle identifying one arming of a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerToken {
    pub kind: TimerKind,
    generation: u32,
}

#[derive(Clone, Copy, Debug, Default)]
struct Slot {
    deadline: Option<u64>,
    generation: u32,
}

/// Deadline table keyed by [`TimerKind`].
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    slots: [Slot; TimerKind::COUNT],
}

impl Scheduler {
    pub const fn new() -> Self {
        Self {
            slots: [Slot {
                deadline: None,
                generation: 0,
            }; TimerKind::COUNT],
        }
    }

    /// Arm `kind` to expire `delay_ms` after `now_ms`, cancelling any
    /// pending instance. Tokens from earlier armings go stale.
    pub fn arm(&mut self, kind: TimerKind, now_ms: u64, delay_ms: u64) {
        let slot = &mut self.slots[kind.index()];
        slot.generation = slot.generation.wrapping_add(1);
        slot.deadline = Some(now_ms.saturating_add(delay_ms));
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.slots[kind.index()].deadline = None;
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.slots[kind.index()].deadline.is_some()
    }

    pub fn deadline(&self, kind: TimerKind) -> Option<u64> {
        self.slots[kind.index()].deadline
    }

    /// Consume `token` if it is still the pending instance of its kind.
    /// Stale or cancelled tokens return `false`.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        let slot = &mut self.slots[token.kind.index()];
        if slot.deadline.is_some() && slot.generation == token.generation {
            slot.deadline = None;
            true
        } else {
            false
        }
    }

    /// Token of the earliest timer whose deadline is at or before
    /// `now_ms`. The timer stays armed until the token is fired.
    pub fn due(&self, now_ms: u64) -> Option<TimerToken> {
        TimerKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let slot = &self.slots[kind.index()];
                slot.deadline.map(|deadline| (deadline, kind, slot.generation))
            })
            .filter(|&(deadline, _, _)| deadline <= now_ms)
            .min_by_key(|&(deadline, _, _)| deadline)
            .map(|(_, kind, generation)| TimerToken { kind, generation })
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.slots.iter().filter_map(|slot| slot.deadline).min()
    }
}
