//! Player status edge detection.
//!
//! Only changes in the polled busy flag matter; a steady state, however
//! long, produces nothing.

use crate::player::PlayerStatus;

/// A change in the polled player status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusEdge {
    /// Idle → busy.
    Started,
    /// Busy → idle: the track finished, or the player was paused.
    Stopped,
}

/// Remembers the last polled status.
#[derive(Clone, Copy, Debug)]
pub struct StatusTracker {
    last: PlayerStatus,
}

impl StatusTracker {
    /// Starts as idle, the player's state at power-up.
    pub const fn new() -> Self {
        Self {
            last: PlayerStatus::Idle,
        }
    }

    /// Record `status` and report the edge, if it differs from the last.
    pub fn observe(&mut self, status: PlayerStatus) -> Option<StatusEdge> {
        let edge = match (self.last, status) {
            (PlayerStatus::Idle, PlayerStatus::Busy) => Some(StatusEdge::Started),
            (PlayerStatus::Busy, PlayerStatus::Idle) => Some(StatusEdge::Stopped),
            _ => None,
        };
        self.last = status;
        edge
    }

    pub fn last(&self) -> PlayerStatus {
        self.last
    }
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}
