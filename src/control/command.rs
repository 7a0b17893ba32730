//! Single-slot player command queue.
//!
//! Producers overwrite the slot; the poll tick drains it once and puts
//! it back to [`PlayerCommand::PollStatus`]. Two requests between
//! drains collapse into the later one.

/// Work for the next poll tick.
///
/// `Play` carries the track chosen when it was requested, so a digit
/// typed before the next tick cannot redirect a committed play.
/// `SetEqualizer` applies whatever preset is current at drain time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerCommand {
    /// Nothing pending; the tick reads the player status instead.
    #[default]
    PollStatus,
    Play(u16),
    VolumeDown,
    VolumeUp,
    SetEqualizer,
    Pause,
    Resume,
}

/// Last-write-wins command slot.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommandSlot {
    pending: PlayerCommand,
}

impl CommandSlot {
    pub const fn new() -> Self {
        Self {
            pending: PlayerCommand::PollStatus,
        }
    }

    /// Replace whatever is pending with `cmd`.
    pub fn request(&mut self, cmd: PlayerCommand) {
        if self.pending != PlayerCommand::PollStatus && self.pending != cmd {
            trace!("command {} replaced by {}", self.pending, cmd);
        }
        self.pending = cmd;
    }

    /// Take the pending command, leaving the slot idle.
    pub fn drain(&mut self) -> PlayerCommand {
        core::mem::take(&mut self.pending)
    }

    pub fn peek(&self) -> PlayerCommand {
        self.pending
    }
}
