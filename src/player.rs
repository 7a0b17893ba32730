//! Interface to the serial MP3 player module.
//!
//! The wire protocol belongs to the transport behind [`Player`]; the
//! core only issues typed, fire-and-forget requests and reads a
//! best-effort busy status.

/// Busy state reported by the player.
///
/// Cheap clone modules misreport this now and then; callers treat it as
/// a hint and re-sample on the next poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerStatus {
    /// Not playing (paused, stopped, or finished).
    Idle,
    /// A track is playing.
    Busy,
}

impl From<bool> for PlayerStatus {
    fn from(busy: bool) -> Self {
        if busy {
            PlayerStatus::Busy
        } else {
            PlayerStatus::Idle
        }
    }
}

/// Direction of a single volume step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VolumeStep {
    Down,
    Up,
}

/// Commands the core can send to the player. None may block.
pub trait Player {
    /// Start playing `track` (1-based).
    fn play(&mut self, track: u16);

    fn pause(&mut self);

    fn resume(&mut self);

    fn volume_step(&mut self, step: VolumeStep);

    /// Select equalizer preset `preset` (`0..eq_preset_count`).
    fn set_equalizer(&mut self, preset: u8);

    /// Last known or freshly read busy state; never waits.
    fn poll_status(&mut self) -> PlayerStatus;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_from_busy_flag() {
        assert_eq!(PlayerStatus::from(true), PlayerStatus::Busy);
        assert_eq!(PlayerStatus::from(false), PlayerStatus::Idle);
    }
}
