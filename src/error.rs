//! Unified error type for jukephone.
//!
//! The control loop itself is fail-soft and never returns errors; this
//! type covers construction-time validation and the hardware adapters.
//! All variants are fieldless so the enum stays `Copy` and alloc-free.

use core::fmt;

/// Top-level error type used across the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Configuration
    /// `max_track` is zero or exceeds the shuffle storage capacity.
    InvalidTrackRange,

    /// The equalizer preset count is zero.
    NoEqualizerPresets,

    /// The poll interval does not exceed the player's status latency.
    PollIntervalTooShort,

    // Hardware
    /// A GPIO read or write failed.
    Gpio,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidTrackRange => f.write_str("track range must be 1..=capacity"),
            Error::NoEqualizerPresets => f.write_str("equalizer preset count is zero"),
            Error::PollIntervalTooShort => {
                f.write_str("poll interval must exceed the player status latency")
            }
            Error::Gpio => f.write_str("gpio access failed"),
        }
    }
}
