//! Playback control core.
//!
//! Pure, clock-free logic: callers pass timestamps in milliseconds and
//! the controller talks to the outside world only through the
//! [`crate::player::Player`] and [`crate::feedback::Feedback`] traits.
//!
//! 1. **Debounce** - drops key presses that follow an accepted one too closely.
//! 2. **Entry** - accumulates digits into a track id.
//! 3. **Shuffle** - no-repeat random order over the track range.
//! 4. **Command** - last-write-wins slot drained by the poll tick.
//! 5. **Tracker** - busy/idle edge detection on the polled status.
//! 6. **Scheduler** - inactivity and commit timers.
//! 7. **Keymap** - key/button id to action tables.
//! 8. **Jukebox** - owns all of the above and the playback state.

pub mod command;
pub mod debounce;
pub mod entry;
pub mod jukebox;
pub mod keymap;
pub mod scheduler;
pub mod shuffle;
pub mod tracker;

pub use command::{CommandSlot, PlayerCommand};
pub use debounce::DebounceGate;
pub use entry::{DigitOutcome, EntryBuffer};
pub use jukebox::{Jukebox, PlaybackMode};
pub use scheduler::{Scheduler, TimerKind, TimerToken};
pub use shuffle::ShuffleOrder;
pub use tracker::{StatusEdge, StatusTracker};
