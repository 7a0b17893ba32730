//! Keypad jukebox control core.
//!
//! Turns a landline telephone into a jukebox: digits typed on the keypad
//! select a track on a serial MP3 player module, `*`/`#` step through
//! tracks, and a handful of extra keys shuffle, repeat, pause, and set
//! the volume. The player's busy line is polled to advance or repeat
//! when a track ends.
//!
//! The control logic in [`control`] is `no_std`, clock-free, and runs on
//! the host: `cargo test`.
//!
//! With the `embedded` feature the crate also provides Embassy tasks for
//! the keypad matrix, the play button, the indicator LED, and the
//! control loop itself ([`runtime`]). The serial transport to the player
//! and the buzzer driver stay with the board crate; they consume the
//! typed request channels exposed by the runtime.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod control;
pub mod error;
pub mod feedback;
pub mod input;
pub mod player;
#[cfg(feature = "embedded")]
pub mod runtime;

pub use config::Tunables;
pub use control::{Jukebox, PlaybackMode, PlayerCommand};
pub use error::Error;
pub use feedback::{Feedback, Melody, Note};
pub use input::{ButtonId, InputEvent, KeyId};
pub use player::{Player, PlayerStatus, VolumeStep};
