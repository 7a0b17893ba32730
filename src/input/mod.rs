//! Input subsystem - telephone keypad matrix + stand-alone play button.
//!
//! Scanners turn pin levels into [`InputEvent`]s and push them to the
//! control task over a channel.
//!
//! ## Components
//!
//! - **Keypad**: 4×5 matrix, scanned by driving one column low at a time
//! - **Button**: the mute key, wired to its own GPIO, reported on both edges
//! - **Hold tracking**: pure press/long-press edge logic shared by the scanner

#[cfg(feature = "embedded")]
pub mod buttons;
pub mod input_logic;
#[cfg(feature = "embedded")]
pub mod keypad;

/// Position of a key in the keypad matrix (`row * KEYPAD_COLS + col`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyId(pub u8);

/// Identifier of a stand-alone button (its GPIO number).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonId(pub u8);

/// Discrete input events delivered to the control core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Key went down.
    ShortPress(KeyId),
    /// Key has been held past the long-press threshold.
    LongPress(KeyId),
    /// Stand-alone button changed state.
    ButtonChange { button: ButtonId, pressed: bool },
}
