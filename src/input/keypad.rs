//! Telephone keypad matrix scanner.
//!
//! Columns are outputs idling high; rows are inputs with pull-ups. Each
//! scan drives one column low, lets the lines settle, and reads every
//! row: a low row means the key at that crossing is down. Raw levels go
//! through [`HoldTracker`] and the resulting edges are forwarded as
//! [`InputEvent`]s.
//!
//! Bounce is not filtered here; the control core gates short presses.

use crate::config::{
    INPUT_QUEUE_DEPTH, KEYPAD_COLS, KEYPAD_ROWS, KEYPAD_SCAN_INTERVAL_MS, KEYPAD_SETTLE_US,
};
use crate::error::Error;
use crate::input::input_logic::{HoldTracker, KeyEdge};
use crate::input::{InputEvent, KeyId};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Instant, Ticker, Timer};
use embedded_hal::digital::{InputPin, OutputPin};

/// Keypad wired as a row/column matrix.
pub struct KeypadMatrix<R, C> {
    rows: [R; KEYPAD_ROWS],
    cols: [C; KEYPAD_COLS],
    tracker: HoldTracker,
}

impl<R, C> KeypadMatrix<R, C>
where
    R: InputPin,
    C: OutputPin,
{
    /// Take ownership of the pins and park every column high.
    pub fn new(rows: [R; KEYPAD_ROWS], mut cols: [C; KEYPAD_COLS]) -> Self {
        for col in cols.iter_mut() {
            if let Err(e) = drive(col, true) {
                warn!("Keypad: failed to park column: {}", e);
            }
        }
        Self {
            rows,
            cols,
            tracker: HoldTracker::new(),
        }
    }

    /// Scan the whole matrix once, sending an event for every edge.
    pub async fn scan(
        &mut self,
        now_ms: u64,
        tx: &Sender<'_, CriticalSectionRawMutex, InputEvent, INPUT_QUEUE_DEPTH>,
    ) {
        for col in 0..KEYPAD_COLS {
            if let Err(e) = drive(&mut self.cols[col], false) {
                warn!("Keypad: column {} drive failed: {}", col, e);
                continue;
            }
            Timer::after(Duration::from_micros(KEYPAD_SETTLE_US)).await;

            for row in 0..KEYPAD_ROWS {
                // A failed read counts as "not pressed".
                let pressed = self.rows[row].is_low().unwrap_or(false);
                let key = row * KEYPAD_COLS + col;

                let event = match self.tracker.update(key, pressed, now_ms) {
                    Some(KeyEdge::Pressed) => InputEvent::ShortPress(KeyId(key as u8)),
                    Some(KeyEdge::LongPressed) => InputEvent::LongPress(KeyId(key as u8)),
                    None => continue,
                };
                debug!("Keypad: {}", event);
                tx.send(event).await;
            }

            if let Err(e) = drive(&mut self.cols[col], true) {
                warn!("Keypad: column {} release failed: {}", col, e);
            }
        }
    }
}

fn drive<C: OutputPin>(pin: &mut C, high: bool) -> Result<(), Error> {
    let result = if high { pin.set_high() } else { pin.set_low() };
    result.map_err(|_| Error::Gpio)
}

/// Scan the keypad forever at `KEYPAD_SCAN_INTERVAL_MS`.
pub async fn keypad_task<R, C>(
    mut keypad: KeypadMatrix<R, C>,
    tx: &Sender<'_, CriticalSectionRawMutex, InputEvent, INPUT_QUEUE_DEPTH>,
) -> !
where
    R: InputPin,
    C: OutputPin,
{
    let mut ticker = Ticker::every(Duration::from_millis(KEYPAD_SCAN_INTERVAL_MS));
    loop {
        keypad.scan(Instant::now().as_millis(), tx).await;
        ticker.next().await;
    }
}
