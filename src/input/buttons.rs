//! GPIO button input with async debouncing.
//!
//! The play button (the telephone's mute key) is active-low with a
//! pull-up. The task waits for a GPIO edge, debounces it, and sends a
//! `ButtonChange` for both press and release; the control core decides
//! what a release means.

use crate::config::{BUTTON_DEBOUNCE_MS, INPUT_QUEUE_DEPTH};
use crate::input::{ButtonId, InputEvent};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Timer};
use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;

/// Run a single button loop.
///
/// Waits for the pin to go low (pressed), debounces, reports the press,
/// then does the same for the release.
pub async fn button_task<B>(
    mut btn: B,
    button: ButtonId,
    tx: &Sender<'_, CriticalSectionRawMutex, InputEvent, INPUT_QUEUE_DEPTH>,
) -> !
where
    B: InputPin + Wait,
{
    loop {
        // Wait for falling edge (button press, active-low).
        if btn.wait_for_falling_edge().await.is_err() {
            warn!("Button {}: edge wait failed", button.0);
            Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
            continue;
        }

        // Debounce: wait and re-check.
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;

        if btn.is_low().unwrap_or(false) {
            info!("Button {}: pressed", button.0);
            tx.send(InputEvent::ButtonChange {
                button,
                pressed: true,
            })
            .await;

            // Wait for release to avoid repeat triggers.
            if btn.wait_for_rising_edge().await.is_err() {
                warn!("Button {}: release wait failed", button.0);
            }
            Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;

            tx.send(InputEvent::ButtonChange {
                button,
                pressed: false,
            })
            .await;
        }
    }
}
