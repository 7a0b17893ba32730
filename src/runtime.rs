//! Embassy runtime - the control task and its hardware-facing ports.
//!
//! The [`Jukebox`] lives inside [`control_task`] and nowhere else. Input
//! scanners, the timer deadlines, and the poll ticker all reach it by
//! being awaited in the same `select`, so no lock guards its state.
//!
//! Outbound traffic is fire-and-forget: player requests and buzzer
//! requests are `try_send`-ed into bounded channels drained by the board
//! drivers, and a full channel drops the request with a warning.
//!
//! ```text
//!  keypad_task ─┐
//!  button_task ─┼─▶ INPUT ─▶ control_task ─▶ PlayerRequest ─▶ transport
//!               │              │    ▲
//!               │              │    └── BUSY pin
//!               │              ├─▶ indicator signal ─▶ indicator_task
//!               │              └─▶ ToneRequest ─▶ buzzer driver
//! ```

use crate::config::{INPUT_QUEUE_DEPTH, PLAYER_QUEUE_DEPTH, TONE_QUEUE_DEPTH};
use crate::control::Jukebox;
use crate::feedback::{Feedback, Melody, Note};
use crate::input::InputEvent;
use crate::player::{Player, PlayerStatus, VolumeStep};
use embassy_futures::select::{select, select3, Either, Either3};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker, Timer};
use embedded_hal::digital::{InputPin, OutputPin};

/// Input events from the scanners to the control task.
pub type InputChannel = Channel<CriticalSectionRawMutex, InputEvent, INPUT_QUEUE_DEPTH>;

/// Player requests from the control task to the serial transport.
pub type PlayerChannel = Channel<CriticalSectionRawMutex, PlayerRequest, PLAYER_QUEUE_DEPTH>;

/// Buzzer requests from the control task to the tone driver.
pub type ToneChannel = Channel<CriticalSectionRawMutex, ToneRequest, TONE_QUEUE_DEPTH>;

/// Indicator pulse lengths (ms); a newer value replaces an unread one.
pub type IndicatorSignal = Signal<CriticalSectionRawMutex, u32>;

/// A fully resolved player command, ready for the transport to frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum PlayerRequest {
    Play(u16),
    Pause,
    Resume,
    Volume(VolumeStep),
    Equalizer(u8),
}

/// Work for the buzzer driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum ToneRequest {
    Tone { note: Note, duration_ms: u32 },
    Melody(Melody),
}

// ═══════════════════════════════════════════════════════════════════════════
// Ports
// ═══════════════════════════════════════════════════════════════════════════

/// [`Player`] backed by a request channel and the player's BUSY line.
///
/// BUSY is active-low: the module pulls it low while a track plays.
/// Reading the line is more dependable than querying status over the
/// serial link on some clone modules.
pub struct LinkPlayer<'a, B> {
    requests: Sender<'a, CriticalSectionRawMutex, PlayerRequest, PLAYER_QUEUE_DEPTH>,
    busy_pin: B,
    last_status: PlayerStatus,
}

impl<'a, B: InputPin> LinkPlayer<'a, B> {
    pub fn new(
        requests: Sender<'a, CriticalSectionRawMutex, PlayerRequest, PLAYER_QUEUE_DEPTH>,
        busy_pin: B,
    ) -> Self {
        Self {
            requests,
            busy_pin,
            last_status: PlayerStatus::Idle,
        }
    }

    fn send(&mut self, request: PlayerRequest) {
        if self.requests.try_send(request).is_err() {
            warn!("Player: queue full, dropped {}", request);
        }
    }
}

impl<B: InputPin> Player for LinkPlayer<'_, B> {
    fn play(&mut self, track: u16) {
        self.send(PlayerRequest::Play(track));
    }

    fn pause(&mut self) {
        self.send(PlayerRequest::Pause);
    }

    fn resume(&mut self) {
        self.send(PlayerRequest::Resume);
    }

    fn volume_step(&mut self, step: VolumeStep) {
        self.send(PlayerRequest::Volume(step));
    }

    fn set_equalizer(&mut self, preset: u8) {
        self.send(PlayerRequest::Equalizer(preset));
    }

    fn poll_status(&mut self) -> PlayerStatus {
        // A failed read repeats the last known status.
        match self.busy_pin.is_low() {
            Ok(busy) => self.last_status = PlayerStatus::from(busy),
            Err(_) => warn!("Player: BUSY read failed"),
        }
        self.last_status
    }
}

/// [`Feedback`] backed by the indicator signal and the tone channel.
pub struct LinkFeedback<'a> {
    indicator: &'a IndicatorSignal,
    tones: Sender<'a, CriticalSectionRawMutex, ToneRequest, TONE_QUEUE_DEPTH>,
}

impl<'a> LinkFeedback<'a> {
    pub fn new(
        indicator: &'a IndicatorSignal,
        tones: Sender<'a, CriticalSectionRawMutex, ToneRequest, TONE_QUEUE_DEPTH>,
    ) -> Self {
        Self { indicator, tones }
    }

    fn send(&mut self, request: ToneRequest) {
        if self.tones.try_send(request).is_err() {
            warn!("Buzzer: queue full, dropped {}", request);
        }
    }
}

impl Feedback for LinkFeedback<'_> {
    fn pulse_indicator(&mut self, duration_ms: u32) {
        self.indicator.signal(duration_ms);
    }

    fn play_tone(&mut self, note: Note, duration_ms: u32) {
        self.send(ToneRequest::Tone { note, duration_ms });
    }

    fn play_melody(&mut self, melody: Melody) {
        self.send(ToneRequest::Melody(melody));
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tasks
// ═══════════════════════════════════════════════════════════════════════════

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

/// Wait until `deadline_ms`, or forever when there is none.
async fn wait_deadline(deadline_ms: Option<u64>) {
    match deadline_ms {
        Some(ms) => Timer::at(Instant::from_millis(ms)).await,
        None => core::future::pending::<()>().await,
    }
}

/// Own the jukebox and drive it from inputs, timers, and the poll tick.
pub async fn control_task<P, F>(
    mut jukebox: Jukebox<P, F>,
    events: Receiver<'_, CriticalSectionRawMutex, InputEvent, INPUT_QUEUE_DEPTH>,
) -> !
where
    P: Player,
    F: Feedback,
{
    let poll_ms = jukebox.tunables().poll_interval_ms;
    let mut ticker = Ticker::every(Duration::from_millis(poll_ms));
    info!("Control task running (poll every {} ms)", poll_ms);

    loop {
        let deadline = jukebox.next_deadline();
        match select3(events.receive(), wait_deadline(deadline), ticker.next()).await {
            Either3::First(event) => jukebox.handle(event, now_ms()),
            Either3::Second(()) => jukebox.on_timers(now_ms()),
            Either3::Third(()) => jukebox.poll(),
        }
    }
}

/// Drive the indicator LED from `signal`.
///
/// A pulse arriving while the LED is lit restarts the off-timer, so at
/// most one blink is ever pending.
pub async fn indicator_task<O: OutputPin>(mut led: O, signal: &IndicatorSignal) -> ! {
    loop {
        let mut duration_ms = signal.wait().await;
        if led.set_high().is_err() {
            warn!("Indicator: set_high failed");
        }

        loop {
            let off = Timer::after(Duration::from_millis(u64::from(duration_ms)));
            match select(off, signal.wait()).await {
                Either::First(()) => break,
                Either::Second(next) => duration_ms = next,
            }
        }

        if led.set_low().is_err() {
            warn!("Indicator: set_low failed");
        }
    }
}
