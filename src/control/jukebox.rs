//! The jukebox control state machine.
//!
//! [`Jukebox`] is the single owner of all playback state. Input events,
//! timer expiries, and the fixed poll tick are all delivered as method
//! calls, so whoever drives it (the embedded control task, or a test)
//! serialises every mutation by construction.

use crate::config::{Tunables, EASTER_EGG_PROMPT};
use crate::control::command::{CommandSlot, PlayerCommand};
use crate::control::debounce::DebounceGate;
use crate::control::entry::{DigitOutcome, EntryBuffer};
use crate::control::keymap::{self, ButtonAction, KeyAction, LongPressAction, LONG_PRESS_TONE};
use crate::control::scheduler::{Scheduler, TimerKind};
use crate::control::shuffle::ShuffleOrder;
use crate::control::tracker::{StatusEdge, StatusTracker};
use crate::error::Error;
use crate::feedback::{Feedback, Melody};
use crate::input::{ButtonId, InputEvent, KeyId};
use crate::player::{Player, VolumeStep};

/// Locally asserted playback mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaybackMode {
    Playing,
    PausedOrIdle,
}

/// Keypad jukebox controller.
pub struct Jukebox<P, F> {
    tunables: Tunables,
    player: P,
    feedback: F,

    debounce: DebounceGate,
    entry: EntryBuffer,
    timers: Scheduler,
    commands: CommandSlot,
    tracker: StatusTracker,
    /// Created on the first random-track press.
    shuffle: Option<ShuffleOrder>,

    mode: PlaybackMode,
    paused: bool,
    repeat: bool,
    current_track: u16,
    equalizer: u8,
}

impl<P: Player, F: Feedback> Jukebox<P, F> {
    /// Build a controller with boot defaults: track 1, not paused, repeat
    /// off, equalizer preset 0.
    pub fn new(tunables: Tunables, player: P, feedback: F) -> Result<Self, Error> {
        tunables.validate()?;
        Ok(Self {
            tunables,
            player,
            feedback,
            debounce: DebounceGate::new(tunables.debounce_ms),
            entry: EntryBuffer::new(),
            timers: Scheduler::new(),
            commands: CommandSlot::new(),
            tracker: StatusTracker::new(),
            shuffle: None,
            mode: PlaybackMode::PausedOrIdle,
            paused: false,
            repeat: false,
            current_track: 1,
            equalizer: 0,
        })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Input
    // ═══════════════════════════════════════════════════════════════════

    /// Dispatch one input event.
    ///
    /// Timers already due at `now_ms` run first, so an event queued
    /// behind an expired deadline sees the state that deadline left.
    pub fn handle(&mut self, event: InputEvent, now_ms: u64) {
        self.on_timers(now_ms);
        match event {
            InputEvent::ShortPress(key) => self.on_short_press(key, now_ms),
            InputEvent::LongPress(key) => self.on_long_press(key),
            InputEvent::ButtonChange { button, pressed } => {
                self.on_button_change(button, pressed)
            }
        }
    }

    /// Short press: debounced, then pulse the indicator and dispatch.
    pub fn on_short_press(&mut self, key: KeyId, now_ms: u64) {
        if !self.debounce.accept(now_ms) {
            trace!("key {}: debounced", key.0);
            return;
        }
        debug!("key {}", key.0);

        self.feedback.pulse_indicator(self.tunables.blink_ms);

        let Some(action) = keymap::short_press_action(key) else {
            return;
        };

        match action {
            KeyAction::Digit(d) => self.enter_digit(d, now_ms),
            KeyAction::PrevTrack => self.prev_track(),
            KeyAction::NextTrack => self.next_track(),
            KeyAction::RandomTrack => self.random_track(now_ms),
            KeyAction::VolumeDown => self.request(PlayerCommand::VolumeDown),
            KeyAction::VolumeUp => self.request(PlayerCommand::VolumeUp),
            KeyAction::ToggleRepeat => self.toggle_repeat(),
            KeyAction::TogglePause => self.toggle_pause(),
        }

        if let Some(note) = action.tone() {
            self.feedback.play_tone(note, self.tunables.beep_ms);
        }
    }

    /// Long press: not debounced. Every key pulses and beeps.
    pub fn on_long_press(&mut self, key: KeyId) {
        debug!("key {}: long press", key.0);
        if let Some(LongPressAction::CycleEqualizer) = keymap::long_press_action(key) {
            self.next_eq_preset();
        }
        self.feedback.pulse_indicator(self.tunables.blink_ms);
        self.feedback.play_tone(LONG_PRESS_TONE, self.tunables.beep_ms);
    }

    /// Button edge: not debounced. Releases are ignored.
    pub fn on_button_change(&mut self, button: ButtonId, pressed: bool) {
        if !pressed {
            return;
        }
        debug!("button {}", button.0);
        if let Some(ButtonAction::Play) = keymap::button_action(button) {
            self.request(PlayerCommand::Play(self.current_track));
        }
        self.feedback.pulse_indicator(self.tunables.blink_ms);
    }

    // ═══════════════════════════════════════════════════════════════════
    // Operations
    // ═══════════════════════════════════════════════════════════════════

    /// Append a digit to the track-id prompt.
    ///
    /// Restarts the inactivity timer. A valid prompt becomes the current
    /// track and (re)starts the commit timer; an out-of-range prompt
    /// cancels any commit still pending from an earlier prefix.
    pub fn enter_digit(&mut self, digit: u8, now_ms: u64) {
        let timeout = self.tunables.input_timeout_ms;
        self.timers.arm(TimerKind::Inactivity, now_ms, timeout);

        let outcome = self.entry.push(digit, self.tunables.max_track);
        debug!("prompt: {}", self.entry.prompt());

        if self.entry.prompt() == EASTER_EGG_PROMPT {
            self.feedback.play_melody(Melody::Victory);
        }

        match outcome {
            DigitOutcome::Track(track) => {
                self.current_track = track;
                self.timers.arm(TimerKind::Commit, now_ms, timeout);
            }
            DigitOutcome::OutOfRange => self.timers.cancel(TimerKind::Commit),
            DigitOutcome::Empty => {}
        }
    }

    /// Step back one track; no-op at track 1. Cancels repeat.
    pub fn prev_track(&mut self) {
        if self.current_track > 1 {
            self.current_track -= 1;
            debug!("prev track: {}", self.current_track);
            self.request(PlayerCommand::Play(self.current_track));
            self.repeat = false;
        }
    }

    /// Step forward one track; no-op at the last track. Cancels repeat.
    pub fn next_track(&mut self) {
        if self.advance() {
            self.repeat = false;
        }
    }

    /// Play the next id of the shuffle cycle.
    pub fn random_track(&mut self, now_ms: u64) {
        let max_track = self.tunables.max_track;
        let shuffle = self
            .shuffle
            .get_or_insert_with(|| ShuffleOrder::new(max_track, now_ms));
        self.current_track = shuffle.next();
        debug!("random track: {}", self.current_track);
        self.request(PlayerCommand::Play(self.current_track));
    }

    pub fn toggle_repeat(&mut self) {
        self.repeat = !self.repeat;
        info!("repeat: {}", self.repeat);
        self.feedback.play_melody(if self.repeat {
            Melody::Positive
        } else {
            Melody::Negative
        });
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.request(PlayerCommand::Resume);
            self.paused = false;
            self.mode = PlaybackMode::Playing;
        } else {
            self.request(PlayerCommand::Pause);
            self.paused = true;
            self.mode = PlaybackMode::PausedOrIdle;
        }
        info!("paused: {}", self.paused);
    }

    /// Cycle to the next equalizer preset, wrapping to 0.
    pub fn next_eq_preset(&mut self) {
        self.equalizer = (self.equalizer + 1) % self.tunables.eq_preset_count;
        info!("equalizer preset: {}", self.equalizer);
        self.request(PlayerCommand::SetEqualizer);
    }

    /// Overwrite the pending player command.
    pub fn request(&mut self, cmd: PlayerCommand) {
        self.commands.request(cmd);
    }

    // ═══════════════════════════════════════════════════════════════════
    // Time
    // ═══════════════════════════════════════════════════════════════════

    /// Run every timer due at `now_ms`.
    pub fn on_timers(&mut self, now_ms: u64) {
        while let Some(token) = self.timers.due(now_ms) {
            if !self.timers.fire(token) {
                break;
            }
            match token.kind {
                TimerKind::Inactivity => {
                    trace!("input timeout");
                    self.entry.reset();
                }
                TimerKind::Commit => {
                    debug!("commit: track {}", self.current_track);
                    self.request(PlayerCommand::Play(self.current_track));
                }
            }
        }
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Fixed-period tick: send the pending command, or when none is
    /// pending, sample the player status.
    pub fn poll(&mut self) {
        let cmd = self.commands.drain();
        if cmd != PlayerCommand::PollStatus {
            debug!("player: {}", cmd);
        }

        match cmd {
            PlayerCommand::Play(track) => self.player.play(track),
            PlayerCommand::VolumeDown => self.player.volume_step(VolumeStep::Down),
            PlayerCommand::VolumeUp => self.player.volume_step(VolumeStep::Up),
            PlayerCommand::SetEqualizer => self.player.set_equalizer(self.equalizer),
            PlayerCommand::Pause => self.player.pause(),
            PlayerCommand::Resume => self.player.resume(),
            PlayerCommand::PollStatus => self.check_status(),
        }
    }

    fn check_status(&mut self) {
        let status = self.player.poll_status();
        let Some(edge) = self.tracker.observe(status) else {
            return;
        };
        debug!("status changed: {}", edge);

        match edge {
            StatusEdge::Started => self.mode = PlaybackMode::Playing,
            StatusEdge::Stopped => {
                self.mode = PlaybackMode::PausedOrIdle;
                if self.paused {
                    return;
                }
                info!("track {} completed", self.current_track);
                if self.repeat {
                    self.request(PlayerCommand::Play(self.current_track));
                } else {
                    // Completion advance leaves the repeat flag alone.
                    self.advance();
                }
            }
        }
    }

    /// Move to the next track and request it. Returns `false` at the end
    /// of the range.
    fn advance(&mut self) -> bool {
        if self.current_track >= self.tunables.max_track {
            return false;
        }
        self.current_track += 1;
        debug!("next track: {}", self.current_track);
        self.request(PlayerCommand::Play(self.current_track));
        true
    }

    // ═══════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════

    pub fn tunables(&self) -> &Tunables {
        &self.tunables
    }

    pub fn current_track(&self) -> u16 {
        self.current_track
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    pub fn equalizer(&self) -> u8 {
        self.equalizer
    }

    pub fn prompt(&self) -> u32 {
        self.entry.prompt()
    }

    pub fn pending_command(&self) -> PlayerCommand {
        self.commands.peek()
    }

    pub fn is_timer_armed(&self, kind: TimerKind) -> bool {
        self.timers.is_armed(kind)
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut F {
        &mut self.feedback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Note;
    use crate::player::PlayerStatus;

    #[derive(Default)]
    struct FakePlayer {
        sent: Vec<&'static str>,
        played: Vec<u16>,
        status: bool,
    }

    impl Player for FakePlayer {
        fn play(&mut self, track: u16) {
            self.sent.push("play");
            self.played.push(track);
        }
        fn pause(&mut self) {
            self.sent.push("pause");
        }
        fn resume(&mut self) {
            self.sent.push("resume");
        }
        fn volume_step(&mut self, step: VolumeStep) {
            self.sent.push(match step {
                VolumeStep::Down => "vol-",
                VolumeStep::Up => "vol+",
            });
        }
        fn set_equalizer(&mut self, _preset: u8) {
            self.sent.push("eq");
        }
        fn poll_status(&mut self) -> PlayerStatus {
            PlayerStatus::from(self.status)
        }
    }

    #[derive(Default)]
    struct FakeFeedback {
        pulses: usize,
        tones: Vec<Note>,
        melodies: Vec<Melody>,
    }

    impl Feedback for FakeFeedback {
        fn pulse_indicator(&mut self, _duration_ms: u32) {
            self.pulses += 1;
        }
        fn play_tone(&mut self, note: Note, _duration_ms: u32) {
            self.tones.push(note);
        }
        fn play_melody(&mut self, melody: Melody) {
            self.melodies.push(melody);
        }
    }

    fn jukebox() -> Jukebox<FakePlayer, FakeFeedback> {
        Jukebox::new(
            Tunables::default(),
            FakePlayer::default(),
            FakeFeedback::default(),
        )
        .unwrap()
    }

    #[test]
    fn boot_defaults() {
        let j = jukebox();
        assert_eq!(j.current_track(), 1);
        assert_eq!(j.mode(), PlaybackMode::PausedOrIdle);
        assert!(!j.is_paused());
        assert!(!j.repeat());
        assert_eq!(j.equalizer(), 0);
        assert_eq!(j.pending_command(), PlayerCommand::PollStatus);
        assert_eq!(j.next_deadline(), None);
    }

    #[test]
    fn invalid_tunables_rejected() {
        let bad = Tunables {
            max_track: 0,
            ..Tunables::default()
        };
        let result = Jukebox::new(bad, FakePlayer::default(), FakeFeedback::default());
        assert!(matches!(result, Err(Error::InvalidTrackRange)));
    }

    #[test]
    fn valid_digit_schedules_commit() {
        let mut j = jukebox();
        j.enter_digit(4, 0);
        j.enter_digit(2, 100);
        assert_eq!(j.current_track(), 42);
        assert_eq!(j.pending_command(), PlayerCommand::PollStatus);
        j.on_timers(1099);
        assert_eq!(j.pending_command(), PlayerCommand::PollStatus);
        j.on_timers(1100);
        assert_eq!(j.pending_command(), PlayerCommand::Play(42));
        assert_eq!(j.prompt(), 0);
    }

    #[test]
    fn overflow_cancels_pending_commit() {
        let mut j = jukebox();
        for (i, d) in [1u8, 0, 0, 0].into_iter().enumerate() {
            j.enter_digit(d, i as u64 * 10);
        }
        assert!(!j.is_timer_armed(TimerKind::Commit));
        assert_eq!(j.current_track(), 100);
        j.on_timers(10_000);
        assert_eq!(j.pending_command(), PlayerCommand::PollStatus);
        assert_eq!(j.prompt(), 0);
    }

    #[test]
    fn easter_egg_plays_victory_without_scheduling() {
        let mut j = jukebox();
        for (i, d) in [7u8, 7, 7, 7].into_iter().enumerate() {
            j.enter_digit(d, i as u64);
        }
        assert_eq!(j.feedback().melodies, [Melody::Victory]);
        assert_eq!(j.current_track(), 777);
        assert!(!j.is_timer_armed(TimerKind::Commit));
    }

    #[test]
    fn debounced_press_has_no_side_effects() {
        let mut j = jukebox();
        j.on_short_press(KeyId(0), 1000);
        j.on_short_press(KeyId(1), 1100);
        assert_eq!(j.prompt(), 1);
        assert_eq!(j.feedback().pulses, 1);
        assert_eq!(j.feedback().tones, [Note::C4]);
    }

    #[test]
    fn unmapped_key_still_pulses() {
        let mut j = jukebox();
        j.on_short_press(KeyId(19), 0);
        assert_eq!(j.feedback().pulses, 1);
        assert!(j.feedback().tones.is_empty());
        assert_eq!(j.pending_command(), PlayerCommand::PollStatus);
    }

    #[test]
    fn prev_and_next_clamp_and_cancel_repeat() {
        let mut j = jukebox();
        j.prev_track();
        assert_eq!(j.current_track(), 1);
        assert_eq!(j.pending_command(), PlayerCommand::PollStatus);

        j.toggle_repeat();
        j.next_track();
        assert_eq!(j.current_track(), 2);
        assert!(!j.repeat());
        assert_eq!(j.pending_command(), PlayerCommand::Play(2));
    }

    #[test]
    fn clamped_step_keeps_repeat() {
        let mut j = jukebox();
        j.toggle_repeat();
        j.prev_track();
        assert!(j.repeat());
    }

    #[test]
    fn poll_sends_pending_command_and_skips_status() {
        let mut j = jukebox();
        j.player_mut().status = true;
        j.request(PlayerCommand::VolumeUp);
        j.poll();
        assert_eq!(j.player().sent, ["vol+"]);
        // Status was not sampled on that tick.
        assert_eq!(j.mode(), PlaybackMode::PausedOrIdle);
        j.poll();
        assert_eq!(j.mode(), PlaybackMode::Playing);
    }

    #[test]
    fn later_step_replaces_pending_play() {
        let mut j = jukebox();
        j.next_track();
        j.next_track();
        j.poll();
        assert_eq!(j.player().played, [3]);
    }

    #[test]
    fn handle_runs_expired_timers_before_the_event() {
        let mut j = jukebox();
        j.handle(InputEvent::ShortPress(KeyId(4)), 0);
        j.handle(InputEvent::ShortPress(KeyId(1)), 300);

        // Both timers expired at 1300; the next digit arrives first.
        j.handle(InputEvent::ShortPress(KeyId(5)), 1400);
        assert_eq!(j.prompt(), 5);
        assert_eq!(j.current_track(), 5);
        assert_eq!(j.pending_command(), PlayerCommand::Play(42));

        j.poll();
        j.on_timers(2400);
        j.poll();
        assert_eq!(j.player().played, [42, 5]);
    }

    #[test]
    fn completion_advances() {
        let mut j = jukebox();
        j.player_mut().status = true;
        j.poll();
        j.player_mut().status = false;
        j.poll();
        assert_eq!(j.current_track(), 2);
        assert_eq!(j.pending_command(), PlayerCommand::Play(2));
    }

    #[test]
    fn completion_at_last_track_stops() {
        let tunables = Tunables {
            max_track: 3,
            ..Tunables::default()
        };
        let mut j = Jukebox::new(tunables, FakePlayer::default(), FakeFeedback::default()).unwrap();
        j.next_track();
        j.next_track();
        j.poll();
        j.player_mut().status = true;
        j.poll();
        j.player_mut().status = false;
        j.poll();
        assert_eq!(j.current_track(), 3);
        assert_eq!(j.pending_command(), PlayerCommand::PollStatus);
    }

    #[test]
    fn equalizer_wraps() {
        let mut j = jukebox();
        for _ in 0..5 {
            j.next_eq_preset();
        }
        assert_eq!(j.equalizer(), 5);
        j.next_eq_preset();
        assert_eq!(j.equalizer(), 0);
        assert_eq!(j.pending_command(), PlayerCommand::SetEqualizer);
    }

    #[test]
    fn repeat_toggle_melodies() {
        let mut j = jukebox();
        j.toggle_repeat();
        j.toggle_repeat();
        assert_eq!(j.feedback().melodies, [Melody::Positive, Melody::Negative]);
    }
}
