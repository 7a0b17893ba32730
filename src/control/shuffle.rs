//! Random playback order without repeats.
//!
//! Holds a full permutation of `1..=max_track` and a cursor. Each draw
//! takes the next id; once the whole permutation has been handed out a
//! fresh one is shuffled. An id can therefore only repeat across a cycle
//! boundary, never inside a cycle.

use crate::config::TRACK_CAPACITY;
use heapless::Vec;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Shuffled cycle over every track id.
pub struct ShuffleOrder {
    order: Vec<u16, TRACK_CAPACITY>,
    cursor: usize,
    rng: SmallRng,
}

impl ShuffleOrder {
    /// Build the first permutation of `1..=max_track` from `seed`.
    ///
    /// `max_track` is clamped to `1..=TRACK_CAPACITY`.
    pub fn new(max_track: u16, seed: u64) -> Self {
        let max_track = max_track.clamp(1, TRACK_CAPACITY as u16);
        let order: Vec<u16, TRACK_CAPACITY> = (1..=max_track).collect();

        let mut shuffle = Self {
            order,
            cursor: 0,
            rng: SmallRng::seed_from_u64(seed),
        };
        shuffle.regenerate();
        shuffle
    }

    /// Next id of the current cycle.
    pub fn next(&mut self) -> u16 {
        let track = self.order[self.cursor];
        self.cursor += 1;
        if self.cursor >= self.order.len() {
            self.regenerate();
        }
        track
    }

    fn regenerate(&mut self) {
        self.order.shuffle(&mut self.rng);
        self.cursor = 0;
        debug!("shuffle: new cycle of {} tracks", self.order.len());
    }
}
