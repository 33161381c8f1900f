//! Overscroll feedback at the ends of the sequence.

use std::time::Instant;

/// Decay rate of a released pull, per second.
const RELEASE_DECAY_RATE: f32 = 6.0;

/// Below this a released pull counts as finished.
const FINISHED_EPSILON: f32 = 0.001;

/// Normalized pull past one edge, in `0.0..=1.0`.
///
/// Pulls accumulate while the pointer drags past the edge. After
/// [`EdgePull::on_release`] the amount decays exponentially toward zero on
/// each [`EdgePull::tick`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgePull {
    amount: f32,
    releasing: bool,
    last_tick: Option<Instant>,
}

impl EdgePull {
    /// Adds a pull of `delta` page widths.
    pub fn on_pull(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        self.releasing = false;
        self.last_tick = None;
        self.amount = (self.amount + delta.abs()).clamp(0.0, 1.0);
    }

    /// Starts decaying the accumulated pull.
    pub fn on_release(&mut self) {
        if self.amount > 0.0 {
            self.releasing = true;
            self.last_tick = None;
        }
    }

    /// Advances the decay. Returns true while the pull is still visible.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.releasing {
            let last = *self.last_tick.get_or_insert(now);
            let dt = now.saturating_duration_since(last).as_secs_f32();
            self.last_tick = Some(now);
            self.amount *= (-RELEASE_DECAY_RATE * dt).exp();
            if self.amount < FINISHED_EPSILON {
                self.finish();
            }
        }
        !self.is_finished()
    }

    /// Drops the pull immediately.
    pub fn finish(&mut self) {
        self.amount = 0.0;
        self.releasing = false;
        self.last_tick = None;
    }

    /// True when nothing is left to show.
    pub fn is_finished(&self) -> bool {
        self.amount <= 0.0
    }

    /// Current normalized amount.
    pub fn amount(&self) -> f32 {
        self.amount
    }
}
