//! Settle animation between page boundaries.
//!
//! A settle runs from a start offset to a target offset over a duration
//! derived from the distance in pages and the fling velocity that started it.
//! Offsets follow an ease-out cubic curve. The start time is bound by the
//! first [`ScrollPhysics::tick`] after scheduling, so scheduling needs no
//! clock.

use std::time::{Duration, Instant};

use folio_ui::{Dp, Px};

/// Upper bound for a settle animation.
pub const MAX_SETTLE_DURATION: Duration = Duration::from_millis(600);

/// Fling velocity that leaves the distance-derived duration unchanged.
pub const BASELINE_FLING_VELOCITY: Dp = Dp(2500.0);

/// Share of the distance-derived duration that fling velocity may add.
pub const FLING_VELOCITY_INFLUENCE: f32 = 0.4;

const MILLIS_PER_PAGE: f32 = 100.0;
const UNASSISTED_PADDING_MILLIS: f32 = 100.0;

/// Scroll state reported to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollState {
    /// At rest on a page boundary.
    #[default]
    Idle,
    /// Following a pointer or a fake drag.
    Dragging,
    /// Animating toward a page boundary.
    Settling,
}

/// Ease-out cubic: fast start, gentle landing.
pub fn ease_out_cubic(progress: f32) -> f32 {
    let t = progress.clamp(0.0, 1.0) - 1.0;
    t * t * t + 1.0
}

/// Tunables of the settle duration model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleConfig {
    /// Fling velocity in px/s at which the assisted duration equals the
    /// distance-derived duration plus `fling_influence` of it.
    pub baseline_velocity: f32,
    /// Weight of the velocity-assisted term.
    pub fling_influence: f32,
    /// Hard cap on the duration.
    pub max_duration: Duration,
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            baseline_velocity: BASELINE_FLING_VELOCITY.to_pixels_f32(),
            fling_influence: FLING_VELOCITY_INFLUENCE,
            max_duration: MAX_SETTLE_DURATION,
        }
    }
}

impl SettleConfig {
    /// Duration of a settle over `distance` pixels, with `width_unit` pixels
    /// per page and a release velocity in px/s.
    pub fn duration_for(&self, distance: u32, velocity: f32, width_unit: Px) -> Duration {
        let unit = width_unit.raw().max(1) as f32;
        let page_delta = distance as f32 / unit;
        let base = (page_delta * MILLIS_PER_PAGE).trunc();

        let velocity = velocity.abs();
        let millis = if velocity > 0.0 && self.baseline_velocity > 0.0 {
            let assisted = (base / (velocity / self.baseline_velocity)) * self.fling_influence;
            (base + assisted).trunc()
        } else {
            base + UNASSISTED_PADDING_MILLIS
        };

        let max_millis = self.max_duration.as_millis() as f32;
        let millis = if millis.is_finite() {
            millis.clamp(0.0, max_millis)
        } else {
            max_millis
        };
        Duration::from_millis(millis as u64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SettleAnimation {
    start: Px,
    target: Px,
    start_time: Option<Instant>,
    last_tick: Option<Instant>,
    duration: Duration,
}

impl SettleAnimation {
    fn elapsed(&self, now: Instant) -> Duration {
        self.start_time
            .map(|start| now.saturating_duration_since(start))
            .unwrap_or_default()
    }

    fn offset_at(&self, elapsed: Duration) -> Px {
        if elapsed >= self.duration {
            return self.target;
        }
        let progress = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        let delta = (self.target - self.start).to_f32();
        self.start + Px::saturating_from_f32(delta * ease_out_cubic(progress))
    }
}

/// Drives one settle animation at a time.
#[derive(Debug, Clone, Default)]
pub struct ScrollPhysics {
    config: SettleConfig,
    animation: Option<SettleAnimation>,
}

impl ScrollPhysics {
    /// Creates an idle physics instance.
    pub fn new(config: SettleConfig) -> Self {
        Self {
            config,
            animation: None,
        }
    }

    /// The duration model in use.
    pub fn config(&self) -> &SettleConfig {
        &self.config
    }

    /// Replaces the duration model. A running animation keeps its duration.
    pub fn set_config(&mut self, config: SettleConfig) {
        self.config = config;
    }

    /// Schedules a settle from `current` to `target`.
    ///
    /// Any running animation is replaced; callers pass the offset it had
    /// reached as `current`, so the new duration covers the remaining
    /// distance only. Returns `None`, leaving nothing running, when the two
    /// offsets are equal.
    pub fn animate_to(
        &mut self,
        current: Px,
        target: Px,
        velocity: f32,
        width_unit: Px,
    ) -> Option<Duration> {
        if current == target {
            self.animation = None;
            return None;
        }
        let distance = (target - current).abs();
        let duration = self.config.duration_for(distance, velocity, width_unit);
        tracing::debug!(?current, ?target, velocity, ?duration, "settle scheduled");
        self.start(current, target, duration);
        Some(duration)
    }

    /// Schedules a settle with an explicit duration.
    pub fn start(&mut self, from: Px, to: Px, duration: Duration) {
        self.animation = Some(SettleAnimation {
            start: from,
            target: to,
            start_time: None,
            last_tick: None,
            duration,
        });
    }

    /// Restarts the running animation from `from` toward `to` over the time
    /// it had left at its last tick. Returns false when nothing is running.
    pub fn resume_from(&mut self, from: Px, to: Px) -> bool {
        let Some(animation) = self.animation else {
            return false;
        };
        let elapsed = match (animation.start_time, animation.last_tick) {
            (Some(start), Some(last)) => last.saturating_duration_since(start),
            _ => Duration::ZERO,
        };
        let remaining = animation.duration.saturating_sub(elapsed);
        if from == to || remaining.is_zero() {
            self.animation = None;
            return false;
        }
        self.start(from, to, remaining);
        true
    }

    /// Advances the animation to `now`.
    ///
    /// Returns the offset and whether the animation is still running. At or
    /// past the duration the offset is exactly the target and the animation
    /// ends. With nothing scheduled, returns `None`.
    pub fn tick(&mut self, now: Instant) -> Option<(Px, bool)> {
        let animation = self.animation.as_mut()?;
        let start_time = *animation.start_time.get_or_insert(now);
        animation.last_tick = Some(now);
        let elapsed = now.saturating_duration_since(start_time);
        let offset = animation.offset_at(elapsed);
        if elapsed >= animation.duration {
            self.animation = None;
            return Some((offset, false));
        }
        Some((offset, true))
    }

    /// True while an animation is scheduled or running.
    pub fn is_running(&self) -> bool {
        self.animation.is_some()
    }

    /// Target of the running animation.
    pub fn final_offset(&self) -> Option<Px> {
        self.animation.map(|animation| animation.target)
    }

    /// Time left before the running animation lands.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.animation
            .map(|animation| animation.duration.saturating_sub(animation.elapsed(now)))
            .unwrap_or_default()
    }

    /// Ends the animation at its target, returning that target.
    pub fn abort(&mut self) -> Option<Px> {
        self.animation.take().map(|animation| animation.target)
    }

    /// Ends the animation where it currently is, returning that offset.
    pub fn stop_at(&mut self, now: Instant) -> Option<Px> {
        self.animation
            .take()
            .map(|animation| animation.offset_at(animation.elapsed(now)))
    }
}
