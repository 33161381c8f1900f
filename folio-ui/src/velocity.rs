//! Pointer velocity estimation.
//!
//! [`VelocityTracker`] keeps a short history of positions per pointer and
//! reports the displacement rate across the most recent window of samples.
//! A pointer that paused before lifting therefore reports no velocity.

use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use smallvec::SmallVec;

use crate::pointer::{PointerEvent, PointerId};

/// Samples older than this, relative to the newest sample of a pointer, do
/// not contribute to its velocity.
pub const VELOCITY_SAMPLE_WINDOW: Duration = Duration::from_millis(100);

const MAX_SAMPLES_PER_POINTER: usize = 20;

#[derive(Debug, Clone)]
struct PointerTrack {
    id: PointerId,
    samples: VecDeque<(Instant, f32, f32)>,
}

impl PointerTrack {
    fn push(&mut self, now: Instant, x: f32, y: f32) {
        self.samples.push_back((now, x, y));
        while self.samples.len() > MAX_SAMPLES_PER_POINTER {
            self.samples.pop_front();
        }
        self.prune(now);
    }

    fn prune(&mut self, newest: Instant) {
        while let Some(&(timestamp, _, _)) = self.samples.front() {
            if newest.saturating_duration_since(timestamp) > VELOCITY_SAMPLE_WINDOW {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    fn velocity(&self) -> Option<(f32, f32)> {
        let &(first_time, first_x, first_y) = self.samples.front()?;
        let &(last_time, last_x, last_y) = self.samples.back()?;
        let elapsed = last_time.saturating_duration_since(first_time).as_secs_f32();
        if elapsed <= f32::EPSILON {
            return None;
        }
        Some(((last_x - first_x) / elapsed, (last_y - first_y) / elapsed))
    }
}

/// Tracks per-pointer velocity from a stream of [`PointerEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    tracks: SmallVec<[PointerTrack; 2]>,
}

impl VelocityTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the position of every pointer listed in `event`.
    pub fn add_event(&mut self, event: &PointerEvent) {
        for sample in &event.pointers {
            self.add_sample(sample.id, event.timestamp, sample.x, sample.y);
        }
    }

    /// Records a single position for `id`.
    pub fn add_sample(&mut self, id: PointerId, now: Instant, x: f32, y: f32) {
        match self.tracks.iter_mut().find(|track| track.id == id) {
            Some(track) => track.push(now, x, y),
            None => {
                let mut track = PointerTrack {
                    id,
                    samples: VecDeque::with_capacity(MAX_SAMPLES_PER_POINTER),
                };
                track.push(now, x, y);
                self.tracks.push(track);
            }
        }
    }

    /// Forgets every recorded sample.
    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    /// Velocity of `id` in pixels per `units`, each axis clamped to
    /// `[-max, max]`. Returns zero when fewer than two distinct-time samples
    /// are inside the window.
    pub fn velocity(&self, id: PointerId, units: Duration, max: f32) -> (f32, f32) {
        let Some((vx, vy)) = self
            .tracks
            .iter()
            .find(|track| track.id == id)
            .and_then(PointerTrack::velocity)
        else {
            return (0.0, 0.0);
        };
        let scale = units.as_secs_f32();
        let clamp = |v: f32| {
            let v = v * scale;
            if !v.is_finite() {
                0.0
            } else if max > 0.0 {
                v.clamp(-max, max)
            } else {
                v
            }
        };
        (clamp(vx), clamp(vy))
    }

    /// Horizontal velocity of `id` in pixels per second, clamped to
    /// `[-max, max]`.
    pub fn x_velocity(&self, id: PointerId, max: f32) -> f32 {
        self.velocity(id, Duration::from_secs(1), max).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(start: Instant, ms: u64) -> Instant {
        start + Duration::from_millis(ms)
    }

    #[test]
    fn steady_motion_reports_rate() {
        let start = Instant::now();
        let mut tracker = VelocityTracker::new();
        for step in 0..5u64 {
            tracker.add_sample(PointerId(0), at(start, step * 10), step as f32 * 20.0, 0.0);
        }
        let vx = tracker.x_velocity(PointerId(0), 10_000.0);
        assert!((vx - 2000.0).abs() < 1.0, "unexpected velocity {vx}");
    }

    #[test]
    fn pause_before_release_reports_zero() {
        let start = Instant::now();
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(PointerId(0), at(start, 0), 0.0, 0.0);
        tracker.add_sample(PointerId(0), at(start, 16), 50.0, 0.0);
        tracker.add_sample(PointerId(0), at(start, 400), 50.0, 0.0);
        assert_eq!(tracker.x_velocity(PointerId(0), 10_000.0), 0.0);
    }

    #[test]
    fn velocity_is_capped_and_per_pointer() {
        let start = Instant::now();
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(PointerId(1), at(start, 0), 0.0, 0.0);
        tracker.add_sample(PointerId(1), at(start, 10), -500.0, 0.0);
        assert_eq!(tracker.x_velocity(PointerId(1), 8000.0), -8000.0);
        assert_eq!(tracker.x_velocity(PointerId(2), 8000.0), 0.0);
        tracker.clear();
        assert_eq!(tracker.x_velocity(PointerId(1), 8000.0), 0.0);
    }
}
