//! Horizontal drag tracking.
//!
//! [`GestureTracker`] holds the per-gesture state of a pager: which pointer
//! drives it, where it started, whether the horizontal slop was crossed, and
//! the velocity samples needed to decide where a release should settle. It
//! knows nothing about pages beyond the [`DragBounds`] it is handed.

use std::time::Instant;

use folio_ui::{
    Px,
    pointer::{PointerEvent, PointerId, PointerSample},
    velocity::VelocityTracker,
};

/// Pointer id used for velocity samples synthesized by a fake drag.
pub const FAKE_DRAG_POINTER: PointerId = PointerId(u64::MAX);

/// Outcome of comparing a move against the touch slop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlopDecision {
    /// Not far enough in either direction yet.
    Undecided,
    /// Horizontal motion won; the drag started.
    Drag,
    /// Vertical motion won; the gesture belongs to someone else.
    Reject,
}

/// Scroll range a drag may cover, one page either side of the current one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragBounds {
    /// Smallest reachable scroll offset.
    pub min: f32,
    /// Largest reachable scroll offset.
    pub max: f32,
    /// Whether `min` is the start of the sequence.
    pub min_is_edge: bool,
    /// Whether `max` is the end of the sequence.
    pub max_is_edge: bool,
}

impl DragBounds {
    /// Bounds around `current` for a sequence of `count` pages placed
    /// `width_unit` pixels apart.
    pub fn around(current: usize, count: usize, width_unit: Px) -> Self {
        let unit = width_unit.raw().max(0) as f32;
        let last = count.saturating_sub(1);
        let min = current.saturating_sub(1) as f32 * unit;
        let max = current.saturating_add(1).min(last) as f32 * unit;
        Self {
            min,
            max,
            min_is_edge: min == 0.0,
            max_is_edge: max == last as f32 * unit,
        }
    }

    fn apply(&self, scroll: f32) -> (f32, f32, f32) {
        if scroll < self.min {
            let over = if self.min_is_edge { self.min - scroll } else { 0.0 };
            (self.min, over, 0.0)
        } else if scroll > self.max {
            let over = if self.max_is_edge { scroll - self.max } else { 0.0 };
            (self.max, 0.0, over)
        } else {
            (scroll, 0.0, 0.0)
        }
    }
}

/// Result of moving a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStep {
    /// New whole-pixel scroll offset.
    pub scroll_x: Px,
    /// Pixels dragged past the start of the sequence.
    pub leading_overscroll: f32,
    /// Pixels dragged past the end of the sequence.
    pub trailing_overscroll: f32,
}

/// Where a finished fake drag wants to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeDragRelease {
    /// Toward lower positions.
    Backward,
    /// Back to the current position.
    Stay,
    /// Toward higher positions.
    Forward,
}

/// Per-gesture touch state.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    is_being_dragged: bool,
    is_unable_to_drag: bool,
    active_pointer: Option<PointerId>,
    initial_motion_x: f32,
    last_motion_x: f32,
    last_motion_y: f32,
    velocity: VelocityTracker,
    fake_drag_began: Option<Instant>,
}

impl GestureTracker {
    /// Creates an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the horizontal drag has started.
    pub fn is_being_dragged(&self) -> bool {
        self.is_being_dragged
    }

    /// True once vertical motion ruled out a drag for this gesture.
    pub fn is_unable_to_drag(&self) -> bool {
        self.is_unable_to_drag
    }

    /// Pointer driving the drag.
    pub fn active_pointer(&self) -> Option<PointerId> {
        self.active_pointer
    }

    /// True between [`GestureTracker::begin_fake_drag`] and
    /// [`GestureTracker::end_fake_drag`].
    pub fn is_fake_dragging(&self) -> bool {
        self.fake_drag_began.is_some()
    }

    /// Last horizontal position consumed.
    pub fn last_motion_x(&self) -> f32 {
        self.last_motion_x
    }

    /// Records the first pointer of a new gesture. Any previous drag is
    /// forgotten.
    pub fn begin(&mut self, sample: &PointerSample) {
        self.initial_motion_x = sample.x;
        self.last_motion_x = sample.x;
        self.last_motion_y = sample.y;
        self.active_pointer = Some(sample.id);
        self.is_being_dragged = false;
        self.is_unable_to_drag = false;
    }

    /// Starts dragging without crossing the slop, used when catching a
    /// settle in flight.
    pub fn catch_drag(&mut self) {
        self.is_being_dragged = true;
        self.is_unable_to_drag = false;
    }

    /// Moves the motion origin to `(x, y)`.
    pub fn rebase(&mut self, x: f32, y: f32) {
        self.initial_motion_x = x;
        self.last_motion_x = x;
        self.last_motion_y = y;
    }

    /// Compares a move at `(x, y)` against `slop`.
    pub fn evaluate_slop(&mut self, x: f32, y: f32, slop: f32) -> SlopDecision {
        let x_diff = (x - self.last_motion_x).abs();
        let y_diff = (y - self.last_motion_y).abs();
        if x_diff > slop && x_diff > y_diff {
            self.is_being_dragged = true;
            self.last_motion_x = x;
            SlopDecision::Drag
        } else if y_diff > slop {
            self.is_unable_to_drag = true;
            SlopDecision::Reject
        } else {
            SlopDecision::Undecided
        }
    }

    /// Follows the active pointer to `x`, starting from `scroll_x`.
    ///
    /// The fraction lost by truncating to whole pixels is carried into the
    /// next move.
    pub fn drag_to(&mut self, x: f32, scroll_x: Px, bounds: DragBounds) -> DragStep {
        let delta = self.last_motion_x - x;
        self.last_motion_x = x;
        self.step(scroll_x.to_f32() + delta, bounds)
    }

    fn step(&mut self, raw: f32, bounds: DragBounds) -> DragStep {
        let (scroll, leading_overscroll, trailing_overscroll) = bounds.apply(raw);
        self.last_motion_x += scroll - scroll.trunc();
        DragStep {
            scroll_x: Px::from_f32(scroll),
            leading_overscroll,
            trailing_overscroll,
        }
    }

    /// Feeds every pointer of `event` to the velocity tracker.
    pub fn record(&mut self, event: &PointerEvent) {
        self.velocity.add_event(event);
    }

    /// A second pointer went down and takes over the drag.
    pub fn pointer_down(&mut self, sample: &PointerSample) {
        self.last_motion_x = sample.x;
        self.active_pointer = Some(sample.id);
    }

    /// A non-final pointer went up. If it was driving the drag, tracking moves
    /// to another pointer and the velocity history restarts.
    pub fn pointer_up(&mut self, event: &PointerEvent) {
        let Some(lifted) = event.action_pointer().map(|sample| sample.id) else {
            return;
        };
        if Some(lifted) != self.active_pointer {
            return;
        }
        if let Some(next) = event.pointers.iter().find(|sample| sample.id != lifted) {
            tracing::trace!(from = lifted.0, to = next.id.0, "drag pointer reassigned");
            self.last_motion_x = next.x;
            self.active_pointer = Some(next.id);
            self.velocity.clear();
        }
    }

    /// Horizontal velocity of the active pointer in px/s.
    pub fn release_velocity(&self, max: f32) -> f32 {
        self.active_pointer
            .map(|id| self.velocity.x_velocity(id, max))
            .unwrap_or(0.0)
    }

    /// Ends the gesture.
    pub fn end_drag(&mut self) {
        self.is_being_dragged = false;
        self.is_unable_to_drag = false;
        self.active_pointer = None;
        self.velocity.clear();
    }

    /// Starts a fake drag. Fails while a real drag is running.
    pub fn begin_fake_drag(&mut self, now: Instant) -> bool {
        if self.is_being_dragged {
            return false;
        }
        self.fake_drag_began = Some(now);
        self.initial_motion_x = 0.0;
        self.last_motion_x = 0.0;
        self.velocity.clear();
        self.velocity.add_sample(FAKE_DRAG_POINTER, now, 0.0, 0.0);
        true
    }

    /// Moves a fake drag by `offset` pixels of finger motion. Returns `None`
    /// when no fake drag is running.
    pub fn fake_drag_by(
        &mut self,
        offset: f32,
        scroll_x: Px,
        bounds: DragBounds,
        now: Instant,
    ) -> Option<DragStep> {
        self.fake_drag_began?;
        self.last_motion_x += offset;
        let step = self.step(scroll_x.to_f32() - offset, bounds);
        self.velocity
            .add_sample(FAKE_DRAG_POINTER, now, self.last_motion_x, 0.0);
        Some(step)
    }

    /// Ends a fake drag and decides its direction. A release counts when it
    /// is faster than `min_velocity` or travelled at least a third of
    /// `width`. Returns `None` when no fake drag is running.
    pub fn end_fake_drag(
        &mut self,
        min_velocity: f32,
        max_velocity: f32,
        width: Px,
    ) -> Option<(FakeDragRelease, f32)> {
        self.fake_drag_began.take()?;
        let velocity = self.velocity.x_velocity(FAKE_DRAG_POINTER, max_velocity);
        let travelled = (self.initial_motion_x - self.last_motion_x).abs();
        let release = if velocity.abs() > min_velocity || travelled >= (width.raw() / 3) as f32 {
            if self.last_motion_x > self.initial_motion_x {
                FakeDragRelease::Backward
            } else {
                FakeDragRelease::Forward
            }
        } else {
            FakeDragRelease::Stay
        };
        self.end_drag();
        Some((release, velocity))
    }
}
