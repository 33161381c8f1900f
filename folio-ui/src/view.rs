//! Host integration hooks.
//!
//! A container core does not own a window or a view tree. The host wires its
//! own lifecycle to [`ViewHooks`]: it measures and lays out the container
//! when the available space changes, polls [`ViewHooks::compute_scroll`]
//! once per frame before drawing, and routes pointer input through
//! [`PointerDispatch`].

use std::time::Instant;

use crate::{
    pointer::{PointerEvent, PointerEventContent},
    px::PxSize,
};

/// Capabilities a host needs from a scrolling container.
pub trait ViewHooks {
    /// Where one child goes, produced by [`ViewHooks::layout`].
    type Placement;

    /// Per-frame drawing state produced by [`ViewHooks::draw`].
    type Frame;

    /// Receives the space assigned by the host and returns the size used.
    fn measure(&mut self, available: PxSize) -> PxSize;

    /// Positions the children inside the measured space.
    fn layout(&mut self) -> Vec<Self::Placement>;

    /// Advances running animations. Returns true while another frame is
    /// needed.
    fn compute_scroll(&mut self, now: Instant) -> bool;

    /// Produces the drawing state for the current frame.
    fn draw(&mut self, now: Instant) -> Self::Frame;

    /// Observes an event on its way to the container's children. Returning
    /// true claims the rest of the gesture for the container itself.
    fn on_intercept_pointer_event(&mut self, event: &PointerEvent, nested: &dyn NestedScroll) -> bool;

    /// Handles an event delivered to the container itself. Returns true if
    /// the event was consumed.
    fn on_pointer_event(&mut self, event: &PointerEvent) -> bool;
}

/// Answers questions about the content under a pointer.
pub trait NestedScroll {
    /// Whether a descendant at `(x, y)` can scroll horizontally by `dx`.
    fn can_scroll_horizontally(&self, dx: f32, x: f32, y: f32) -> bool;

    /// Whether a descendant at `(x, y)` wants to receive the gesture.
    fn accepts_pointer(&self, _x: f32, _y: f32) -> bool {
        false
    }
}

/// Content with nothing scrollable or touchable inside.
impl NestedScroll for () {
    fn can_scroll_horizontally(&self, _dx: f32, _x: f32, _y: f32) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DispatchTarget {
    Child,
    Container,
}

/// Routes a gesture between a container and its content.
///
/// While content owns the gesture every event passes through the container's
/// intercept hook first. Once the container claims, or when no content wants
/// the gesture, events go straight to [`ViewHooks::on_pointer_event`].
#[derive(Debug, Default)]
pub struct PointerDispatch {
    target: Option<DispatchTarget>,
}

impl PointerDispatch {
    /// Creates a dispatcher with no gesture in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once the container owns the current gesture.
    pub fn container_owns_gesture(&self) -> bool {
        self.target == Some(DispatchTarget::Container)
    }

    /// Delivers `event`. Returns true if the container consumed it.
    pub fn dispatch<V>(&mut self, view: &mut V, event: &PointerEvent, nested: &dyn NestedScroll) -> bool
    where
        V: ViewHooks + ?Sized,
    {
        if event.content == PointerEventContent::Down {
            self.target = None;
        }

        let consumed = match self.target {
            Some(DispatchTarget::Container) => view.on_pointer_event(event),
            Some(DispatchTarget::Child) => {
                if view.on_intercept_pointer_event(event, nested) {
                    tracing::trace!("container claimed gesture from content");
                    self.target = Some(DispatchTarget::Container);
                    true
                } else {
                    false
                }
            }
            None => {
                let claimed = view.on_intercept_pointer_event(event, nested);
                let content_wants = event
                    .primary()
                    .is_some_and(|p| nested.accepts_pointer(p.x, p.y));
                if !claimed && content_wants {
                    self.target = Some(DispatchTarget::Child);
                    false
                } else {
                    self.target = Some(DispatchTarget::Container);
                    view.on_pointer_event(event)
                }
            }
        };

        if matches!(
            event.content,
            PointerEventContent::Up | PointerEventContent::Cancel
        ) {
            self.target = None;
        }
        consumed
    }
}
