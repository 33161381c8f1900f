//! Pointer input samples.
//!
//! Hosts translate their native touch or mouse events into [`PointerEvent`]s.
//! Every event carries a timestamp and the positions of all pointers that are
//! down at that moment, so consumers can follow an individual pointer across
//! multi-touch transitions.
//!
//! ```
//! use std::time::Instant;
//!
//! use folio_ui::pointer::{PointerEvent, PointerEventContent, PointerId};
//!
//! let now = Instant::now();
//! let down = PointerEvent::down(now, PointerId(0), 120.0, 40.0);
//! assert_eq!(down.content, PointerEventContent::Down);
//! assert_eq!(down.primary().map(|p| p.x), Some(120.0));
//! ```

use std::time::Instant;

use smallvec::{SmallVec, smallvec};

/// Identifies one pointer (finger, pen or mouse) for the lifetime of a
/// gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerId(pub u64);

/// Position of a single pointer within the receiving view, in physical
/// pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Pointer this sample belongs to.
    pub id: PointerId,
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
}

impl PointerSample {
    /// Creates a new sample.
    pub fn new(id: PointerId, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

/// What happened in a [`PointerEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventContent {
    /// The first pointer of a gesture went down.
    Down,
    /// One or more pointers moved.
    Move,
    /// The last pointer of a gesture went up.
    Up,
    /// The gesture was taken away from the receiver.
    Cancel,
    /// An additional pointer went down. `index` points into
    /// [`PointerEvent::pointers`].
    PointerDown {
        /// Index of the pointer that went down.
        index: usize,
    },
    /// A non-final pointer went up. `index` points into
    /// [`PointerEvent::pointers`]; the lifted pointer is still listed.
    PointerUp {
        /// Index of the pointer that went up.
        index: usize,
    },
}

/// A timestamped pointer event.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    /// When the event happened.
    pub timestamp: Instant,
    /// Event kind.
    pub content: PointerEventContent,
    /// Every pointer that is down, including one that is just lifting.
    pub pointers: SmallVec<[PointerSample; 2]>,
    /// Set when a down event started on the screen edge.
    pub edge_touch: bool,
}

impl PointerEvent {
    /// Creates an event from its parts.
    pub fn new(
        timestamp: Instant,
        content: PointerEventContent,
        pointers: impl IntoIterator<Item = PointerSample>,
    ) -> Self {
        Self {
            timestamp,
            content,
            pointers: pointers.into_iter().collect(),
            edge_touch: false,
        }
    }

    fn single(timestamp: Instant, content: PointerEventContent, sample: PointerSample) -> Self {
        Self {
            timestamp,
            content,
            pointers: smallvec![sample],
            edge_touch: false,
        }
    }

    /// Single-pointer down.
    pub fn down(timestamp: Instant, id: PointerId, x: f32, y: f32) -> Self {
        Self::single(timestamp, PointerEventContent::Down, PointerSample::new(id, x, y))
    }

    /// Single-pointer move.
    pub fn moved(timestamp: Instant, id: PointerId, x: f32, y: f32) -> Self {
        Self::single(timestamp, PointerEventContent::Move, PointerSample::new(id, x, y))
    }

    /// Single-pointer up.
    pub fn up(timestamp: Instant, id: PointerId, x: f32, y: f32) -> Self {
        Self::single(timestamp, PointerEventContent::Up, PointerSample::new(id, x, y))
    }

    /// Single-pointer cancel.
    pub fn cancel(timestamp: Instant, id: PointerId, x: f32, y: f32) -> Self {
        Self::single(timestamp, PointerEventContent::Cancel, PointerSample::new(id, x, y))
    }

    /// Marks a down event as starting on the screen edge.
    pub fn with_edge_touch(mut self, edge_touch: bool) -> Self {
        self.edge_touch = edge_touch;
        self
    }

    /// Finds the sample for `id`.
    pub fn find(&self, id: PointerId) -> Option<&PointerSample> {
        self.pointers.iter().find(|sample| sample.id == id)
    }

    /// The first listed pointer.
    pub fn primary(&self) -> Option<&PointerSample> {
        self.pointers.first()
    }

    /// The pointer that changed state in a `PointerDown` or `PointerUp`
    /// event, the primary pointer otherwise.
    pub fn action_pointer(&self) -> Option<&PointerSample> {
        match self.content {
            PointerEventContent::PointerDown { index } | PointerEventContent::PointerUp { index } => {
                self.pointers.get(index)
            }
            _ => self.primary(),
        }
    }
}
