//! Notifications a pager emits for its host.

use folio_ui::Px;

use crate::scroll_physics::ScrollState;

/// Something the host may want to react to.
///
/// Events queue up inside the pager until drained with
/// [`InfinitePager::take_events`](crate::InfinitePager::take_events).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PagerEvent {
    /// The scroll offset changed.
    PageScrolled {
        /// Leftmost page currently visible.
        position: usize,
        /// How far `position` is scrolled out of view, in `0.0..1.0`.
        offset: f32,
        /// The same distance in pixels.
        offset_pixels: Px,
    },
    /// A new page became the current one.
    PageSelected(usize),
    /// The scroll state changed.
    ScrollStateChanged(ScrollState),
}
