//! Shared building blocks for folio containers.
//!
//! This crate holds the pieces a scrolling container needs from its host:
//! physical and density-independent units, timestamped pointer input, a
//! velocity tracker, and the [`ViewHooks`](view::ViewHooks) trait through
//! which a host drives a container's measure, frame, draw and input
//! lifecycle.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod dp;
pub mod logging;
pub mod pointer;
pub mod px;
pub mod velocity;
pub mod view;

pub use crate::{
    dp::Dp,
    logging::init_tracing,
    pointer::{PointerEvent, PointerEventContent, PointerId, PointerSample},
    px::{Px, PxRect, PxSize},
    velocity::VelocityTracker,
    view::{NestedScroll, PointerDispatch, ViewHooks},
};
