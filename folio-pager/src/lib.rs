//! Windowed, gesture-driven pager core.
//!
//! An [`InfinitePager`] shows one page of a long sequence at a time and lets
//! the user swipe between neighbours. Only a small window of pages around the
//! current one is materialized through the [`PagerAdapter`]; everything else
//! is created on demand and destroyed when it leaves the window.
//!
//! # Example
//!
//! ```
//! use folio_pager::{InfinitePager, PagerAdapter, PagerArgs, PagerEvent};
//! use folio_ui::{Px, PxSize, ViewHooks};
//!
//! struct Labels(Vec<String>);
//!
//! impl PagerAdapter for Labels {
//!     type Item = String;
//!
//!     fn count(&self) -> usize {
//!         self.0.len()
//!     }
//!
//!     fn instantiate_item(&mut self, position: usize) -> String {
//!         self.0[position].clone()
//!     }
//!
//!     fn destroy_item(&mut self, _position: usize, _item: String) {}
//! }
//!
//! let labels = Labels((0..10).map(|i| format!("page {i}")).collect());
//! let mut pager = InfinitePager::with_adapter(PagerArgs::default(), labels);
//! pager.measure(PxSize::new(Px(400), Px(300)));
//!
//! pager.set_current_item(4, false);
//! assert_eq!(pager.items().positions(), vec![3, 4, 5]);
//! assert_eq!(pager.take_events(), vec![PagerEvent::PageSelected(4)]);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod adapter;
pub mod edge_pull;
mod error;
pub mod event;
pub mod gesture;
pub mod item_window;
pub mod pager;
pub mod reconcile;
pub mod scroll_physics;
pub mod snapshot;


pub use crate::{
    adapter::{DataSetObserver, ItemPosition, PagerAdapter},
    error::PagerError,
    event::PagerEvent,
    pager::{InfinitePager, NavigationKey, OverScrollMode, PagePlacement, PagerArgs, PagerFrame},
    scroll_physics::ScrollState,
    snapshot::PagerSnapshot,
};
