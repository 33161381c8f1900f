//! The item factory a pager draws its pages from.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Where an already materialized item lives after a data change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemPosition {
    /// The item kept its position.
    Unchanged,
    /// The item no longer exists.
    Removed,
    /// The item moved to a new position.
    Moved(usize),
}

/// Handle through which an adapter tells its pager that the data set
/// changed.
///
/// The pager drains the flag on its own thread before the next frame,
/// measure or input event. Cloning shares the flag.
#[derive(Debug, Clone, Default)]
pub struct DataSetObserver {
    dirty: Arc<AtomicBool>,
}

impl DataSetObserver {
    /// Creates a clean observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the data set as changed.
    pub fn notify_changed(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    /// Clears the flag, returning whether it was set.
    pub fn take_changed(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }

    /// Whether both handles share one flag.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.dirty, &other.dirty)
    }
}

/// Supplies and recycles the items shown by an
/// [`InfinitePager`](crate::InfinitePager).
///
/// Positions are `0..count()`. The pager only ever holds a handful of items
/// at once and returns each of them through [`PagerAdapter::destroy_item`].
pub trait PagerAdapter {
    /// Handle for one materialized page.
    type Item;

    /// Number of logical positions.
    fn count(&self) -> usize;

    /// Called before a batch of instantiate/destroy calls.
    fn start_update(&mut self) {}

    /// Creates the item for `position`.
    fn instantiate_item(&mut self, position: usize) -> Self::Item;

    /// Releases an item previously created for `position`.
    fn destroy_item(&mut self, position: usize, item: Self::Item);

    /// Called after a batch of instantiate/destroy calls.
    fn finish_update(&mut self) {}

    /// Reports where `item` lives now. Consulted after a data change.
    fn item_position(&self, _item: &Self::Item) -> ItemPosition {
        ItemPosition::Unchanged
    }

    /// Tells the adapter which item is currently shown.
    fn set_primary_item(&mut self, _position: usize, _item: Option<&Self::Item>) {}

    /// Opaque state to persist alongside the pager position.
    fn save_state(&self) -> Option<Vec<u8>> {
        None
    }

    /// Restores state produced by [`PagerAdapter::save_state`].
    fn restore_state(&mut self, _state: &[u8]) {}

    /// Installs or removes the pager's change observer.
    fn register_observer(&mut self, _observer: Option<DataSetObserver>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observer_flag_is_shared_and_drained() {
        let observer = DataSetObserver::new();
        let handle = observer.clone();
        assert!(handle.same_as(&observer));
        handle.notify_changed();
        assert!(observer.take_changed());
        assert!(!observer.take_changed());
    }
}
