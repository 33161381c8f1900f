//! Applying adapter data changes to the materialized window.

use crate::{
    adapter::ItemPosition,
    item_window::{ItemRecord, ItemWindow},
};

/// What [`apply_change`] did to the window.
#[derive(Debug)]
pub struct ChangeOutcome<T> {
    /// Records whose items no longer exist. The caller destroys them.
    pub removed: Vec<ItemRecord<T>>,
    /// New current position when the current item moved, was removed or
    /// fell off the end of the data set.
    pub current_follow: Option<usize>,
    /// Whether the window has to be reconciled again.
    pub needs_populate: bool,
}

/// Remaps every materialized record through `position_of`.
///
/// The records are walked as an owned snapshot and rebuilt, so removals never
/// shift the iteration. The window is sorted again afterwards; it may still
/// hold positions outside the new range until the next reconcile.
pub fn apply_change<T>(
    window: &mut ItemWindow<T>,
    current: usize,
    count: usize,
    margin: usize,
    mut position_of: impl FnMut(&T) -> ItemPosition,
) -> ChangeOutcome<T> {
    let full_window = margin.saturating_mul(2).saturating_add(1);
    let mut needs_populate = window.len() < full_window && window.len() < count;
    let mut current_follow = None;
    let mut removed = Vec::new();

    let snapshot = window.take_records();
    let mut kept = Vec::with_capacity(snapshot.len());
    for mut record in snapshot {
        match position_of(&record.item) {
            ItemPosition::Unchanged => kept.push(record),
            ItemPosition::Removed => {
                tracing::debug!(position = record.position, "page removed from data set");
                if record.position == current {
                    current_follow = Some(current.min(count.saturating_sub(1)));
                }
                needs_populate = true;
                removed.push(record);
            }
            ItemPosition::Moved(position) => {
                if position != record.position {
                    tracing::debug!(from = record.position, to = position, "page moved");
                    if record.position == current {
                        current_follow = Some(position);
                    }
                    record.position = position;
                    needs_populate = true;
                }
                kept.push(record);
            }
        }
    }
    window.restore_records(kept);

    if current_follow.is_none() && count > 0 && current >= count {
        current_follow = Some(count - 1);
    }
    if current_follow.is_some() || (count == 0 && !window.is_empty()) {
        needs_populate = true;
    }

    ChangeOutcome {
        removed,
        current_follow,
        needs_populate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(current: usize, count: usize) -> ItemWindow<usize> {
        let mut window = ItemWindow::new();
        window.reconcile(current, 1, count, |p| p);
        window
    }

    #[test]
    fn unchanged_data_needs_nothing() {
        let mut items = window(4, 10);
        let outcome = apply_change(&mut items, 4, 10, 1, |_| ItemPosition::Unchanged);
        assert!(outcome.removed.is_empty());
        assert_eq!(outcome.current_follow, None);
        assert!(!outcome.needs_populate);
        assert_eq!(items.positions(), vec![3, 4, 5]);
    }

    #[test]
    fn removing_current_keeps_index_in_range() {
        let mut items = window(4, 10);
        let outcome = apply_change(&mut items, 4, 9, 1, |&item| match item {
            4 => ItemPosition::Removed,
            5 => ItemPosition::Moved(4),
            other => ItemPosition::Moved(other),
        });
        assert_eq!(outcome.removed.len(), 1);
        assert_eq!(outcome.current_follow, Some(4));
        assert!(outcome.needs_populate);
        assert_eq!(items.positions(), vec![3, 4]);
    }

    #[test]
    fn removing_last_current_clamps() {
        let mut items = window(9, 10);
        let outcome = apply_change(&mut items, 9, 9, 1, |&item| {
            if item == 9 {
                ItemPosition::Removed
            } else {
                ItemPosition::Unchanged
            }
        });
        assert_eq!(outcome.current_follow, Some(8));
    }

    #[test]
    fn current_follows_a_move_and_order_is_restored() {
        let mut items = window(4, 10);
        let outcome = apply_change(&mut items, 4, 10, 1, |&item| match item {
            3 => ItemPosition::Moved(7),
            4 => ItemPosition::Moved(0),
            _ => ItemPosition::Unchanged,
        });
        assert_eq!(outcome.current_follow, Some(0));
        assert_eq!(items.positions(), vec![0, 5, 7]);
        assert_eq!(items.get(0).map(|r| r.item), Some(4));
    }

    #[test]
    fn shrinking_below_current_clamps() {
        let mut items = window(7, 10);
        let outcome = apply_change(&mut items, 7, 5, 1, |_| ItemPosition::Unchanged);
        assert_eq!(outcome.current_follow, Some(4));
        assert!(outcome.needs_populate);
    }
}
