//! The set of materialized pages.
//!
//! An [`ItemWindow`] holds one [`ItemRecord`] per materialized position,
//! always sorted by position. [`ItemWindow::reconcile`] brings it in line
//! with the range `[current - margin, current + margin]` in one linear walk.

use std::ops::RangeInclusive;

/// A materialized page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord<T> {
    /// Logical position of the page.
    pub position: usize,
    /// The adapter's handle.
    pub item: T,
    /// Keeps the record alive outside the window while a jump animates
    /// through it.
    pub pending_removal: bool,
}

impl<T> ItemRecord<T> {
    /// Creates a record that is not pending removal.
    pub fn new(position: usize, item: T) -> Self {
        Self {
            position,
            item,
            pending_removal: false,
        }
    }
}

/// Result of [`ItemWindow::reconcile`].
#[derive(Debug)]
pub struct WindowDelta<T> {
    /// Positions instantiated, ascending.
    pub created: Vec<usize>,
    /// Records evicted from the window. The caller hands them back to the
    /// adapter.
    pub destroyed: Vec<ItemRecord<T>>,
}

impl<T> WindowDelta<T> {
    /// True if nothing was created or destroyed.
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.destroyed.is_empty()
    }
}

/// Positions that must be materialized around `current`, or `None` when
/// there is nothing to show.
pub fn window_range(current: usize, margin: usize, count: usize) -> Option<RangeInclusive<usize>> {
    if count == 0 {
        return None;
    }
    let start = current.saturating_sub(margin).min(count - 1);
    let end = current.saturating_add(margin).min(count - 1);
    Some(start..=end)
}

/// Ordered collection of materialized pages.
#[derive(Debug)]
pub struct ItemWindow<T> {
    records: Vec<ItemRecord<T>>,
}

impl<T> Default for ItemWindow<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T> ItemWindow<T> {
    /// Creates an empty window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of materialized records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if nothing is materialized.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in ascending position order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemRecord<T>> {
        self.records.iter()
    }

    /// Materialized positions, ascending.
    pub fn positions(&self) -> Vec<usize> {
        self.records.iter().map(|record| record.position).collect()
    }

    /// The record for `position`, if materialized.
    pub fn get(&self, position: usize) -> Option<&ItemRecord<T>> {
        self.records
            .binary_search_by_key(&position, |record| record.position)
            .ok()
            .map(|index| &self.records[index])
    }

    /// True if `position` is materialized.
    pub fn contains(&self, position: usize) -> bool {
        self.get(position).is_some()
    }

    /// Protects every record from eviction until
    /// [`ItemWindow::clear_pending_removal`].
    pub fn mark_all_pending_removal(&mut self) {
        for record in &mut self.records {
            record.pending_removal = true;
        }
    }

    /// Drops every pending flag. Returns true if any record was pending.
    pub fn clear_pending_removal(&mut self) -> bool {
        let mut any = false;
        for record in &mut self.records {
            any |= record.pending_removal;
            record.pending_removal = false;
        }
        any
    }

    /// Removes and returns every record.
    pub fn drain(&mut self) -> Vec<ItemRecord<T>> {
        std::mem::take(&mut self.records)
    }

    pub(crate) fn take_records(&mut self) -> Vec<ItemRecord<T>> {
        std::mem::take(&mut self.records)
    }

    pub(crate) fn restore_records(&mut self, mut records: Vec<ItemRecord<T>>) {
        records.sort_by_key(|record| record.position);
        self.records = records;
    }

    /// Makes the window cover `[current - margin, current + margin]`
    /// clipped to `[0, count - 1]`.
    ///
    /// Records outside that range are evicted unless pending removal. Missing
    /// positions are instantiated in ascending order through `instantiate`.
    /// With `count == 0` every record is evicted, pending or not.
    pub fn reconcile(
        &mut self,
        current: usize,
        margin: usize,
        count: usize,
        mut instantiate: impl FnMut(usize) -> T,
    ) -> WindowDelta<T> {
        let Some(range) = window_range(current, margin, count) else {
            return WindowDelta {
                created: Vec::new(),
                destroyed: self.drain(),
            };
        };
        let (start, end) = (*range.start(), *range.end());

        let old = std::mem::take(&mut self.records);
        let mut kept = Vec::with_capacity(old.len() + range.count());
        let mut created = Vec::new();
        let mut destroyed = Vec::new();
        // Lowest in-range position that has no record yet.
        let mut next = start;

        for record in old {
            let in_range = record.position >= start && record.position <= end;
            if !in_range && !record.pending_removal {
                tracing::trace!(position = record.position, "evicting page");
                destroyed.push(record);
                continue;
            }
            while next <= end && next < record.position {
                tracing::trace!(position = next, "filling page");
                kept.push(ItemRecord::new(next, instantiate(next)));
                created.push(next);
                next += 1;
            }
            next = next.max(record.position.saturating_add(1));
            kept.push(record);
        }

        while next <= end {
            tracing::trace!(position = next, "appending page");
            kept.push(ItemRecord::new(next, instantiate(next)));
            created.push(next);
            next += 1;
        }

        self.records = kept;
        WindowDelta { created, destroyed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated(current: usize, margin: usize, count: usize) -> ItemWindow<String> {
        let mut window = ItemWindow::new();
        window.reconcile(current, margin, count, |p| format!("page-{p}"));
        window
    }

    #[test]
    fn fills_margin_around_current() {
        let window = populated(4, 1, 10);
        assert_eq!(window.positions(), vec![3, 4, 5]);
        assert_eq!(window.get(4).map(|r| r.item.as_str()), Some("page-4"));
        assert_eq!(populated(0, 2, 10).positions(), vec![0, 1, 2]);
        assert_eq!(populated(9, 2, 10).positions(), vec![7, 8, 9]);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let mut window = populated(4, 1, 10);
        let delta = window.reconcile(4, 1, 10, |p| format!("new-{p}"));
        assert!(delta.is_empty());
        assert_eq!(window.get(3).map(|r| r.item.as_str()), Some("page-3"));
    }

    #[test]
    fn moving_by_one_swaps_edges() {
        let mut window = populated(4, 1, 10);
        let delta = window.reconcile(5, 1, 10, |p| format!("page-{p}"));
        assert_eq!(delta.created, vec![6]);
        assert_eq!(
            delta.destroyed.iter().map(|r| r.position).collect::<Vec<_>>(),
            vec![3]
        );
        assert_eq!(window.positions(), vec![4, 5, 6]);
    }

    #[test]
    fn pending_records_survive_and_stay_sorted() {
        let mut window = populated(0, 1, 10);
        window.mark_all_pending_removal();
        let delta = window.reconcile(9, 1, 10, |p| format!("page-{p}"));
        assert!(delta.destroyed.is_empty());
        assert_eq!(window.positions(), vec![0, 1, 8, 9]);

        assert!(window.clear_pending_removal());
        let delta = window.reconcile(9, 1, 10, |p| format!("page-{p}"));
        assert_eq!(window.positions(), vec![8, 9]);
        assert_eq!(delta.destroyed.len(), 2);
    }

    #[test]
    fn backward_jump_fills_before_pending_records() {
        let mut window = populated(9, 1, 10);
        window.mark_all_pending_removal();
        window.reconcile(0, 1, 10, |p| format!("page-{p}"));
        assert_eq!(window.positions(), vec![0, 1, 8, 9]);
    }

    #[test]
    fn window_invariant_holds_for_every_center() {
        for count in 1..8usize {
            for margin in 1..3usize {
                let mut window = ItemWindow::new();
                for current in (0..count).chain((0..count).rev()) {
                    window.reconcile(current, margin, count, |p| p);
                    let low = current.saturating_sub(margin);
                    let high = (current + margin).min(count - 1);
                    assert_eq!(
                        window.positions(),
                        (low..=high).collect::<Vec<_>>(),
                        "count={count} margin={margin} current={current}"
                    );
                    assert!(window.iter().all(|r| r.item == r.position));
                }
            }
        }
    }

    #[test]
    fn empty_count_evicts_everything() {
        let mut window = populated(4, 1, 10);
        window.mark_all_pending_removal();
        let delta = window.reconcile(4, 1, 0, |p| format!("page-{p}"));
        assert!(window.is_empty());
        assert!(delta.created.is_empty());
        assert_eq!(delta.destroyed.len(), 3);
    }
}
