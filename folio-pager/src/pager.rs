//! Infinite pager controller.
//!
//! [`InfinitePager`] owns the current position and wires the item window,
//! the settle physics and the gesture tracker together. The host drives it
//! through [`ViewHooks`]: measure when the size changes, poll
//! [`compute_scroll`](ViewHooks::compute_scroll) once per frame, draw, and
//! forward pointer input. Listeners read [`PagerEvent`]s from
//! [`InfinitePager::take_events`].
//!
//! ## Usage
//!
//! Swipe through a long sequence of pages while only a handful of them exist
//! at any time.
use std::time::{Duration, Instant};

use derive_setters::Setters;
use folio_ui::{
    Dp, NestedScroll, PointerEvent, PointerEventContent, PointerSample, Px, PxRect, PxSize,
    ViewHooks,
};

use crate::{
    adapter::{DataSetObserver, PagerAdapter},
    edge_pull::EdgePull,
    error::PagerError,
    event::PagerEvent,
    gesture::{DragBounds, DragStep, FakeDragRelease, GestureTracker, SlopDecision},
    item_window::ItemWindow,
    reconcile::apply_change,
    scroll_physics::{
        BASELINE_FLING_VELOCITY, FLING_VELOCITY_INFLUENCE, MAX_SETTLE_DURATION, ScrollPhysics,
        ScrollState, SettleConfig,
    },
    snapshot::PagerSnapshot,
};

/// Smallest number of pages kept on each side of the current one.
pub const DEFAULT_OFFSCREEN_PAGES: usize = 1;

const DEFAULT_TOUCH_SLOP: Dp = Dp(16.0);
const DEFAULT_MIN_FLING_VELOCITY: Dp = Dp(50.0);
const DEFAULT_MAX_FLING_VELOCITY: Dp = Dp(8000.0);

/// When overscroll feedback is shown at the ends of the sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OverScrollMode {
    /// Always.
    Always,
    /// Only when there is more than one page.
    #[default]
    IfContentScrolls,
    /// Never.
    Never,
}

/// Keys that page through the sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationKey {
    /// Previous page.
    Left,
    /// Next page.
    Right,
    /// Next page.
    Tab,
    /// Previous page.
    ShiftTab,
}

/// Configuration arguments for [`InfinitePager`].
#[derive(Clone, Debug, PartialEq, Setters)]
pub struct PagerArgs {
    /// Pages kept materialized on each side of the current page. Values below
    /// one are raised to one.
    pub offscreen_page_limit: usize,
    /// Gap between adjacent pages.
    pub page_margin: Px,
    /// Horizontal distance a pointer must travel before a drag starts.
    pub touch_slop: Dp,
    /// Release velocity, per second, below which a drag does not count as a
    /// fling.
    pub min_fling_velocity: Dp,
    /// Cap on the measured release velocity, per second.
    pub max_fling_velocity: Dp,
    /// Fling velocity, per second, used as reference by the settle duration.
    pub baseline_fling_velocity: Dp,
    /// Weight of the fling velocity in the settle duration.
    pub fling_velocity_influence: f32,
    /// Upper bound of a settle animation.
    pub max_settle_duration: Duration,
    /// When overscroll feedback is reported.
    pub over_scroll_mode: OverScrollMode,
}

impl Default for PagerArgs {
    fn default() -> Self {
        Self {
            offscreen_page_limit: DEFAULT_OFFSCREEN_PAGES,
            page_margin: Px::ZERO,
            touch_slop: DEFAULT_TOUCH_SLOP,
            min_fling_velocity: DEFAULT_MIN_FLING_VELOCITY,
            max_fling_velocity: DEFAULT_MAX_FLING_VELOCITY,
            baseline_fling_velocity: BASELINE_FLING_VELOCITY,
            fling_velocity_influence: FLING_VELOCITY_INFLUENCE,
            max_settle_duration: MAX_SETTLE_DURATION,
            over_scroll_mode: OverScrollMode::default(),
        }
    }
}

impl PagerArgs {
    fn settle_config(&self) -> SettleConfig {
        SettleConfig {
            baseline_velocity: self.baseline_fling_velocity.to_pixels_f32(),
            fling_influence: self.fling_velocity_influence,
            max_duration: self.max_settle_duration,
        }
    }
}

/// Where a materialized page is laid out, in scroll-content coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PagePlacement {
    /// Logical position of the page.
    pub position: usize,
    /// Bounds of the page.
    pub rect: PxRect,
}

/// What the host needs to draw one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PagerFrame {
    /// Horizontal scroll offset of the content.
    pub scroll_x: Px,
    /// Gap between the two visible pages, in content coordinates, while
    /// the pager rests between page boundaries and has a margin.
    pub margin_gap: Option<PxRect>,
    /// Overscroll amount before the first page, `0.0..=1.0`.
    pub leading_edge: f32,
    /// Overscroll amount after the last page, `0.0..=1.0`.
    pub trailing_edge: f32,
    /// Whether overscroll feedback still animates.
    pub needs_redraw: bool,
}

fn to_isize(position: usize) -> isize {
    isize::try_from(position).unwrap_or(isize::MAX)
}

/// A horizontally paged container over an adapter's positions.
///
/// Only the current page and [`PagerArgs::offscreen_page_limit`] pages on
/// each side are materialized. All mutation happens through `&mut self`;
/// the adapter may flag data changes from elsewhere through its
/// [`DataSetObserver`], and the pager applies them before its next frame,
/// measure or input event.
pub struct InfinitePager<A: PagerAdapter> {
    args: PagerArgs,
    adapter: Option<A>,
    observer: DataSetObserver,
    items: ItemWindow<A::Item>,
    current_item: usize,
    restored: Option<PagerSnapshot>,
    size: PxSize,
    scroll_x: Px,
    scroll_state: ScrollState,
    physics: ScrollPhysics,
    scrolling: bool,
    populate_pending: bool,
    gesture: GestureTracker,
    leading_edge: EdgePull,
    trailing_edge: EdgePull,
    events: Vec<PagerEvent>,
}

impl<A: PagerAdapter> InfinitePager<A> {
    /// Creates a pager without an adapter.
    pub fn new(mut args: PagerArgs) -> Self {
        if args.offscreen_page_limit < DEFAULT_OFFSCREEN_PAGES {
            tracing::warn!(
                requested = args.offscreen_page_limit,
                "offscreen page limit too small, using {DEFAULT_OFFSCREEN_PAGES}"
            );
            args.offscreen_page_limit = DEFAULT_OFFSCREEN_PAGES;
        }
        let physics = ScrollPhysics::new(args.settle_config());
        Self {
            args,
            adapter: None,
            observer: DataSetObserver::new(),
            items: ItemWindow::new(),
            current_item: 0,
            restored: None,
            size: PxSize::ZERO,
            scroll_x: Px::ZERO,
            scroll_state: ScrollState::Idle,
            physics,
            scrolling: false,
            populate_pending: false,
            gesture: GestureTracker::new(),
            leading_edge: EdgePull::default(),
            trailing_edge: EdgePull::default(),
            events: Vec::new(),
        }
    }

    /// Creates a pager and attaches `adapter`.
    pub fn with_adapter(args: PagerArgs, adapter: A) -> Self {
        let mut pager = Self::new(args);
        pager.set_adapter(Some(adapter));
        pager
    }

    /// The configuration in use.
    pub fn args(&self) -> &PagerArgs {
        &self.args
    }

    /// The attached adapter.
    pub fn adapter(&self) -> Option<&A> {
        self.adapter.as_ref()
    }

    /// The attached adapter, mutably. Call
    /// [`InfinitePager::notify_data_set_changed`] after changing its data.
    pub fn adapter_mut(&mut self) -> Option<&mut A> {
        self.adapter.as_mut()
    }

    /// The observer handed to the attached adapter.
    pub fn observer(&self) -> DataSetObserver {
        self.observer.clone()
    }

    /// Current position.
    pub fn current_item(&self) -> usize {
        self.current_item
    }

    /// Horizontal scroll offset.
    pub fn scroll_x(&self) -> Px {
        self.scroll_x
    }

    /// Current scroll state.
    pub fn scroll_state(&self) -> ScrollState {
        self.scroll_state
    }

    /// Size assigned by the last measure.
    pub fn size(&self) -> PxSize {
        self.size
    }

    /// Materialized pages.
    pub fn items(&self) -> &ItemWindow<A::Item> {
        &self.items
    }

    /// Pages kept on each side of the current one.
    pub fn offscreen_page_limit(&self) -> usize {
        self.args.offscreen_page_limit
    }

    /// Gap between adjacent pages.
    pub fn page_margin(&self) -> Px {
        self.args.page_margin
    }

    /// True between [`InfinitePager::begin_fake_drag`] and
    /// [`InfinitePager::end_fake_drag`].
    pub fn is_fake_dragging(&self) -> bool {
        self.gesture.is_fake_dragging()
    }

    /// Drains the queued events.
    pub fn take_events(&mut self) -> Vec<PagerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Replaces the adapter, returning the previous one.
    ///
    /// Every page of the previous adapter is destroyed and the pager returns
    /// to position zero. A snapshot restored while no adapter was attached is
    /// applied to the new one.
    pub fn set_adapter(&mut self, adapter: Option<A>) -> Option<A> {
        let previous = self.adapter.take().map(|mut previous| {
            previous.register_observer(None);
            previous.start_update();
            for record in self.items.drain() {
                previous.destroy_item(record.position, record.item);
            }
            previous.finish_update();
            self.physics.abort();
            self.scrolling = false;
            self.current_item = 0;
            self.scroll_x = Px::ZERO;
            self.set_scroll_state(ScrollState::Idle);
            previous
        });

        if let Some(mut adapter) = adapter {
            self.observer.take_changed();
            adapter.register_observer(Some(self.observer.clone()));
            tracing::debug!(count = adapter.count(), "adapter attached");
            self.adapter = Some(adapter);
            self.populate_pending = false;
            match self.restored.take() {
                Some(snapshot) => self.apply_snapshot(snapshot),
                None => self.populate(),
            }
        }
        previous
    }

    /// Sets how many pages stay materialized on each side of the current
    /// one. Values below one are raised to one.
    pub fn set_offscreen_page_limit(&mut self, limit: usize) {
        let limit = if limit < DEFAULT_OFFSCREEN_PAGES {
            tracing::warn!(
                requested = limit,
                "offscreen page limit too small, using {DEFAULT_OFFSCREEN_PAGES}"
            );
            DEFAULT_OFFSCREEN_PAGES
        } else {
            limit
        };
        if limit != self.args.offscreen_page_limit {
            self.args.offscreen_page_limit = limit;
            self.populate();
        }
    }

    /// Sets the gap between pages, rescaling the scroll offset to match.
    pub fn set_page_margin(&mut self, margin: Px) {
        let old_margin = self.args.page_margin;
        self.args.page_margin = margin;
        let width = self.size.width;
        self.recompute_scroll_position(width, width, margin, old_margin);
    }

    /// Moves to `item`, clamped to the valid positions.
    pub fn set_current_item(&mut self, item: isize, smooth_scroll: bool) {
        self.populate_pending = false;
        self.set_current_item_internal(item, smooth_scroll, false, 0.0);
    }

    /// Animates to the previous page. Returns false at the first page.
    pub fn page_backward(&mut self) -> bool {
        if self.current_item > 0 {
            self.set_current_item(to_isize(self.current_item - 1), true);
            return true;
        }
        false
    }

    /// Animates to the next page. Returns false at the last page.
    pub fn page_forward(&mut self) -> bool {
        if self.current_item + 1 < self.adapter_count() {
            self.set_current_item(to_isize(self.current_item + 1), true);
            return true;
        }
        false
    }

    /// Handles a navigation key. Returns true if the pager moved.
    pub fn execute_key(&mut self, key: NavigationKey) -> bool {
        match key {
            NavigationKey::Left | NavigationKey::ShiftTab => self.page_backward(),
            NavigationKey::Right | NavigationKey::Tab => self.page_forward(),
        }
    }

    /// Captures the current position and the adapter's state.
    pub fn save_state(&self) -> PagerSnapshot {
        PagerSnapshot {
            position: self.current_item,
            adapter_state: self.adapter.as_ref().and_then(PagerAdapter::save_state),
        }
    }

    /// Returns to a saved position. Without an adapter the snapshot is kept
    /// until one is attached.
    pub fn restore_state(&mut self, snapshot: PagerSnapshot) {
        if self.adapter.is_some() {
            self.apply_snapshot(snapshot);
        } else {
            self.restored = Some(snapshot);
        }
    }

    /// Re-reads the adapter after its data changed.
    pub fn notify_data_set_changed(&mut self) {
        self.observer.take_changed();
        self.data_set_changed();
    }

    /// Starts a programmatic drag. Real touch input is ignored until
    /// [`InfinitePager::end_fake_drag`]. Returns false during a real drag or
    /// without data.
    pub fn begin_fake_drag(&mut self, now: Instant) -> bool {
        if self.adapter_count() == 0 || !self.gesture.begin_fake_drag(now) {
            return false;
        }
        self.set_scroll_state(ScrollState::Dragging);
        true
    }

    /// Drags by `offset` pixels of finger motion: positive values reveal
    /// lower positions.
    pub fn fake_drag_by(&mut self, offset: f32, now: Instant) -> Result<(), PagerError> {
        let bounds = self.drag_bounds();
        let step = self
            .gesture
            .fake_drag_by(offset, self.scroll_x, bounds, now)
            .ok_or(PagerError::NoFakeDrag)?;
        self.apply_drag_step(step);
        Ok(())
    }

    /// Ends a programmatic drag and settles on a page.
    pub fn end_fake_drag(&mut self) -> Result<(), PagerError> {
        let (release, _velocity) = self
            .gesture
            .end_fake_drag(
                self.args.min_fling_velocity.to_pixels_f32(),
                self.args.max_fling_velocity.to_pixels_f32(),
                self.size.width,
            )
            .ok_or(PagerError::NoFakeDrag)?;
        self.populate_pending = true;
        let current = to_isize(self.current_item);
        let target = match release {
            FakeDragRelease::Backward => current - 1,
            FakeDragRelease::Stay => current,
            FakeDragRelease::Forward => current + 1,
        };
        self.set_current_item_internal(target, true, true, 0.0);
        self.release_edges();
        Ok(())
    }

    fn adapter_count(&self) -> usize {
        self.adapter.as_ref().map_or(0, PagerAdapter::count)
    }

    fn width_unit(&self) -> Px {
        self.size.width + self.args.page_margin
    }

    fn offset_for_item(&self, item: usize) -> Px {
        self.width_unit().saturating_mul_usize(item)
    }

    fn drag_bounds(&self) -> DragBounds {
        DragBounds::around(self.current_item, self.adapter_count(), self.width_unit())
    }

    fn set_scroll_state(&mut self, state: ScrollState) {
        if self.scroll_state == state {
            return;
        }
        tracing::debug!(from = ?self.scroll_state, to = ?state, "scroll state changed");
        self.scroll_state = state;
        self.events.push(PagerEvent::ScrollStateChanged(state));
    }

    fn dispatch_page_scrolled(&mut self, scroll_x: Px) {
        let unit = self.width_unit();
        if unit <= Px::ZERO {
            return;
        }
        let scroll_x = scroll_x.raw().max(0);
        let position = scroll_x / unit.raw();
        let offset_pixels = scroll_x % unit.raw();
        self.events.push(PagerEvent::PageScrolled {
            position: position as usize,
            offset: offset_pixels as f32 / unit.to_f32(),
            offset_pixels: Px(offset_pixels),
        });
    }

    fn populate(&mut self) {
        let Some(adapter) = self.adapter.as_mut() else {
            return;
        };
        if self.populate_pending {
            tracing::trace!("populate pending, skipping");
            return;
        }

        adapter.start_update();
        let current = self.current_item;
        let count = adapter.count();
        let delta = self.items.reconcile(
            current,
            self.args.offscreen_page_limit,
            count,
            |position| adapter.instantiate_item(position),
        );
        if !delta.is_empty() {
            tracing::trace!(
                current,
                created = ?delta.created,
                destroyed = delta.destroyed.len(),
                "window populated"
            );
        }
        for record in delta.destroyed {
            adapter.destroy_item(record.position, record.item);
        }
        adapter.set_primary_item(current, self.items.get(current).map(|record| &record.item));
        adapter.finish_update();
    }

    fn set_current_item_internal(&mut self, item: isize, smooth_scroll: bool, always: bool, velocity: f32) {
        let count = self.adapter_count();
        if count == 0 {
            return;
        }
        if !always && to_isize(self.current_item) == item && !self.items.is_empty() {
            return;
        }
        let item = item.clamp(0, to_isize(count - 1)) as usize;
        if item.abs_diff(self.current_item) > self.args.offscreen_page_limit {
            tracing::debug!(from = self.current_item, to = item, "jump, keeping pages until settled");
            self.items.mark_all_pending_removal();
        }
        let dispatch_selected = self.current_item != item;
        self.current_item = item;
        self.populate();

        let dest = self.offset_for_item(item);
        if smooth_scroll {
            self.smooth_scroll_to(dest, velocity);
            if dispatch_selected {
                self.events.push(PagerEvent::PageSelected(item));
            }
        } else {
            if dispatch_selected {
                self.events.push(PagerEvent::PageSelected(item));
            }
            self.complete_scroll();
            self.scroll_x = dest;
        }
    }

    fn smooth_scroll_to(&mut self, dest: Px, velocity: f32) {
        if self.items.is_empty() {
            return;
        }
        if dest == self.scroll_x {
            self.complete_scroll();
            self.set_scroll_state(ScrollState::Idle);
            return;
        }
        self.scrolling = true;
        self.set_scroll_state(ScrollState::Settling);
        self.physics
            .animate_to(self.scroll_x, dest, velocity, self.width_unit());
    }

    fn complete_scroll(&mut self) {
        let mut needs_populate = self.scrolling;
        if self.scrolling {
            if let Some(dest) = self.physics.abort() {
                self.scroll_x = dest;
            }
            self.set_scroll_state(ScrollState::Idle);
        }
        self.populate_pending = false;
        self.scrolling = false;
        needs_populate |= self.items.clear_pending_removal();
        if needs_populate {
            self.populate();
        }
    }

    /// Stops a settle in flight where it is and hands it to the pointer.
    fn catch_settle(&mut self, now: Instant) {
        if let Some(offset) = self.physics.stop_at(now) {
            self.scroll_x = offset;
        }
        self.scrolling = false;
        self.populate_pending = false;

        let unit = self.width_unit();
        let count = self.adapter_count();
        let bounds = self.drag_bounds();
        let offset = self.scroll_x.to_f32();
        if unit > Px::ZERO && count > 0 && (offset < bounds.min || offset > bounds.max) {
            let nearest = ((offset / unit.to_f32()).round().max(0.0) as usize).min(count - 1);
            if nearest != self.current_item {
                self.current_item = nearest;
                self.events.push(PagerEvent::PageSelected(nearest));
            }
        }
        self.populate();
        self.gesture.catch_drag();
        self.set_scroll_state(ScrollState::Dragging);
    }

    fn recompute_scroll_position(&mut self, width: Px, old_width: Px, margin: Px, old_margin: Px) {
        let unit = width + margin;
        let old_unit = old_width + old_margin;
        if old_width > Px::ZERO && old_unit > Px::ZERO {
            let old_pos = self.scroll_x.raw();
            let old_item = old_pos / old_unit.raw();
            let fraction = (old_pos % old_unit.raw()) as f32 / old_unit.to_f32();
            let pos = Px::from_f32((old_item as f32 + fraction) * unit.to_f32());
            self.scroll_x = pos;
            if self.physics.is_running() {
                let dest = self.offset_for_item(self.current_item);
                self.physics.resume_from(pos, dest);
            }
        } else {
            let pos = self.offset_for_item(self.current_item);
            if pos != self.scroll_x {
                self.complete_scroll();
                self.scroll_x = pos;
            }
        }
    }

    fn poll_data_set(&mut self) {
        if self.observer.take_changed() {
            self.data_set_changed();
        }
    }

    fn data_set_changed(&mut self) {
        let Some(adapter) = self.adapter.as_mut() else {
            return;
        };
        let count = adapter.count();
        let outcome = apply_change(
            &mut self.items,
            self.current_item,
            count,
            self.args.offscreen_page_limit,
            |item| adapter.item_position(item),
        );
        if !outcome.removed.is_empty() {
            adapter.start_update();
            for record in outcome.removed {
                adapter.destroy_item(record.position, record.item);
            }
            adapter.finish_update();
        }

        if let Some(item) = outcome.current_follow {
            self.set_current_item_internal(to_isize(item), false, true, 0.0);
        }
        if outcome.needs_populate {
            self.populate();
        }
    }

    fn apply_snapshot(&mut self, snapshot: PagerSnapshot) {
        if let (Some(adapter), Some(state)) = (self.adapter.as_mut(), snapshot.adapter_state.as_deref()) {
            adapter.restore_state(state);
        }
        self.set_current_item_internal(to_isize(snapshot.position), false, true, 0.0);
    }

    fn apply_drag_step(&mut self, step: DragStep) {
        let width = self.size.width.to_f32();
        if width > 0.0 {
            if step.leading_overscroll > 0.0 {
                self.leading_edge.on_pull(step.leading_overscroll / width);
            }
            if step.trailing_overscroll > 0.0 {
                self.trailing_edge.on_pull(step.trailing_overscroll / width);
            }
        }
        self.scroll_x = step.scroll_x;
        self.dispatch_page_scrolled(step.scroll_x);
    }

    fn release_edges(&mut self) {
        self.leading_edge.on_release();
        self.trailing_edge.on_release();
    }

    fn active_sample<'a>(&self, event: &'a PointerEvent) -> Option<&'a PointerSample> {
        self.gesture.active_pointer().and_then(|id| event.find(id))
    }

    fn release_drag(&mut self) {
        let velocity = self
            .gesture
            .release_velocity(self.args.max_fling_velocity.to_pixels_f32());
        self.populate_pending = true;
        let unit = self.width_unit().raw().max(1);
        let current_page = to_isize((self.scroll_x.raw().max(0) / unit) as usize);
        let is_fling = velocity.abs() >= self.args.min_fling_velocity.to_pixels_f32();
        // A slow release returns to the page held before the drag.
        let next_page = if !is_fling {
            to_isize(self.current_item)
        } else if velocity > 0.0 {
            current_page
        } else {
            current_page + 1
        };
        tracing::debug!(velocity, current_page, next_page, "drag released");
        self.set_current_item_internal(next_page, true, true, velocity);
    }
}

impl<A: PagerAdapter> ViewHooks for InfinitePager<A> {
    type Placement = PagePlacement;
    type Frame = PagerFrame;

    fn measure(&mut self, available: PxSize) -> PxSize {
        self.poll_data_set();
        let old = self.size;
        self.size = available;
        if available.width != old.width {
            let margin = self.args.page_margin;
            self.recompute_scroll_position(available.width, old.width, margin, margin);
        }
        self.populate();
        available
    }

    fn layout(&mut self) -> Vec<PagePlacement> {
        self.populate();
        let unit = self.width_unit();
        self.items
            .iter()
            .map(|record| PagePlacement {
                position: record.position,
                rect: PxRect::new(
                    unit.saturating_mul_usize(record.position),
                    Px::ZERO,
                    self.size.width,
                    self.size.height,
                ),
            })
            .collect()
    }

    fn compute_scroll(&mut self, now: Instant) -> bool {
        self.poll_data_set();
        match self.physics.tick(now) {
            Some((offset, running)) => {
                self.scroll_x = offset;
                self.dispatch_page_scrolled(offset);
                if running {
                    return true;
                }
                self.complete_scroll();
            }
            None => self.complete_scroll(),
        }
        !self.leading_edge.is_finished() || !self.trailing_edge.is_finished()
    }

    fn draw(&mut self, now: Instant) -> PagerFrame {
        let show_edges = match self.args.over_scroll_mode {
            OverScrollMode::Always => true,
            OverScrollMode::IfContentScrolls => self.adapter_count() > 1,
            OverScrollMode::Never => false,
        };
        let mut needs_redraw = false;
        if show_edges {
            needs_redraw |= self.leading_edge.tick(now);
            needs_redraw |= self.trailing_edge.tick(now);
        } else {
            self.leading_edge.finish();
            self.trailing_edge.finish();
        }

        let margin = self.args.page_margin;
        let width = self.size.width;
        let margin_gap = if margin > Px::ZERO && width > Px::ZERO {
            let offset = self.scroll_x % self.width_unit();
            (offset != Px::ZERO).then(|| {
                let left = self.scroll_x - offset + width;
                PxRect::new(left, Px::ZERO, margin, self.size.height)
            })
        } else {
            None
        };

        PagerFrame {
            scroll_x: self.scroll_x,
            margin_gap,
            leading_edge: self.leading_edge.amount(),
            trailing_edge: self.trailing_edge.amount(),
            needs_redraw,
        }
    }

    fn on_intercept_pointer_event(&mut self, event: &PointerEvent, nested: &dyn NestedScroll) -> bool {
        self.poll_data_set();
        if self.adapter_count() == 0 || self.gesture.is_fake_dragging() {
            return false;
        }

        if matches!(
            event.content,
            PointerEventContent::Up | PointerEventContent::Cancel
        ) {
            self.gesture.end_drag();
            return false;
        }

        if event.content != PointerEventContent::Down {
            if self.gesture.is_being_dragged() {
                return true;
            }
            if self.gesture.is_unable_to_drag() {
                return false;
            }
        }

        match event.content {
            PointerEventContent::Move => {
                let Some(&sample) = self.active_sample(event) else {
                    return false;
                };
                let dx = sample.x - self.gesture.last_motion_x();
                if nested.can_scroll_horizontally(dx, sample.x, sample.y) {
                    self.gesture.rebase(sample.x, sample.y);
                    return false;
                }
                let slop = self.args.touch_slop.to_pixels_f32();
                if self.gesture.evaluate_slop(sample.x, sample.y, slop) == SlopDecision::Drag {
                    self.set_scroll_state(ScrollState::Dragging);
                }
            }
            PointerEventContent::Down => {
                let Some(&sample) = event.primary() else {
                    return false;
                };
                self.gesture.begin(&sample);
                if self.scroll_state == ScrollState::Settling {
                    self.catch_settle(event.timestamp);
                } else {
                    self.complete_scroll();
                }
            }
            PointerEventContent::PointerUp { .. } => self.gesture.pointer_up(event),
            _ => {}
        }

        self.gesture.is_being_dragged()
    }

    fn on_pointer_event(&mut self, event: &PointerEvent) -> bool {
        self.poll_data_set();
        if self.gesture.is_fake_dragging() {
            return true;
        }
        if event.content == PointerEventContent::Down && event.edge_touch {
            return false;
        }
        if self.adapter_count() == 0 {
            return false;
        }

        self.gesture.record(event);

        match event.content {
            PointerEventContent::Down => {
                if !self.gesture.is_being_dragged() {
                    if let Some(&sample) = event.primary() {
                        self.gesture.begin(&sample);
                        if self.scroll_state == ScrollState::Settling {
                            self.catch_settle(event.timestamp);
                        } else {
                            self.complete_scroll();
                        }
                    }
                }
            }
            PointerEventContent::Move => {
                if !self.gesture.is_being_dragged() {
                    if let Some(&sample) = self.active_sample(event) {
                        let slop = self.args.touch_slop.to_pixels_f32();
                        if self.gesture.evaluate_slop(sample.x, sample.y, slop) == SlopDecision::Drag {
                            self.set_scroll_state(ScrollState::Dragging);
                        }
                    }
                }
                if self.gesture.is_being_dragged() {
                    if let Some(&sample) = self.active_sample(event) {
                        let bounds = self.drag_bounds();
                        let step = self.gesture.drag_to(sample.x, self.scroll_x, bounds);
                        self.apply_drag_step(step);
                    }
                }
            }
            PointerEventContent::Up => {
                if self.gesture.is_being_dragged() {
                    self.release_drag();
                    self.release_edges();
                }
                self.gesture.end_drag();
            }
            PointerEventContent::Cancel => {
                if self.gesture.is_being_dragged() {
                    self.set_current_item_internal(to_isize(self.current_item), true, true, 0.0);
                    self.release_edges();
                }
                self.gesture.end_drag();
            }
            PointerEventContent::PointerDown { .. } => {
                if let Some(&sample) = event.action_pointer() {
                    self.gesture.pointer_down(&sample);
                }
            }
            PointerEventContent::PointerUp { .. } => self.gesture.pointer_up(event),
        }
        true
    }
}
