//! Paging coordinator.
//!
//! The pager shows the current page plus, during a transition, one incoming
//! page beside it. [`PagingCoordinator::offset`] is the horizontal scroll of
//! the current page: positive values slide it left to reveal the incoming
//! page on the right, negative values reveal it on the left.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use vitrine_animation::{Animatable, AnimationSpec, AnimationType, Easing, FrameClock};

use crate::config::PagingMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PagingContext {
    pub current_index: usize,
    pub item_count: usize,
    pub paging_mode: PagingMode,
}

impl PagingContext {
    pub fn new(current_index: usize, item_count: usize, paging_mode: PagingMode) -> Self {
        Self {
            current_index,
            item_count,
            paging_mode,
        }
    }

    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.item_count > 0 && self.current_index == self.item_count - 1
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.item_count
    }

    pub fn next_index(&self) -> Option<usize> {
        if self.item_count < 2 {
            return None;
        }
        match self.paging_mode {
            PagingMode::Standard => Some(self.current_index + 1).filter(|next| self.contains(*next)),
            PagingMode::Carousel => Some((self.current_index + 1) % self.item_count),
        }
    }

    pub fn previous_index(&self) -> Option<usize> {
        if self.item_count < 2 {
            return None;
        }
        match self.paging_mode {
            PagingMode::Standard => self
                .current_index
                .checked_sub(1)
                .filter(|previous| self.contains(*previous)),
            PagingMode::Carousel => {
                Some((self.current_index + self.item_count - 1) % self.item_count)
            }
        }
    }

    /// Pages worth keeping materialized: the current one and its neighbours.
    pub fn window(&self) -> impl Iterator<Item = usize> {
        [
            Some(self.current_index).filter(|index| self.contains(*index)),
            self.previous_index(),
            self.next_index(),
        ]
        .into_iter()
        .flatten()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageDirection {
    Forward,
    Reverse,
}

impl PageDirection {
    fn sign(self) -> f32 {
        match self {
            PageDirection::Forward => 1.0,
            PageDirection::Reverse => -1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PagingEvent {
    /// The current page changed, possibly as an intermediate hop.
    CurrentChanged(usize),
    /// A transition finished and the pager is at rest on this page.
    Settled(usize),
}

/// What the gallery should do after an item was deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemovalOutcome {
    MovedTo(usize),
    Close,
}

type PagingListener = Rc<dyn Fn(PagingEvent)>;

struct PagingInner {
    context: Cell<PagingContext>,
    offset: Animatable<f32>,
    incoming: Cell<Option<usize>>,
    page_width: Cell<f32>,
    in_flight: Cell<bool>,
    dragging: Cell<bool>,
    fling_velocity: f32,
    duration_seconds: f32,
    clock: FrameClock,
    listener: RefCell<Option<PagingListener>>,
}

impl PagingInner {
    fn emit(&self, event: PagingEvent) {
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener(event);
        }
    }

    fn set_current(&self, index: usize) {
        let mut context = self.context.get();
        context.current_index = index;
        self.context.set(context);
        self.incoming.set(None);
        self.offset.snap_to(0.0);
        self.emit(PagingEvent::CurrentChanged(index));
    }
}

#[derive(Clone)]
pub struct PagingCoordinator {
    inner: Rc<PagingInner>,
}

impl PagingCoordinator {
    pub fn new(context: PagingContext, clock: FrameClock) -> Self {
        Self::with_timing(context, clock, 0.3, 500.0)
    }

    pub fn with_timing(
        context: PagingContext,
        clock: FrameClock,
        duration_seconds: f32,
        fling_velocity: f32,
    ) -> Self {
        Self {
            inner: Rc::new(PagingInner {
                context: Cell::new(context),
                offset: Animatable::new(0.0, clock.clone()),
                incoming: Cell::new(None),
                page_width: Cell::new(0.0),
                in_flight: Cell::new(false),
                dragging: Cell::new(false),
                fling_velocity,
                duration_seconds,
                clock,
                listener: RefCell::new(None),
            }),
        }
    }

    pub fn set_listener(&self, listener: impl Fn(PagingEvent) + 'static) {
        *self.inner.listener.borrow_mut() = Some(Rc::new(listener));
    }

    pub fn context(&self) -> PagingContext {
        self.inner.context.get()
    }

    pub fn current_index(&self) -> usize {
        self.inner.context.get().current_index
    }

    pub fn offset(&self) -> f32 {
        self.inner.offset.value()
    }

    /// Page shown beside the current one while a transition or drag runs.
    pub fn incoming_index(&self) -> Option<usize> {
        self.inner.incoming.get()
    }

    pub fn is_transitioning(&self) -> bool {
        self.inner.in_flight.get()
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.dragging.get()
    }

    pub fn set_page_width(&self, width: f32) {
        self.inner.page_width.set(width.max(0.0));
    }

    pub fn page_width(&self) -> f32 {
        self.inner.page_width.get()
    }

    /// Pages to `index`, returning false when nothing happens.
    ///
    /// Far jumps run in two steps: an animated transition to the page next
    /// to the target, then an unanimated swap to the target one frame later.
    pub fn go_to(&self, index: usize) -> bool {
        let context = self.context();
        if !context.contains(index)
            || index == context.current_index
            || self.inner.in_flight.get()
            || self.inner.dragging.get()
        {
            return false;
        }
        self.inner.in_flight.set(true);
        let direction = if index > context.current_index {
            PageDirection::Forward
        } else {
            PageDirection::Reverse
        };
        let hop = match direction {
            PageDirection::Forward => index - 1,
            PageDirection::Reverse => index + 1,
        };
        log::debug!(
            "paging from {} to {} via {}",
            context.current_index,
            index,
            hop
        );

        if hop == context.current_index {
            self.transition(index, direction, Self::settle_callback(&self.inner, index));
            return true;
        }

        let weak = Rc::downgrade(&self.inner);
        self.transition(
            hop,
            direction,
            Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let clock = inner.clock.clone();
                let weak = Rc::downgrade(&inner);
                clock.post(move || {
                    if let Some(inner) = weak.upgrade() {
                        inner.set_current(index);
                        inner.in_flight.set(false);
                        inner.emit(PagingEvent::Settled(index));
                    }
                });
            }),
        );
        true
    }

    /// Starts a user drag. Rejected while a transition runs.
    pub fn begin_drag(&self) -> bool {
        if self.inner.in_flight.get() || self.inner.dragging.get() {
            return false;
        }
        self.inner.dragging.set(true);
        self.inner.offset.stop();
        true
    }

    /// Follows the pointer; `translation_x` is measured from the drag start.
    pub fn drag_by(&self, translation_x: f32) {
        if !self.inner.dragging.get() {
            return;
        }
        let context = self.context();
        let raw = -translation_x;
        let (offset, incoming) = if raw > 0.0 {
            match context.next_index() {
                Some(next) => (raw, Some(next)),
                None => (0.0, None),
            }
        } else if raw < 0.0 {
            match context.previous_index() {
                Some(previous) => (raw, Some(previous)),
                None => (0.0, None),
            }
        } else {
            (0.0, None)
        };
        let width = self.inner.page_width.get();
        self.inner.incoming.set(incoming);
        self.inner.offset.snap_to(offset.clamp(-width, width));
    }

    /// Snaps to a neighbour when flung past the paging velocity or dragged
    /// past half a page; otherwise springs back.
    pub fn end_drag(&self, velocity_x: f32) {
        if !self.inner.dragging.replace(false) {
            return;
        }
        let context = self.context();
        let offset = self.inner.offset.value();
        let half_page = self.inner.page_width.get() / 2.0;
        let threshold = self.inner.fling_velocity;

        let forward = (velocity_x < -threshold || (offset > half_page && velocity_x <= threshold))
            && offset >= 0.0;
        let backward = (velocity_x > threshold || (offset < -half_page && velocity_x >= -threshold))
            && offset <= 0.0;

        self.inner.in_flight.set(true);
        let target = if forward {
            context.next_index().map(|index| (index, PageDirection::Forward))
        } else if backward {
            context.previous_index().map(|index| (index, PageDirection::Reverse))
        } else {
            None
        };
        match target {
            Some((index, direction)) => {
                self.transition(index, direction, Self::settle_callback(&self.inner, index))
            }
            None => self.spring_back(),
        }
    }

    /// Ends a drag that the pointer abandoned.
    pub fn cancel_drag(&self) {
        if self.inner.dragging.replace(false) {
            self.inner.in_flight.set(true);
            self.spring_back();
        }
    }

    /// Reports the current page as settled without moving.
    pub fn settle_in_place(&self) {
        self.inner
            .emit(PagingEvent::Settled(self.inner.context.get().current_index));
    }

    /// Updates the pager after the item at `index` was deleted and the
    /// collection now holds `new_count` items.
    pub fn remove_page(&self, index: usize, new_count: usize) -> RemovalOutcome {
        let direction = if index < new_count {
            PageDirection::Forward
        } else {
            PageDirection::Reverse
        };
        let new_index = match direction {
            PageDirection::Forward => Some(index),
            PageDirection::Reverse => index.checked_sub(1),
        };
        let Some(new_index) = new_index.filter(|index| *index < new_count) else {
            self.set_item_count(new_count);
            return RemovalOutcome::Close;
        };

        let mut context = self.context();
        context.item_count = new_count;
        self.inner.context.set(context);
        self.inner.dragging.set(false);
        self.inner.in_flight.set(true);
        self.transition(
            new_index,
            direction,
            Self::settle_callback(&self.inner, new_index),
        );
        RemovalOutcome::MovedTo(new_index)
    }

    /// True when `index` can be reloaded.
    pub fn reload(&self, index: usize) -> bool {
        self.context().contains(index)
    }

    pub fn set_item_count(&self, item_count: usize) {
        let mut context = self.context();
        context.item_count = item_count;
        if item_count > 0 && context.current_index >= item_count {
            context.current_index = item_count - 1;
        }
        self.inner.context.set(context);
    }

    fn settle_callback(inner: &Rc<PagingInner>, index: usize) -> Box<dyn FnOnce()> {
        let weak = Rc::downgrade(inner);
        Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.in_flight.set(false);
                inner.emit(PagingEvent::Settled(index));
            }
        })
    }

    /// Slides `target` in from `direction`, makes it current, then runs
    /// `on_done`.
    fn transition(&self, target: usize, direction: PageDirection, on_done: Box<dyn FnOnce()>) {
        self.inner.incoming.set(Some(target));
        let end = direction.sign() * self.inner.page_width.get();
        let weak: Weak<PagingInner> = Rc::downgrade(&self.inner);
        self.inner.offset.animate_to(
            end,
            AnimationType::Tween(AnimationSpec::from_seconds(
                self.inner.duration_seconds,
                Easing::EaseInOut,
            )),
            move |_| {
                if let Some(inner) = weak.upgrade() {
                    inner.set_current(target);
                    on_done();
                }
            },
        );
    }

    fn spring_back(&self) {
        let weak = Rc::downgrade(&self.inner);
        self.inner.offset.animate_to(
            0.0,
            AnimationType::Tween(AnimationSpec::from_seconds(
                self.inner.duration_seconds,
                Easing::FastOutSlowIn,
            )),
            move |_| {
                if let Some(inner) = weak.upgrade() {
                    inner.incoming.set(None);
                    inner.in_flight.set(false);
                }
            },
        );
    }
}

#[cfg(test)]
#[path = "tests/paging_tests.rs"]
mod tests;
