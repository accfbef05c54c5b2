//! Headless frame clock.
//!
//! Callbacks registered here run once, on the next call to
//! [`FrameClock::drain_frame_callbacks`]. The host calls it once per vsync
//! with a monotonic timestamp; tests call it with synthetic timestamps.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;
use web_time::Instant;

pub type FrameCallbackId = u64;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct FrameClockInner {
    next_frame_callback_id: Cell<FrameCallbackId>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    last_frame_nanos: Cell<Option<u64>>,
    epoch: Instant,
}

impl FrameClockInner {
    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
    }
}

#[derive(Clone)]
pub struct FrameClock {
    inner: Rc<FrameClockInner>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(FrameClockInner {
                next_frame_callback_id: Cell::new(1),
                frame_callbacks: RefCell::new(VecDeque::new()),
                last_frame_nanos: Cell::new(None),
                epoch: Instant::now(),
            }),
        }
    }

    /// Runs `callback` with the timestamp of the next frame.
    ///
    /// Dropping the returned registration cancels the callback; use
    /// [`FrameCallbackRegistration::detach`] for fire-and-forget work.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let id = self.inner.register_frame_callback(Box::new(callback));
        FrameCallbackRegistration::new(Rc::downgrade(&self.inner), id)
    }

    pub fn with_frame_millis(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        self.with_frame_nanos(move |nanos| {
            let millis = nanos / 1_000_000;
            callback(millis);
        })
    }

    /// Defers `callback` to the next frame without keeping a registration.
    pub fn post(&self, callback: impl FnOnce() + 'static) {
        self.with_frame_nanos(move |_| callback()).detach();
    }

    pub fn has_frame_callbacks(&self) -> bool {
        !self.inner.frame_callbacks.borrow().is_empty()
    }

    /// Timestamp of the most recently drained frame.
    pub fn last_frame_nanos(&self) -> Option<u64> {
        self.inner.last_frame_nanos.get()
    }

    /// Runs every callback registered before this call.
    ///
    /// Callbacks registered while draining run on the following frame.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.inner.last_frame_nanos.set(Some(frame_time_nanos));
        let mut callbacks = self.inner.frame_callbacks.borrow_mut();
        let mut pending: SmallVec<[Box<dyn FnOnce(u64) + 'static>; 8]> =
            SmallVec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        log::trace!(
            "frame {}ns: running {} callbacks",
            frame_time_nanos,
            pending.len()
        );
        for callback in pending {
            callback(frame_time_nanos);
        }
    }

    /// Drains with wall-clock time measured from the clock's creation.
    pub fn drain_now(&self) {
        let nanos = self.inner.epoch.elapsed().as_nanos() as u64;
        self.drain_frame_callbacks(nanos);
    }
}

pub struct FrameCallbackRegistration {
    clock: Weak<FrameClockInner>,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    fn new(clock: Weak<FrameClockInner>, id: FrameCallbackId) -> Self {
        Self {
            clock,
            id: Some(id),
        }
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            if let Some(clock) = self.clock.upgrade() {
                clock.cancel_frame_callback(id);
            }
        }
    }

    /// Lets the callback run even after the registration is dropped.
    pub fn detach(mut self) {
        self.id = None;
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            if let Some(clock) = self.clock.upgrade() {
                clock.cancel_frame_callback(id);
            }
        }
    }
}
