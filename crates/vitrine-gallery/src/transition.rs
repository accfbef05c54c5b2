//! Serialization of transitions.
//!
//! A transition holds a [`TransitionToken`] for as long as it runs. Requests
//! made while a token is alive are rejected rather than queued.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Default)]
pub struct AnimatingGuard {
    flag: Rc<Cell<bool>>,
}

impl AnimatingGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_animating(&self) -> bool {
        self.flag.get()
    }

    /// `None` while another transition holds the guard.
    pub fn try_begin(&self) -> Option<TransitionToken> {
        if self.flag.replace(true) {
            return None;
        }
        Some(TransitionToken {
            flag: self.flag.clone(),
        })
    }
}

/// Releases its guard when dropped.
pub struct TransitionToken {
    flag: Rc<Cell<bool>>,
}

impl Drop for TransitionToken {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// Runs `done` once after `count` arrivals.
pub(crate) struct Join {
    remaining: Cell<usize>,
    done: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl Join {
    pub(crate) fn new(count: usize, done: impl FnOnce() + 'static) -> Rc<Self> {
        let join = Rc::new(Self {
            remaining: Cell::new(count),
            done: RefCell::new(Some(Box::new(done))),
        });
        if count == 0 {
            join.fire();
        }
        join
    }

    pub(crate) fn arrive(&self) {
        let remaining = self.remaining.get().saturating_sub(1);
        self.remaining.set(remaining);
        if remaining == 0 {
            self.fire();
        }
    }

    fn fire(&self) {
        let done = self.done.borrow_mut().take();
        if let Some(done) = done {
            done();
        }
    }
}
