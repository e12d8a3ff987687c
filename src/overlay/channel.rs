//! Single-fire result channel between an overlay and its presenter.
//!
//! Each presentation gets exactly one sender/receiver pair. The sender is
//! consumed on send, so a presentation can terminate at most once no matter
//! which exit path (submit, Escape, outside click, explicit close) fires
//! first. Everything runs on one thread, so the shared slot is a plain
//! `Rc<RefCell>`.

use std::cell::RefCell;
use std::rc::Rc;

/// Terminal outcome of a presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<R> {
    /// The overlay was closed with a value, e.g. a submitted form.
    Submitted(R),
    /// The overlay was dismissed without a value.
    Dismissed,
}

type Slot<R> = Rc<RefCell<Option<Outcome<R>>>>;

/// Sending half; consumed by [`send`](Self::send).
#[derive(Debug)]
pub struct OutcomeSender<R> {
    slot: Slot<R>,
}

/// Receiving half; polled by the presenter after dispatching events.
#[derive(Debug)]
pub struct OutcomeReceiver<R> {
    slot: Slot<R>,
}

/// Creates a connected single-fire pair.
#[must_use]
pub fn outcome_channel<R>() -> (OutcomeSender<R>, OutcomeReceiver<R>) {
    let slot: Slot<R> = Rc::new(RefCell::new(None));
    (
        OutcomeSender { slot: Rc::clone(&slot) },
        OutcomeReceiver { slot },
    )
}

impl<R> OutcomeSender<R> {
    /// Delivers the terminal outcome, consuming the sender.
    pub fn send(self, outcome: Outcome<R>) {
        *self.slot.borrow_mut() = Some(outcome);
    }
}

impl<R> OutcomeReceiver<R> {
    /// Takes the outcome if one has been delivered.
    ///
    /// Returns `None` while the presentation is still open, and again after
    /// the outcome has been taken once.
    #[must_use]
    pub fn try_take(&self) -> Option<Outcome<R>> {
        self.slot.borrow_mut().take()
    }
}
