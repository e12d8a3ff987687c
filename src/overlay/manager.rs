//! Modal presentation lifecycle.
//!
//! [`OverlayManager`] owns a stack of presentations, each pairing a hosted
//! view with a mount point and a single-fire outcome channel. It is
//! rendering-agnostic: the hosted view type is generic and the manager only
//! guarantees lifecycle invariants — one terminal emission per presentation,
//! no leaked mount points on any exit path, and independent nested handles.

use std::cell::Cell;
use std::rc::Rc;

use crate::overlay::channel::{outcome_channel, Outcome, OutcomeReceiver, OutcomeSender};

/// Presentation options supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayConfig {
    /// Requested width hint, in display units the host understands.
    pub width: Option<u16>,
}

impl OverlayConfig {
    /// Config with a width hint.
    #[must_use]
    pub fn with_width(width: u16) -> Self {
        Self { width: Some(width) }
    }
}

/// Opaque identifier of one presentation.
///
/// Handles are never reused within a manager's lifetime, so a stale handle
/// from an already-closed presentation can never accidentally address a newer
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(u64);

/// A host-side resource owned by exactly one presentation.
///
/// Releasing happens on drop, which covers every exit path including a hosted
/// view whose construction fails before the presentation is ever pushed.
#[derive(Debug)]
pub struct MountPoint {
    live: Rc<Cell<usize>>,
}

impl MountPoint {
    fn allocate(live: &Rc<Cell<usize>>) -> Self {
        live.set(live.get() + 1);
        Self { live: Rc::clone(live) }
    }
}

impl Drop for MountPoint {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

#[derive(Debug)]
struct Presentation<V, R> {
    handle: OverlayHandle,
    view: V,
    config: OverlayConfig,
    sender: OutcomeSender<R>,
    mount: MountPoint,
}

/// Stack of modal presentations over the dashboard.
///
/// `V` is the hosted view type, `R` the result type a view can be closed
/// with. Presentations stack in open order; Escape and outside clicks route
/// to the top via [`dismiss_top`](Self::dismiss_top), while an explicit
/// [`close`](Self::close) may target any live handle without disturbing
/// presentations it did not create.
#[derive(Debug)]
pub struct OverlayManager<V, R> {
    stack: Vec<Presentation<V, R>>,
    next_handle: u64,
    live_mounts: Rc<Cell<usize>>,
}

impl<V, R> Default for OverlayManager<V, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, R> OverlayManager<V, R> {
    /// Creates a manager with an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            next_handle: 0,
            live_mounts: Rc::new(Cell::new(0)),
        }
    }

    /// Presents a view, returning its handle and the outcome receiver.
    pub fn present(&mut self, view: V, config: OverlayConfig) -> (OverlayHandle, OutcomeReceiver<R>) {
        let mount = MountPoint::allocate(&self.live_mounts);
        self.push(view, config, mount)
    }

    /// Presents a view built by a fallible factory.
    ///
    /// The mount point is allocated first and handed to the factory; if
    /// construction fails the mount point is released before the error is
    /// returned, and nothing is pushed onto the stack.
    ///
    /// # Errors
    ///
    /// Propagates whatever error the factory returns.
    pub fn present_with<F, E>(
        &mut self,
        config: OverlayConfig,
        factory: F,
    ) -> std::result::Result<(OverlayHandle, OutcomeReceiver<R>), E>
    where
        F: FnOnce(&MountPoint) -> std::result::Result<V, E>,
    {
        let mount = MountPoint::allocate(&self.live_mounts);
        let view = factory(&mount)?;
        Ok(self.push(view, config, mount))
    }

    fn push(
        &mut self,
        view: V,
        config: OverlayConfig,
        mount: MountPoint,
    ) -> (OverlayHandle, OutcomeReceiver<R>) {
        let handle = OverlayHandle(self.next_handle);
        self.next_handle += 1;
        let (sender, receiver) = outcome_channel();
        self.stack.push(Presentation {
            handle,
            view,
            config,
            sender,
            mount,
        });
        tracing::debug!(handle = handle.0, depth = self.stack.len(), "presented overlay");
        (handle, receiver)
    }

    /// Closes a presentation, emitting its outcome.
    ///
    /// `Some(value)` emits [`Outcome::Submitted`], `None` emits
    /// [`Outcome::Dismissed`]. Returns `false` when the handle is not live,
    /// which makes a second close a harmless no-op.
    pub fn close(&mut self, handle: OverlayHandle, value: Option<R>) -> bool {
        let Some(position) = self
            .stack
            .iter()
            .position(|presentation| presentation.handle == handle)
        else {
            return false;
        };
        let presentation = self.stack.remove(position);
        let outcome = match value {
            Some(value) => Outcome::Submitted(value),
            None => Outcome::Dismissed,
        };
        presentation.sender.send(outcome);
        drop(presentation.mount);
        tracing::debug!(handle = handle.0, depth = self.stack.len(), "closed overlay");
        true
    }

    /// Dismisses the most recent presentation.
    ///
    /// This is where Escape and outside clicks are routed. Returns `false`
    /// when the stack is empty.
    pub fn dismiss_top(&mut self) -> bool {
        match self.top() {
            Some(handle) => self.close(handle, None),
            None => false,
        }
    }

    /// Handle of the most recent presentation.
    #[must_use]
    pub fn top(&self) -> Option<OverlayHandle> {
        self.stack.last().map(|presentation| presentation.handle)
    }

    /// Whether any presentation is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Number of open presentations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Borrows a live presentation's view.
    #[must_use]
    pub fn view(&self, handle: OverlayHandle) -> Option<&V> {
        self.stack
            .iter()
            .find(|presentation| presentation.handle == handle)
            .map(|presentation| &presentation.view)
    }

    /// Mutably borrows a live presentation's view.
    pub fn view_mut(&mut self, handle: OverlayHandle) -> Option<&mut V> {
        self.stack
            .iter_mut()
            .find(|presentation| presentation.handle == handle)
            .map(|presentation| &mut presentation.view)
    }

    /// Config a presentation was opened with.
    #[must_use]
    pub fn config(&self, handle: OverlayHandle) -> Option<&OverlayConfig> {
        self.stack
            .iter()
            .find(|presentation| presentation.handle == handle)
            .map(|presentation| &presentation.config)
    }

    /// Number of host resources currently held by live presentations.
    ///
    /// Zero whenever the stack is empty; used to verify teardown.
    #[must_use]
    pub fn live_mount_points(&self) -> usize {
        self.live_mounts.get()
    }
}
