//! Observation handles - what triggers a re-scan.
//!
//! Observation is not ambient: every source of re-scan notifications is an
//! explicitly owned handle implementing [`ScanObserver`]. The controller
//! subscribes on mount and tears every handle down on unmount or when its
//! inputs change identity, so no observer outlives the lifecycle that
//! created it. Tests substitute a [`ManualObserver`] and fire it by hand.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crossterm::event::{self, Event};

use crate::tree::VisualTree;
use crate::types::Cleanup;

// =============================================================================
// ScanObserver
// =============================================================================

/// A source of re-scan notifications.
///
/// `observe` registers a callback and returns a teardown closure. After the
/// teardown runs, the callback must never fire again.
pub trait ScanObserver {
    /// Register a notification callback. Returns the unsubscribe closure.
    fn observe(&self, notify: Rc<dyn Fn()>) -> Cleanup;
}

// =============================================================================
// Shared subscriber list
// =============================================================================

/// Callback registry shared by the concrete observers.
struct Subscribers {
    entries: RefCell<Vec<(u64, Rc<dyn Fn()>)>>,
    next_id: std::cell::Cell<u64>,
}

impl Subscribers {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            entries: RefCell::new(Vec::new()),
            next_id: std::cell::Cell::new(0),
        })
    }

    fn add(self: &Rc<Self>, notify: Rc<dyn Fn()>) -> Cleanup {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, notify));

        let weak: Weak<Subscribers> = Rc::downgrade(self);
        Box::new(move || {
            if let Some(subs) = weak.upgrade() {
                subs.entries.borrow_mut().retain(|(sid, _)| *sid != id);
            }
        })
    }

    // Callbacks are cloned out first so one may re-subscribe or tear down
    // without a re-entrant borrow.
    fn fire(&self) {
        let callbacks: Vec<Rc<dyn Fn()>> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for cb in callbacks {
            (*cb)();
        }
    }

    fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}

// =============================================================================
// ResizeWatcher
// =============================================================================

/// Resize observation backed by crossterm events.
///
/// The host pumps events through [`ResizeWatcher::poll`] (or feeds them via
/// [`ResizeWatcher::handle_event`] when it runs its own event loop). Every
/// terminal resize notifies all subscribers; the controller then re-scans
/// against whatever geometry the host's relayout produced.
///
/// # Example
///
/// ```ignore
/// let resize = Rc::new(ResizeWatcher::new());
/// skeleton.mount(vec![resize.clone()]);
///
/// loop {
///     if let Some(event) = resize.poll(Duration::from_millis(16))? {
///         // non-resize events come back for the host to route
///     }
/// }
/// ```
pub struct ResizeWatcher {
    subscribers: Rc<Subscribers>,
}

impl ResizeWatcher {
    /// Create a watcher with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: Subscribers::new(),
        }
    }

    /// Poll the terminal for one event.
    ///
    /// Resize events notify subscribers and are returned alongside all other
    /// events so the host can route keys and mouse input as usual.
    pub fn poll(&self, timeout: Duration) -> std::io::Result<Option<Event>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let ev = event::read()?;
        self.handle_event(&ev);
        Ok(Some(ev))
    }

    /// Feed an already-read event. Notifies subscribers on resize.
    pub fn handle_event(&self, ev: &Event) {
        if matches!(ev, Event::Resize(..)) {
            self.subscribers.fire();
        }
    }

    /// Notify subscribers directly with a new terminal size.
    ///
    /// Useful for hosts that learn about resizes out of band.
    pub fn dispatch(&self, _width: u16, _height: u16) {
        self.subscribers.fire();
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl Default for ResizeWatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanObserver for ResizeWatcher {
    fn observe(&self, notify: Rc<dyn Fn()>) -> Cleanup {
        self.subscribers.add(notify)
    }
}

// =============================================================================
// MutationWatcher
// =============================================================================

/// Subtree mutation observation over a [`VisualTree`].
///
/// Forwards the tree's own mutation notifications (child add/remove, text
/// changes) to subscribers. The controller creates one per content identity
/// and tears it down whenever the content changes.
pub struct MutationWatcher {
    tree: VisualTree,
}

impl MutationWatcher {
    /// Watch the given tree.
    pub fn new(tree: VisualTree) -> Self {
        Self { tree }
    }
}

impl ScanObserver for MutationWatcher {
    fn observe(&self, notify: Rc<dyn Fn()>) -> Cleanup {
        self.tree.on_mutate(notify)
    }
}

// =============================================================================
// ManualObserver
// =============================================================================

/// An observer fired by hand.
///
/// The substitute for real resize/mutation sources in deterministic tests:
/// inject one into the controller and call [`ManualObserver::fire`] to
/// simulate a notification.
pub struct ManualObserver {
    subscribers: Rc<Subscribers>,
}

impl ManualObserver {
    /// Create an observer with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: Subscribers::new(),
        }
    }

    /// Notify all current subscribers.
    pub fn fire(&self) {
        self.subscribers.fire();
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl Default for ManualObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanObserver for ManualObserver {
    fn observe(&self, notify: Rc<dyn Fn()>) -> Cleanup {
        self.subscribers.add(notify)
    }
}

// =============================================================================
// Tests
// =============================================================================
