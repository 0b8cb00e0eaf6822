//! Typed single-threaded event emitter
//!
//! Listeners are invoked synchronously, in registration order, against a
//! snapshot of the listener set taken when [`Emitter::emit`] starts. A
//! listener may therefore subscribe or unsubscribe (itself or others) while
//! being notified without disturbing the loop in progress.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

type Listener<T> = Rc<dyn Fn(&T)>;

struct Registry<T> {
    next_id: u64,
    listeners: IndexMap<u64, Listener<T>>,
}

/// Listener registry carrying payloads of type `T`
///
/// Cloning an `Emitter` yields another handle to the same registry.
pub struct Emitter<T: 'static> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: 'static> Emitter<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                listeners: IndexMap::new(),
            })),
        }
    }

    /// Register a listener; the returned handle removes exactly this listener
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut reg = self.registry.borrow_mut();
            let id = reg.next_id;
            reg.next_id += 1;
            reg.listeners.insert(id, Rc::new(listener));
            id
        };

        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = weak.upgrade() {
                registry.borrow_mut().listeners.shift_remove(&id);
            }
        })
    }

    /// Invoke every registered listener with `payload`; returns how many ran
    pub fn emit(&self, payload: &T) -> usize {
        let snapshot: Vec<Listener<T>> = self.registry.borrow().listeners.values().cloned().collect();
        for listener in &snapshot {
            listener(payload);
        }
        snapshot.len()
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every listener. Outstanding subscriptions become no-ops.
    pub fn clear(&self) {
        self.registry.borrow_mut().listeners.clear();
    }
}

impl<T: 'static> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<T: 'static> fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.len())
            .finish()
    }
}

/// Handle returned by a registration; call [`Subscription::unsubscribe`] to
/// remove the listener.
///
/// Dropping the handle does *not* unsubscribe: registrations live until
/// explicitly removed or until their emitter is dropped.
pub struct Subscription {
    cancel: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl Subscription {
    /// Wrap an arbitrary cancellation action
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: RefCell::new(Some(Box::new(cancel))),
        }
    }

    /// A subscription with nothing to cancel
    pub fn noop() -> Self {
        Self {
            cancel: RefCell::new(None),
        }
    }

    /// Remove the listener. Safe to call any number of times.
    pub fn unsubscribe(&self) {
        let cancel = self.cancel.borrow_mut().take();
        if let Some(cancel) = cancel {
            cancel();
        }
    }

    /// Whether `unsubscribe` has not yet run
    pub fn is_active(&self) -> bool {
        self.cancel.borrow().is_some()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
