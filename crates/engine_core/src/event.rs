//! Minimal typed publish/subscribe.
//!
//! An [`EventHandler`] keeps an ordered list of listeners and invokes them
//! synchronously on [`EventHandler::notify`]. Listener identity is the
//! `Arc` allocation: attaching the same `Arc` twice is a no-op, and
//! detaching needs a clone of the attached `Arc`.
//!
//! There is no error isolation. A listener that panics aborts the remaining
//! notifications for that call.

use std::sync::Arc;

/// A callback invoked with the sender and the event argument.
pub type Listener<S, A> = Arc<dyn Fn(&S, &A) + Send + Sync>;

/// Ordered list of listeners for one event.
pub struct EventHandler<S, A> {
    listeners: Vec<Listener<S, A>>,
}

impl<S, A> EventHandler<S, A> {
    /// Create a handler with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Register a listener.
    ///
    /// Returns `false` without registering if this exact listener is already
    /// attached.
    pub fn attach(&mut self, listener: &Listener<S, A>) -> bool {
        if self.listeners.iter().any(|l| Arc::ptr_eq(l, listener)) {
            return false;
        }
        self.listeners.push(Arc::clone(listener));
        true
    }

    /// Remove the first registration of `listener`.
    ///
    /// Returns `true` if something was removed.
    pub fn detach(&mut self, listener: &Listener<S, A>) -> bool {
        match self.listeners.iter().position(|l| Arc::ptr_eq(l, listener)) {
            Some(pos) => {
                self.listeners.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Invoke every listener, in registration order, with `(sender, arg)`.
    pub fn notify(&self, sender: &S, arg: &A) {
        for listener in &self.listeners {
            listener(sender, arg);
        }
    }

    /// Number of attached listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if no listener is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<S, A> Default for EventHandler<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> std::fmt::Debug for EventHandler<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHandler")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
