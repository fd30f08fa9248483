//! Explicit subscription channel for state changes.
//!
//! Observers register a callback and get back a [`SubscriptionId`] they can
//! later hand to [`Observers::unsubscribe`]. Notification runs callbacks in
//! subscription order on the caller's thread.

use std::fmt;

/// Handle returned by [`Observers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<E> = Box<dyn FnMut(&E)>;

/// An ordered list of change callbacks for events of type `E`.
pub struct Observers<E> {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback<E>)>,
}

impl<E> Observers<E> {
    pub const fn new() -> Self {
        Self {
            next_id: 1,
            callbacks: Vec::new(),
        }
    }

    /// Register a callback invoked for every subsequent event.
    pub fn subscribe(&mut self, callback: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns `false` if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    pub fn notify(&mut self, event: &E) {
        for (_, callback) in &mut self.callbacks {
            callback(event);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_notify_reaches_every_subscriber_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::new();
        let a = Rc::clone(&seen);
        observers.subscribe(move |n: &u32| a.borrow_mut().push(("a", *n)));
        let b = Rc::clone(&seen);
        observers.subscribe(move |n: &u32| b.borrow_mut().push(("b", *n)));

        observers.notify(&7);
        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut observers = Observers::new();
        let c = Rc::clone(&count);
        let id = observers.subscribe(move |_: &()| *c.borrow_mut() += 1);

        observers.notify(&());
        assert!(observers.unsubscribe(id));
        observers.notify(&());
        assert_eq!(*count.borrow(), 1);
        assert!(observers.is_empty());
    }

    #[test]
    fn test_unsubscribe_unknown_id_returns_false() {
        let mut observers: Observers<()> = Observers::new();
        let id = observers.subscribe(|_: &()| {});
        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
    }
}
