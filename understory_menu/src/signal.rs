// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A push-based, single-value cell.
//!
//! [`Signal`] holds the latest value of some piece of transient state and
//! notifies subscribers when that value changes. Only the latest value is
//! retained: a reader that was not watching simply sees the current value on
//! its next evaluation pass, there is no backlog of missed updates.
//!
//! ```
//! use core::cell::Cell;
//! use std::rc::Rc;
//! use understory_menu::signal::Signal;
//!
//! let mut hovered: Signal<Option<usize>> = Signal::new(None);
//! let seen = Rc::new(Cell::new(0));
//! let counter = seen.clone();
//! hovered.subscribe(move |_| counter.set(counter.get() + 1));
//!
//! hovered.set(Some(1));
//! hovered.set(Some(1)); // unchanged, not published
//! hovered.set(None);
//! assert_eq!(seen.get(), 2);
//! ```

use alloc::boxed::Box;
use core::fmt;

use smallvec::SmallVec;

/// Identifier returned by [`Signal::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

type Subscriber<T> = (SubscriptionId, Box<dyn FnMut(T)>);

/// Observable single-value cell.
pub struct Signal<T> {
    value: T,
    version: u64,
    next_id: u32,
    // Usually one or two observers (the controller and a redraw hook).
    subscribers: SmallVec<[Subscriber<T>; 2]>,
}

impl<T: Copy + PartialEq> Signal<T> {
    /// Creates a signal holding `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            value: initial,
            version: 0,
            next_id: 0,
            subscribers: SmallVec::new(),
        }
    }

    /// Returns the latest value.
    #[must_use]
    pub fn get(&self) -> T {
        self.value
    }

    /// Returns a counter that increments on every published change.
    ///
    /// Readers can remember the version they last evaluated and skip work
    /// until it moves.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Stores `value` and notifies subscribers if it differs from the current one.
    ///
    /// Returns `true` if the value changed.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.version = self.version.wrapping_add(1);
        for (_, subscriber) in &mut self.subscribers {
            subscriber(value);
        }
        true
    }

    /// Registers a callback invoked with every new value.
    pub fn subscribe(&mut self, subscriber: impl FnMut(T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Removes a previously registered callback.
    ///
    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Drops every subscriber.
    pub fn clear_subscribers(&mut self) {
        self.subscribers.clear();
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("value", &self.value)
            .field("version", &self.version)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    #[test]
    fn publishes_only_changes() {
        let mut signal = Signal::new(0_u8);
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        signal.subscribe(move |v| sink.borrow_mut().push(v));

        assert!(signal.set(1), "new value is a change");
        assert!(!signal.set(1), "same value is not a change");
        assert!(signal.set(2), "new value is a change");

        assert_eq!(*log.borrow(), [1, 2]);
        assert_eq!(signal.version(), 2);
        assert_eq!(signal.get(), 2);
    }

    #[test]
    fn unsubscribed_callbacks_are_not_called() {
        let mut signal = Signal::new(false);
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        let id = signal.subscribe(move |_| *counter.borrow_mut() += 1);

        assert!(signal.unsubscribe(id), "subscription exists");
        assert!(!signal.unsubscribe(id), "second removal finds nothing");
        signal.set(true);
        assert_eq!(*calls.borrow(), 0);
        assert_eq!(signal.subscriber_count(), 0);
    }
}
