// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popup lifecycle: `Open` until dismissed, then `Dismissed` forever.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};
use core::fmt;

/// Lifecycle state of a popup.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PopupState {
    /// Mounted and interactive.
    Open,
    /// Terminal; the popup ignores all input and is discarded by its owner.
    Dismissed,
}

struct Lifecycle {
    state: Cell<PopupState>,
    on_dismiss: RefCell<Option<Box<dyn FnOnce()>>>,
}

/// Cloneable handle that dismisses a popup.
///
/// Every clone refers to the same popup. The first [`dismiss`](Self::dismiss)
/// wins; later calls, from any clone, do nothing.
///
/// ```
/// use understory_menu::lifecycle::{DismissHandle, PopupState};
///
/// let handle = DismissHandle::new(|| {});
/// let other = handle.clone();
/// assert!(handle.dismiss());
/// assert!(!other.dismiss());
/// assert_eq!(other.state(), PopupState::Dismissed);
/// ```
#[derive(Clone)]
pub struct DismissHandle(Rc<Lifecycle>);

impl DismissHandle {
    /// Creates an open lifecycle that runs `on_dismiss` when it is dismissed.
    pub fn new(on_dismiss: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(Lifecycle {
            state: Cell::new(PopupState::Open),
            on_dismiss: RefCell::new(Some(Box::new(on_dismiss))),
        }))
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> PopupState {
        self.0.state.get()
    }

    /// Returns `true` once the popup has been dismissed.
    #[must_use]
    pub fn is_dismissed(&self) -> bool {
        self.state() == PopupState::Dismissed
    }

    /// Moves the popup to [`PopupState::Dismissed`] and runs the dismiss callback.
    ///
    /// Returns `true` if this call performed the transition. The state flips
    /// before the callback runs, so a callback that dismisses again is a no-op.
    pub fn dismiss(&self) -> bool {
        if self.0.state.replace(PopupState::Dismissed) == PopupState::Dismissed {
            return false;
        }
        log::debug!("popup dismissed");
        let callback = self.0.on_dismiss.borrow_mut().take();
        if let Some(callback) = callback {
            callback();
        }
        true
    }
}

impl fmt::Debug for DismissHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DismissHandle").field(&self.state()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_runs_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let handle = DismissHandle::new(move || counter.set(counter.get() + 1));

        assert_eq!(handle.state(), PopupState::Open);
        assert!(handle.dismiss(), "first dismissal transitions");
        assert!(!handle.dismiss(), "second dismissal is a no-op");
        assert!(!handle.clone().dismiss(), "clones share the state");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn reentrant_dismiss_from_callback_is_a_no_op() {
        let slot: Rc<RefCell<Option<DismissHandle>>> = Rc::new(RefCell::new(None));
        let inner = slot.clone();
        let reentered = Rc::new(Cell::new(None));
        let seen = reentered.clone();
        let handle = DismissHandle::new(move || {
            if let Some(h) = inner.borrow().as_ref() {
                seen.set(Some(h.dismiss()));
            }
        });
        *slot.borrow_mut() = Some(handle.clone());

        assert!(handle.dismiss(), "outer call transitions");
        assert_eq!(reentered.get(), Some(false), "inner call saw Dismissed");
    }
}
