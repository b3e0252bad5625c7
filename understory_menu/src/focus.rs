// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bridge between the popup's key handling and the host's focus systems.
//!
//! The host owns two process-wide systems the popup only ever *asks* things
//! of: a focus manager that can move focus within the popup's subtree, and an
//! input-mode manager that decides whether focus indicators are shown. Both
//! become available only once the popup is mounted, so [`FocusCoordinator`]
//! holds them in late-bound slots and turns every request made before that
//! into a no-op.
//!
//! Requests return `bool` to report whether the host did anything. `false`
//! is never a failure: there may simply be nothing left to focus.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

/// Direction of a logical focus move inside the popup.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusDirection {
    /// Next focusable descendant in traversal order.
    Next,
    /// Previous focusable descendant in traversal order.
    Previous,
}

/// How the user is currently driving the UI.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum InputMode {
    /// Pointer-driven; focus indicators hidden.
    #[default]
    Pointer,
    /// Keyboard-driven; focus indicators visible.
    Keyboard,
}

/// Capability to move logical focus within the popup's focus scope.
pub trait FocusManager {
    /// Moves focus in `direction`. Returns `true` if focus changed.
    fn move_focus(&mut self, direction: FocusDirection) -> bool;
}

/// Capability to switch the ambient input mode.
pub trait InputModeManager {
    /// Requests `mode`. Returns `true` if the mode changed.
    fn request_input_mode(&mut self, mode: InputMode) -> bool;
}

impl<T: FocusManager + ?Sized> FocusManager for Rc<RefCell<T>> {
    fn move_focus(&mut self, direction: FocusDirection) -> bool {
        match self.try_borrow_mut() {
            Ok(mut manager) => manager.move_focus(direction),
            Err(_) => {
                log::debug!("focus manager busy, {direction:?} move dropped");
                false
            }
        }
    }
}

impl<T: InputModeManager + ?Sized> InputModeManager for Rc<RefCell<T>> {
    fn request_input_mode(&mut self, mode: InputMode) -> bool {
        match self.try_borrow_mut() {
            Ok(mut manager) => manager.request_input_mode(mode),
            Err(_) => {
                log::debug!("input mode manager busy, {mode:?} request dropped");
                false
            }
        }
    }
}

/// Late-bound holder for the popup's ambient capabilities.
///
/// Each slot starts empty and is filled at most once; later attachments are
/// ignored so the capabilities stay stable for the popup's lifetime.
#[derive(Default)]
pub struct FocusCoordinator {
    focus: Option<Box<dyn FocusManager>>,
    input_mode: Option<Box<dyn InputModeManager>>,
}

impl fmt::Debug for FocusCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusCoordinator")
            .field("focus", &self.focus.is_some())
            .field("input_mode", &self.input_mode.is_some())
            .finish()
    }
}

impl FocusCoordinator {
    /// Creates an unmounted coordinator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures both capabilities.
    pub fn attach(
        &mut self,
        focus: impl FocusManager + 'static,
        input_mode: impl InputModeManager + 'static,
    ) {
        self.attach_focus(focus);
        self.attach_input_mode(input_mode);
    }

    /// Captures the focus capability unless one is already held.
    ///
    /// Returns `true` if `focus` was stored.
    pub fn attach_focus(&mut self, focus: impl FocusManager + 'static) -> bool {
        if self.focus.is_some() {
            log::debug!("focus manager already attached, ignoring");
            return false;
        }
        self.focus = Some(Box::new(focus));
        true
    }

    /// Captures the input-mode capability unless one is already held.
    ///
    /// Returns `true` if `input_mode` was stored.
    pub fn attach_input_mode(&mut self, input_mode: impl InputModeManager + 'static) -> bool {
        if self.input_mode.is_some() {
            log::debug!("input mode manager already attached, ignoring");
            return false;
        }
        self.input_mode = Some(Box::new(input_mode));
        true
    }

    /// Returns `true` once both capabilities are available.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.focus.is_some() && self.input_mode.is_some()
    }

    /// Asks the host to switch to keyboard input mode.
    pub fn request_keyboard_mode(&mut self) -> bool {
        match self.input_mode.as_mut() {
            Some(manager) => manager.request_input_mode(InputMode::Keyboard),
            None => {
                log::debug!("input mode requested before mount");
                false
            }
        }
    }

    /// Asks the host to move focus in `direction`.
    pub fn move_focus(&mut self, direction: FocusDirection) -> bool {
        match self.focus.as_mut() {
            Some(manager) => manager.move_focus(direction),
            None => {
                log::debug!("focus move {direction:?} requested before mount");
                false
            }
        }
    }

    /// Releases both capabilities.
    pub fn detach(&mut self) {
        self.focus = None;
        self.input_mode = None;
    }
}
