// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simple ambient focus and input-mode systems.
//!
//! Hosts with their own focus machinery implement
//! [`FocusManager`](crate::focus::FocusManager) and
//! [`InputModeManager`](crate::focus::InputModeManager) directly. Hosts
//! without one can use [`FocusScope`], which treats the popup's items as a
//! vertical run of focus slots, and [`InputModeState`].
//!
//! Share them with the popup through `Rc<RefCell<_>>` so the host can still
//! read the focused slot while the popup holds its own handle:
//!
//! ```
//! use core::cell::RefCell;
//! use std::rc::Rc;
//! use understory_menu::focus::{FocusCoordinator, FocusDirection};
//! use understory_menu::scope::{FocusScope, InputModeState, WrapMode};
//!
//! let scope = Rc::new(RefCell::new(FocusScope::new(3, WrapMode::Scope)));
//! let mode = Rc::new(RefCell::new(InputModeState::default()));
//!
//! let mut coordinator = FocusCoordinator::new();
//! coordinator.attach(scope.clone(), mode.clone());
//! coordinator.move_focus(FocusDirection::Next);
//! assert_eq!(scope.borrow().focused(), Some(0));
//! ```

use alloc::vec;
use alloc::vec::Vec;

use crate::focus::{FocusDirection, FocusManager, InputMode, InputModeManager};

/// What happens when traversal runs off either end of the scope.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum WrapMode {
    /// Stay on the edge slot.
    Never,
    /// Continue from the opposite end.
    #[default]
    Scope,
}

/// Linear focus traversal over `len` slots.
#[derive(Clone, Debug)]
pub struct FocusScope {
    enabled: Vec<bool>,
    focused: Option<usize>,
    wrap: WrapMode,
}

impl FocusScope {
    /// Creates a scope of `len` enabled slots with nothing focused.
    #[must_use]
    pub fn new(len: usize, wrap: WrapMode) -> Self {
        Self {
            enabled: vec![true; len],
            focused: None,
            wrap,
        }
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    /// Returns `true` if there are no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    /// Currently focused slot.
    #[must_use]
    pub const fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Enables or disables slot `index`. Disabling the focused slot clears focus.
    pub fn set_enabled(&mut self, index: usize, enabled: bool) {
        if let Some(slot) = self.enabled.get_mut(index) {
            *slot = enabled;
            if !enabled && self.focused == Some(index) {
                self.focused = None;
            }
        }
    }

    /// Focuses `index` directly, for example on click.
    ///
    /// Returns `false` if the slot does not exist or is disabled.
    pub fn focus(&mut self, index: usize) -> bool {
        if self.enabled.get(index).copied().unwrap_or(false) {
            self.focused = Some(index);
            true
        } else {
            false
        }
    }

    /// Clears focus.
    pub fn clear_focus(&mut self) {
        self.focused = None;
    }

    /// Computes the slot a move in `direction` would land on.
    #[must_use]
    pub fn next(&self, direction: FocusDirection) -> Option<usize> {
        let candidates: Vec<usize> = self
            .enabled
            .iter()
            .enumerate()
            .filter_map(|(i, &enabled)| enabled.then_some(i))
            .collect();
        let (&first, &last) = (candidates.first()?, candidates.last()?);

        let origin = self
            .focused
            .and_then(|f| candidates.iter().position(|&i| i == f));
        let wraps = self.wrap == WrapMode::Scope;

        match (direction, origin) {
            (FocusDirection::Next, None) => Some(first),
            (FocusDirection::Previous, None) => Some(last),
            (FocusDirection::Next, Some(pos)) => match candidates.get(pos + 1) {
                Some(&i) => Some(i),
                None => wraps.then_some(first),
            },
            (FocusDirection::Previous, Some(pos)) => match pos.checked_sub(1) {
                Some(prev) => Some(candidates[prev]),
                None => wraps.then_some(last),
            },
        }
    }
}

impl FocusManager for FocusScope {
    fn move_focus(&mut self, direction: FocusDirection) -> bool {
        match self.next(direction) {
            Some(target) if self.focused != Some(target) => {
                self.focused = Some(target);
                true
            }
            _ => false,
        }
    }
}

/// Holds the ambient [`InputMode`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InputModeState {
    mode: InputMode,
}

impl InputModeState {
    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> InputMode {
        self.mode
    }

    /// Returns `true` if focus indicators should be drawn.
    #[must_use]
    pub fn shows_focus_indicator(&self) -> bool {
        self.mode == InputMode::Keyboard
    }
}

impl InputModeManager for InputModeState {
    fn request_input_mode(&mut self, mode: InputMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }
}
