// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu entries: leaf actions and groups with nested submenus.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// A single entry of a popup menu.
///
/// Items are consumed, never mutated, by the popup: once a list has been
/// resolved for a popup instance it stays fixed until that popup is dropped.
pub enum MenuItem {
    /// A leaf entry that performs an operation and then dismisses the popup.
    Action(ActionItem),
    /// An entry that opens a nested submenu while hovered.
    Group(GroupItem),
}

impl MenuItem {
    /// Creates a leaf action with the given label and callback.
    pub fn action(label: impl Into<String>, on_click: impl Fn() + 'static) -> Self {
        Self::Action(ActionItem {
            label: label.into(),
            on_click: Box::new(on_click),
        })
    }

    /// Creates a group with the given label and nested items.
    pub fn group(label: impl Into<String>, items: Vec<Self>) -> Self {
        Self::Group(GroupItem {
            label: label.into(),
            items,
        })
    }

    /// Returns the display label of this entry.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Action(action) => &action.label,
            Self::Group(group) => &group.label,
        }
    }

    /// Returns `true` if this entry opens a submenu.
    #[must_use]
    pub const fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action(action) => f.debug_tuple("Action").field(action).finish(),
            Self::Group(group) => f.debug_tuple("Group").field(group).finish(),
        }
    }
}

/// Payload of [`MenuItem::Action`].
pub struct ActionItem {
    /// Display label.
    pub label: String,
    on_click: Box<dyn Fn()>,
}

impl ActionItem {
    /// Runs the action's callback.
    ///
    /// This does not dismiss anything by itself; the popup controller does that
    /// once the callback has returned.
    pub fn invoke(&self) {
        (self.on_click)();
    }
}

impl fmt::Debug for ActionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionItem")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Payload of [`MenuItem::Group`].
#[derive(Debug)]
pub struct GroupItem {
    /// Display label.
    pub label: String,
    /// Entries shown in the submenu.
    pub items: Vec<MenuItem>,
}
