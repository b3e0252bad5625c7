// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_menu --heading-base-level=0

//! Understory Menu: a headless controller for popup menus.
//!
//! This crate turns a list of menu entries into the interaction state of a
//! floating, keyboard-navigable, hover-aware popup. It does not draw anything
//! and does not decide where the popup goes; it tells the host which submenus
//! are open, which keys it consumed, how tall the item column is and whether
//! it scrolls, and when the popup is done.
//!
//! ## Pieces
//!
//! - [`MenuItem`]: a leaf action or a group with a nested submenu.
//! - [`HoverTracker`](hover::HoverTracker): folds per-item pointer enter/leave into one
//!   hovered index, published through a [`Signal`](signal::Signal).
//! - [`KeyRouter`](keys::KeyRouter): Escape dismisses, arrow down/up move focus;
//!   everything else propagates.
//! - [`FocusCoordinator`](focus::FocusCoordinator): late-bound access to the host's
//!   focus and input-mode systems. Requests before mount are no-ops.
//! - [`ScrollGate`](scroll::ScrollGate): wraps the item column in a scroll region and
//!   decides whether a scrollbar is shown.
//! - [`PopupController`]: composes all of the above and owns the
//!   `Open → Dismissed` lifecycle.
//!
//! The [`scope`] module has a small linear [`FocusScope`](scope::FocusScope) and an
//! [`InputModeState`](scope::InputModeState) for hosts without focus machinery of their own.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::{Point, Rect, Size};
//! use understory_menu::scope::{FocusScope, InputModeState, WrapMode};
//! use understory_menu::{KeyEvent, MenuItem, MenuParams, NamedKey, PopupController};
//!
//! let deleted = Rc::new(RefCell::new(false));
//! let flag = deleted.clone();
//!
//! let mut popup = PopupController::open(
//!     move || {
//!         vec![
//!             MenuItem::action("Copy", || {}),
//!             MenuItem::group("Share", vec![MenuItem::action("Mail", || {})]),
//!             MenuItem::action("Delete", move || *flag.borrow_mut() = true),
//!         ]
//!     },
//!     MenuParams::default(),
//!     |anchor: Rect, _window: Size, _popup: Size| Point::new(anchor.x0, anchor.y1),
//!     || {},
//! );
//!
//! // The host mounts the popup and hands over its focus systems.
//! let scope = Rc::new(RefCell::new(FocusScope::new(3, WrapMode::Scope)));
//! popup.mount(scope.clone(), Rc::new(RefCell::new(InputModeState::default())));
//!
//! // Hovering the group opens its submenu.
//! let share = popup.zone(1).unwrap();
//! popup.on_pointer_enter(share);
//! assert_eq!(popup.submenu_states().collect::<Vec<_>>(), [false, true, false]);
//!
//! // Arrow down focuses the first item.
//! assert!(popup.on_key(&KeyEvent::down(NamedKey::ArrowDown)).is_handled());
//! assert_eq!(scope.borrow().focused(), Some(0));
//!
//! // Activating an action runs it and closes the popup.
//! assert!(popup.activate(2));
//! assert!(*deleted.borrow());
//! assert!(!popup.is_open());
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! Diagnostics go through the [`log`] facade; no logger is installed.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod focus;
pub mod hover;
pub mod item;
pub mod keys;
pub mod lifecycle;
pub mod popup;
pub mod scope;
pub mod scroll;
pub mod signal;
pub mod style;

pub use item::{ActionItem, GroupItem, MenuItem};
pub use keys::{Key, KeyEvent, KeyOutcome, KeyState, Modifiers, NamedKey};
pub use lifecycle::{DismissHandle, PopupState};
pub use popup::{
    ItemContext, ItemRenderer, PopupController, PopupLayout, PositionProvider, SurfaceChrome,
};
pub use style::{Color, MenuColors, MenuMeasurements, MenuParams};
