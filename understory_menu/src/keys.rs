// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Key interception at the popup boundary.
//!
//! [`KeyRouter`] sees key events before any element inside the popup does and
//! handles a small fixed set of them:
//!
//! | Key (pressed)  | Effect                                             | Outcome   |
//! |----------------|----------------------------------------------------|-----------|
//! | Escape         | dismiss the popup                                  | handled   |
//! | Arrow down     | keyboard input mode, then focus next descendant    | handled   |
//! | Arrow up       | keyboard input mode, then focus previous descendant| handled   |
//! | anything else  | none                                               | ignored   |
//!
//! Releases are always ignored. Modifiers do not change the mapping.
//!
//! ```
//! use understory_menu::focus::FocusCoordinator;
//! use understory_menu::keys::{KeyEvent, KeyOutcome, KeyRouter, NamedKey};
//!
//! let mut focus = FocusCoordinator::new();
//! let mut dismissed = false;
//!
//! let outcome = KeyRouter.route(&KeyEvent::down(NamedKey::Escape), &mut focus, || dismissed = true);
//! assert_eq!(outcome, KeyOutcome::Handled);
//! assert!(dismissed);
//!
//! let outcome = KeyRouter.route(&KeyEvent::down('a'), &mut focus, || {});
//! assert_eq!(outcome, KeyOutcome::Ignored);
//! ```

use crate::focus::{FocusCoordinator, FocusDirection};

/// Keys with a name rather than a character.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NamedKey {
    /// Escape.
    Escape,
    /// Arrow up.
    ArrowUp,
    /// Arrow down.
    ArrowDown,
    /// Arrow left.
    ArrowLeft,
    /// Arrow right.
    ArrowRight,
    /// Enter / Return.
    Enter,
    /// Tab.
    Tab,
    /// Space bar.
    Space,
    /// Home.
    Home,
    /// End.
    End,
}

/// Logical key of an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A named key.
    Named(NamedKey),
    /// A key producing a character.
    Character(char),
    /// A key the host could not classify, by platform code.
    Unidentified(u32),
}

impl From<NamedKey> for Key {
    fn from(key: NamedKey) -> Self {
        Self::Named(key)
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Self::Character(c)
    }
}

/// Whether the key went down or up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyState {
    /// Pressed (including auto-repeat).
    Down,
    /// Released.
    Up,
}

bitflags::bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0000_0001;
        /// Control.
        const CONTROL = 0b0000_0010;
        /// Alt / Option.
        const ALT = 0b0000_0100;
        /// Meta / Command / Super.
        const META = 0b0000_1000;
    }
}

/// A keyboard event as delivered to the popup.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Logical key.
    pub key: Key,
    /// Press or release.
    pub state: KeyState,
    /// Held modifiers.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key press without modifiers.
    pub fn down(key: impl Into<Key>) -> Self {
        Self {
            key: key.into(),
            state: KeyState::Down,
            modifiers: Modifiers::empty(),
        }
    }

    /// A key release without modifiers.
    pub fn up(key: impl Into<Key>) -> Self {
        Self {
            key: key.into(),
            state: KeyState::Up,
            modifiers: Modifiers::empty(),
        }
    }

    /// Returns this event with `modifiers` held.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Whether the popup consumed a key event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyOutcome {
    /// The popup handled the key; stop propagation.
    Handled,
    /// Not handled; let default processing see it.
    Ignored,
}

impl KeyOutcome {
    /// Returns `true` for [`KeyOutcome::Handled`].
    #[must_use]
    pub const fn is_handled(self) -> bool {
        matches!(self, Self::Handled)
    }
}

/// What a recognized key asks the popup to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    /// Close the popup.
    Dismiss,
    /// Enter keyboard mode and move focus.
    MoveFocus(FocusDirection),
}

/// Stateless translator from key events to popup commands.
#[derive(Copy, Clone, Debug, Default)]
pub struct KeyRouter;

impl KeyRouter {
    /// Maps `event` to a command, or `None` if the popup does not handle it.
    #[must_use]
    pub fn command_for(self, event: &KeyEvent) -> Option<KeyCommand> {
        if event.state != KeyState::Down {
            return None;
        }
        match event.key {
            Key::Named(NamedKey::Escape) => Some(KeyCommand::Dismiss),
            Key::Named(NamedKey::ArrowDown) => Some(KeyCommand::MoveFocus(FocusDirection::Next)),
            Key::Named(NamedKey::ArrowUp) => Some(KeyCommand::MoveFocus(FocusDirection::Previous)),
            _ => None,
        }
    }

    /// Handles `event`, invoking `dismiss` or focus requests as needed.
    ///
    /// Arrow keys request keyboard input mode before moving focus so the focus
    /// indicator appears together with the first keyboard move. A handled key
    /// reports [`KeyOutcome::Handled`] even if neither request had an effect.
    pub fn route(
        self,
        event: &KeyEvent,
        focus: &mut FocusCoordinator,
        dismiss: impl FnOnce(),
    ) -> KeyOutcome {
        let Some(command) = self.command_for(event) else {
            return KeyOutcome::Ignored;
        };
        log::trace!("key {:?} routed to {command:?}", event.key);
        match command {
            KeyCommand::Dismiss => dismiss(),
            KeyCommand::MoveFocus(direction) => {
                focus.request_keyboard_mode();
                focus.move_focus(direction);
            }
        }
        KeyOutcome::Handled
    }
}
