// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tracking over a fixed set of positional zones.
//!
//! A [`HoverTracker`] owns one [`HoverZone`] per menu item and folds the
//! pointer enter/leave events reported for those zones into a single
//! "currently hovered index" value, published through a [`Signal`].
//!
//! ## Rules
//!
//! - Entering zone `i` makes `i` the hovered index, replacing any previous one.
//! - Leaving zone `i` clears the hover only if `i` is the hovered index.
//!   A late leave from a zone that already lost the hover is ignored.
//! - Zones never overlap in practice, so last write wins is sufficient.
//! - Events for zones outside `0..len` and events after [`HoverTracker::teardown`]
//!   are ignored.
//!
//! ```
//! use understory_menu::hover::HoverTracker;
//!
//! let mut tracker = HoverTracker::new(3);
//! let first = tracker.zone(0).unwrap();
//! let second = tracker.zone(1).unwrap();
//!
//! tracker.on_enter(first);
//! tracker.on_enter(second);
//! tracker.on_leave(first); // stale, `second` keeps the hover
//! assert_eq!(tracker.hovered(), Some(1));
//!
//! tracker.on_leave(second);
//! assert_eq!(tracker.hovered(), None);
//! ```

use crate::signal::Signal;

/// Opaque registration handle for one hover-sensitive region.
///
/// Handles are handed to item renderers so they can report pointer
/// enter/leave for the region they draw.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HoverZone(usize);

impl HoverZone {
    /// Position of the zone's item within the resolved item list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Tracks which of `len` zones currently holds the pointer.
#[derive(Debug)]
pub struct HoverTracker {
    len: usize,
    hovered: Signal<Option<usize>>,
    active: bool,
}

impl HoverTracker {
    /// Creates a tracker with `len` zones and nothing hovered.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            len,
            hovered: Signal::new(None),
            active: true,
        }
    }

    /// Number of zones.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no zones.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the handle of zone `index`, or `None` if out of range.
    #[must_use]
    pub fn zone(&self, index: usize) -> Option<HoverZone> {
        (index < self.len).then_some(HoverZone(index))
    }

    /// Iterates over all zone handles in item order.
    pub fn zones(&self) -> impl Iterator<Item = HoverZone> {
        (0..self.len).map(HoverZone)
    }

    /// Currently hovered index.
    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.hovered.get()
    }

    /// Returns `true` if zone `index` holds the hover.
    #[must_use]
    pub fn is_hovered(&self, index: usize) -> bool {
        self.hovered() == Some(index)
    }

    /// The underlying signal, for subscription and change detection.
    pub fn signal(&mut self) -> &mut Signal<Option<usize>> {
        &mut self.hovered
    }

    /// Version of the hovered value; moves on every change.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.hovered.version()
    }

    /// Returns `false` once the tracker has been torn down.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Records that the pointer entered `zone`.
    ///
    /// Returns `true` if the hovered index changed.
    pub fn on_enter(&mut self, zone: HoverZone) -> bool {
        if !self.accepts(zone) {
            return false;
        }
        let changed = self.hovered.set(Some(zone.0));
        if changed {
            log::trace!("hover entered zone {}", zone.0);
        }
        changed
    }

    /// Records that the pointer left `zone`.
    ///
    /// Returns `true` if the hovered index changed.
    pub fn on_leave(&mut self, zone: HoverZone) -> bool {
        if !self.accepts(zone) || self.hovered() != Some(zone.0) {
            return false;
        }
        log::trace!("hover left zone {}", zone.0);
        self.hovered.set(None)
    }

    /// Clears the hover, drops all subscribers and ignores further events.
    ///
    /// Calling this more than once is harmless.
    pub fn teardown(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.hovered.set(None);
        self.hovered.clear_subscribers();
    }

    fn accepts(&self, zone: HoverZone) -> bool {
        if !self.active {
            log::debug!("hover event for zone {} after teardown ignored", zone.0);
            return false;
        }
        if zone.0 >= self.len {
            log::debug!(
                "hover event for zone {} outside {} zones ignored",
                zone.0,
                self.len
            );
            return false;
        }
        true
    }
}
