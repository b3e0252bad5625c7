// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The popup controller.
//!
//! [`PopupController`] owns one popup instance from open to dismissal. It
//! resolves the item list once, tracks hover per item, intercepts keys,
//! forwards focus requests to the host, gates scrolling of the item column and
//! enforces the `Open → Dismissed` lifecycle.
//!
//! ## Event flow
//!
//! - Pointer: [`on_pointer_enter`](PopupController::on_pointer_enter) /
//!   [`on_pointer_leave`](PopupController::on_pointer_leave) update the
//!   hovered index; [`submenu_open`](PopupController::submenu_open) follows it.
//! - Keys: [`on_key`](PopupController::on_key) handles Escape and the
//!   vertical arrows and reports whether the key was consumed.
//! - Activation: [`activate`](PopupController::activate) runs a leaf action
//!   and then dismisses.
//! - Drawing: [`layout`](PopupController::layout) measures and places the
//!   popup; [`render`](PopupController::render) hands each item to an
//!   [`ItemRenderer`].
//!
//! ## Dismissal
//!
//! Dismissal can come from the caller ([`dismiss`](PopupController::dismiss)
//! or a [`DismissHandle`]), from Escape, or from an action. The first one
//! flips the state and runs the caller's `on_dismiss`; the rest are no-ops.
//! From that moment the popup reports no hover and no open submenu, ignores
//! keys and pointer events, and renders nothing. Releasing the hover zones and
//! the focus capabilities happens once, after the event that caused the
//! dismissal has been fully handled, or on the next call into the controller
//! when a [`DismissHandle`] was used from outside any event.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use understory_menu::{KeyEvent, KeyOutcome, MenuItem, MenuParams, NamedKey, PopupController};
//!
//! let mut popup = PopupController::open(
//!     || vec![
//!         MenuItem::action("Copy", || {}),
//!         MenuItem::group("Share", vec![MenuItem::action("Mail", || {})]),
//!     ],
//!     MenuParams::default(),
//!     |anchor: Rect, _window: Size, _popup: Size| Point::new(anchor.x0, anchor.y1),
//!     || {},
//! );
//!
//! let share = popup.zone(1).unwrap();
//! popup.on_pointer_enter(share);
//! assert!(popup.submenu_open(1));
//!
//! assert_eq!(popup.on_key(&KeyEvent::down(NamedKey::Escape)), KeyOutcome::Handled);
//! assert!(!popup.is_open());
//! assert_eq!(popup.on_key(&KeyEvent::down(NamedKey::Escape)), KeyOutcome::Ignored);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect, RoundedRect, Size};

use crate::focus::{FocusCoordinator, FocusManager, InputModeManager};
use crate::hover::{HoverTracker, HoverZone};
use crate::item::MenuItem;
use crate::keys::{KeyEvent, KeyOutcome, KeyRouter};
use crate::lifecycle::{DismissHandle, PopupState};
use crate::scroll::{ScrollGate, ScrollLayout, measure_column};
use crate::signal::SubscriptionId;
use crate::style::{Color, MenuParams};

/// Places the popup on screen.
///
/// Given the anchor bounds, the window size and the popup's own size, returns
/// the popup's top-left corner in window coordinates. Implementations should be
/// pure. Closures of the same shape implement this trait.
pub trait PositionProvider {
    /// Computes the popup origin.
    fn position(&self, anchor: Rect, window: Size, popup: Size) -> Point;
}

impl<F> PositionProvider for F
where
    F: Fn(Rect, Size, Size) -> Point,
{
    fn position(&self, anchor: Rect, window: Size, popup: Size) -> Point {
        self(anchor, window, popup)
    }
}

/// Per-item data handed to an [`ItemRenderer`].
#[derive(Debug)]
pub struct ItemContext<'a> {
    /// Position of the item in the resolved list.
    pub index: usize,
    /// Whether the item's submenu should be shown. Always `false` for actions.
    pub submenu_open: bool,
    /// Zone the renderer reports pointer enter/leave for.
    pub hover_zone: HoverZone,
    /// Handle to request dismissal, for example after an action completes.
    pub dismiss: &'a DismissHandle,
}

/// Draws a single menu entry.
///
/// The renderer owns everything about an entry's content, including drawing
/// a group's nested submenu while `submenu_open` is set.
pub trait ItemRenderer {
    /// Renders `item`.
    fn render_item(&mut self, item: &MenuItem, params: &MenuParams, cx: &ItemContext<'_>);
}

/// Visual chrome of the popup surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SurfaceChrome {
    /// Elevation of the surface.
    pub elevation: f64,
    /// Outline of the surface in window coordinates.
    pub shape: RoundedRect,
    /// Fill color.
    pub color: Color,
}

/// Result of [`PopupController::layout`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PopupLayout {
    /// Popup bounds in window coordinates.
    pub bounds: Rect,
    /// How the item column is presented.
    pub column: ScrollLayout,
    /// Surface chrome for the bounds.
    pub chrome: SurfaceChrome,
}

/// Controller for one popup menu instance.
pub struct PopupController {
    items: Vec<MenuItem>,
    params: MenuParams,
    position: Box<dyn PositionProvider>,
    hover: HoverTracker,
    keys: KeyRouter,
    focus: FocusCoordinator,
    scroll: ScrollGate,
    lifecycle: DismissHandle,
    torn_down: bool,
    rendered_version: Option<u64>,
    // Item spans in column coordinates from the last layout.
    item_spans: Vec<(f64, f64)>,
}

impl fmt::Debug for PopupController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopupController")
            .field("items", &self.items.len())
            .field("state", &self.state())
            .field("hovered", &self.hover.hovered())
            .field("focus", &self.focus)
            .field("scroll", &self.scroll)
            .finish_non_exhaustive()
    }
}

impl PopupController {
    /// Opens a popup.
    ///
    /// `items` is called exactly once, here. `on_dismiss` runs once, when the
    /// popup is first dismissed by any means.
    pub fn open(
        items: impl FnOnce() -> Vec<MenuItem>,
        params: MenuParams,
        position: impl PositionProvider + 'static,
        on_dismiss: impl FnOnce() + 'static,
    ) -> Self {
        let items = items();
        log::debug!("popup opened with {} items", items.len());
        Self {
            hover: HoverTracker::new(items.len()),
            keys: KeyRouter,
            focus: FocusCoordinator::new(),
            scroll: ScrollGate::new(params.scrollable, params.show_scrollbar_on_overflow),
            lifecycle: DismissHandle::new(on_dismiss),
            position: Box::new(position),
            torn_down: false,
            rendered_version: None,
            item_spans: Vec::new(),
            items,
            params,
        }
    }

    /// Supplies the host's focus and input-mode capabilities.
    ///
    /// Key handling works before this is called; focus requests are simply
    /// dropped. Only the first call has an effect.
    pub fn mount(
        &mut self,
        focus: impl FocusManager + 'static,
        input_mode: impl InputModeManager + 'static,
    ) {
        self.finish_event();
        if self.torn_down {
            return;
        }
        self.focus.attach(focus, input_mode);
    }

    /// Returns `true` once [`mount`](Self::mount) has supplied both capabilities.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.focus.is_mounted()
    }

    /// A handle that dismisses this popup. Clones share the popup's state.
    #[must_use]
    pub fn dismiss_handle(&self) -> DismissHandle {
        self.lifecycle.clone()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> PopupState {
        self.lifecycle.state()
    }

    /// Returns `true` while the popup is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state() == PopupState::Open
    }

    /// The popup surface always takes focus so keys reach it from first paint.
    #[must_use]
    pub const fn is_focusable(&self) -> bool {
        true
    }

    /// Parameters the popup was opened with.
    #[must_use]
    pub const fn params(&self) -> &MenuParams {
        &self.params
    }

    /// The resolved item list.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Hover state of the items, or `None` once the popup is dismissed.
    #[must_use]
    pub fn hover(&self) -> Option<&HoverTracker> {
        self.is_open().then_some(&self.hover)
    }

    /// Hover zone of item `index`, or `None` if out of range or dismissed.
    #[must_use]
    pub fn zone(&self, index: usize) -> Option<HoverZone> {
        self.hover()?.zone(index)
    }

    /// Currently hovered item. Always `None` once the popup is dismissed,
    /// even before its zones have been torn down.
    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.hover()?.hovered()
    }

    /// Scroll state of the item column.
    #[must_use]
    pub const fn scroll(&self) -> &ScrollGate {
        &self.scroll
    }

    /// Mutable scroll state, for wheel and drag input.
    pub fn scroll_mut(&mut self) -> &mut ScrollGate {
        &mut self.scroll
    }

    /// Calls `f` with every new hovered index until the popup is torn down.
    ///
    /// Returns `None` if the popup is already dismissed.
    pub fn subscribe_hover(
        &mut self,
        f: impl FnMut(Option<usize>) + 'static,
    ) -> Option<SubscriptionId> {
        self.finish_event();
        (!self.torn_down).then(|| self.hover.signal().subscribe(f))
    }

    /// Reports that the pointer entered `zone`. Returns `true` if hover changed.
    pub fn on_pointer_enter(&mut self, zone: HoverZone) -> bool {
        self.finish_event();
        let changed = self.hover.on_enter(zone);
        self.finish_event();
        changed
    }

    /// Reports that the pointer left `zone`. Returns `true` if hover changed.
    pub fn on_pointer_leave(&mut self, zone: HoverZone) -> bool {
        self.finish_event();
        let changed = self.hover.on_leave(zone);
        self.finish_event();
        changed
    }

    /// Intercepts a key event before it reaches any item.
    pub fn on_key(&mut self, event: &KeyEvent) -> KeyOutcome {
        self.finish_event();
        if self.torn_down {
            return KeyOutcome::Ignored;
        }
        let lifecycle = &self.lifecycle;
        let outcome = self.keys.route(event, &mut self.focus, || {
            lifecycle.dismiss();
        });
        self.finish_event();
        outcome
    }

    /// Whether item `index` should show its submenu.
    #[must_use]
    pub fn submenu_open(&self, index: usize) -> bool {
        self.items
            .get(index)
            .is_some_and(|item| submenu_open_for(item, index, self.hovered()))
    }

    /// [`submenu_open`](Self::submenu_open) for every item, in order.
    pub fn submenu_states(&self) -> impl Iterator<Item = bool> + '_ {
        let hovered = self.hovered();
        self.items
            .iter()
            .enumerate()
            .map(move |(index, item)| submenu_open_for(item, index, hovered))
    }

    /// Returns `true` if hover changed since the last [`render`](Self::render).
    #[must_use]
    pub fn needs_render(&self) -> bool {
        self.is_open() && self.rendered_version != Some(self.hover.version())
    }

    /// Renders every item through `renderer`.
    ///
    /// Returns `false`, without calling the renderer, once the popup is
    /// dismissed. A dismissal requested by the renderer takes effect after
    /// the pass completes.
    pub fn render<R: ItemRenderer + ?Sized>(&mut self, renderer: &mut R) -> bool {
        self.finish_event();
        if self.torn_down {
            return false;
        }
        let hovered = self.hover.hovered();
        for (index, (item, hover_zone)) in self.items.iter().zip(self.hover.zones()).enumerate()
        {
            let cx = ItemContext {
                index,
                submenu_open: submenu_open_for(item, index, hovered),
                hover_zone,
                dismiss: &self.lifecycle,
            };
            renderer.render_item(item, &self.params, &cx);
        }
        self.rendered_version = Some(self.hover.version());
        self.finish_event();
        true
    }

    /// Activates item `index`.
    ///
    /// An action runs its callback and then dismisses the popup. Groups,
    /// out-of-range indices and dismissed popups are left alone and return
    /// `false`.
    pub fn activate(&mut self, index: usize) -> bool {
        self.finish_event();
        if self.torn_down {
            return false;
        }
        let Some(MenuItem::Action(action)) = self.items.get(index) else {
            return false;
        };
        log::trace!("activating item {index} ({})", action.label);
        action.invoke();
        self.lifecycle.dismiss();
        self.finish_event();
        true
    }

    /// Measures and places the popup.
    ///
    /// `item_sizes` are the measured sizes of the rendered items, in order.
    /// The item column may use the full window height before it scrolls.
    pub fn layout(&mut self, item_sizes: &[Size], anchor: Rect, window: Size) -> PopupLayout {
        if item_sizes.len() != self.items.len() {
            log::debug!(
                "layout got {} sizes for {} items",
                item_sizes.len(),
                self.items.len()
            );
        }
        let measurements = &self.params.measurements;
        let natural = measure_column(item_sizes, measurements);
        let column = self.scroll.layout(natural.height, window.height);
        let size = Size::new(natural.width, column.visible_extent());
        let bounds = Rect::from_origin_size(self.position.position(anchor, window, size), size);

        self.item_spans.clear();
        let mut y = measurements.menu_top_padding;
        for s in item_sizes {
            self.item_spans.push((y, y + s.height));
            y += s.height;
        }

        PopupLayout {
            bounds,
            column,
            chrome: SurfaceChrome {
                elevation: measurements.elevation,
                shape: bounds.to_rounded_rect(measurements.popup_shape),
                color: self.params.colors.surface,
            },
        }
    }

    /// Scrolls the item column so item `index` is fully visible.
    ///
    /// Uses the spans from the last [`layout`](Self::layout); a no-op before that.
    pub fn reveal_item(&mut self, index: usize) {
        if let Some(&(start, end)) = self.item_spans.get(index) {
            self.scroll.reveal(start, end);
        }
    }

    /// Dismisses the popup and tears it down immediately.
    ///
    /// Returns `true` if this call performed the transition.
    pub fn dismiss(&mut self) -> bool {
        let transitioned = self.lifecycle.dismiss();
        self.finish_event();
        transitioned
    }

    fn finish_event(&mut self) {
        if self.torn_down || !self.lifecycle.is_dismissed() {
            return;
        }
        self.torn_down = true;
        self.hover.teardown();
        self.focus.detach();
        log::debug!("popup torn down");
    }
}

fn submenu_open_for(item: &MenuItem, index: usize, hovered: Option<usize>) -> bool {
    match item {
        MenuItem::Group(_) => hovered == Some(index),
        MenuItem::Action(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::{FocusDirection, InputMode};
    use crate::keys::NamedKey;
    use crate::scope::{FocusScope, InputModeState, WrapMode};
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec;
    use core::cell::{Cell, RefCell};

    fn below_anchor(anchor: Rect, _window: Size, _popup: Size) -> Point {
        Point::new(anchor.x0, anchor.y1)
    }

    fn counter() -> (Rc<Cell<u32>>, impl Fn() + 'static) {
        let count = Rc::new(Cell::new(0));
        let inner = count.clone();
        (count, move || inner.set(inner.get() + 1))
    }

    fn share_menu(delete: impl Fn() + 'static) -> Vec<MenuItem> {
        vec![
            MenuItem::action("Copy", || {}),
            MenuItem::group(
                "Share",
                vec![MenuItem::action("Mail", || {}), MenuItem::action("Link", || {})],
            ),
            MenuItem::action("Delete", delete),
        ]
    }

    fn open(on_dismiss: impl FnOnce() + 'static) -> PopupController {
        PopupController::open(
            || share_menu(|| {}),
            MenuParams::default(),
            below_anchor,
            on_dismiss,
        )
    }

    fn states(popup: &PopupController) -> Vec<bool> {
        popup.submenu_states().collect()
    }

    #[derive(Default)]
    struct Recorder {
        passes: Vec<Vec<(String, bool, usize)>>,
        dismiss_on: Option<usize>,
    }

    impl ItemRenderer for Recorder {
        fn render_item(&mut self, item: &MenuItem, _params: &MenuParams, cx: &ItemContext<'_>) {
            if cx.index == 0 {
                self.passes.push(Vec::new());
            }
            if let Some(pass) = self.passes.last_mut() {
                pass.push((item.label().into(), cx.submenu_open, cx.hover_zone.index()));
            }
            if self.dismiss_on == Some(cx.index) {
                cx.dismiss.dismiss();
            }
        }
    }

    #[test]
    fn producer_runs_once_across_renders() {
        let calls = Rc::new(Cell::new(0));
        let produced = calls.clone();
        let mut popup = PopupController::open(
            move || {
                produced.set(produced.get() + 1);
                share_menu(|| {})
            },
            MenuParams::default(),
            below_anchor,
            || {},
        );
        let mut recorder = Recorder::default();
        for _ in 0..3 {
            assert!(popup.render(&mut recorder), "open popup renders");
        }
        let zone = popup.zone(1).unwrap();
        popup.on_pointer_enter(zone);
        popup.render(&mut recorder);

        assert_eq!(calls.get(), 1);
        assert_eq!(recorder.passes.len(), 4);
        assert!(recorder.passes.iter().all(|pass| pass.len() == 3), "stable item count");
    }

    #[test]
    fn hovering_group_opens_and_closes_its_submenu() {
        let mut popup = open(|| {});
        let share = popup.zone(1).unwrap();

        assert_eq!(states(&popup), [false, false, false]);
        assert!(popup.on_pointer_enter(share), "hover moved to Share");
        assert_eq!(states(&popup), [false, true, false]);
        assert!(popup.on_pointer_leave(share), "hover cleared");
        assert_eq!(states(&popup), [false, false, false]);
    }

    #[test]
    fn hovering_actions_never_opens_a_submenu() {
        let mut popup = open(|| {});
        for index in [0, 2] {
            let zone = popup.zone(index).unwrap();
            popup.on_pointer_enter(zone);
            assert_eq!(popup.hovered(), Some(index));
            assert!(!popup.submenu_open(index), "actions have no submenu");
        }
        assert!(!popup.submenu_open(99), "unknown index has no submenu");
    }

    #[test]
    fn renderer_sees_submenu_state_and_zones() {
        let mut popup = open(|| {});
        let mut recorder = Recorder::default();
        let share = popup.zone(1).unwrap();

        assert!(popup.needs_render(), "never rendered");
        popup.render(&mut recorder);
        assert!(!popup.needs_render(), "nothing changed");

        popup.on_pointer_enter(share);
        assert!(popup.needs_render(), "hover changed");
        popup.render(&mut recorder);

        assert_eq!(
            recorder.passes[1],
            [
                (String::from("Copy"), false, 0),
                (String::from("Share"), true, 1),
                (String::from("Delete"), false, 2),
            ]
        );
    }

    #[test]
    fn escape_dismisses_and_is_consumed() {
        let (dismissals, on_dismiss) = counter();
        let mut popup = open(on_dismiss);

        let outcome = popup.on_key(&KeyEvent::down(NamedKey::Escape));
        assert_eq!(outcome, KeyOutcome::Handled);
        assert_eq!(popup.state(), PopupState::Dismissed);
        assert_eq!(dismissals.get(), 1);
    }

    #[test]
    fn arrow_keys_switch_to_keyboard_and_walk_items() {
        let scope = Rc::new(RefCell::new(FocusScope::new(3, WrapMode::Scope)));
        let mode = Rc::new(RefCell::new(InputModeState::default()));
        let mut popup = open(|| {});
        popup.mount(scope.clone(), mode.clone());
        assert!(popup.is_mounted());

        assert_eq!(popup.on_key(&KeyEvent::down(NamedKey::ArrowDown)), KeyOutcome::Handled);
        assert_eq!(scope.borrow().focused(), Some(0));
        assert_eq!(mode.borrow().mode(), InputMode::Keyboard);

        popup.on_key(&KeyEvent::down(NamedKey::ArrowDown));
        assert_eq!(scope.borrow().focused(), Some(1));

        popup.on_key(&KeyEvent::down(NamedKey::ArrowUp));
        popup.on_key(&KeyEvent::down(NamedKey::ArrowUp));
        assert_eq!(scope.borrow().focused(), Some(2), "wrapped to the last item");
    }

    #[test]
    fn input_mode_is_requested_before_focus_moves() {
        struct Focus(Rc<RefCell<Vec<&'static str>>>);
        impl FocusManager for Focus {
            fn move_focus(&mut self, _direction: FocusDirection) -> bool {
                self.0.borrow_mut().push("focus");
                // Nothing focusable.
                false
            }
        }
        struct Mode(Rc<RefCell<Vec<&'static str>>>);
        impl InputModeManager for Mode {
            fn request_input_mode(&mut self, _mode: InputMode) -> bool {
                self.0.borrow_mut().push("mode");
                true
            }
        }

        let journal = Rc::new(RefCell::new(Vec::new()));
        let mut popup = open(|| {});
        popup.mount(Focus(journal.clone()), Mode(journal.clone()));

        for key in [NamedKey::ArrowDown, NamedKey::ArrowUp] {
            assert_eq!(popup.on_key(&KeyEvent::down(key)), KeyOutcome::Handled);
        }
        assert_eq!(*journal.borrow(), ["mode", "focus", "mode", "focus"]);
        assert!(popup.is_open(), "arrows never dismiss");
    }

    #[test]
    fn arrows_before_mount_are_consumed_no_ops() {
        let mut popup = open(|| {});
        assert!(!popup.is_mounted());
        assert_eq!(popup.on_key(&KeyEvent::down(NamedKey::ArrowDown)), KeyOutcome::Handled);
        assert!(popup.is_open());
    }

    #[test]
    fn other_keys_and_releases_propagate() {
        let mut popup = open(|| {});
        for event in [
            KeyEvent::down('d'),
            KeyEvent::down(NamedKey::Enter),
            KeyEvent::up(NamedKey::Escape),
        ] {
            assert_eq!(popup.on_key(&event), KeyOutcome::Ignored, "{event:?}");
        }
        assert!(popup.is_open());
    }

    #[test]
    fn double_dismiss_is_a_no_op() {
        let (dismissals, on_dismiss) = counter();
        let mut popup = open(on_dismiss);
        let handle = popup.dismiss_handle();

        assert!(popup.dismiss(), "first dismissal");
        assert!(!popup.dismiss(), "second dismissal");
        assert!(!handle.dismiss(), "handle sees the same state");
        assert_eq!(dismissals.get(), 1);
    }

    #[test]
    fn activating_an_action_runs_it_then_dismisses_once() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let on_delete = order.clone();
        let on_dismiss = order.clone();
        let mut popup = PopupController::open(
            move || share_menu(move || on_delete.borrow_mut().push("delete")),
            MenuParams::default(),
            below_anchor,
            move || on_dismiss.borrow_mut().push("dismiss"),
        );

        assert!(popup.activate(2), "Delete is an action");
        assert!(!popup.activate(2), "dismissed popups ignore activation");
        assert_eq!(*order.borrow(), ["delete", "dismiss"]);
        assert_eq!(popup.state(), PopupState::Dismissed);
    }

    #[test]
    fn activating_a_group_does_nothing() {
        let mut popup = open(|| {});
        assert!(!popup.activate(1), "groups open on hover");
        assert!(!popup.activate(7), "out of range");
        assert!(popup.is_open());
    }

    #[test]
    fn action_that_dismisses_itself_still_dismisses_once() {
        let (dismissals, on_dismiss) = counter();
        let slot: Rc<RefCell<Option<DismissHandle>>> = Rc::new(RefCell::new(None));
        let inner = slot.clone();
        let mut popup = PopupController::open(
            move || {
                vec![MenuItem::action("Close", move || {
                    if let Some(handle) = inner.borrow().as_ref() {
                        handle.dismiss();
                    }
                })]
            },
            MenuParams::default(),
            below_anchor,
            on_dismiss,
        );
        *slot.borrow_mut() = Some(popup.dismiss_handle());

        assert!(popup.activate(0), "action ran");
        assert_eq!(dismissals.get(), 1);
    }

    #[test]
    fn dismissal_tears_down_input_handling() {
        let mut popup = open(|| {});
        let share = popup.zone(1).unwrap();
        popup.on_pointer_enter(share);
        popup.dismiss_handle().dismiss();

        assert_eq!(popup.on_key(&KeyEvent::down(NamedKey::ArrowDown)), KeyOutcome::Ignored);
        assert!(!popup.on_pointer_enter(share), "zones are gone");
        assert_eq!(states(&popup), [false, false, false]);
        assert!(popup.hover().is_none(), "hover state is gone");
        assert!(!popup.hover.is_active(), "zones were released");
        assert!(!popup.needs_render());
        assert!(popup.subscribe_hover(|_| {}).is_none());
        assert!(!popup.render(&mut Recorder::default()), "nothing to render");
    }

    #[test]
    fn handle_dismissal_closes_submenus_before_the_next_event() {
        let mut popup = open(|| {});
        let share = popup.zone(1).unwrap();
        popup.on_pointer_enter(share);
        assert!(popup.needs_render());

        let handle = popup.dismiss_handle();
        assert!(handle.dismiss());

        assert_eq!(states(&popup), [false, false, false]);
        assert!(!popup.submenu_open(1));
        assert_eq!(popup.hovered(), None);
        assert!(popup.hover().is_none());
        assert_eq!(popup.zone(1), None);
        assert!(!popup.needs_render());
        assert!(popup.hover.is_active(), "zones are released on the next call");

        assert!(!popup.on_pointer_leave(share));
        assert!(!popup.hover.is_active());
    }

    #[test]
    fn renderer_dismissal_lands_after_the_pass() {
        let (dismissals, on_dismiss) = counter();
        let mut popup = open(on_dismiss);
        let mut recorder = Recorder {
            dismiss_on: Some(0),
            ..Recorder::default()
        };

        assert!(popup.render(&mut recorder), "pass was rendered");
        assert_eq!(recorder.passes[0].len(), 3, "whole pass completed");
        assert_eq!(dismissals.get(), 1);
        assert!(!popup.hover.is_active(), "torn down after the pass");
    }

    #[test]
    fn hover_subscribers_follow_pointer_events() {
        let mut popup = open(|| {});
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        assert!(popup.subscribe_hover(move |v| sink.borrow_mut().push(v)).is_some());

        let copy = popup.zone(0).unwrap();
        popup.on_pointer_enter(copy);
        popup.on_pointer_leave(copy);
        assert_eq!(*seen.borrow(), [Some(0), None]);
    }

    #[test]
    fn layout_places_measures_and_gates_scrolling() {
        let mut popup = open(|| {});
        let sizes = [
            Size::new(100.0, 30.0),
            Size::new(140.0, 30.0),
            Size::new(90.0, 30.0),
        ];
        let anchor = Rect::new(10.0, 10.0, 50.0, 20.0);

        let roomy = popup.layout(&sizes, anchor, Size::new(800.0, 600.0));
        assert_eq!(roomy.bounds, Rect::new(10.0, 20.0, 150.0, 118.0));
        assert!(!roomy.column.shows_scrollbar(), "content fits");
        assert_eq!(roomy.chrome.elevation, 4.0);
        assert_eq!(roomy.chrome.shape.rect(), roomy.bounds);

        let cramped = popup.layout(&sizes, anchor, Size::new(800.0, 50.0));
        assert_eq!(cramped.bounds.height(), 50.0);
        assert!(cramped.column.shows_scrollbar(), "content overflows");

        popup.reveal_item(2);
        assert_eq!(popup.scroll().scroll_offset(), 44.0, "last item fully visible");
    }

    #[test]
    fn non_scrollable_popup_takes_natural_height() {
        let params = MenuParams {
            scrollable: false,
            ..MenuParams::default()
        };
        let mut popup =
            PopupController::open(|| share_menu(|| {}), params, below_anchor, || {});
        let sizes = [Size::new(100.0, 40.0); 3];
        let layout = popup.layout(&sizes, Rect::ZERO, Size::new(800.0, 50.0));
        assert_eq!(layout.column, ScrollLayout::Unconstrained { extent: 128.0 });
        assert_eq!(layout.bounds.height(), 128.0);
    }

    #[test]
    fn popup_is_always_focusable() {
        let popup = open(|| {});
        assert!(popup.is_focusable());
    }
}
