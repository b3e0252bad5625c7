// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drive a context menu through a scripted session and print what a renderer would draw.
//!
//! This example shows how to combine:
//! - `PopupController` for hover, key and lifecycle handling,
//! - `FocusScope` / `InputModeState` as the host's focus systems,
//! - a text `ItemRenderer` standing in for real drawing.
//!
//! Run:
//! - `cargo run -p understory_demos --example context_menu`
//! - `RUST_LOG=info cargo run -p understory_demos --example context_menu` to hide the
//!   controller's debug diagnostics

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect, Size};
use understory_menu::scope::{FocusScope, InputModeState, WrapMode};
use understory_menu::{
    ItemContext, ItemRenderer, KeyEvent, MenuItem, MenuParams, NamedKey, PopupController,
};

/// Renders each entry as one line of text.
struct TextRenderer {
    focused: Rc<RefCell<FocusScope>>,
    mode: Rc<RefCell<InputModeState>>,
}

impl ItemRenderer for TextRenderer {
    fn render_item(&mut self, item: &MenuItem, _params: &MenuParams, cx: &ItemContext<'_>) {
        let show_focus = self.mode.borrow().shows_focus_indicator();
        let marker = if show_focus && self.focused.borrow().focused() == Some(cx.index) {
            '>'
        } else {
            ' '
        };
        match item {
            MenuItem::Action(action) => println!("  {marker} {}", action.label),
            MenuItem::Group(group) => {
                println!("  {marker} {} ▸", group.label);
                if cx.submenu_open {
                    for child in &group.items {
                        println!("        {}", child.label());
                    }
                }
            }
        }
    }
}

fn context_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::action("Copy", || println!("-> copied")),
        MenuItem::group(
            "Share",
            vec![
                MenuItem::action("Mail", || println!("-> mailed")),
                MenuItem::action("Link", || println!("-> linked")),
            ],
        ),
        MenuItem::action("Delete", || println!("-> deleted")),
    ]
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let mut popup = PopupController::open(
        context_menu,
        MenuParams::default(),
        |anchor: Rect, window: Size, popup: Size| {
            // Below the anchor, nudged up if it would leave the window.
            let y = if anchor.y1 + popup.height > window.height {
                (window.height - popup.height).max(0.0)
            } else {
                anchor.y1
            };
            Point::new(anchor.x0, y)
        },
        || println!("(popup closed)"),
    );

    let scope = Rc::new(RefCell::new(FocusScope::new(popup.items().len(), WrapMode::Scope)));
    let mode = Rc::new(RefCell::new(InputModeState::default()));
    popup.mount(scope.clone(), mode.clone());

    let mut renderer = TextRenderer {
        focused: scope.clone(),
        mode,
    };

    let sizes = vec![Size::new(120.0, 24.0); popup.items().len()];
    let layout = popup.layout(
        &sizes,
        Rect::new(40.0, 40.0, 80.0, 60.0),
        Size::new(640.0, 480.0),
    );
    println!(
        "popup at {:?}, scrollbar: {}",
        layout.bounds,
        layout.column.shows_scrollbar()
    );

    println!("initial:");
    popup.render(&mut renderer);

    let share = popup.zone(1).expect("menu has a second item");
    popup.on_pointer_enter(share);
    println!("hovering Share:");
    popup.render(&mut renderer);

    popup.on_pointer_leave(share);
    for _ in 0..3 {
        popup.on_key(&KeyEvent::down(NamedKey::ArrowDown));
    }
    println!("after three arrow-downs:");
    popup.render(&mut renderer);

    let focused = scope.borrow().focused();
    if let Some(index) = focused {
        println!("activating item {index}");
        popup.activate(index);
    }
    assert!(!popup.is_open(), "activation closes the popup");
}
