#![no_std]
//! Core of the Rivulet retained-mode UI engine.
//!
//! A [`Ui`] owns a tree of elements per window. Each element carries a class
//! handler fixed at creation and an optional user handler, and everything the
//! engine asks of an element is a [`Message`] sent through [`Ui::dispatch`].
//!
//! The driver loop is small:
//!
//! 1. create a window with [`Ui::create_window`] and populate it with
//!    [`Ui::create_element`];
//! 2. call [`Ui::layout_window`] once, and [`Ui::resize_window`] whenever the
//!    platform resizes it;
//! 3. feed pointer events through [`Ui::handle_input`].
//!
//! Each of those entry points ends with an *update point*, where elements
//! condemned by [`Ui::destroy`] are reclaimed and pending damage is painted
//! and handed to the [`Platform`].
//!
//! ```
//! use rivulet_core::{ElementFlags, InputEvent, MouseButton, Rect, Ui, WindowConfig};
//!
//! let mut ui = Ui::headless();
//! let window = ui.create_window(&WindowConfig::default().with_size(200, 100))?;
//! let root = ui.window(window).unwrap().root();
//! let button = ui.create_element(root, ElementFlags::empty(), ())?;
//! ui.layout_window(window)?;
//!
//! assert_eq!(ui.element(button).unwrap().bounds(), Rect::new(0, 200, 0, 100));
//! ui.handle_input(window, InputEvent::Down { button: MouseButton::Left, x: 5, y: 5 })?;
//! assert_eq!(ui.window(window).unwrap().pressed(), Some(button));
//! # Ok::<(), rivulet_core::UiError>(())
//! ```

extern crate alloc;

pub mod element;
mod error;
pub mod geometry;
pub mod handler;
pub mod input;
pub mod message;
pub mod paint;
pub mod platform;
mod sweep;
mod ui;
pub mod window;

pub use element::{Element, ElementFlags, ElementId, Lifecycle};
pub use error::UiError;
pub use geometry::Rect;
pub use handler::{Handler, HandlerFn, handler};
pub use input::InputEvent;
pub use message::{Message, MessageCode, MouseButton, UpdateKind};
pub use paint::Painter;
pub use platform::{Frame, Headless, Platform, Presentation};
pub use ui::Ui;
pub use window::{Capture, Window, WindowConfig, WindowId, WindowRoot};
