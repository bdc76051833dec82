#![no_std]
//! Layout containers for Rivulet.
//!
//! Containers are ordinary class handlers. They size their children through
//! two measurement messages, [`Message::GetWidth`](rivulet_core::Message::GetWidth)
//! and [`Message::GetHeight`](rivulet_core::Message::GetHeight), each carrying
//! the extent already known along the other axis, and position them when they
//! receive [`Message::Layout`](rivulet_core::Message::Layout).
//!
//! Leaf elements take part by answering the measurement messages; the fill
//! flags on [`ElementFlags`](rivulet_core::ElementFlags) ask a container to
//! hand out its spare space instead.

extern crate alloc;

pub mod padding;
pub mod panel;

pub use padding::Insets;
pub use panel::{Axis, Panel, PanelFlags};
