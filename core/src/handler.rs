//! The two-slot message handler contract.
//!
//! Every element carries up to two handlers:
//!
//! - a *class* handler fixed at construction, implementing the element kind;
//! - a *user* handler attachable later, overriding or extending the class.
//!
//! [`Ui::dispatch`](crate::Ui::dispatch) runs the user handler first. A
//! non-zero result short-circuits and the class handler is skipped.

use core::{any::type_name, fmt::Debug};

use crate::{ElementId, Message, Ui};

/// Behaviour attached to an element.
///
/// Handlers receive the whole [`Ui`] so they may query geometry, request
/// repaints, create or destroy elements and dispatch further messages,
/// including back to their own element.
pub trait Handler: 'static {
    /// Handles a message sent to `element` and returns its result.
    ///
    /// Zero means "not handled" for the user slot; for measurement messages
    /// it is the requested extent.
    fn message(&self, ui: &mut Ui, element: ElementId, message: &mut Message<'_>) -> i32;
}

impl Debug for dyn Handler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(type_name::<Self>())
    }
}

impl Handler for () {
    fn message(&self, _ui: &mut Ui, _element: ElementId, _message: &mut Message<'_>) -> i32 {
        0
    }
}

/// Adapter turning a closure into a [`Handler`].
pub struct HandlerFn<F>(F);

impl<F> Debug for HandlerFn<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "HandlerFn<{}>", type_name::<F>())
    }
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&mut Ui, ElementId, &mut Message<'_>) -> i32 + 'static,
{
    fn message(&self, ui: &mut Ui, element: ElementId, message: &mut Message<'_>) -> i32 {
        (self.0)(ui, element, message)
    }
}

/// Wraps a closure as a handler.
///
/// ```
/// use rivulet_core::{Message, handler};
///
/// let quiet = handler(|_ui, _element, message| match message {
///     Message::GetHeight { .. } => 25,
///     _ => 0,
/// });
/// # let _ = quiet;
/// ```
pub const fn handler<F>(f: F) -> HandlerFn<F>
where
    F: Fn(&mut Ui, ElementId, &mut Message<'_>) -> i32 + 'static,
{
    HandlerFn(f)
}
