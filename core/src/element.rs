//! Element tree and message dispatch.

use alloc::{rc::Rc, vec::Vec};
use core::fmt;

use tracing::trace;

use crate::{Handler, Message, Rect, Ui, UiError, WindowId};

slotmap::new_key_type! {
    /// Handle to an element stored in a [`Ui`].
    ///
    /// Handles are weak: once the element is reclaimed the handle goes stale and
    /// every lookup through it reports the element as absent.
    pub struct ElementId;
}

bitflags::bitflags! {
    /// Per-element flag bits.
    ///
    /// The low 16 bits belong to the element kind (see [`ElementFlags::from_kind`]);
    /// the high bits are understood by the engine itself.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ElementFlags: u32 {
        /// Share the remaining vertical space of a vertical container, or take
        /// the full height of a horizontal one.
        const VERTICAL_FILL = 1 << 16;
        /// Share the remaining horizontal space of a horizontal container, or
        /// take the full width of a vertical one.
        const HORIZONTAL_FILL = 1 << 17;
        /// Both fill flags.
        const FILL = Self::VERTICAL_FILL.bits() | Self::HORIZONTAL_FILL.bits();

        const _ = !0;
    }
}

impl ElementFlags {
    /// Builds flags carrying only kind-specific bits.
    #[must_use]
    pub const fn from_kind(bits: u16) -> Self {
        Self::from_bits_retain(bits as u32)
    }

    /// Returns the kind-specific low bits.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn kind(self) -> u16 {
        (self.bits() & 0xFFFF) as u16
    }
}

/// Lifecycle of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Receives messages normally.
    #[default]
    Live,
    /// Condemned; reclaimed at the next sweep. Absorbs every message but
    /// [`Message::Destroy`].
    PendingDestroy,
}

/// A node of the element tree.
pub struct Element {
    pub(crate) flags: ElementFlags,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) destroy_descendant: bool,
    pub(crate) bounds: Rect,
    pub(crate) clip: Rect,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) window: WindowId,
    pub(crate) class: Option<Rc<dyn Handler>>,
    pub(crate) user: Option<Rc<dyn Handler>>,
}

impl Element {
    pub(crate) fn new(
        parent: Option<ElementId>,
        window: WindowId,
        flags: ElementFlags,
        class: Option<Rc<dyn Handler>>,
    ) -> Self {
        Self {
            flags,
            lifecycle: Lifecycle::Live,
            destroy_descendant: false,
            bounds: Rect::INVALID,
            clip: Rect::INVALID,
            parent,
            children: Vec::new(),
            window,
            class,
            user: None,
        }
    }

    /// Returns the element's flags.
    #[must_use]
    pub const fn flags(&self) -> ElementFlags {
        self.flags
    }

    /// Returns the rectangle assigned by the last move.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Returns the visible part of the bounds after clipping by every ancestor.
    #[must_use]
    pub const fn clip(&self) -> Rect {
        self.clip
    }

    /// Returns the parent, or `None` for a window root.
    #[must_use]
    pub const fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Returns the children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Returns the owning window.
    #[must_use]
    pub const fn window(&self) -> WindowId {
        self.window
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Returns true once [`Ui::destroy`] has condemned this element.
    #[must_use]
    pub const fn is_pending_destroy(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::PendingDestroy)
    }

    /// Returns true if some descendant awaits the next sweep.
    #[must_use]
    pub const fn has_pending_descendant(&self) -> bool {
        self.destroy_descendant
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("flags", &self.flags)
            .field("lifecycle", &self.lifecycle)
            .field("destroy_descendant", &self.destroy_descendant)
            .field("bounds", &self.bounds)
            .field("clip", &self.clip)
            .field("parent", &self.parent)
            .field("children", &self.children.len())
            .field("window", &self.window)
            .field("class", &self.class.is_some())
            .field("user", &self.user.is_some())
            .finish()
    }
}

impl Ui {
    /// Creates an element as the last child of `parent`.
    ///
    /// The element inherits the parent's window. Bounds and clip start empty
    /// until the first [`Ui::move_element`]. A child created under a condemned
    /// parent is condemned with it.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::StaleElement`] if `parent` no longer exists.
    pub fn create_element(
        &mut self,
        parent: ElementId,
        flags: ElementFlags,
        class: impl Handler,
    ) -> Result<ElementId, UiError> {
        let (window, condemned) = self
            .elements
            .get(parent)
            .map(|p| (p.window, p.is_pending_destroy()))
            .ok_or(UiError::StaleElement(parent))?;

        let class: Rc<dyn Handler> = Rc::new(class);
        let id = self
            .elements
            .insert(Element::new(Some(parent), window, flags, Some(class)));
        self.elements[parent].children.push(id);

        if condemned {
            self.destroy(id);
        }
        Ok(id)
    }

    /// Attaches (or replaces) the user handler of an element.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::StaleElement`] if the element no longer exists.
    pub fn set_user_handler(
        &mut self,
        element: ElementId,
        handler: impl Handler,
    ) -> Result<(), UiError> {
        let entry = self
            .elements
            .get_mut(element)
            .ok_or(UiError::StaleElement(element))?;
        entry.user = Some(Rc::new(handler));
        Ok(())
    }

    /// Detaches the user handler, returning whether one was attached.
    pub fn clear_user_handler(&mut self, element: ElementId) -> bool {
        self.elements
            .get_mut(element)
            .and_then(|entry| entry.user.take())
            .is_some()
    }

    /// Sends a message to an element and returns the handler result.
    ///
    /// The user handler runs first and a non-zero result short-circuits the
    /// class handler. A condemned element absorbs everything but
    /// [`Message::Destroy`], and a stale handle absorbs everything; both
    /// return 0 without running a handler. The check is made on entry, so a
    /// handler that condemns its own element does not cut its dispatch short.
    pub fn dispatch(&mut self, element: ElementId, mut message: Message<'_>) -> i32 {
        self.send(element, &mut message)
    }

    /// Like [`Ui::dispatch`] but borrows the message, so the caller may
    /// inspect a payload the handlers filled in.
    pub fn send(&mut self, element: ElementId, message: &mut Message<'_>) -> i32 {
        let Some((user, class)) = self.handlers_for(element, message) else {
            return 0;
        };

        if let Some(user) = user {
            let result = user.message(self, element, message);
            if result != 0 {
                return result;
            }
        }

        class.map_or(0, |class| class.message(self, element, message))
    }

    #[allow(clippy::type_complexity)]
    fn handlers_for(
        &self,
        element: ElementId,
        message: &Message<'_>,
    ) -> Option<(Option<Rc<dyn Handler>>, Option<Rc<dyn Handler>>)> {
        let entry = self.elements.get(element)?;
        if entry.is_pending_destroy() && !matches!(message, Message::Destroy) {
            trace!(?element, code = ?message.code(), "message absorbed by condemned element");
            return None;
        }
        Some((entry.user.clone(), entry.class.clone()))
    }

    /// Assigns new bounds to an element.
    ///
    /// The clip becomes `parent.clip ∩ bounds` (just `bounds` for a window
    /// root). When bounds or clip changed, or `force_layout` is set, both are
    /// committed and [`Message::Layout`] is dispatched. No repaint is
    /// requested; callers that change geometry request one themselves.
    pub fn move_element(&mut self, element: ElementId, bounds: Rect, force_layout: bool) {
        let Some(entry) = self.elements.get(element) else {
            return;
        };
        let clip = match entry.parent.and_then(|parent| self.elements.get(parent)) {
            Some(parent) => parent.clip.intersection(bounds),
            None => bounds,
        };

        let entry = &mut self.elements[element];
        if entry.bounds != bounds || entry.clip != clip || force_layout {
            entry.bounds = bounds;
            entry.clip = clip;
            self.dispatch(element, Message::Layout);
        }
    }

    /// Returns the deepest element under `(x, y)`, starting at `root`.
    ///
    /// At each level the first child in insertion order whose clip contains
    /// the point is descended into. Overlapping later siblings are never hit.
    #[must_use]
    pub fn find_by_point(&self, root: ElementId, x: i32, y: i32) -> ElementId {
        let mut current = root;
        loop {
            let next = self.children(current).iter().copied().find(|child| {
                self.elements
                    .get(*child)
                    .is_some_and(|entry| entry.clip.contains(x, y))
            });
            match next {
                Some(child) => current = child,
                None => return current,
            }
        }
    }

    /// Looks up an element.
    #[must_use]
    pub fn element(&self, element: ElementId) -> Option<&Element> {
        self.elements.get(element)
    }

    /// Returns the children of an element, or an empty slice for a stale handle.
    #[must_use]
    pub fn children(&self, element: ElementId) -> &[ElementId] {
        self.elements
            .get(element)
            .map_or(&[], |entry| entry.children.as_slice())
    }

    /// Returns the parent of an element.
    #[must_use]
    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.elements.get(element).and_then(|entry| entry.parent)
    }

    /// Returns the window an element belongs to.
    #[must_use]
    pub fn window_of(&self, element: ElementId) -> Option<WindowId> {
        self.elements.get(element).map(|entry| entry.window)
    }

    /// Replaces the flags of an element. Takes effect at the next layout.
    pub fn set_flags(&mut self, element: ElementId, flags: ElementFlags) {
        if let Some(entry) = self.elements.get_mut(element) {
            entry.flags = flags;
        }
    }

    /// Returns the number of live and condemned elements across all windows.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}

#[cfg(test)]
mod tests {
    use alloc::{rc::Rc, vec, vec::Vec};
    use core::cell::RefCell;

    use crate::{ElementFlags, Message, MessageCode, Rect, Ui, WindowConfig, handler};

    fn window(ui: &mut Ui) -> crate::ElementId {
        let window = ui
            .create_window(&WindowConfig::default().with_size(200, 100))
            .unwrap();
        ui.window(window).unwrap().root()
    }

    #[test]
    fn children_keep_insertion_order_and_inherit_window() {
        let mut ui = Ui::headless();
        let root = window(&mut ui);
        let a = ui.create_element(root, ElementFlags::empty(), ()).unwrap();
        let b = ui.create_element(root, ElementFlags::empty(), ()).unwrap();

        assert_eq!(ui.children(root), &[a, b]);
        assert_eq!(ui.parent(a), Some(root));
        assert_eq!(ui.window_of(b), ui.window_of(root));
    }

    #[test]
    fn user_handler_short_circuits_on_non_zero() {
        let mut ui = Ui::headless();
        let root = window(&mut ui);
        let log = Rc::new(RefCell::new(Vec::new()));

        let class_log = log.clone();
        let element = ui
            .create_element(
                root,
                ElementFlags::empty(),
                handler(move |_, _, _| {
                    class_log.borrow_mut().push("class");
                    5
                }),
            )
            .unwrap();

        let user_log = log.clone();
        ui.set_user_handler(
            element,
            handler(move |_, _, message| {
                user_log.borrow_mut().push("user");
                i32::from(matches!(message, Message::Clicked(_))) * 9
            }),
        )
        .unwrap();

        assert_eq!(ui.dispatch(element, Message::Layout), 5);
        assert_eq!(
            ui.dispatch(element, Message::Clicked(crate::MouseButton::Left)),
            9
        );
        assert_eq!(*log.borrow(), vec!["user", "class", "user"]);

        assert!(ui.clear_user_handler(element));
        assert_eq!(ui.dispatch(element, Message::Layout), 5);
    }

    #[test]
    fn condemned_elements_absorb_all_but_destroy() {
        let mut ui = Ui::headless();
        let root = window(&mut ui);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let element = ui
            .create_element(
                root,
                ElementFlags::empty(),
                handler(move |_, _, message| {
                    sink.borrow_mut().push(message.code());
                    1
                }),
            )
            .unwrap();

        ui.destroy(element);
        assert_eq!(ui.dispatch(element, Message::Layout), 0);
        assert_eq!(ui.dispatch(element, Message::user(MessageCode::USER, 1)), 0);
        assert_eq!(ui.dispatch(element, Message::Destroy), 1);
        assert_eq!(*seen.borrow(), vec![MessageCode::DESTROY]);
    }

    #[test]
    fn the_destroy_guard_applies_from_the_next_dispatch() {
        let mut ui = Ui::headless();
        let root = window(&mut ui);
        let class_calls = Rc::new(RefCell::new(0));
        let counter = class_calls.clone();
        let element = ui
            .create_element(
                root,
                ElementFlags::empty(),
                handler(move |_, _, _| {
                    *counter.borrow_mut() += 1;
                    0
                }),
            )
            .unwrap();
        ui.set_user_handler(
            element,
            handler(|ui, element, _| {
                ui.destroy(element);
                0
            }),
        )
        .unwrap();

        ui.dispatch(element, Message::Layout);
        assert_eq!(*class_calls.borrow(), 1);
        ui.dispatch(element, Message::Layout);
        assert_eq!(*class_calls.borrow(), 1);
    }

    #[test]
    fn move_clips_to_parent_and_lays_out_only_on_change() {
        let mut ui = Ui::headless();
        let root = window(&mut ui);
        let layouts = Rc::new(RefCell::new(0));
        let counter = layouts.clone();
        let child = ui
            .create_element(
                root,
                ElementFlags::empty(),
                handler(move |_, _, message| {
                    if matches!(message, Message::Layout) {
                        *counter.borrow_mut() += 1;
                    }
                    0
                }),
            )
            .unwrap();

        let bounds = Rect::new(150, 250, 50, 150);
        ui.move_element(child, bounds, false);
        let entry = ui.element(child).unwrap();
        assert_eq!(entry.bounds(), bounds);
        assert_eq!(entry.clip(), Rect::new(150, 200, 50, 100));
        assert!(entry.bounds().contains_rect(entry.clip()));
        assert_eq!(*layouts.borrow(), 1);

        ui.move_element(child, bounds, false);
        assert_eq!(*layouts.borrow(), 1);
        ui.move_element(child, bounds, true);
        assert_eq!(*layouts.borrow(), 2);
    }

    #[test]
    fn hit_testing_prefers_the_first_matching_child() {
        let mut ui = Ui::headless();
        let root = window(&mut ui);
        let first = ui.create_element(root, ElementFlags::empty(), ()).unwrap();
        let second = ui.create_element(root, ElementFlags::empty(), ()).unwrap();
        let nested = ui.create_element(second, ElementFlags::empty(), ()).unwrap();

        ui.move_element(first, Rect::new(0, 50, 0, 50), false);
        ui.move_element(second, Rect::new(25, 100, 0, 50), false);
        ui.move_element(nested, Rect::new(60, 70, 10, 20), false);

        assert_eq!(ui.find_by_point(root, 30, 10), first);
        assert_eq!(ui.find_by_point(root, 65, 15), nested);
        assert_eq!(ui.find_by_point(root, 90, 40), second);
        assert_eq!(ui.find_by_point(root, 150, 80), root);
    }

    #[test]
    fn stale_handles_are_inert() {
        let mut ui = Ui::headless();
        let root = window(&mut ui);
        let child = ui.create_element(root, ElementFlags::empty(), ()).unwrap();
        ui.destroy(child);
        ui.update();

        assert!(ui.element(child).is_none());
        assert_eq!(ui.dispatch(child, Message::Layout), 0);
        ui.move_element(child, Rect::new(0, 1, 0, 1), true);
        assert!(ui.create_element(child, ElementFlags::empty(), ()).is_err());
        assert!(ui.children(child).is_empty());
    }

    #[test]
    fn kind_bits_stay_below_the_core_bits() {
        let flags = ElementFlags::from_kind(0b101) | ElementFlags::HORIZONTAL_FILL;
        assert_eq!(flags.kind(), 0b101);
        assert!(flags.contains(ElementFlags::HORIZONTAL_FILL));
        assert!(!flags.contains(ElementFlags::VERTICAL_FILL));
    }
}
