//! Two-phase destruction: [`Ui::destroy`] condemns, the update point reclaims.
//!
//! Handles stay valid, and keep absorbing messages, until the sweep that
//! follows the next routed event, layout or resize.

use alloc::vec::Vec;

use tracing::debug;

use crate::{ElementId, Lifecycle, Message, Ui};

impl Ui {
    /// Condemns an element and its whole subtree.
    ///
    /// Every strict ancestor is marked as holding a condemned descendant so
    /// the next sweep finds it. Calling this again before the sweep, or on a
    /// stale handle, does nothing.
    pub fn destroy(&mut self, element: ElementId) {
        let Some(entry) = self.elements.get_mut(element) else {
            return;
        };
        if entry.is_pending_destroy() {
            return;
        }
        entry.lifecycle = Lifecycle::PendingDestroy;
        let children = entry.children.clone();

        let mut ancestor = entry.parent;
        while let Some(id) = ancestor {
            let Some(parent) = self.elements.get_mut(id) else {
                break;
            };
            parent.destroy_descendant = true;
            ancestor = parent.parent;
        }

        for child in children {
            self.destroy(child);
        }
    }

    /// Reclaims condemned elements below and including `element`. Returns true
    /// if `element` itself was reclaimed.
    pub(crate) fn sweep(&mut self, element: ElementId) -> bool {
        let Some(entry) = self.elements.get_mut(element) else {
            return false;
        };

        if entry.destroy_descendant {
            entry.destroy_descendant = false;
            let children = entry.children.clone();
            let removed: Vec<ElementId> = children
                .into_iter()
                .filter(|&child| self.sweep(child))
                .collect();
            if !removed.is_empty() {
                if let Some(entry) = self.elements.get_mut(element) {
                    entry.children.retain(|child| !removed.contains(child));
                }
            }
        }

        if self
            .elements
            .get(element)
            .is_some_and(|entry| entry.is_pending_destroy())
        {
            self.finalize(element);
            true
        } else {
            false
        }
    }

    fn finalize(&mut self, element: ElementId) {
        self.dispatch(element, Message::Destroy);

        let Some(window) = self.window_of(element) else {
            return;
        };
        if let Some(capture) = self.windows.get(window).and_then(|w| w.capture) {
            if capture.element == element {
                self.set_pressed(window, None, capture.button);
            }
        }
        if let Some(entry) = self.windows.get_mut(window) {
            if entry.hovered == element {
                entry.hovered = entry.root;
            }
        }

        // Children the destroy handler created after the sweep passed them.
        let stragglers = self
            .elements
            .get(element)
            .map(|entry| entry.children.clone())
            .unwrap_or_default();
        for child in stragglers {
            self.finalize(child);
        }

        self.elements.remove(element);
        debug!(?element, "element reclaimed");
    }
}

#[cfg(test)]
mod tests {
    use alloc::{rc::Rc, vec, vec::Vec};
    use core::cell::RefCell;

    use crate::{ElementFlags, ElementId, Message, Ui, WindowConfig, handler};

    type Log = Rc<RefCell<Vec<&'static str>>>;

    fn on_destroy(log: &Log, name: &'static str) -> impl crate::Handler {
        let log = log.clone();
        handler(move |_, _, message| {
            if matches!(message, Message::Destroy) {
                log.borrow_mut().push(name);
            }
            0
        })
    }

    fn tree(ui: &mut Ui, log: &Log) -> (ElementId, ElementId, ElementId, ElementId) {
        let window = ui.create_window(&WindowConfig::default()).unwrap();
        let root = ui.window(window).unwrap().root();
        let p = ui.create_element(root, ElementFlags::empty(), on_destroy(log, "P")).unwrap();
        let a = ui.create_element(p, ElementFlags::empty(), on_destroy(log, "A")).unwrap();
        let b = ui.create_element(p, ElementFlags::empty(), on_destroy(log, "B")).unwrap();
        (root, p, a, b)
    }

    #[test]
    fn destroy_marks_the_subtree_and_its_ancestors() {
        let mut ui = Ui::headless();
        let log = Log::default();
        let (root, p, a, b) = tree(&mut ui, &log);
        ui.destroy(p);

        for id in [p, a, b] {
            assert!(ui.element(id).unwrap().is_pending_destroy());
        }
        assert!(ui.element(root).unwrap().has_pending_descendant());
        assert!(!ui.element(root).unwrap().is_pending_destroy());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn children_are_reclaimed_before_their_parent() {
        let mut ui = Ui::headless();
        let log = Log::default();
        let (root, p, a, b) = tree(&mut ui, &log);
        let keep = ui.create_element(root, ElementFlags::empty(), ()).unwrap();

        ui.destroy(p);
        ui.update();

        assert_eq!(*log.borrow(), vec!["A", "B", "P"]);
        assert_eq!(ui.children(root), &[keep]);
        for id in [p, a, b] {
            assert!(ui.element(id).is_none());
        }
        assert!(!ui.element(root).unwrap().has_pending_descendant());
    }

    #[test]
    fn destroy_is_idempotent() {
        let mut ui = Ui::headless();
        let log = Log::default();
        let (_, p, a, _) = tree(&mut ui, &log);
        ui.destroy(a);
        ui.destroy(a);
        ui.update();
        assert_eq!(*log.borrow(), vec!["A"]);
        assert_eq!(ui.children(p).len(), 1);
        ui.destroy(a);
        ui.update();
        assert_eq!(*log.borrow(), vec!["A"]);
    }

    #[test]
    fn children_created_under_a_condemned_parent_are_condemned() {
        let mut ui = Ui::headless();
        let log = Log::default();
        let (_, p, _, _) = tree(&mut ui, &log);
        ui.destroy(p);
        let late = ui.create_element(p, ElementFlags::empty(), on_destroy(&log, "late")).unwrap();
        assert!(ui.element(late).unwrap().is_pending_destroy());

        ui.update();
        assert_eq!(*log.borrow(), vec!["A", "B", "late", "P"]);
    }

    #[test]
    fn destroying_a_root_removes_its_window() {
        let headless = crate::Headless::new();
        let mut ui = Ui::new(headless.clone());
        let window = ui.create_window(&WindowConfig::default()).unwrap();
        let root = ui.window(window).unwrap().root();
        ui.create_element(root, ElementFlags::empty(), ()).unwrap();

        ui.destroy(root);
        assert!(ui.has_windows());
        ui.update();

        assert!(!ui.has_windows());
        assert_eq!(ui.element_count(), 0);
        assert_eq!(headless.destroyed(), vec![window]);
    }
}
