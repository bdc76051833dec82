use crate::{ElementId, WindowId};

/// Errors reported at the driver boundary.
///
/// Only operations that require the caller to hold a live handle can fail.
/// Stale handles passed to dispatch, move, repaint or destroy are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UiError {
    /// The window was never created or has already been removed.
    #[error("window {0:?} is not active")]
    UnknownWindow(WindowId),
    /// The element has been reclaimed.
    #[error("element {0:?} no longer exists")]
    StaleElement(ElementId),
    /// A window was asked to take a non-positive size.
    #[error("invalid window size {width}x{height}")]
    InvalidSize {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },
}
