#![doc = include_str!("../README.md")]
#![allow(clippy::multiple_crate_versions)]

pub mod logging;

#[doc(inline)]
pub use rivulet_core::{
    Capture, Element, ElementFlags, ElementId, Frame, Handler, HandlerFn, Headless, InputEvent,
    Lifecycle, Message, MessageCode, MouseButton, Painter, Platform, Presentation, Rect, Ui,
    UiError, UpdateKind, Window, WindowConfig, WindowId, WindowRoot, handler,
};
pub use rivulet_layout as layout;

pub mod prelude {
    //! The types a driver and its widgets touch most often.
    //!
    //! ```
    //! use rivulet::prelude::*;
    //!
    //! let mut ui = Ui::headless();
    //! let window = ui.create_window(&WindowConfig::default())?;
    //! # let _ = window;
    //! # Ok::<(), UiError>(())
    //! ```
    pub use rivulet_core::{
        ElementFlags, ElementId, Handler, InputEvent, Message, MouseButton, Painter, Rect, Ui,
        UiError, UpdateKind, WindowConfig, WindowId, handler,
    };
    pub use rivulet_layout::{Insets, Panel, PanelFlags};
}
