//! The message contract between the engine and element handlers.
//!
//! Every request the engine makes of an element is a [`Message`]. Core codes
//! carry a fixed argument/payload shape encoded in the variant; collaborators
//! define their own codes at or above [`MessageCode::USER`] and send them as
//! [`Message::User`].

use core::any::Any;
use core::fmt;

use crate::paint::Painter;

/// Numeric identity of a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageCode(pub u32);

impl MessageCode {
    /// No message.
    pub const NONE: Self = Self(0);
    /// Bounds changed; lay out children.
    pub const LAYOUT: Self = Self(1);
    /// Preferred width given an expected height.
    pub const GET_WIDTH: Self = Self(2);
    /// Preferred height given an expected width.
    pub const GET_HEIGHT: Self = Self(3);
    /// Draw into the painter's active clip.
    pub const PAINT: Self = Self(4);
    /// Pointer moved over the element with no button held.
    pub const MOUSE_MOVE: Self = Self(5);
    /// Hovered or pressed state changed.
    pub const UPDATE: Self = Self(6);
    /// Left button pressed over the element.
    pub const MOUSE_LEFT_DOWN: Self = Self(7);
    /// Left button released after pressing the element.
    pub const MOUSE_LEFT_UP: Self = Self(8);
    /// Middle button pressed over the element.
    pub const MOUSE_MIDDLE_DOWN: Self = Self(9);
    /// Middle button released after pressing the element.
    pub const MOUSE_MIDDLE_UP: Self = Self(10);
    /// Right button pressed over the element.
    pub const MOUSE_RIGHT_DOWN: Self = Self(11);
    /// Right button released after pressing the element.
    pub const MOUSE_RIGHT_UP: Self = Self(12);
    /// Pointer moved while the element holds the capture.
    pub const MOUSE_DRAG: Self = Self(13);
    /// Button released over the element it was pressed on.
    pub const CLICKED: Self = Self(14);
    /// The element is being reclaimed.
    pub const DESTROY: Self = Self(15);
    /// First code available to collaborators.
    pub const USER: Self = Self(16);

    /// Returns true for codes in the collaborator range.
    #[must_use]
    pub const fn is_user(self) -> bool {
        self.0 >= Self::USER.0
    }
}

/// Pointer buttons recognised by the input router.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Wheel button.
    Middle,
    /// Secondary button.
    Right,
}

impl MouseButton {
    const fn down_code(self) -> MessageCode {
        match self {
            Self::Left => MessageCode::MOUSE_LEFT_DOWN,
            Self::Middle => MessageCode::MOUSE_MIDDLE_DOWN,
            Self::Right => MessageCode::MOUSE_RIGHT_DOWN,
        }
    }

    const fn up_code(self) -> MessageCode {
        match self {
            Self::Left => MessageCode::MOUSE_LEFT_UP,
            Self::Middle => MessageCode::MOUSE_MIDDLE_UP,
            Self::Right => MessageCode::MOUSE_RIGHT_UP,
        }
    }
}

/// What changed when an element receives [`Message::Update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpdateKind {
    /// The element gained or lost hover.
    Hovered,
    /// The element gained or lost the pressed capture.
    Pressed,
}

/// A request delivered to an element's handlers.
///
/// Messages have no identity of their own; one is built per dispatch.
#[non_exhaustive]
pub enum Message<'a> {
    /// Bounds or clip changed; the element should position its children.
    Layout,
    /// Returns the preferred width when laid out `height` pixels tall (0 if unknown).
    GetWidth {
        /// Expected height, or 0.
        height: i32,
    },
    /// Returns the preferred height when laid out `width` pixels wide (0 if unknown).
    GetHeight {
        /// Expected width, or 0.
        width: i32,
    },
    /// Draw into the painter, whose clip is already narrowed to this element.
    Paint(&'a mut Painter),
    /// Pointer moved over the element.
    MouseMove {
        /// Pointer x in window coordinates.
        x: i32,
        /// Pointer y in window coordinates.
        y: i32,
    },
    /// Hover or pressed state changed.
    Update(UpdateKind),
    /// A button went down over the element.
    MouseDown(MouseButton),
    /// The captured button was released.
    MouseUp(MouseButton),
    /// Pointer moved while the element holds the capture.
    MouseDrag {
        /// Pointer x in window coordinates.
        x: i32,
        /// Pointer y in window coordinates.
        y: i32,
    },
    /// The captured button was released while still hovering the element.
    Clicked(MouseButton),
    /// The element is being reclaimed. The only message a condemned element receives.
    Destroy,
    /// Collaborator-defined message.
    User {
        /// Code at or above [`MessageCode::USER`].
        code: MessageCode,
        /// Integer argument.
        arg: i32,
        /// Opaque payload.
        payload: Option<&'a mut dyn Any>,
    },
}

impl Message<'_> {
    /// Builds a collaborator message without a payload.
    #[must_use]
    pub fn user(code: MessageCode, arg: i32) -> Self {
        Message::User {
            code,
            arg,
            payload: None,
        }
    }

    /// Returns the numeric code of this message.
    #[must_use]
    pub const fn code(&self) -> MessageCode {
        match self {
            Self::Layout => MessageCode::LAYOUT,
            Self::GetWidth { .. } => MessageCode::GET_WIDTH,
            Self::GetHeight { .. } => MessageCode::GET_HEIGHT,
            Self::Paint(_) => MessageCode::PAINT,
            Self::MouseMove { .. } => MessageCode::MOUSE_MOVE,
            Self::Update(_) => MessageCode::UPDATE,
            Self::MouseDown(button) => button.down_code(),
            Self::MouseUp(button) => button.up_code(),
            Self::MouseDrag { .. } => MessageCode::MOUSE_DRAG,
            Self::Clicked(_) => MessageCode::CLICKED,
            Self::Destroy => MessageCode::DESTROY,
            Self::User { code, .. } => *code,
        }
    }

    /// Returns the integer argument as the wire contract defines it.
    #[must_use]
    pub const fn arg(&self) -> i32 {
        match self {
            Self::GetWidth { height: hint } | Self::GetHeight { width: hint } => *hint,
            Self::User { arg, .. } => *arg,
            Self::Update(UpdateKind::Hovered) => 1,
            Self::Update(UpdateKind::Pressed) => 2,
            _ => 0,
        }
    }
}

impl fmt::Debug for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paint(painter) => f.debug_tuple("Paint").field(&painter.clip()).finish(),
            Self::User { code, arg, payload } => f
                .debug_struct("User")
                .field("code", code)
                .field("arg", arg)
                .field("payload", &payload.is_some())
                .finish(),
            other => f
                .debug_struct("Message")
                .field("code", &other.code())
                .field("arg", &other.arg())
                .finish(),
        }
    }
}
