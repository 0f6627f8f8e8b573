//! Input event payloads delivered to element handlers.
//!
//! The layout engine does not route events; it only defines the payloads
//! that element behaviors receive and a bounds-containment query
//! ([`Element::is_in_bounds`]). Routing, capture, and focus traversal
//! belong to the windowing collaborator.
//!
//! [`Element::is_in_bounds`]: crate::element::Element::is_in_bounds

use crate::primitives::Point;

/// Mouse button types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Keyboard modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Mouse event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEvent {
    ButtonPressed { button: MouseButton, position: Point },
    ButtonReleased { button: MouseButton, position: Point },
    CursorMoved { position: Point },
    WheelScrolled { delta_x: i32, delta_y: i32, position: Point },
}

impl MouseEvent {
    /// The cursor position the event was generated at.
    pub fn position(&self) -> Point {
        match self {
            Self::ButtonPressed { position, .. }
            | Self::ButtonReleased { position, .. }
            | Self::CursorMoved { position }
            | Self::WheelScrolled { position, .. } => *position,
        }
    }
}

/// Keyboard event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed { code: u32, modifiers: Modifiers },
    Released { code: u32, modifiers: Modifiers },
    TextInput { ch: char },
}

/// High-level UI commands dispatched to the focused element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandEvent {
    FocusGained,
    FocusLost,
    Redraw,
    Confirm,
    Escape,
}
