//! Trellis: retained-mode GUI layout engine.
//!
//! A widget owns a tree of heterogeneous layout nodes — elements,
//! sub-layouts, fixed spacers, flexible spacers — and computes size and
//! position for on-screen widgets once per frame, driven by dirty state.
//!
//! # Architecture
//!
//! ```text
//! mutate tree -> dirty -> update() = optimal sizes (bottom-up)
//!                                  + positioning   (top-down)  -> clean
//! ```
//!
//! Sizing runs in two phases because a node's optimal size is needed by its
//! ancestors before any space has been granted, while final placement
//! depends on the rectangle the parent actually assigns. Elements turn
//! placement writes into mesh/content dirty signals for the rendering
//! collaborator; the engine itself never draws.
//!
//! # Usage
//!
//! ```
//! use std::rc::Rc;
//! use trellis::{Axis, ElementStyle, LayoutOptions, Widget};
//!
//! let mut widget = Widget::new(Axis::Horizontal);
//! let root = widget.root();
//!
//! let style = Rc::new(ElementStyle::default());
//! let label = widget
//!     .create_element(style, LayoutOptions::fixed(50, 20), false)
//!     .unwrap();
//! widget.add_element(root, label).unwrap();
//! widget.add_flexible_space(root).unwrap();
//!
//! if widget.is_dirty(root).unwrap() {
//!     widget.update(root, 0, 0, 200, 20, 0).unwrap();
//! }
//! assert_eq!(widget.element(label).unwrap().width(), 50);
//! ```
//!
//! Single-threaded by design: all mutation and update calls happen on one
//! logical GUI thread, and styles are shared with `Rc`.

// Core primitives
pub mod primitives;

// Styling and sizing constraints
pub mod options;
pub mod style;

// Tree nodes
pub mod element;
pub mod layout;
pub mod widget;

// Input event payloads
pub mod event;

// Errors
pub mod error;

// The two-phase layout pass (implemented on Widget)
mod sizing;

// Re-export core types
pub use element::{Element, ElementContent, ElementId, EmptyContent};
pub use error::{LayoutError, Result};
pub use event::{CommandEvent, KeyEvent, Modifiers, MouseButton, MouseEvent};
pub use layout::{Axis, LayoutEntry, LayoutId, SpaceId};
pub use options::LayoutOptions;
pub use primitives::{Point, Rect, RectOffset};
pub use style::ElementStyle;
pub use widget::Widget;
