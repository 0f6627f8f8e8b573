//! Layout engine error types.

use thiserror::Error;

/// Result alias for fallible layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors raised by tree mutation and element configuration.
///
/// These are programmer-contract violations, not transient failures:
/// every failed precondition surfaces before any state is modified, so
/// the tree is never left partially mutated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("maximum width {max} is less than minimum width {min}")]
    InvalidWidthBounds { min: u32, max: u32 },

    #[error("maximum height {max} is less than minimum height {min}")]
    InvalidHeightBounds { min: u32, max: u32 },

    #[error("index out of range: {index}. valid range: 0 .. {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("provided element is not a part of this layout")]
    ElementNotFound,

    #[error("provided layout is not a part of this layout")]
    LayoutNotFound,

    #[error("provided space is not a part of this layout")]
    SpaceNotFound,

    #[error("no such element in this widget")]
    UnknownElement,

    #[error("no such layout in this widget")]
    UnknownLayout,
}
