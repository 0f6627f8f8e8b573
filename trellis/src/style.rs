//! Element styles.
//!
//! A style is an immutable record defining margins, content offset, and
//! default sizing constraints for elements of a given visual class. Styles
//! are produced by a style-sheet collaborator outside this crate and shared
//! by reference; the layout engine only reads them.

use crate::primitives::RectOffset;

/// Immutable visual-class record consumed by elements.
///
/// `margins` shrink an element's visible bounds; `content_offset` is the
/// additional padding inside the margin box that shrinks content bounds.
/// The sizing fields seed an element's default [`LayoutOptions`]
/// (see [`LayoutOptions::from_style`]).
///
/// [`LayoutOptions`]: crate::options::LayoutOptions
/// [`LayoutOptions::from_style`]: crate::options::LayoutOptions::from_style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementStyle {
    pub margins: RectOffset,
    pub content_offset: RectOffset,
    pub fixed_width: bool,
    pub fixed_height: bool,
    /// Declared width when fixed, preferred width otherwise.
    pub width: u32,
    /// Declared height when fixed, preferred height otherwise.
    pub height: u32,
    pub min_width: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub max_height: u32,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            margins: RectOffset::ZERO,
            content_offset: RectOffset::ZERO,
            fixed_width: false,
            fixed_height: false,
            width: 0,
            height: 0,
            min_width: 0,
            max_width: u32::MAX,
            min_height: 0,
            max_height: u32::MAX,
        }
    }
}

impl ElementStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set margins on all four sides.
    pub fn with_margins(mut self, margins: RectOffset) -> Self {
        self.margins = margins;
        self
    }

    /// Set the content offset (padding inside the margin box).
    pub fn with_content_offset(mut self, offset: RectOffset) -> Self {
        self.content_offset = offset;
        self
    }

    /// Declare a fixed width.
    pub fn with_fixed_width(mut self, width: u32) -> Self {
        self.fixed_width = true;
        self.width = width;
        self
    }

    /// Declare a fixed height.
    pub fn with_fixed_height(mut self, height: u32) -> Self {
        self.fixed_height = true;
        self.height = height;
        self
    }

    /// Set the preferred (non-fixed) width.
    pub fn with_width(mut self, width: u32) -> Self {
        self.fixed_width = false;
        self.width = width;
        self
    }

    /// Set the preferred (non-fixed) height.
    pub fn with_height(mut self, height: u32) -> Self {
        self.fixed_height = false;
        self.height = height;
        self
    }

    /// Bound the width range.
    pub fn with_width_bounds(mut self, min: u32, max: u32) -> Self {
        self.min_width = min;
        self.max_width = max;
        self
    }

    /// Bound the height range.
    pub fn with_height_bounds(mut self, min: u32, max: u32) -> Self {
        self.min_height = min;
        self.max_height = max;
        self
    }
}
