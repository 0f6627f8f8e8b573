//! Per-element sizing constraints.

use crate::error::{LayoutError, Result};
use crate::style::ElementStyle;

/// Sizing constraints attached to an element.
///
/// When `fixed_width` is set, `width` is the exact extent the element
/// receives from the positioning pass. Otherwise `width` is the preferred
/// extent and the element flexes within `[min_width, max_width]`. Heights
/// behave the same way. An unbounded maximum is `u32::MAX`, so the
/// `max >= min` invariant holds uniformly with no sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    pub fixed_width: bool,
    pub fixed_height: bool,
    pub width: u32,
    pub height: u32,
    pub min_width: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub max_height: u32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
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

impl LayoutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive default options from a style's sizing fields.
    pub fn from_style(style: &ElementStyle) -> Self {
        Self {
            fixed_width: style.fixed_width,
            fixed_height: style.fixed_height,
            width: style.width,
            height: style.height,
            min_width: style.min_width,
            max_width: style.max_width,
            min_height: style.min_height,
            max_height: style.max_height,
        }
    }

    /// Options with exact extents on both axes.
    pub fn fixed(width: u32, height: u32) -> Self {
        Self {
            fixed_width: true,
            fixed_height: true,
            width,
            height,
            ..Self::default()
        }
    }

    /// Reject constraint sets where a maximum undercuts its minimum.
    pub fn validate(&self) -> Result<()> {
        if self.max_width < self.min_width {
            return Err(LayoutError::InvalidWidthBounds {
                min: self.min_width,
                max: self.max_width,
            });
        }
        if self.max_height < self.min_height {
            return Err(LayoutError::InvalidHeightBounds {
                min: self.min_height,
                max: self.max_height,
            });
        }
        Ok(())
    }
}
