//! Leaf element nodes.
//!
//! An element is a leaf of the layout tree: the positioning pass writes its
//! extent, offset, clip rectangle, and depth key, and the element turns
//! those writes into mesh/content dirty signals consumed by the rendering
//! collaborator. Behavior that varies per element kind (render regeneration,
//! input handling) is supplied through the [`ElementContent`] trait.

use std::rc::Rc;

use slotmap::new_key_type;

use crate::error::Result;
use crate::event::{CommandEvent, KeyEvent, MouseEvent};
use crate::layout::LayoutId;
use crate::options::LayoutOptions;
use crate::primitives::{Point, Rect};
use crate::style::ElementStyle;

new_key_type! {
    /// Generational handle to an element in its widget's arena.
    pub struct ElementId;
}

// Packed depth key: widget depth in bits 24-31, area depth in bits 8-23,
// element-local order in bits 0-7. Smaller values paint in front.
const WIDGET_DEPTH_SHIFT: u32 = 24;
const AREA_DEPTH_SHIFT: u32 = 8;
const LOCAL_ORDER_MASK: u32 = 0xFF;

/// Render-invalidation state of an element.
///
/// `content` means the element's intrinsic geometry changed and its mesh
/// must be regenerated from scratch; `mesh` means only placement (offset,
/// clip, depth) changed and cached geometry can be transformed in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct DirtyState {
    mesh: bool,
    content: bool,
}

impl DirtyState {
    fn mark_mesh(&mut self) {
        self.mesh = true;
    }

    fn mark_content(&mut self) {
        self.content = true;
    }

    fn clear(&mut self) {
        self.mesh = false;
        self.content = false;
    }
}

/// Per-kind element behavior.
///
/// Concrete element types (labels, buttons, input fields) implement this to
/// regenerate render geometry and consume input. The defaults make an
/// element inert: events are reported as not handled and regeneration does
/// nothing.
pub trait ElementContent {
    /// Regenerate cached render geometry after the element was dirtied.
    ///
    /// `bounds` is the raw element rectangle, `clip` the rectangle assigned
    /// by the containing layout, `depth` the packed paint-order key.
    fn update_render_elements(&mut self, _bounds: Rect, _clip: Rect, _depth: u32) {}

    /// Handle a mouse event. Return `true` to consume it.
    fn mouse_event(&mut self, _event: &MouseEvent) -> bool {
        false
    }

    /// Handle a keyboard event. Return `true` to consume it.
    fn key_event(&mut self, _event: &KeyEvent) -> bool {
        false
    }

    /// Handle a command event. Return `true` to consume it.
    fn command_event(&mut self, _event: &CommandEvent) -> bool {
        false
    }
}

/// Inert content for elements with no behavior of their own.
pub struct EmptyContent;

impl ElementContent for EmptyContent {}

/// A leaf widget node with intrinsic size, style, and render state.
pub struct Element {
    width: u32,
    height: u32,
    offset: Point,
    clip_rect: Rect,
    depth: u32,
    style: Rc<ElementStyle>,
    layout_options: LayoutOptions,
    accepts_keyboard_focus: bool,
    parent_layout: Option<LayoutId>,
    dirty: DirtyState,
    content: Box<dyn ElementContent>,
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("offset", &self.offset)
            .field("clip_rect", &self.clip_rect)
            .field("depth", &self.depth)
            .field("style", &self.style)
            .field("layout_options", &self.layout_options)
            .field("accepts_keyboard_focus", &self.accepts_keyboard_focus)
            .field("parent_layout", &self.parent_layout)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl Element {
    pub(crate) fn new(
        style: Rc<ElementStyle>,
        layout_options: LayoutOptions,
        accepts_keyboard_focus: bool,
        content: Box<dyn ElementContent>,
    ) -> Self {
        Self {
            width: 0,
            height: 0,
            offset: Point::ORIGIN,
            clip_rect: Rect::ZERO,
            depth: 0,
            style,
            layout_options,
            accepts_keyboard_focus,
            parent_layout: None,
            dirty: DirtyState::default(),
            content,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn clip_rect(&self) -> Rect {
        self.clip_rect
    }

    /// Packed paint-order key.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn style(&self) -> &ElementStyle {
        &self.style
    }

    pub fn layout_options(&self) -> &LayoutOptions {
        &self.layout_options
    }

    pub fn accepts_keyboard_focus(&self) -> bool {
        self.accepts_keyboard_focus
    }

    /// The layout this element is currently placed in, if any.
    pub fn parent_layout(&self) -> Option<LayoutId> {
        self.parent_layout
    }

    pub(crate) fn set_parent_layout(&mut self, layout: Option<LayoutId>) {
        self.parent_layout = layout;
    }

    /// Replace the element's sizing constraints.
    ///
    /// Fails with an invalid-argument error if a maximum undercuts its
    /// minimum on either axis; prior options are left unchanged on failure.
    pub fn set_layout_options(&mut self, options: LayoutOptions) -> Result<()> {
        options.validate()?;
        self.layout_options = options;
        Ok(())
    }

    /// Assign the element's width. Called by the positioning pass.
    ///
    /// A differing value marks the element's content dirty; a same-value
    /// write marks nothing.
    pub fn set_width(&mut self, width: u32) {
        if self.width != width {
            self.dirty.mark_content();
        }
        self.width = width;
    }

    /// Assign the element's height. Called by the positioning pass.
    pub fn set_height(&mut self, height: u32) {
        if self.height != height {
            self.dirty.mark_content();
        }
        self.height = height;
    }

    /// Assign the element's offset. Placement only, so a differing value
    /// marks the mesh (not the content) dirty.
    pub fn set_offset(&mut self, offset: Point) {
        if self.offset != offset {
            self.dirty.mark_mesh();
        }
        self.offset = offset;
    }

    /// Assign the element's clip rectangle. Placement only.
    pub fn set_clip_rect(&mut self, clip_rect: Rect) {
        if self.clip_rect != clip_rect {
            self.dirty.mark_mesh();
        }
        self.clip_rect = clip_rect;
    }

    /// OR the widget depth into bits 24-31 of the depth key.
    ///
    /// Structural hierarchy signal: always marks the mesh dirty, with no
    /// change detection.
    pub fn set_widget_depth(&mut self, depth: u8) {
        self.depth |= (depth as u32) << WIDGET_DEPTH_SHIFT;
        self.dirty.mark_mesh();
    }

    /// OR the area depth into bits 8-23 of the depth key.
    ///
    /// Structural hierarchy signal: always marks the mesh dirty.
    pub fn set_area_depth(&mut self, depth: u16) {
        self.depth |= (depth as u32) << AREA_DEPTH_SHIFT;
        self.dirty.mark_mesh();
    }

    /// Write the element-local order into the low 8 bits of the depth key.
    ///
    /// Replaces the previous order outright so re-layout cannot accumulate
    /// stale bits. The positioning pass is the only caller.
    pub(crate) fn set_local_order(&mut self, order: u8) {
        self.depth = (self.depth & !LOCAL_ORDER_MASK) | order as u32;
        self.dirty.mark_mesh();
    }

    /// Raw element rectangle: offset plus post-layout extent.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.offset.x, self.offset.y, self.width, self.height)
    }

    /// Element bounds shrunk by the style's margins on all four sides.
    ///
    /// Extents never go negative no matter how large the margins are
    /// relative to the raw size.
    pub fn visible_bounds(&self) -> Rect {
        let margins = &self.style.margins;
        let bounds = self.bounds();

        Rect::new(
            bounds.x + margins.left as i32,
            bounds.y + margins.top as i32,
            bounds.width.saturating_sub(margins.horizontal()),
            bounds.height.saturating_sub(margins.vertical()),
        )
    }

    /// Element extent shrunk by margins and content offset, origin shifted
    /// by offset + margin + content offset. Extents clamp to non-negative.
    pub fn content_bounds(&self) -> Rect {
        let margins = &self.style.margins;
        let content = &self.style.content_offset;

        Rect::new(
            self.offset.x + (margins.left + content.left) as i32,
            self.offset.y + (margins.top + content.top) as i32,
            self.width
                .saturating_sub(margins.horizontal().saturating_add(content.horizontal())),
            self.height
                .saturating_sub(margins.vertical().saturating_add(content.vertical())),
        )
    }

    /// Point-in-rect test against the visible bounds.
    pub fn is_in_bounds(&self, position: Point) -> bool {
        self.visible_bounds().contains(position)
    }

    /// Natural (unconstrained-by-parent) extent derived from the element's
    /// sizing constraints: the declared size when fixed, otherwise the
    /// preferred size clamped to the min/max range.
    pub(crate) fn optimal_size(&self) -> (u32, u32) {
        let options = &self.layout_options;
        let width = if options.fixed_width {
            options.width
        } else {
            options.width.clamp(options.min_width, options.max_width)
        };
        let height = if options.fixed_height {
            options.height
        } else {
            options.height.clamp(options.min_height, options.max_height)
        };
        (width, height)
    }

    pub fn is_mesh_dirty(&self) -> bool {
        self.dirty.mesh
    }

    pub fn is_content_dirty(&self) -> bool {
        self.dirty.content
    }

    /// Flag cached render geometry for regeneration. Content behaviors call
    /// this when placement-affecting state changes outside a layout pass.
    pub fn mark_mesh_as_dirty(&mut self) {
        self.dirty.mark_mesh();
    }

    /// Flag intrinsic content for regeneration from scratch.
    pub fn mark_content_as_dirty(&mut self) {
        self.dirty.mark_content();
    }

    /// Regenerate render geometry through the content behavior, then mark
    /// the element clean.
    pub fn update_render_elements(&mut self) {
        let bounds = self.bounds();
        let clip = self.clip_rect;
        let depth = self.depth;
        self.content.update_render_elements(bounds, clip, depth);
        self.dirty.clear();
    }

    /// Dispatch a mouse event to the content behavior.
    pub fn mouse_event(&mut self, event: &MouseEvent) -> bool {
        self.content.mouse_event(event)
    }

    /// Dispatch a keyboard event to the content behavior.
    pub fn key_event(&mut self, event: &KeyEvent) -> bool {
        self.content.key_event(event)
    }

    /// Dispatch a command event to the content behavior.
    pub fn command_event(&mut self, event: &CommandEvent) -> bool {
        self.content.command_event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::RectOffset;

    fn plain_element() -> Element {
        Element::new(
            Rc::new(ElementStyle::default()),
            LayoutOptions::default(),
            false,
            Box::new(EmptyContent),
        )
    }

    fn element_with_style(style: ElementStyle) -> Element {
        Element::new(
            Rc::new(style),
            LayoutOptions::default(),
            false,
            Box::new(EmptyContent),
        )
    }

    #[test]
    fn same_value_writes_do_not_dirty() {
        let mut element = plain_element();
        element.set_width(40);
        element.set_offset(Point::new(3, 4));
        element.update_render_elements();
        assert!(!element.is_mesh_dirty());
        assert!(!element.is_content_dirty());

        element.set_width(40);
        element.set_height(0);
        element.set_offset(Point::new(3, 4));
        element.set_clip_rect(Rect::ZERO);
        assert!(!element.is_mesh_dirty());
        assert!(!element.is_content_dirty());
    }

    #[test]
    fn differing_writes_dirty_the_right_state() {
        let mut element = plain_element();
        element.set_width(10);
        assert!(element.is_content_dirty());
        assert!(!element.is_mesh_dirty());

        element.update_render_elements();
        element.set_offset(Point::new(1, 0));
        assert!(element.is_mesh_dirty());
        assert!(!element.is_content_dirty());

        element.update_render_elements();
        element.set_clip_rect(Rect::new(0, 0, 5, 5));
        assert!(element.is_mesh_dirty());
        assert!(!element.is_content_dirty());
    }

    #[test]
    fn depth_setters_pack_bits_and_always_dirty() {
        let mut element = plain_element();
        element.set_widget_depth(0x12);
        element.set_area_depth(0x3456);
        element.set_local_order(0x78);
        assert_eq!(element.depth(), 0x1234_5678);
        assert!(element.is_mesh_dirty());

        // Widget/area depth is OR-ed, never change-detected.
        element.update_render_elements();
        element.set_widget_depth(0x12);
        assert!(element.is_mesh_dirty());

        // Local order replaces the low byte rather than OR-ing it.
        element.set_local_order(0x01);
        assert_eq!(element.depth() & 0xFF, 0x01);
    }

    #[test]
    fn visible_bounds_shrink_by_margins_and_clamp() {
        let style = ElementStyle::new().with_margins(RectOffset::new(4, 2, 6, 2));
        let mut element = element_with_style(style);
        element.set_width(30);
        element.set_height(20);
        element.set_offset(Point::new(10, 10));

        let visible = element.visible_bounds();
        assert_eq!(visible, Rect::new(14, 12, 20, 16));

        // Margins larger than the raw extent clamp to zero, not negative.
        element.set_width(8);
        assert_eq!(element.visible_bounds().width, 0);
    }

    #[test]
    fn content_bounds_shrink_by_margins_and_content_offset() {
        let style = ElementStyle::new()
            .with_margins(RectOffset::uniform(2))
            .with_content_offset(RectOffset::uniform(3));
        let mut element = element_with_style(style);
        element.set_width(50);
        element.set_height(40);
        element.set_offset(Point::new(0, 0));

        let content = element.content_bounds();
        assert_eq!(content, Rect::new(5, 5, 40, 30));

        element.set_width(9);
        element.set_height(9);
        assert_eq!(content_extents(&element), (0, 0));
    }

    fn content_extents(element: &Element) -> (u32, u32) {
        let bounds = element.content_bounds();
        (bounds.width, bounds.height)
    }

    #[test]
    fn is_in_bounds_uses_visible_bounds() {
        let style = ElementStyle::new().with_margins(RectOffset::uniform(5));
        let mut element = element_with_style(style);
        element.set_width(20);
        element.set_height(20);
        element.set_offset(Point::new(0, 0));

        assert!(element.is_in_bounds(Point::new(5, 5)));
        assert!(element.is_in_bounds(Point::new(14, 14)));
        assert!(!element.is_in_bounds(Point::new(4, 4)));
        assert!(!element.is_in_bounds(Point::new(15, 15)));
    }

    #[test]
    fn default_handlers_do_not_consume() {
        let mut element = plain_element();
        let mouse = MouseEvent::CursorMoved {
            position: Point::ORIGIN,
        };
        assert!(!element.mouse_event(&mouse));
        assert!(!element.key_event(&KeyEvent::TextInput { ch: 'a' }));
        assert!(!element.command_event(&CommandEvent::Redraw));
    }

    #[test]
    fn optimal_size_respects_fixed_and_clamped_modes() {
        let mut element = plain_element();
        let mut options = LayoutOptions::default();
        options.fixed_width = true;
        options.width = 100;
        options.height = 50;
        options.min_height = 60;
        element.set_layout_options(options).unwrap();
        // Fixed width passes through; preferred height clamps up to min.
        assert_eq!(element.optimal_size(), (100, 60));
    }

    #[test]
    fn invalid_options_leave_previous_in_place() {
        let mut element = plain_element();
        let good = LayoutOptions::fixed(10, 10);
        element.set_layout_options(good).unwrap();

        let mut bad = LayoutOptions::default();
        bad.min_width = 9;
        bad.max_width = 3;
        assert!(element.set_layout_options(bad).is_err());
        assert_eq!(element.layout_options(), &good);
    }
}
