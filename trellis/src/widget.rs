//! The widget: arena owner and lifecycle boundary.
//!
//! A widget owns every element and layout node of one GUI surface. Elements
//! are created and destroyed only through the widget (registration is a
//! lifecycle notification, logged for the embedding shell); layout nodes
//! are owned by their parent layout by convention, with the root owned by
//! the widget itself. All tree mutation and the per-frame update entry
//! points live on this type, keyed by generational ids.

use std::rc::Rc;

use slotmap::SlotMap;
use tracing::debug;

use crate::element::{Element, ElementContent, ElementId, EmptyContent};
use crate::error::{LayoutError, Result};
use crate::layout::{Axis, LayoutId, LayoutNode};
use crate::options::LayoutOptions;
use crate::style::ElementStyle;

/// Owner of one layout tree and the elements placed in it.
pub struct Widget {
    pub(crate) elements: SlotMap<ElementId, Element>,
    pub(crate) layouts: SlotMap<LayoutId, LayoutNode>,
    pub(crate) space_counter: u64,
    root: LayoutId,
    focus_order: Vec<ElementId>,
}

impl Widget {
    /// Create a widget with an empty root layout along `axis`.
    pub fn new(axis: Axis) -> Self {
        let mut layouts = SlotMap::with_key();
        let root = layouts.insert(LayoutNode::new(axis));
        Self {
            elements: SlotMap::with_key(),
            layouts,
            space_counter: 0,
            root,
            focus_order: Vec::new(),
        }
    }

    /// The root layout, destroyed only with the widget.
    pub fn root(&self) -> LayoutId {
        self.root
    }

    /// Create an inert element bound to this widget.
    ///
    /// Registers the element as a side effect. Options are validated the
    /// same way [`Element::set_layout_options`] validates them.
    pub fn create_element(
        &mut self,
        style: Rc<ElementStyle>,
        options: LayoutOptions,
        accepts_keyboard_focus: bool,
    ) -> Result<ElementId> {
        self.create_element_with(style, options, accepts_keyboard_focus, Box::new(EmptyContent))
    }

    /// Create an element with a concrete content behavior.
    pub fn create_element_with(
        &mut self,
        style: Rc<ElementStyle>,
        options: LayoutOptions,
        accepts_keyboard_focus: bool,
        content: Box<dyn ElementContent>,
    ) -> Result<ElementId> {
        options.validate()?;
        let id = self
            .elements
            .insert(Element::new(style, options, accepts_keyboard_focus, content));
        self.register_element(id);
        Ok(id)
    }

    /// End an element's life: detach it from its layout if still placed,
    /// unregister it, and deallocate. The only valid way to destroy an
    /// element.
    pub fn destroy_element(&mut self, element: ElementId) -> Result<()> {
        let parent = self
            .elements
            .get(element)
            .ok_or(LayoutError::UnknownElement)?
            .parent_layout();
        if let Some(layout) = parent {
            self.remove_element(layout, element)?;
        }
        self.unregister_element(element);
        self.elements.remove(element);
        Ok(())
    }

    pub fn element(&self, element: ElementId) -> Result<&Element> {
        self.elements.get(element).ok_or(LayoutError::UnknownElement)
    }

    pub fn element_mut(&mut self, element: ElementId) -> Result<&mut Element> {
        self.elements
            .get_mut(element)
            .ok_or(LayoutError::UnknownElement)
    }

    /// Number of live elements registered with this widget.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Elements that accept keyboard focus, in registration order.
    pub fn focusable_elements(&self) -> &[ElementId] {
        &self.focus_order
    }

    /// Lifecycle notification: a new element joined this widget.
    fn register_element(&mut self, element: ElementId) {
        debug!(?element, "element registered");
        let focusable = self
            .elements
            .get(element)
            .is_some_and(|el| el.accepts_keyboard_focus());
        if focusable {
            self.focus_order.push(element);
        }
    }

    /// Lifecycle notification: an element is about to leave this widget.
    fn unregister_element(&mut self, element: ElementId) {
        debug!(?element, "element unregistered");
        self.focus_order.retain(|id| *id != element);
    }
}
