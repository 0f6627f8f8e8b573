//! Layout nodes and tree mutation.
//!
//! A layout node arranges an ordered sequence of child entries along one
//! axis. The child slot is a sum type with per-variant ownership: sub-layouts
//! and spacers are owned by the containing node and destroyed with it,
//! elements are referenced by key and owned by the widget. Every mutation
//! validates its preconditions before touching the child list, then sets the
//! node's dirty flag.

use slotmap::new_key_type;
use tracing::debug;

use crate::element::ElementId;
use crate::error::{LayoutError, Result};
use crate::widget::Widget;

new_key_type! {
    /// Generational handle to a layout node in its widget's arena.
    pub struct LayoutId;
}

/// Identity of a fixed or flexible spacer, unique within its widget.
///
/// Spacers are owned inline by their layout entry; the id exists so they can
/// be removed by identity rather than by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpaceId(pub(crate) u64);

/// Direction a layout arranges its children in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// The uniform child slot of a layout node.
///
/// Exactly one variant is active. `Element` is a non-owning reference (the
/// widget owns the element); the other variants are exclusively owned by the
/// containing layout and die with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutEntry {
    /// A referenced element. Never owned by the layout.
    Element(ElementId),
    /// An owned sub-layout.
    Layout(LayoutId),
    /// An owned fixed-size gap along the layout's axis.
    FixedSpace { id: SpaceId, size: u32 },
    /// An owned gap that absorbs leftover space.
    FlexibleSpace { id: SpaceId },
}

/// One node of the layout tree.
pub(crate) struct LayoutNode {
    pub(crate) axis: Axis,
    pub(crate) children: Vec<LayoutEntry>,
    pub(crate) dirty: bool,
    pub(crate) optimal_width: u32,
    pub(crate) optimal_height: u32,
}

impl LayoutNode {
    pub(crate) fn new(axis: Axis) -> Self {
        Self {
            axis,
            children: Vec::new(),
            dirty: false,
            optimal_width: 0,
            optimal_height: 0,
        }
    }
}

impl Widget {
    /// Append an element to a layout's children.
    ///
    /// If the element currently belongs to another layout it is first
    /// removed from that layout (single-ownership enforcement,
    /// non-destructive for the previous layout).
    pub fn add_element(&mut self, layout: LayoutId, element: ElementId) -> Result<()> {
        if !self.layouts.contains_key(layout) {
            return Err(LayoutError::UnknownLayout);
        }
        self.claim_element(element, layout)?;

        let node = self.layouts.get_mut(layout).ok_or(LayoutError::UnknownLayout)?;
        node.children.push(LayoutEntry::Element(element));
        node.dirty = true;
        Ok(())
    }

    /// Insert an element at `idx`, shifting later children.
    ///
    /// Fails with out-of-range unless `idx < child_count`; appending is the
    /// dedicated job of [`Widget::add_element`]. The index is validated
    /// before the element is claimed from any previous layout, so a failed
    /// insert leaves both layouts untouched.
    pub fn insert_element(&mut self, layout: LayoutId, idx: usize, element: ElementId) -> Result<()> {
        self.check_insert_index(layout, idx)?;
        self.claim_element(element, layout)?;

        let node = self.layouts.get_mut(layout).ok_or(LayoutError::UnknownLayout)?;
        node.children.insert(idx, LayoutEntry::Element(element));
        node.dirty = true;
        Ok(())
    }

    /// Detach an element from a layout.
    ///
    /// Fails with not-found if the element is not a current child. The
    /// element itself stays alive — ownership remains with the widget.
    pub fn remove_element(&mut self, layout: LayoutId, element: ElementId) -> Result<()> {
        let node = self.layouts.get_mut(layout).ok_or(LayoutError::UnknownLayout)?;
        let position = node
            .children
            .iter()
            .position(|entry| matches!(entry, LayoutEntry::Element(id) if *id == element))
            .ok_or(LayoutError::ElementNotFound)?;

        node.children.remove(position);
        node.dirty = true;
        if let Some(el) = self.elements.get_mut(element) {
            el.set_parent_layout(None);
        }
        Ok(())
    }

    /// Append a new empty sub-layout and return its handle.
    pub fn add_layout(&mut self, parent: LayoutId, axis: Axis) -> Result<LayoutId> {
        if !self.layouts.contains_key(parent) {
            return Err(LayoutError::UnknownLayout);
        }
        let child = self.layouts.insert(LayoutNode::new(axis));
        debug!(?child, ?axis, "sub-layout created");

        let node = self.layouts.get_mut(parent).ok_or(LayoutError::UnknownLayout)?;
        node.children.push(LayoutEntry::Layout(child));
        node.dirty = true;
        Ok(child)
    }

    /// Insert a new empty sub-layout at `idx` and return its handle.
    pub fn insert_layout(&mut self, parent: LayoutId, idx: usize, axis: Axis) -> Result<LayoutId> {
        self.check_insert_index(parent, idx)?;
        let child = self.layouts.insert(LayoutNode::new(axis));
        debug!(?child, ?axis, "sub-layout created");

        let node = self.layouts.get_mut(parent).ok_or(LayoutError::UnknownLayout)?;
        node.children.insert(idx, LayoutEntry::Layout(child));
        node.dirty = true;
        Ok(child)
    }

    /// Remove and destroy a sub-layout, recursively destroying everything
    /// it owns and detaching every element referenced in its subtree.
    pub fn remove_layout(&mut self, parent: LayoutId, child: LayoutId) -> Result<()> {
        let node = self.layouts.get_mut(parent).ok_or(LayoutError::UnknownLayout)?;
        let position = node
            .children
            .iter()
            .position(|entry| matches!(entry, LayoutEntry::Layout(id) if *id == child))
            .ok_or(LayoutError::LayoutNotFound)?;

        node.children.remove(position);
        node.dirty = true;
        self.destroy_layout_subtree(child);
        Ok(())
    }

    /// Append a fixed-size gap and return its identity.
    pub fn add_space(&mut self, layout: LayoutId, size: u32) -> Result<SpaceId> {
        let id = self.next_space_id();
        let node = self.layouts.get_mut(layout).ok_or(LayoutError::UnknownLayout)?;
        node.children.push(LayoutEntry::FixedSpace { id, size });
        node.dirty = true;
        Ok(id)
    }

    /// Insert a fixed-size gap at `idx` and return its identity.
    pub fn insert_space(&mut self, layout: LayoutId, idx: usize, size: u32) -> Result<SpaceId> {
        self.check_insert_index(layout, idx)?;
        let id = self.next_space_id();
        let node = self.layouts.get_mut(layout).ok_or(LayoutError::UnknownLayout)?;
        node.children.insert(idx, LayoutEntry::FixedSpace { id, size });
        node.dirty = true;
        Ok(id)
    }

    /// Remove and destroy a fixed-size gap.
    pub fn remove_space(&mut self, layout: LayoutId, space: SpaceId) -> Result<()> {
        let node = self.layouts.get_mut(layout).ok_or(LayoutError::UnknownLayout)?;
        let position = node
            .children
            .iter()
            .position(|entry| matches!(entry, LayoutEntry::FixedSpace { id, .. } if *id == space))
            .ok_or(LayoutError::SpaceNotFound)?;

        node.children.remove(position);
        node.dirty = true;
        Ok(())
    }

    /// Append a flexible gap and return its identity.
    pub fn add_flexible_space(&mut self, layout: LayoutId) -> Result<SpaceId> {
        let id = self.next_space_id();
        let node = self.layouts.get_mut(layout).ok_or(LayoutError::UnknownLayout)?;
        node.children.push(LayoutEntry::FlexibleSpace { id });
        node.dirty = true;
        Ok(id)
    }

    /// Insert a flexible gap at `idx` and return its identity.
    pub fn insert_flexible_space(&mut self, layout: LayoutId, idx: usize) -> Result<SpaceId> {
        self.check_insert_index(layout, idx)?;
        let id = self.next_space_id();
        let node = self.layouts.get_mut(layout).ok_or(LayoutError::UnknownLayout)?;
        node.children.insert(idx, LayoutEntry::FlexibleSpace { id });
        node.dirty = true;
        Ok(id)
    }

    /// Remove and destroy a flexible gap.
    pub fn remove_flexible_space(&mut self, layout: LayoutId, space: SpaceId) -> Result<()> {
        let node = self.layouts.get_mut(layout).ok_or(LayoutError::UnknownLayout)?;
        let position = node
            .children
            .iter()
            .position(|entry| matches!(entry, LayoutEntry::FlexibleSpace { id } if *id == space))
            .ok_or(LayoutError::SpaceNotFound)?;

        node.children.remove(position);
        node.dirty = true;
        Ok(())
    }

    /// Number of child entries in a layout.
    pub fn child_count(&self, layout: LayoutId) -> Result<usize> {
        let node = self.layouts.get(layout).ok_or(LayoutError::UnknownLayout)?;
        Ok(node.children.len())
    }

    /// The child entries of a layout, in positional order.
    pub fn children(&self, layout: LayoutId) -> Result<&[LayoutEntry]> {
        let node = self.layouts.get(layout).ok_or(LayoutError::UnknownLayout)?;
        Ok(&node.children)
    }

    /// The axis a layout arranges its children along.
    pub fn axis(&self, layout: LayoutId) -> Result<Axis> {
        let node = self.layouts.get(layout).ok_or(LayoutError::UnknownLayout)?;
        Ok(node.axis)
    }

    /// The cached optimal (width, height) of a layout, as of its last
    /// update.
    pub fn optimal_size(&self, layout: LayoutId) -> Result<(u32, u32)> {
        let node = self.layouts.get(layout).ok_or(LayoutError::UnknownLayout)?;
        Ok((node.optimal_width, node.optimal_height))
    }

    /// Whether a layout needs re-layout before the next paint.
    ///
    /// True if the node was structurally mutated since its last update, or
    /// transitively if any descendant sub-layout was. Computed on demand by
    /// walking descendants; a pure query, never a transition.
    pub fn is_dirty(&self, layout: LayoutId) -> Result<bool> {
        let node = self.layouts.get(layout).ok_or(LayoutError::UnknownLayout)?;
        if node.dirty {
            return Ok(true);
        }
        for entry in &node.children {
            if let LayoutEntry::Layout(child) = entry {
                if self.is_dirty(*child)? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Validate the element and, if it already sits in a layout, detach it
    /// from there and point its back-reference at the new layout.
    fn claim_element(&mut self, element: ElementId, new_parent: LayoutId) -> Result<()> {
        let previous = self
            .elements
            .get(element)
            .ok_or(LayoutError::UnknownElement)?
            .parent_layout();
        if let Some(previous) = previous {
            self.remove_element(previous, element)?;
        }
        if let Some(el) = self.elements.get_mut(element) {
            el.set_parent_layout(Some(new_parent));
        }
        Ok(())
    }

    /// Out-of-range check shared by the `insert_*` operations, performed
    /// before any mutation. Inserting at the end is the `add_*` operations'
    /// job, so `idx == child_count` is rejected.
    fn check_insert_index(&self, layout: LayoutId, idx: usize) -> Result<()> {
        let len = self.child_count(layout)?;
        if idx >= len {
            return Err(LayoutError::IndexOutOfRange { index: idx, len });
        }
        Ok(())
    }

    /// Remove a subtree from the arena: owned variants are destroyed
    /// recursively, referenced elements are detached.
    pub(crate) fn destroy_layout_subtree(&mut self, layout: LayoutId) {
        let Some(node) = self.layouts.remove(layout) else {
            return;
        };
        debug!(?layout, "layout destroyed");
        for entry in node.children {
            match entry {
                LayoutEntry::Element(element) => {
                    if let Some(el) = self.elements.get_mut(element) {
                        el.set_parent_layout(None);
                    }
                }
                LayoutEntry::Layout(child) => self.destroy_layout_subtree(child),
                LayoutEntry::FixedSpace { .. } => {}
                LayoutEntry::FlexibleSpace { .. } => {}
            }
        }
    }

    fn next_space_id(&mut self) -> SpaceId {
        let id = SpaceId(self.space_counter);
        self.space_counter += 1;
        id
    }
}
