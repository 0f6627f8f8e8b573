//! The two-phase layout pass.
//!
//! Phase 1 walks the subtree bottom-up computing each node's optimal
//! (natural) size, a pure function of child constraints that ancestors need
//! before any space is granted. Phase 2 walks top-down distributing the
//! actually assigned rectangle: fixed children keep their declared size,
//! flexible children share surplus or deficit equally, and every positioned
//! element receives offset/extent/clip/depth through its change-detected
//! setters. Both phases run inside [`Widget::update`]; positioning alone
//! would read stale cached sizes.

use tracing::trace;

use crate::error::{LayoutError, Result};
use crate::layout::{Axis, LayoutEntry, LayoutId};
use crate::primitives::{Point, Rect};
use crate::widget::Widget;

/// Main-axis allocation state for a single child slot.
#[derive(Debug, Clone, Copy)]
struct MainSlot {
    /// Allocated extent along the parent's axis. Starts at the child's
    /// natural size; distribution grows or shrinks flexible slots.
    size: u32,
    /// Whether the slot participates in surplus/deficit sharing.
    flexible: bool,
    min: u32,
    max: u32,
}

/// Share `available` among the slots.
///
/// Fixed slots always keep their declared size. Flexible slots absorb the
/// difference between available space and the natural total in equal parts:
/// a remainder of `r` goes one unit apiece to the first `r` flexible slots
/// in positional order, and when a min/max bound keeps a slot from
/// absorbing its part, the leftover is re-divided among the remaining
/// unbounded slots until stable. Sizes never go below a slot's floor, so
/// nothing ever goes negative; a deficit fixed children cannot absorb is
/// left as overflow for the clip rectangle to handle.
fn distribute_main_axis(slots: &mut [MainSlot], available: u32) {
    let natural_total: u64 = slots.iter().map(|slot| slot.size as u64).sum();
    let available = available as u64;

    if available >= natural_total {
        let mut surplus = available - natural_total;
        while surplus > 0 {
            let open: Vec<usize> = (0..slots.len())
                .filter(|&i| slots[i].flexible && slots[i].size < slots[i].max)
                .collect();
            if open.is_empty() {
                break;
            }
            let share = surplus / open.len() as u64;
            let remainder = surplus % open.len() as u64;
            surplus = 0;
            for (rank, &i) in open.iter().enumerate() {
                let want = share + u64::from((rank as u64) < remainder);
                let room = (slots[i].max - slots[i].size) as u64;
                let take = want.min(room);
                slots[i].size += take as u32;
                surplus += want - take;
            }
        }
    } else {
        let mut deficit = natural_total - available;
        while deficit > 0 {
            let open: Vec<usize> = (0..slots.len())
                .filter(|&i| slots[i].flexible && slots[i].size > slots[i].min)
                .collect();
            if open.is_empty() {
                break;
            }
            let share = deficit / open.len() as u64;
            let remainder = deficit % open.len() as u64;
            deficit = 0;
            for (rank, &i) in open.iter().enumerate() {
                let want = share + u64::from((rank as u64) < remainder);
                let room = (slots[i].size - slots[i].min) as u64;
                let take = want.min(room);
                slots[i].size -= take as u32;
                deficit += want - take;
            }
        }
    }
}

impl Widget {
    /// Run a full layout pass over a subtree with the rectangle and depth
    /// assigned by the caller (the frame driver supplies the widget-level
    /// rectangle and depth for the root).
    ///
    /// Recomputes optimal sizes for the whole subtree, then positions every
    /// child top-down, clearing the dirty flag of each visited node. Must
    /// not be re-entered for the same layout from within a child callback.
    pub fn update(
        &mut self,
        layout: LayoutId,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        depth: u32,
    ) -> Result<()> {
        if !self.layouts.contains_key(layout) {
            return Err(LayoutError::UnknownLayout);
        }
        trace!(?layout, x, y, width, height, depth, "layout pass");
        self.update_optimal_sizes(layout);
        self.update_internal(layout, x, y, width, height, depth);
        Ok(())
    }

    /// Phase 1: cache each node's natural size, children before parents.
    fn update_optimal_sizes(&mut self, layout: LayoutId) {
        let Some(node) = self.layouts.get(layout) else {
            return;
        };
        let axis = node.axis;
        let children = node.children.clone();

        for entry in &children {
            if let LayoutEntry::Layout(child) = entry {
                self.update_optimal_sizes(*child);
            }
        }

        let mut main_total: u64 = 0;
        let mut cross_max: u32 = 0;
        for entry in &children {
            let (width, height) = self.entry_optimal_size(entry, axis);
            let (main, cross) = match axis {
                Axis::Horizontal => (width, height),
                Axis::Vertical => (height, width),
            };
            main_total += main as u64;
            cross_max = cross_max.max(cross);
        }
        let main_total = main_total.min(u32::MAX as u64) as u32;

        if let Some(node) = self.layouts.get_mut(layout) {
            match axis {
                Axis::Horizontal => {
                    node.optimal_width = main_total;
                    node.optimal_height = cross_max;
                }
                Axis::Vertical => {
                    node.optimal_width = cross_max;
                    node.optimal_height = main_total;
                }
            }
        }
    }

    /// Natural (width, height) one child entry reports to its parent.
    fn entry_optimal_size(&self, entry: &LayoutEntry, axis: Axis) -> (u32, u32) {
        match entry {
            LayoutEntry::Element(id) => self
                .elements
                .get(*id)
                .map_or((0, 0), |element| element.optimal_size()),
            LayoutEntry::Layout(id) => self
                .layouts
                .get(*id)
                .map_or((0, 0), |node| (node.optimal_width, node.optimal_height)),
            LayoutEntry::FixedSpace { size, .. } => match axis {
                Axis::Horizontal => (*size, 0),
                Axis::Vertical => (0, *size),
            },
            LayoutEntry::FlexibleSpace { .. } => (0, 0),
        }
    }

    /// Phase 2: place children along the axis in insertion order.
    ///
    /// Elements get their extents, offset, the layout's rectangle as clip,
    /// the passed-in widget/area depth, and a running local order; sub-
    /// layouts recurse with their allocated sub-rectangle and an
    /// incremented depth. Clears the node's dirty flag.
    fn update_internal(
        &mut self,
        layout: LayoutId,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        depth: u32,
    ) {
        let Some(node) = self.layouts.get_mut(layout) else {
            return;
        };
        node.dirty = false;
        let axis = node.axis;
        let children = node.children.clone();

        let available_main = match axis {
            Axis::Horizontal => width,
            Axis::Vertical => height,
        };
        let cross_extent = match axis {
            Axis::Horizontal => height,
            Axis::Vertical => width,
        };

        let mut slots: Vec<MainSlot> = children
            .iter()
            .map(|entry| self.main_slot(entry, axis))
            .collect();
        distribute_main_axis(&mut slots, available_main);

        let clip = Rect::new(x, y, width, height);
        let mut cursor: i64 = match axis {
            Axis::Horizontal => x as i64,
            Axis::Vertical => y as i64,
        };
        let mut order = (depth & 0xFF) as u8;

        for (entry, slot) in children.iter().zip(slots.iter()) {
            match entry {
                LayoutEntry::Element(id) => {
                    if let Some(element) = self.elements.get_mut(*id) {
                        let options = element.layout_options();
                        let (fixed_cross, declared, min_cross, max_cross) = match axis {
                            Axis::Horizontal => (
                                options.fixed_height,
                                options.height,
                                options.min_height,
                                options.max_height,
                            ),
                            Axis::Vertical => (
                                options.fixed_width,
                                options.width,
                                options.min_width,
                                options.max_width,
                            ),
                        };
                        let cross = if fixed_cross {
                            declared
                        } else {
                            cross_extent.clamp(min_cross, max_cross)
                        };

                        match axis {
                            Axis::Horizontal => {
                                element.set_width(slot.size);
                                element.set_height(cross);
                                element.set_offset(Point::new(cursor as i32, y));
                            }
                            Axis::Vertical => {
                                element.set_width(cross);
                                element.set_height(slot.size);
                                element.set_offset(Point::new(x, cursor as i32));
                            }
                        }
                        element.set_clip_rect(clip);
                        element.set_widget_depth((depth >> 24) as u8);
                        element.set_area_depth((depth >> 8) as u16);
                        element.set_local_order(order);
                    }
                    cursor += slot.size as i64;
                    order = order.saturating_add(1);
                }
                LayoutEntry::Layout(child) => {
                    let (child_x, child_y, child_width, child_height) = match axis {
                        Axis::Horizontal => (cursor as i32, y, slot.size, cross_extent),
                        Axis::Vertical => (x, cursor as i32, cross_extent, slot.size),
                    };
                    let child_depth = (depth & !0xFF) | order as u32;
                    self.update_internal(
                        *child,
                        child_x,
                        child_y,
                        child_width,
                        child_height,
                        child_depth,
                    );
                    cursor += slot.size as i64;
                    order = order.saturating_add(1);
                }
                LayoutEntry::FixedSpace { .. } | LayoutEntry::FlexibleSpace { .. } => {
                    cursor += slot.size as i64;
                }
            }
        }
    }

    /// Main-axis allocation seed for one child entry.
    fn main_slot(&self, entry: &LayoutEntry, axis: Axis) -> MainSlot {
        match entry {
            LayoutEntry::Element(id) => match self.elements.get(*id) {
                Some(element) => {
                    let options = element.layout_options();
                    let (fixed, min, max) = match axis {
                        Axis::Horizontal => {
                            (options.fixed_width, options.min_width, options.max_width)
                        }
                        Axis::Vertical => {
                            (options.fixed_height, options.min_height, options.max_height)
                        }
                    };
                    let (width, height) = element.optimal_size();
                    let natural = match axis {
                        Axis::Horizontal => width,
                        Axis::Vertical => height,
                    };
                    if fixed {
                        MainSlot {
                            size: natural,
                            flexible: false,
                            min: natural,
                            max: natural,
                        }
                    } else {
                        MainSlot {
                            size: natural,
                            flexible: true,
                            min,
                            max,
                        }
                    }
                }
                None => MainSlot {
                    size: 0,
                    flexible: false,
                    min: 0,
                    max: 0,
                },
            },
            LayoutEntry::Layout(id) => {
                let natural = self.layouts.get(*id).map_or(0, |node| match axis {
                    Axis::Horizontal => node.optimal_width,
                    Axis::Vertical => node.optimal_height,
                });
                MainSlot {
                    size: natural,
                    flexible: true,
                    min: 0,
                    max: u32::MAX,
                }
            }
            LayoutEntry::FixedSpace { size, .. } => MainSlot {
                size: *size,
                flexible: false,
                min: *size,
                max: *size,
            },
            LayoutEntry::FlexibleSpace { .. } => MainSlot {
                size: 0,
                flexible: true,
                min: 0,
                max: u32::MAX,
            },
        }
    }
}
