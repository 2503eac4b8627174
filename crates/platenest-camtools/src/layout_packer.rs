//! Greedy column packing of rectangular parts onto a single plate.
//!
//! Items are sorted by length (longest first) and stacked top-down into
//! vertical columns. A column is as wide as the item that opened it, so
//! every later item in the same column fits horizontally and only the
//! vertical fit is ever checked. Cut segments are recorded while packing:
//! a horizontal cut under every placed item that does not rest on the
//! plate bottom, and a full-height vertical cut at the right edge of every
//! closed column that does not end flush with the plate edge.
//!
//! The packer never backtracks. An item that cannot open a column because
//! the remaining plate width is too small is dropped and not retried later.

use platenest_core::{CutSegment, Item, PartSpec, PlacedRect, Plate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Result of expanding a catalog into individual items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogExpansion {
    /// One entry per unit of quantity, in catalog order
    pub items: Vec<Item>,
    /// Catalog entries discarded for non-positive dimensions or an out of range quantity
    pub rejected_entries: usize,
}

/// Expand a part catalog into one [`Item`] per unit of quantity.
///
/// Invalid entries are skipped and counted, never reported as errors.
pub fn expand_catalog(catalog: &[PartSpec]) -> CatalogExpansion {
    let mut expansion = CatalogExpansion::default();
    for spec in catalog {
        if !spec.is_valid() {
            expansion.rejected_entries += 1;
            continue;
        }
        let item = Item::from(spec);
        expansion
            .items
            .extend(std::iter::repeat_n(item, spec.quantity as usize));
    }
    expansion
}

/// Overall outcome of a packing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutStatus {
    /// The catalog produced no valid item at all
    NoValidItems,
    /// Every item was placed
    Complete,
    /// The plate ran out of room for some items
    Partial { unplaced: usize },
}

/// Placed parts and the cuts discovered while packing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestingLayout {
    pub plate: Plate,
    pub placed: Vec<PlacedRect>,
    pub vertical_cuts: Vec<CutSegment>,
    pub horizontal_cuts: Vec<CutSegment>,
    /// Items dropped because no column could take them
    pub unplaced: Vec<Item>,
    /// Catalog entries filtered out before packing
    pub rejected_entries: usize,
}

impl NestingLayout {
    fn empty(plate: Plate, rejected_entries: usize) -> Self {
        Self {
            plate,
            placed: Vec::new(),
            vertical_cuts: Vec::new(),
            horizontal_cuts: Vec::new(),
            unplaced: Vec::new(),
            rejected_entries,
        }
    }

    pub fn placed_area(&self) -> f64 {
        self.placed.iter().map(PlacedRect::area).sum()
    }

    /// Fraction of the plate covered by placed parts.
    pub fn utilization(&self) -> f64 {
        self.placed_area() / self.plate.area()
    }

    pub fn status(&self) -> LayoutStatus {
        if self.placed.is_empty() && self.unplaced.is_empty() {
            LayoutStatus::NoValidItems
        } else if self.unplaced.is_empty() {
            LayoutStatus::Complete
        } else {
            LayoutStatus::Partial {
                unplaced: self.unplaced.len(),
            }
        }
    }
}

/// An open column: left edge, fixed width, height filled from the top.
#[derive(Debug, Clone, Copy)]
struct Column {
    x: f64,
    width: f64,
    fill: f64,
}

impl Column {
    fn right(&self) -> f64 {
        self.x + self.width
    }
}

#[derive(Debug, Clone, Copy)]
enum PackState {
    NoColumn,
    ColumnOpen(Column),
}

/// Greedy column packer for one plate.
pub struct LayoutPacker {
    plate: Plate,
}

impl LayoutPacker {
    /// Create a packer for an already validated plate.
    pub fn new(plate: Plate) -> Self {
        Self { plate }
    }

    pub fn plate(&self) -> Plate {
        self.plate
    }

    /// Pack `catalog` onto the plate.
    pub fn pack(&self, catalog: &[PartSpec]) -> NestingLayout {
        let CatalogExpansion {
            mut items,
            rejected_entries,
        } = expand_catalog(catalog);

        if rejected_entries > 0 {
            debug!(rejected_entries, "Dropped invalid catalog entries");
        }

        let mut layout = NestingLayout::empty(self.plate, rejected_entries);
        if items.is_empty() {
            info!("No valid items to pack");
            return layout;
        }

        // Stable sort: equal lengths keep catalog order.
        items.sort_by(|a, b| b.length.total_cmp(&a.length));

        let plate = self.plate;
        let mut current_x = 0.0;
        let mut state = PackState::NoColumn;
        let mut queue = items.into_iter().peekable();

        while let Some(&item) = queue.peek() {
            match state {
                PackState::NoColumn => {
                    if current_x + item.length > plate.width {
                        debug!(
                            length = item.length,
                            width = item.width,
                            current_x,
                            "Item does not fit in remaining plate width"
                        );
                        layout.unplaced.push(item);
                        queue.next();
                    } else {
                        state = PackState::ColumnOpen(Column {
                            x: current_x,
                            width: item.length,
                            fill: 0.0,
                        });
                    }
                }
                PackState::ColumnOpen(mut column) => {
                    if column.fill + item.width <= plate.height {
                        let y = plate.height - (column.fill + item.width);
                        layout
                            .placed
                            .push(PlacedRect::new(column.x, y, item.length, item.width));
                        if y > 0.0 {
                            layout
                                .horizontal_cuts
                                .push(CutSegment::horizontal(y, column.x, column.right()));
                        }
                        column.fill += item.width;
                        state = PackState::ColumnOpen(column);
                        queue.next();
                    } else {
                        // Column full: the same item is retried against a fresh column.
                        current_x = self.close_column(column, &mut layout.vertical_cuts);
                        state = PackState::NoColumn;
                    }
                }
            }
        }

        if let PackState::ColumnOpen(column) = state {
            self.close_column(column, &mut layout.vertical_cuts);
        }

        info!(
            placed = layout.placed.len(),
            vertical_cuts = layout.vertical_cuts.len(),
            horizontal_cuts = layout.horizontal_cuts.len(),
            "Packing finished"
        );
        if !layout.unplaced.is_empty() {
            warn!(
                unplaced = layout.unplaced.len(),
                "Some items did not fit on the plate"
            );
        }

        layout
    }

    /// Close `column`, emitting its right-edge cut unless it is flush with
    /// the plate edge. Returns the next free x offset.
    fn close_column(&self, column: Column, vertical_cuts: &mut Vec<CutSegment>) -> f64 {
        let cut_x = column.right();
        if cut_x < self.plate.width {
            vertical_cuts.push(CutSegment::vertical(cut_x, 0.0, self.plate.height));
        }
        cut_x
    }
}
