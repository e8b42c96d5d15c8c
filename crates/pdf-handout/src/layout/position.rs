//! Slot mapping between slide indices and grid cells
//!
//! The mapping here is the only place page/row/column are derived from a
//! slide index. The composer and any preview both go through it.

use crate::options::LayoutConfig;

use super::{LayoutPlan, PagePosition, Rect};

impl LayoutPlan {
    /// Position of the slide at 0-based `index`.
    ///
    /// Returns `None` for an empty plan.
    pub fn position(&self, index: usize) -> Option<PagePosition> {
        position_of(index, self.items_per_page, self.columns)
    }

    /// Inverse of [`LayoutPlan::position`]
    pub fn index_of(&self, pos: PagePosition) -> usize {
        pos.page * self.items_per_page + pos.row * self.columns + pos.col
    }

    /// Cell bounds for a position, in millimeters from the page's
    /// bottom-left corner.
    ///
    /// Row 0 is the top row, so y runs downward from the top margin.
    pub fn cell_rect(&self, pos: PagePosition, config: &LayoutConfig) -> Rect {
        let x = config.margins.left_mm
            + pos.col as f32 * (self.item_width + config.h_spacing_mm);
        let y = self.page_height
            - config.margins.top_mm
            - self.item_height
            - pos.row as f32 * (self.item_height + config.v_spacing_mm);
        Rect::new(x, y, self.item_width, self.item_height)
    }

    /// All positions for the plan's slide count, in document order
    pub fn positions(&self) -> impl Iterator<Item = PagePosition> + '_ {
        (0..self.item_count).filter_map(|i| self.position(i))
    }
}

/// Map a 0-based slide index onto page, slot, row and column.
pub fn position_of(index: usize, items_per_page: usize, columns: usize) -> Option<PagePosition> {
    if items_per_page == 0 || columns == 0 {
        return None;
    }
    let page = index / items_per_page;
    let slot = index % items_per_page;
    Some(PagePosition {
        page,
        slot,
        row: slot / columns,
        col: slot % columns,
    })
}

/// Locator label for a 1-based slide number, e.g. slide 25 at two per
/// page is `"13-1"`.
///
/// Returns `None` for slide number 0 or an empty page.
pub fn locate(slide_number: usize, items_per_page: usize) -> Option<String> {
    if slide_number == 0 || items_per_page == 0 {
        return None;
    }
    let index = slide_number - 1;
    Some(format!(
        "{}-{}",
        index / items_per_page + 1,
        index % items_per_page + 1
    ))
}

// =============================================================================
// Tests
// =============================================================================
