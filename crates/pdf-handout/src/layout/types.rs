//! Layout data types
//!
//! These types represent the packing plan between configuration and
//! PDF composition. All lengths are millimeters.

use crate::types::Orientation;

/// Computed packing plan for a slide sequence
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutPlan {
    /// Rows per page (0 only for an empty slide sequence)
    pub rows: usize,
    /// Columns per page, echoed from the configuration
    pub columns: usize,
    /// Width of each cell
    pub item_width: f32,
    /// Height of each cell (`item_width / aspect_ratio`)
    pub item_height: f32,
    /// Aspect ratio (width / height) of the reference slide
    pub aspect_ratio: f32,
    /// Number of output pages
    pub pages_needed: usize,
    /// `rows * columns`
    pub items_per_page: usize,
    /// Number of slides the plan was computed for
    pub item_count: usize,
    pub orientation: Orientation,
    /// Oriented page width
    pub page_width: f32,
    /// Oriented page height
    pub page_height: f32,
}

impl LayoutPlan {
    /// True when there is nothing to place
    pub fn is_empty(&self) -> bool {
        self.pages_needed == 0
    }

    /// True when cells have no usable area.
    ///
    /// Such a plan still renders, but slides will not be visible.
    pub fn is_degenerate(&self) -> bool {
        !(self.item_width > 0.0 && self.item_height > 0.0)
    }

    /// One-line description of the plan
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return "No slides to lay out".to_string();
        }
        format!(
            "{} slides, {}x{} per page ({} per page), {} page{} of {:.0}x{:.0}mm, cells {:.1}x{:.1}mm",
            self.item_count,
            self.columns,
            self.rows,
            self.items_per_page,
            self.pages_needed,
            if self.pages_needed == 1 { "" } else { "s" },
            self.page_width,
            self.page_height,
            self.item_width,
            self.item_height,
        )
    }
}

/// Where a slide lands in the output.
///
/// Derived from the slide index alone: `page = i / n`, `slot = i % n`,
/// `row = slot / columns`, `col = slot % columns`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PagePosition {
    /// 0-based output page
    pub page: usize,
    /// 0-based position within the page, row-major
    pub slot: usize,
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl PagePosition {
    /// Locator label printed under the slide: `"{page}-{slot}"`, 1-based
    pub fn locator(&self) -> String {
        format!("{}-{}", self.page + 1, self.slot + 1)
    }
}

/// A rectangular area in millimeters, origin at the bottom-left of the page
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}
