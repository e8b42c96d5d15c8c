//! Packing plan calculation
//!
//! Turns a reference aspect ratio and a page configuration into the number
//! of rows that fit, the cell size and the number of pages needed. Pure
//! math: no I/O and no state, so it can be re-run on every settings edit.

use crate::options::LayoutConfig;
use crate::slides::SlideImage;

use super::LayoutPlan;

// =============================================================================
// Plan Creation
// =============================================================================

/// Compute the packing plan for `item_count` slides.
///
/// # Arguments
/// * `item_count` - Number of slides to place
/// * `aspect_ratio` - Width / height of the reference slide, must be positive
/// * `config` - Page and grid configuration
///
/// An empty sequence yields a plan with zero rows and zero pages. Cells
/// that come out with no usable area are not rejected; the plan is
/// degenerate and still renders. At least one row is always planned even
/// when it overflows the page.
pub fn compute_layout(item_count: usize, aspect_ratio: f32, config: &LayoutConfig) -> LayoutPlan {
    // Zero columns is rejected by `LayoutConfig::validate`; clamp so the
    // division below stays defined when called without validation.
    let columns = config.columns.max(1);
    let (page_width, page_height) = config.page_dimensions_mm();

    if item_count == 0 {
        return LayoutPlan {
            rows: 0,
            columns,
            item_width: 0.0,
            item_height: 0.0,
            aspect_ratio: 0.0,
            pages_needed: 0,
            items_per_page: 0,
            item_count: 0,
            orientation: config.orientation,
            page_width,
            page_height,
        };
    }

    let margins = &config.margins;
    let available_width = page_width - margins.left_mm - margins.right_mm;
    let available_height = page_height - margins.top_mm - margins.bottom_mm;

    let total_h_spacing = config.h_spacing_mm * (columns - 1) as f32;
    let item_width = (available_width - total_h_spacing) / columns as f32;
    let item_height = item_width / aspect_ratio;

    let rows = rows_that_fit(available_height, item_height, config.v_spacing_mm);
    let items_per_page = rows.saturating_mul(columns);
    let pages_needed = item_count.div_ceil(items_per_page);

    log::debug!(
        "Layout: {} slides, {}x{} grid, cell {:.2}x{:.2}mm, {} pages",
        item_count,
        columns,
        rows,
        item_width,
        item_height,
        pages_needed
    );

    LayoutPlan {
        rows,
        columns,
        item_width,
        item_height,
        aspect_ratio,
        pages_needed,
        items_per_page,
        item_count,
        orientation: config.orientation,
        page_width,
        page_height,
    }
}

/// Compute the plan for a slide sequence, sampling the first slide's
/// aspect ratio.
pub fn plan_for_slides(slides: &[SlideImage], config: &LayoutConfig) -> LayoutPlan {
    match slides.first() {
        Some(first) => compute_layout(slides.len(), first.aspect_ratio(), config),
        None => compute_layout(0, 0.0, config),
    }
}

/// Largest `rows` with `rows * cell + (rows - 1) * spacing <= available`,
/// never less than one.
fn rows_that_fit(available: f32, cell: f32, spacing: f32) -> usize {
    let fit = ((available + spacing) / (cell + spacing)).floor();
    if fit.is_finite() && fit >= 1.0 {
        fit as usize
    } else {
        1
    }
}

// =============================================================================
// Tests
// =============================================================================
