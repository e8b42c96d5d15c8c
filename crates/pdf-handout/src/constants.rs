//! Shared constants for handout layout
//!
//! This module centralizes magic numbers and constants used throughout
//! layout, composition and merging.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (A4 portrait: 210mm)
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 595.276;

/// Default page height in points (A4 portrait: 297mm)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 841.89;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Stamps
// =============================================================================

/// Font size for the per-slide locator label (points)
pub const LOCATOR_FONT_SIZE: f32 = 8.0;

/// Distance between a cell's bottom edge and its locator baseline (points)
pub const LOCATOR_OFFSET: f32 = 10.0;

/// Font size for the sheet page number (points)
pub const PAGE_NUMBER_FONT_SIZE: f32 = 10.0;

/// Inset of the page number from the right margin (points)
pub const PAGE_NUMBER_INSET: f32 = 15.0;

/// Resource name of the stamp font on every composed page
pub const STAMP_FONT_NAME: &str = "F1";

// =============================================================================
// Output
// =============================================================================

/// PDF version written by the composer
pub const PDF_VERSION: &str = "1.7";

/// Image file extensions picked up when loading a slide directory
pub const SLIDE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
