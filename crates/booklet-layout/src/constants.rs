//! Shared constants for booklet layout
//!
//! All lengths handed to the canvas are millimeters; font sizes are points.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

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
// Cell Geometry
// =============================================================================

/// Horizontal padding inside a text cell, applied on each side of a run
pub const CELL_MARGIN_MM: f32 = 1.0;

/// Stroke width for separators and table borders
pub const LINE_WIDTH_MM: f32 = 0.2;

/// Largest font size any option may ask for
pub const MAX_FONT_SIZE_PT: f32 = 144.0;

/// Extra height added under a header cell's text
pub const HEADER_LINE_PADDING_MM: f32 = 1.0;

/// Gap left below every section header
pub const HEADER_GAP_MM: f32 = 1.0;

/// Extra height per wrapped line in table cells
pub const TABLE_LINE_PADDING_MM: f32 = 1.0;

/// Space between the two columns of a bookletized sheet
pub const GUTTER_MM: f32 = 2.0;

// =============================================================================
// Phone List
// =============================================================================

/// Height of one writable phone-list row
pub const PHONE_ROW_HEIGHT_MM: f32 = 8.0;

/// Share of the column width given to the name column
pub const PHONE_NAME_SHARE: f32 = 0.6;

// =============================================================================
// Filler Pages
// =============================================================================

/// Font size step when searching for the largest filler size that fits
pub const FILLER_SIZE_STEP_PT: f32 = 0.5;

/// Vertical gap between numbered filler items
pub const FILLER_ITEM_GAP_MM: f32 = 1.0;
