//! Shared constants for booklet generation
//!
//! This module centralizes magic numbers and constants used throughout
//! cropping, folding and sheet rendering.

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

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Book Folding
// =============================================================================

/// Source pages on one folded sheet of a saddle-stitched booklet
pub const PAGES_PER_FOLDED_SHEET: usize = 4;

/// Source pages placed side by side on one spread
pub const PAGES_PER_SPREAD: usize = 2;

// =============================================================================
// Sheet Rendering
// =============================================================================

/// Line width for cell frames (points)
pub const FRAME_LINE_WIDTH: f32 = 0.4;

// =============================================================================
// Content Bounds
// =============================================================================

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Glyph descent below the baseline, as a fraction of the font size
pub const GLYPH_DESCENT_RATIO: f32 = 0.2;
