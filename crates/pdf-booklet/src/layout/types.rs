//! Layout data types
//!
//! These types sit between slot sequencing and PDF rendering.

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Geometry of the cell grid on one sheet side
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// Number of columns in the grid
    pub cols: usize,
    /// Number of rows in the grid
    pub rows: usize,
    /// Width of each cell in points
    pub cell_width_pt: f32,
    /// Height of each cell in points
    pub cell_height_pt: f32,
    /// Bottom-left corner of the grid area
    pub origin: (f32, f32),
}

impl GridLayout {
    /// Total number of cells in the grid
    pub fn cell_count(&self) -> usize {
        self.cols.saturating_mul(self.rows)
    }
}

/// A rectangular area in points
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

    /// Build from lower-left and upper-right corners
    pub fn from_corners(llx: f32, lly: f32, urx: f32, ury: f32) -> Self {
        Self::new(
            llx.min(urx),
            lly.min(ury),
            (urx - llx).abs(),
            (ury - lly).abs(),
        )
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Grow on every side by `amount`
    pub fn expand(&self, amount: f32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + 2.0 * amount,
            self.height + 2.0 * amount,
        )
    }

    /// Overlap of two rects, if any
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.top().min(other.top());
        if x1 > x0 && y1 > y0 {
            Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
        } else {
            None
        }
    }

    /// The same rect after turning the enclosing `width` x `height` area by 180°
    pub fn rotated_within(&self, width: f32, height: f32) -> Rect {
        Rect::new(
            width - self.right(),
            height - self.top(),
            self.width,
            self.height,
        )
    }
}

/// Final placement of a page (or blank) on an output page
///
/// This is the result of all layout calculations and contains
/// everything needed to render the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlacement {
    /// Source page index, 0-based (None = blank)
    pub source_page: Option<usize>,
    /// Position and size of the placed content in points
    pub content_rect: Rect,
    /// Rotation to apply in degrees (0.0 or 180.0)
    pub rotation_degrees: f32,
    /// Scale factor applied to the source page
    pub scale: f32,
}

impl PagePlacement {
    pub fn is_rotated(&self) -> bool {
        self.rotation_degrees.abs() > 0.1
    }

    /// Turn the placement 180° inside a `width` x `height` page
    pub fn rotate_within(mut self, width: f32, height: f32) -> Self {
        self.content_rect = self.content_rect.rotated_within(width, height);
        self.rotation_degrees = if self.is_rotated() { 0.0 } else { 180.0 };
        self
    }
}
