use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookletError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages to impose")]
    NoPages,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Front and back sheet counts differ: {front} front, {back} back")]
    MismatchedSheetCounts { front: usize, back: usize },
    #[error("Slot references page {page} but the document only has {page_count} pages")]
    BlankOverflow { page: usize, page_count: usize },
}

pub type Result<T> = std::result::Result<T, BookletError>;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width (default for most paper sizes)
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaperSize {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// Which physical side of the printed sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SheetSide {
    /// Front of the sheet (printed first in duplex)
    Front,
    /// Back of the sheet (printed after the sheet is flipped)
    Back,
}

impl SheetSide {
    /// One-letter label used in order listings
    pub fn label(self) -> char {
        match self {
            SheetSide::Front => 'F',
            SheetSide::Back => 'B',
        }
    }
}

/// Number of cells composited onto one sheet side, as columns x rows.
///
/// Cells are filled row-major starting at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetGrid {
    pub cols: usize,
    pub rows: usize,
}

impl Default for SheetGrid {
    fn default() -> Self {
        Self { cols: 2, rows: 4 }
    }
}

impl SheetGrid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    /// Cells per sheet side, or `None` when the product overflows
    pub fn checked_cells(self) -> Option<usize> {
        self.cols.checked_mul(self.rows)
    }

    /// Cells per sheet side; an overflowing grid counts as empty
    pub fn cells(self) -> usize {
        self.checked_cells().unwrap_or(0)
    }

    /// Number of sheets needed to hold `slots` cells
    pub fn sheets_for(self, slots: usize) -> usize {
        match self.cells() {
            0 => 0,
            cells => slots.div_ceil(cells),
        }
    }
}

/// Margins around each page of a book spread, in points.
///
/// `inner_pt` is applied on the spine side of every page, so the gutter
/// between the two pages of a spread is twice as wide.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpreadMargins {
    pub inner_pt: f32,
    pub outer_pt: f32,
    pub top_pt: f32,
    pub bottom_pt: f32,
}

impl Default for SpreadMargins {
    fn default() -> Self {
        Self {
            inner_pt: 100.0,
            outer_pt: 40.0,
            top_pt: 30.0,
            bottom_pt: 30.0,
        }
    }
}

impl SpreadMargins {
    fn values(&self) -> [f32; 4] {
        [self.inner_pt, self.outer_pt, self.top_pt, self.bottom_pt]
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.values().iter().all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// Margin cropping applied to the source before book-folding
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CropOptions {
    /// Crop every page to its inked content
    pub enabled: bool,
    /// Extra space kept around the inked content, in points
    pub padding_pt: f32,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            padding_pt: 0.0,
        }
    }
}

/// Statistics about a booklet run
#[derive(Debug, Clone, PartialEq)]
pub struct BookletStatistics {
    /// Total number of source pages
    pub source_pages: usize,
    /// Blank pages added so the fold gets a multiple of 4 pages
    pub blank_pages_added: usize,
    /// Book-ordered spread count (N)
    pub book_pages: usize,
    /// Length of the front slot sequence
    pub front_slots: usize,
    /// Length of the back slot sequence
    pub back_slots: usize,
    /// Blank slots across both sequences
    pub blank_slots: usize,
    /// Rendered front sheet sides
    pub front_sheets: usize,
    /// Rendered back sheet sides
    pub back_sheets: usize,
    /// Pages in the final document
    pub output_pages: usize,
}

impl BookletStatistics {
    /// Whether every front sheet has a matching back sheet
    pub fn is_balanced(&self) -> bool {
        self.front_sheets == self.back_sheets
    }
}
