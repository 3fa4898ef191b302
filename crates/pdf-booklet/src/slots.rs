//! Slot sequencing for duplex multi-up sheets
//!
//! A book-ordered document of `N` spreads is split across two slot
//! sequences: odd spreads go on front sheet sides, even spreads on back
//! sheet sides. Back sheets are imaged after the sheet is flipped, so every
//! pair of back slots is transposed to line up with its front counterpart.
//!
//! ```text
//! N = 8:  front [1, 3, 5, 7]
//!         back  [4, 2, 8, 6]
//! N = 6:  front [1, 3, 5]
//!         back  [4, 2, {}, 6]
//! ```

use crate::types::*;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Types
// =============================================================================

/// Planned content of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Slot {
    /// 1-based page index into the book-ordered document
    Page(usize),
    /// Empty cell
    Blank,
}

impl Slot {
    pub fn page(self) -> Option<usize> {
        match self {
            Slot::Page(index) => Some(index),
            Slot::Blank => None,
        }
    }

    pub fn is_blank(self) -> bool {
        matches!(self, Slot::Blank)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Page(index) => write!(f, "{}", index),
            Slot::Blank => f.write_str("{}"),
        }
    }
}

/// An ordered run of slots destined for one side of the sheets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSequence {
    side: SheetSide,
    slots: Vec<Slot>,
}

impl SlotSequence {
    pub fn new(side: SheetSide, slots: Vec<Slot>) -> Self {
        Self { side, slots }
    }

    pub fn side(&self) -> SheetSide {
        self.side
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    /// Number of blank slots
    pub fn blank_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_blank()).count()
    }

    /// Real page indices in sequence order
    pub fn pages(&self) -> Vec<usize> {
        self.slots.iter().filter_map(|s| s.page()).collect()
    }

    /// Group the slots into sheets of `grid.cells()` cells.
    ///
    /// The last sheet may hold fewer slots than the grid has cells.
    /// A grid without cells yields no sheets.
    pub fn sheets(&self, grid: SheetGrid) -> impl Iterator<Item = &[Slot]> {
        let cells = grid.cells();
        let slots = if cells == 0 { &[][..] } else { &self.slots[..] };
        slots.chunks(cells.max(1))
    }

    pub fn sheet_count(&self, grid: SheetGrid) -> usize {
        grid.sheets_for(self.slots.len())
    }

    /// Check that every page slot fits inside a document of `page_count` pages.
    pub fn check_bounds(&self, page_count: usize) -> Result<()> {
        match self.pages().into_iter().find(|&page| page > page_count) {
            Some(page) => Err(BookletError::BlankOverflow { page, page_count }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for SlotSequence {
    /// Comma-separated page list, the form N-up tools take on the command line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", slot)?;
        }
        Ok(())
    }
}

/// A validated book-ordered page count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PageCount(usize);

impl PageCount {
    pub fn new(count: usize) -> Self {
        Self(count)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for PageCount {
    fn from(count: usize) -> Self {
        Self(count)
    }
}

impl TryFrom<i64> for PageCount {
    type Error = BookletError;

    fn try_from(count: i64) -> Result<Self> {
        usize::try_from(count)
            .map(Self)
            .map_err(|_| BookletError::InvalidInput(format!("page count {} is negative", count)))
    }
}

impl TryFrom<f64> for PageCount {
    type Error = BookletError;

    fn try_from(count: f64) -> Result<Self> {
        if !count.is_finite() {
            return Err(BookletError::InvalidInput(format!(
                "page count {} is not finite",
                count
            )));
        }
        if count.fract() != 0.0 {
            return Err(BookletError::InvalidInput(format!(
                "page count {} is not a whole number",
                count
            )));
        }
        if count < 0.0 {
            return Err(BookletError::InvalidInput(format!(
                "page count {} is negative",
                count
            )));
        }
        if count > usize::MAX as f64 {
            return Err(BookletError::InvalidInput(format!(
                "page count {} is too large",
                count
            )));
        }
        Ok(Self(count as usize))
    }
}

impl FromStr for PageCount {
    type Err = BookletError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(count) = s.parse::<i64>() {
            return Self::try_from(count);
        }
        match s.parse::<f64>() {
            Ok(count) => Self::try_from(count),
            Err(_) => Err(BookletError::InvalidInput(format!(
                "'{}' is not a page count",
                s
            ))),
        }
    }
}

// =============================================================================
// Sequence Steps
// =============================================================================

/// Swap every adjacent pair in place: 0<->1, 2<->3, ...
///
/// A trailing unpaired element is left where it is.
pub fn transpose_pairs<T>(items: &mut [T]) {
    for pair in items.chunks_exact_mut(2) {
        pair.swap(0, 1);
    }
}

/// Turn page indices into slots, blanking any index beyond `page_count`.
pub fn substitute_overflow(
    indices: impl IntoIterator<Item = usize>,
    page_count: usize,
) -> Vec<Slot> {
    indices
        .into_iter()
        .map(|index| {
            if index > page_count {
                Slot::Blank
            } else {
                Slot::Page(index)
            }
        })
        .collect()
}

/// Make the sequence even by inserting a blank before its last element.
///
/// The final entry stays last. Empty and even sequences are unchanged.
pub fn pad_before_last(slots: &mut Vec<Slot>) {
    if slots.len() % 2 == 1 {
        slots.insert(slots.len() - 1, Slot::Blank);
    }
}

// =============================================================================
// Builders
// =============================================================================

/// Front side slots: odd book pages `1, 3, 5, ...` in order.
pub fn build_front_slots(page_count: usize) -> SlotSequence {
    let slots = substitute_overflow((1..=page_count).step_by(2), page_count);
    SlotSequence::new(SheetSide::Front, slots)
}

/// Back side slots: even book pages with each pair transposed,
/// padded to an even length.
pub fn build_back_slots(page_count: usize) -> SlotSequence {
    let mut indices: Vec<usize> = (2..=page_count).step_by(2).collect();
    transpose_pairs(&mut indices);
    let mut slots = substitute_overflow(indices, page_count);
    pad_before_last(&mut slots);
    SlotSequence::new(SheetSide::Back, slots)
}

/// Both slot sequences for a book, grouped by a sheet grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotPlan {
    page_count: usize,
    grid: SheetGrid,
    front: SlotSequence,
    back: SlotSequence,
}

impl SlotPlan {
    /// Plan the front and back sequences for `page_count` book pages.
    pub fn new(page_count: usize, grid: SheetGrid) -> Result<Self> {
        match grid.checked_cells() {
            None => {
                return Err(BookletError::InvalidInput(format!(
                    "sheet grid {}x{} has too many cells",
                    grid.cols, grid.rows
                )));
            }
            Some(0) => {
                return Err(BookletError::InvalidInput(format!(
                    "sheet grid {}x{} has no cells",
                    grid.cols, grid.rows
                )));
            }
            Some(_) => {}
        }

        let plan = Self {
            page_count,
            grid,
            front: build_front_slots(page_count),
            back: build_back_slots(page_count),
        };

        if !plan.is_balanced() {
            log::warn!(
                "{} book pages give {} front sheets but {} back sheets on a {}x{} grid",
                page_count,
                plan.front_sheet_count(),
                plan.back_sheet_count(),
                grid.cols,
                grid.rows
            );
        }

        Ok(plan)
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn grid(&self) -> SheetGrid {
        self.grid
    }

    pub fn front(&self) -> &SlotSequence {
        &self.front
    }

    pub fn back(&self) -> &SlotSequence {
        &self.back
    }

    pub fn sequence(&self, side: SheetSide) -> &SlotSequence {
        match side {
            SheetSide::Front => &self.front,
            SheetSide::Back => &self.back,
        }
    }

    pub fn front_sheet_count(&self) -> usize {
        self.front.sheet_count(self.grid)
    }

    pub fn back_sheet_count(&self) -> usize {
        self.back.sheet_count(self.grid)
    }

    /// Whether front and back need the same number of sheets
    pub fn is_balanced(&self) -> bool {
        self.front_sheet_count() == self.back_sheet_count()
    }
}

// =============================================================================
// Tests
// =============================================================================
